use super::common::success_response;
use crate::{errors::ServiceError, AppState};
use axum::{extract::State, response::Response, routing::get, Router};

pub fn dashboard_routes() -> Router<AppState> {
    Router::new().route("/estadisticas", get(estadisticas))
}

async fn estadisticas(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.dashboard.estadisticas().await?,
    ))
}

use super::common::{found_or_404, success_response};
use crate::{errors::ServiceError, services::metricas::MetricaInput, AppState};
use axum::{
    extract::{Json, Path, State},
    response::Response,
    routing::get,
    Router,
};

/// Creates the router for per-document metric endpoints
pub fn metricas_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_metricas).post(create_metrica))
        .route("/documento/:documento_id", get(list_metricas_by_documento))
        .route("/:id", get(get_metrica).put(update_metrica))
}

async fn list_metricas(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.metricas.list().await?))
}

async fn list_metricas_by_documento(
    State(state): State<AppState>,
    Path(documento_id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state
            .services
            .metricas
            .list_by_documento(documento_id)
            .await?,
    ))
}

async fn get_metrica(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.metricas.get(id).await?))
}

async fn create_metrica(
    State(state): State<AppState>,
    Json(input): Json<MetricaInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.metricas.create(input).await?))
}

async fn update_metrica(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<MetricaInput>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.metricas.update(id, input).await?))
}

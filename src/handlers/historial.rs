use super::common::success_response;
use crate::{errors::ServiceError, services::historial::CreateHistorialInput, AppState};
use axum::{
    extract::{Json, Path, State},
    response::Response,
    routing::get,
    Router,
};

/// Append-only document history.
pub fn historial_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_historial).post(append_historial))
        .route("/documento/:documento_id", get(list_historial_by_documento))
        .route("/usuario/:usuario_id", get(list_historial_by_usuario))
}

async fn list_historial(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.historial.list().await?))
}

async fn list_historial_by_documento(
    State(state): State<AppState>,
    Path(documento_id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state
            .services
            .historial
            .list_by_documento(documento_id)
            .await?,
    ))
}

async fn list_historial_by_usuario(
    State(state): State<AppState>,
    Path(usuario_id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.historial.list_by_usuario(usuario_id).await?,
    ))
}

async fn append_historial(
    State(state): State<AppState>,
    Json(input): Json<CreateHistorialInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.historial.append(input).await?))
}

use super::common::{found_or_404, not_found_response, success_response, StatusBody};
use crate::{
    entities::Lifecycle,
    errors::ServiceError,
    services::sistemas::{CreateSistemaInput, UpdateSistemaInput},
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    response::Response,
    routing::get,
    Router,
};

/// Creates the router for BMS system endpoints
pub fn sistemas_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_sistemas).post(create_sistema))
        .route("/activos", get(list_sistemas_activos))
        .route("/usuario/:usuario_id", get(list_sistemas_by_usuario))
        .route(
            "/:id",
            get(get_sistema).put(update_sistema).delete(deactivate_sistema),
        )
}

async fn list_sistemas(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.sistemas.list().await?))
}

async fn list_sistemas_activos(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.sistemas.list_active().await?))
}

async fn list_sistemas_by_usuario(
    State(state): State<AppState>,
    Path(usuario_id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.sistemas.list_by_usuario(usuario_id).await?,
    ))
}

async fn get_sistema(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.sistemas.get(id).await?))
}

async fn create_sistema(
    State(state): State<AppState>,
    Json(input): Json<CreateSistemaInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.sistemas.create(input).await?))
}

async fn update_sistema(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateSistemaInput>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.sistemas.update(id, input).await?))
}

/// Soft delete; agents and documents pointing at the system are detached.
async fn deactivate_sistema(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    if !state.services.sistemas.deactivate(id).await? {
        return Ok(not_found_response());
    }
    Ok(success_response(StatusBody::lifecycle(
        "Sistema desactivado correctamente",
        id,
        Lifecycle::Inactive,
    )))
}

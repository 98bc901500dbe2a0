use super::common::{found_or_404, not_found_response, success_response, StatusBody};
use crate::{
    entities::Lifecycle,
    errors::ServiceError,
    services::usuarios::{CreateUsuarioInput, UpdateUsuarioInput},
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    response::Response,
    routing::{get, put},
    Router,
};

/// Creates the router for user endpoints
pub fn usuarios_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_usuarios).post(create_usuario))
        .route("/activos", get(list_usuarios_activos))
        .route("/email/:email", get(get_usuario_by_email))
        .route(
            "/:id",
            get(get_usuario).put(update_usuario).delete(deactivate_usuario),
        )
        .route("/:id/reactivar", put(reactivate_usuario))
}

async fn list_usuarios(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.usuarios.list().await?))
}

async fn list_usuarios_activos(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.usuarios.list_active().await?))
}

async fn get_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.usuarios.get(id).await?))
}

async fn get_usuario_by_email(
    State(state): State<AppState>,
    Path(email): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(
        state.services.usuarios.find_by_email(&email).await?,
    ))
}

async fn create_usuario(
    State(state): State<AppState>,
    Json(input): Json<CreateUsuarioInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.usuarios.create(input).await?))
}

async fn update_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateUsuarioInput>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.usuarios.update(id, input).await?))
}

async fn deactivate_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    set_lifecycle(&state, id, Lifecycle::Inactive, "Usuario desactivado correctamente").await
}

async fn reactivate_usuario(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    set_lifecycle(&state, id, Lifecycle::Active, "Usuario reactivado correctamente").await
}

async fn set_lifecycle(
    state: &AppState,
    id: i32,
    lifecycle: Lifecycle,
    message: &str,
) -> Result<Response, ServiceError> {
    if !state.services.usuarios.set_lifecycle(id, lifecycle).await? {
        return Ok(not_found_response());
    }
    Ok(success_response(StatusBody::lifecycle(message, id, lifecycle)))
}

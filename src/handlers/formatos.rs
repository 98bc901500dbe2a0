use super::common::{found_or_404, not_found_response, success_response, StatusBody};
use crate::{
    entities::Lifecycle,
    errors::ServiceError,
    services::formatos::{CreateFormatoInput, UpdateFormatoInput},
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    response::Response,
    routing::get,
    Router,
};

/// Creates the router for document format endpoints
pub fn formatos_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_formatos).post(create_formato))
        .route("/activos", get(list_formatos_activos))
        .route("/codigo/:codigo", get(get_formato_by_codigo))
        .route(
            "/:id",
            get(get_formato).put(update_formato).delete(deactivate_formato),
        )
}

async fn list_formatos(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.formatos.list().await?))
}

async fn list_formatos_activos(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.formatos.list_active().await?))
}

async fn get_formato(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.formatos.get(id).await?))
}

async fn get_formato_by_codigo(
    State(state): State<AppState>,
    Path(codigo): Path<String>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(
        state.services.formatos.find_by_codigo(&codigo).await?,
    ))
}

async fn create_formato(
    State(state): State<AppState>,
    Json(input): Json<CreateFormatoInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.formatos.create(input).await?))
}

async fn update_formato(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateFormatoInput>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.formatos.update(id, input).await?))
}

async fn deactivate_formato(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    if !state
        .services
        .formatos
        .set_lifecycle(id, Lifecycle::Inactive)
        .await?
    {
        return Ok(not_found_response());
    }
    Ok(success_response(StatusBody::lifecycle(
        "Formato desactivado correctamente",
        id,
        Lifecycle::Inactive,
    )))
}

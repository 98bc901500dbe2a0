use super::common::{found_or_404, not_found_response, success_response, StatusBody};
use crate::{
    entities::Lifecycle,
    errors::ServiceError,
    services::agentes::{CreateAgenteInput, UpdateAgenteInput},
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    response::Response,
    routing::get,
    Router,
};

/// Creates the router for AI agent endpoints
pub fn agentes_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_agentes).post(create_agente))
        .route("/activos", get(list_agentes_activos))
        .route("/sistema/:sistema_id", get(list_agentes_by_sistema))
        .route("/formato/:tipo_formato_id", get(list_agentes_by_formato))
        .route(
            "/:id",
            get(get_agente).put(update_agente).delete(deactivate_agente),
        )
}

async fn list_agentes(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.agentes.list().await?))
}

async fn list_agentes_activos(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.agentes.list_active().await?))
}

async fn list_agentes_by_sistema(
    State(state): State<AppState>,
    Path(sistema_id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.agentes.list_by_sistema(sistema_id).await?,
    ))
}

async fn list_agentes_by_formato(
    State(state): State<AppState>,
    Path(tipo_formato_id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.agentes.list_by_formato(tipo_formato_id).await?,
    ))
}

async fn get_agente(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.agentes.get(id).await?))
}

async fn create_agente(
    State(state): State<AppState>,
    Json(input): Json<CreateAgenteInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.agentes.create(input).await?))
}

async fn update_agente(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateAgenteInput>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.agentes.update(id, input).await?))
}

async fn deactivate_agente(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    if !state
        .services
        .agentes
        .set_lifecycle(id, Lifecycle::Inactive)
        .await?
    {
        return Ok(not_found_response());
    }
    Ok(success_response(StatusBody::lifecycle(
        "Agente desactivado correctamente",
        id,
        Lifecycle::Inactive,
    )))
}

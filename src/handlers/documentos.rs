use super::common::{found_or_404, not_found_response, success_response, StatusBody};
use crate::{
    errors::ServiceError,
    services::documentos::{CreateDocumentoInput, UpdateDocumentoInput},
    AppState,
};
use axum::{
    extract::{Json, Path, State},
    response::Response,
    routing::get,
    Router,
};

const ELIMINADO: &str = "ELIMINADO";

/// Creates the router for document endpoints
pub fn documentos_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_documentos).post(create_documento))
        .route("/usuario/:usuario_id", get(list_documentos_by_usuario))
        .route("/sistema/:sistema_id", get(list_documentos_by_sistema))
        .route("/formato/:tipo_formato_id", get(list_documentos_by_formato))
        .route(
            "/:id",
            get(get_documento)
                .put(update_documento)
                .delete(delete_documento),
        )
}

async fn list_documentos(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.documentos.list().await?))
}

async fn list_documentos_by_usuario(
    State(state): State<AppState>,
    Path(usuario_id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.documentos.list_by_usuario(usuario_id).await?,
    ))
}

async fn list_documentos_by_sistema(
    State(state): State<AppState>,
    Path(sistema_id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state.services.documentos.list_by_sistema(sistema_id).await?,
    ))
}

async fn list_documentos_by_formato(
    State(state): State<AppState>,
    Path(tipo_formato_id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(success_response(
        state
            .services
            .documentos
            .list_by_formato(tipo_formato_id)
            .await?,
    ))
}

async fn get_documento(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.documentos.get(id).await?))
}

async fn create_documento(
    State(state): State<AppState>,
    Json(input): Json<CreateDocumentoInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.documentos.create(input).await?))
}

async fn update_documento(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(input): Json<UpdateDocumentoInput>,
) -> Result<Response, ServiceError> {
    Ok(found_or_404(state.services.documentos.update(id, input).await?))
}

async fn delete_documento(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ServiceError> {
    if !state.services.documentos.delete(id).await? {
        return Ok(not_found_response());
    }
    Ok(success_response(StatusBody::new(
        "Documento eliminado correctamente",
        id,
        ELIMINADO,
    )))
}

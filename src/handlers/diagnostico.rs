//! Smoke-test endpoints mounted under `/api/test`.

use super::common::success_response;
use crate::{
    errors::ServiceError,
    services::{documentos::CreateDocumentoInput, sistemas::CreateSistemaInput},
    AppState,
};
use axum::{
    extract::{Json, State},
    response::Response,
    routing::{get, post},
    Router,
};
use serde::Serialize;

pub fn diagnostico_routes() -> Router<AppState> {
    Router::new()
        .route("/status", get(status))
        .route("/usuarios", get(usuarios))
        .route("/formatos", get(formatos))
        .route("/sistemas", get(sistemas))
        .route("/sistema", post(create_sistema))
        .route("/documentos", get(documentos))
        .route("/documento", post(create_documento))
}

#[derive(Debug, Serialize)]
pub struct DiagnosticoStatus {
    pub message: String,
    pub timestamp: String,
    pub usuarios_registrados: u64,
    pub formatos_disponibles: u64,
    pub sistemas_registrados: u64,
    pub documentos_generados: u64,
}

async fn status(State(state): State<AppState>) -> Result<Response, ServiceError> {
    let services = &state.services;
    Ok(success_response(DiagnosticoStatus {
        message: "BMS Assistant API funcionando correctamente".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        usuarios_registrados: services.usuarios.count().await?,
        formatos_disponibles: services.formatos.count().await?,
        sistemas_registrados: services.sistemas.count().await?,
        documentos_generados: services.documentos.count().await?,
    }))
}

async fn usuarios(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.usuarios.list().await?))
}

async fn formatos(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.formatos.list_active().await?))
}

async fn sistemas(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.sistemas.list_active().await?))
}

async fn documentos(State(state): State<AppState>) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.documentos.list().await?))
}

async fn create_sistema(
    State(state): State<AppState>,
    Json(input): Json<CreateSistemaInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.sistemas.create(input).await?))
}

async fn create_documento(
    State(state): State<AppState>,
    Json(input): Json<CreateDocumentoInput>,
) -> Result<Response, ServiceError> {
    Ok(success_response(state.services.documentos.create(input).await?))
}

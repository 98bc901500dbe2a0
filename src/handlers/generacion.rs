use super::common::{success_response, FlexibleId};
use crate::{
    entities::documento,
    errors::ApiError,
    AppState,
};
use axum::{
    extract::{Json, State},
    response::Response,
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub fn generacion_routes() -> Router<AppState> {
    Router::new().route("/generar-documento", post(generar_documento))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerarDocumentoRequest {
    pub tipo_formato: String,
    #[serde(default)]
    pub sistema_id: Option<FlexibleId>,
    #[serde(default)]
    pub usuario_id: Option<FlexibleId>,
    #[serde(default)]
    pub datos: Value,
}

#[derive(Debug, Serialize)]
pub struct GenerarDocumentoResponse {
    pub success: bool,
    pub documento: documento::Model,
    pub mensaje: String,
}

fn parse_id(raw: Option<&FlexibleId>, field: &str) -> Result<Option<i32>, ApiError> {
    match raw {
        None => Ok(None),
        Some(id) => id.as_i32().map(Some).ok_or_else(|| ApiError::BadRequest {
            message: format!("{field} debe ser numérico"),
        }),
    }
}

async fn generar_documento(
    State(state): State<AppState>,
    Json(request): Json<GenerarDocumentoRequest>,
) -> Result<Response, ApiError> {
    let sistema_id = parse_id(request.sistema_id.as_ref(), "sistemaId")?;
    let usuario_id = parse_id(request.usuario_id.as_ref(), "usuarioId")?;

    let documento = state
        .services
        .generacion
        .generar_documento(&request.tipo_formato, sistema_id, usuario_id, &request.datos)
        .await?;

    Ok(success_response(GenerarDocumentoResponse {
        success: true,
        documento,
        mensaje: "Documento generado exitosamente con IA".to_string(),
    }))
}

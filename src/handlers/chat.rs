use super::common::{success_response, FlexibleId};
use crate::{errors::ServiceError, AppState};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

const AGENTE_NO_ENCONTRADO: &str = "Agente no encontrado";

pub fn chat_routes() -> Router<AppState> {
    Router::new().route("/message", post(send_message))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub agent_id: Option<FlexibleId>,
}

/// Chat failures use a bare `{"error": ...}` body rather than the shared
/// error envelope.
#[derive(Debug, Serialize)]
struct ChatError {
    error: String,
}

fn chat_error(message: impl Into<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ChatError {
            error: message.into(),
        }),
    )
        .into_response()
}

async fn send_message(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Response, ServiceError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            debug!(error = %rejection, "Rejected chat payload");
            return Ok(chat_error(rejection.body_text()));
        }
    };

    let Some(message) = request.message else {
        return Ok(chat_error("El campo 'message' es obligatorio"));
    };
    let Some(agente_id) = request.agent_id.as_ref().and_then(FlexibleId::as_i32) else {
        return Ok(chat_error("El campo 'agentId' es obligatorio y debe ser numérico"));
    };

    match state.services.chat.send_message(agente_id, &message).await? {
        Some(reply) => Ok(success_response(reply)),
        None => Ok(chat_error(AGENTE_NO_ENCONTRADO)),
    }
}

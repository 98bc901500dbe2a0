use crate::{
    errors::ServiceError,
    services::{
        agentes::AgenteService,
        gemini::{compose_prompt, LanguageModel},
    },
};
use serde::Serialize;
use std::sync::Arc;
use tracing::instrument;

/// Reply text used when the model answered with no candidates.
pub const EMPTY_REPLY: &str = "Error: No se pudo obtener respuesta de Gemini.";
/// Prefix of the reply text used when the upstream call failed.
pub const UPSTREAM_FAILURE_PREFIX: &str = "Error al comunicar con Gemini: ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatReply {
    pub response: String,
    pub agent_name: String,
}

/// Relays a chat message through an agent's configuration to the model.
///
/// Upstream problems never surface as errors here: they come back as reply
/// text starting with [`UPSTREAM_FAILURE_PREFIX`] or equal to [`EMPTY_REPLY`].
#[derive(Clone)]
pub struct ChatService {
    agentes: Arc<AgenteService>,
    model: Arc<dyn LanguageModel>,
    default_model: String,
}

impl ChatService {
    pub fn new(
        agentes: Arc<AgenteService>,
        model: Arc<dyn LanguageModel>,
        default_model: impl Into<String>,
    ) -> Self {
        Self {
            agentes,
            model,
            default_model: default_model.into(),
        }
    }

    /// `None` when the agent does not exist.
    #[instrument(skip(self, message))]
    pub async fn send_message(
        &self,
        agente_id: i32,
        message: &str,
    ) -> Result<Option<ChatReply>, ServiceError> {
        let Some(agente) = self.agentes.get(agente_id).await? else {
            return Ok(None);
        };

        let model = if agente.modelo_ia.trim().is_empty() {
            self.default_model.as_str()
        } else {
            agente.modelo_ia.as_str()
        };
        let prompt = compose_prompt(agente.system_instruction(), message);

        let response = match self.model.generate(model, &prompt).await {
            Ok(Some(text)) => text,
            Ok(None) => EMPTY_REPLY.to_string(),
            Err(err) => upstream_failure(err),
        };

        Ok(Some(ChatReply {
            response,
            agent_name: agente.nombre,
        }))
    }
}

fn upstream_failure(err: ServiceError) -> String {
    let detail = match err {
        ServiceError::ExternalApiError(detail) => detail,
        other => other.to_string(),
    };
    format!("{}{}", UPSTREAM_FAILURE_PREFIX, detail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_failure_keeps_the_detail() {
        let text = upstream_failure(ServiceError::ExternalApiError("timed out".into()));
        assert_eq!(text, "Error al comunicar con Gemini: timed out");
    }
}

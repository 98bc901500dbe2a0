use crate::{
    entities::documento::{self, EstadoDocumento},
    errors::ServiceError,
    services::{
        documentos::{CreateDocumentoInput, DocumentoService},
        formatos::FormatoService,
    },
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, instrument};

const FALLBACK_CODIGO: &str = "N1";

/// Placeholder document generation. Builds the text locally and stores it as a
/// draft; no model is called.
#[derive(Clone)]
pub struct GeneracionService {
    documentos: Arc<DocumentoService>,
    formatos: Arc<FormatoService>,
}

impl GeneracionService {
    pub fn new(documentos: Arc<DocumentoService>, formatos: Arc<FormatoService>) -> Self {
        Self {
            documentos,
            formatos,
        }
    }

    #[instrument(skip(self, datos))]
    pub async fn generar_documento(
        &self,
        tipo_formato: &str,
        sistema_id: Option<i32>,
        usuario_id: Option<i32>,
        datos: &Value,
    ) -> Result<documento::Model, ServiceError> {
        let tipo_formato_id = self.resolve_formato(tipo_formato).await?;

        let documento = self
            .documentos
            .create(CreateDocumentoInput {
                titulo: format!("Documento generado por IA - {}", tipo_formato),
                contenido: contenido_simulado(tipo_formato, datos),
                tipo_formato_id,
                sistema_id,
                usuario_id,
                agente_id: None,
                estado: EstadoDocumento::Borrador.as_str().to_string(),
                version: None,
                observaciones: None,
                calificacion: None,
            })
            .await?;

        info!(documento_id = documento.id, "Generated placeholder document");
        Ok(documento)
    }

    /// Format id for `codigo`, falling back to N1 for unknown codes.
    async fn resolve_formato(&self, codigo: &str) -> Result<Option<i32>, ServiceError> {
        if let Some(formato) = self.formatos.find_by_codigo(codigo).await? {
            return Ok(Some(formato.id));
        }
        Ok(self
            .formatos
            .find_by_codigo(FALLBACK_CODIGO)
            .await?
            .map(|formato| formato.id))
    }
}

pub fn contenido_simulado(tipo_formato: &str, datos: &Value) -> String {
    format!(
        "Este es un documento de tipo {} generado automáticamente. Datos proporcionados: {}",
        tipo_formato, datos
    )
}

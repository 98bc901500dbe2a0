use crate::{
    entities::historial_documento::{self, Entity as HistorialDocumento},
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::instrument;

/// Append-only document history. Nothing here updates or deletes.
#[derive(Clone)]
pub struct HistorialService {
    db: Arc<DatabaseConnection>,
}

impl HistorialService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<historial_documento::Model>, ServiceError> {
        Ok(HistorialDocumento::find()
            .order_by_asc(historial_documento::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_by_documento(
        &self,
        documento_id: i32,
    ) -> Result<Vec<historial_documento::Model>, ServiceError> {
        Ok(HistorialDocumento::find()
            .filter(historial_documento::Column::DocumentoId.eq(documento_id))
            .order_by_asc(historial_documento::Column::FechaAccion)
            .order_by_asc(historial_documento::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_by_usuario(
        &self,
        usuario_id: i32,
    ) -> Result<Vec<historial_documento::Model>, ServiceError> {
        Ok(HistorialDocumento::find()
            .filter(historial_documento::Column::UsuarioId.eq(usuario_id))
            .order_by_asc(historial_documento::Column::FechaAccion)
            .order_by_asc(historial_documento::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self, input), fields(accion = %input.accion))]
    pub async fn append(
        &self,
        input: CreateHistorialInput,
    ) -> Result<historial_documento::Model, ServiceError> {
        let entry = historial_documento::ActiveModel {
            documento_id: Set(input.documento_id),
            usuario_id: Set(input.usuario_id),
            accion: Set(input.accion),
            detalles: Set(input.detalles),
            fecha_accion: Set(chrono::Utc::now()),
            ..Default::default()
        };

        Ok(entry.insert(&*self.db).await?)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHistorialInput {
    #[serde(default)]
    pub documento_id: Option<i32>,
    #[serde(default)]
    pub usuario_id: Option<i32>,
    pub accion: String,
    #[serde(default)]
    pub detalles: Option<String>,
}

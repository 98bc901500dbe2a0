use crate::{
    entities::metrica_sistema::{self, Entity as MetricaSistema},
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Service for document quality metrics
#[derive(Clone)]
pub struct MetricaService {
    db: Arc<DatabaseConnection>,
}

impl MetricaService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<metrica_sistema::Model>, ServiceError> {
        Ok(MetricaSistema::find()
            .order_by_asc(metrica_sistema::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_by_documento(
        &self,
        documento_id: i32,
    ) -> Result<Vec<metrica_sistema::Model>, ServiceError> {
        Ok(MetricaSistema::find()
            .filter(metrica_sistema::Column::DocumentoId.eq(documento_id))
            .order_by_asc(metrica_sistema::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<metrica_sistema::Model>, ServiceError> {
        Ok(MetricaSistema::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: MetricaInput,
    ) -> Result<metrica_sistema::Model, ServiceError> {
        let metrica = metrica_sistema::ActiveModel {
            documento_id: Set(input.documento_id),
            tiempo_generacion_segundos: Set(input.tiempo_generacion_segundos),
            errores_detectados: Set(input.errores_detectados.unwrap_or(0)),
            observaciones_calidad: Set(input.observaciones_calidad.unwrap_or(0)),
            satisfaccion_usuario: Set(input.satisfaccion_usuario),
            fecha_metricas: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let metrica = metrica.insert(&*self.db).await?;
        info!(metrica_id = metrica.id, "MetricaSistema recorded");
        Ok(metrica)
    }

    /// Overwrites the four measured values. The document link is kept.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: MetricaInput,
    ) -> Result<Option<metrica_sistema::Model>, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut metrica: metrica_sistema::ActiveModel = existing.into();
        metrica.tiempo_generacion_segundos = Set(input.tiempo_generacion_segundos);
        metrica.errores_detectados = Set(input.errores_detectados.unwrap_or(0));
        metrica.observaciones_calidad = Set(input.observaciones_calidad.unwrap_or(0));
        metrica.satisfaccion_usuario = Set(input.satisfaccion_usuario);

        Ok(Some(metrica.update(&*self.db).await?))
    }
}

/// Body for both creating and updating a metric row; `documentoId` is only
/// read on create.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricaInput {
    #[serde(default)]
    pub documento_id: Option<i32>,
    #[serde(default)]
    pub tiempo_generacion_segundos: Option<i32>,
    #[serde(default)]
    pub errores_detectados: Option<i32>,
    #[serde(default)]
    pub observaciones_calidad: Option<i32>,
    #[serde(default)]
    pub satisfaccion_usuario: Option<i32>,
}

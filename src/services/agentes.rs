use crate::{
    entities::{
        agente_ia::{self, Entity as AgenteIa, DEFAULT_MODELO_IA},
        Lifecycle,
    },
    errors::ServiceError,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Service for AI agent configurations
#[derive(Clone)]
pub struct AgenteService {
    db: Arc<DatabaseConnection>,
}

impl AgenteService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<agente_ia::Model>, ServiceError> {
        Ok(AgenteIa::find()
            .order_by_asc(agente_ia::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<agente_ia::Model>, ServiceError> {
        Ok(AgenteIa::find()
            .filter(agente_ia::Column::Activo.eq(true))
            .order_by_asc(agente_ia::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_by_sistema(
        &self,
        sistema_id: i32,
    ) -> Result<Vec<agente_ia::Model>, ServiceError> {
        Ok(AgenteIa::find()
            .filter(agente_ia::Column::SistemaId.eq(sistema_id))
            .order_by_asc(agente_ia::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_by_formato(
        &self,
        tipo_formato_id: i32,
    ) -> Result<Vec<agente_ia::Model>, ServiceError> {
        Ok(AgenteIa::find()
            .filter(agente_ia::Column::TipoFormatoId.eq(tipo_formato_id))
            .order_by_asc(agente_ia::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<agente_ia::Model>, ServiceError> {
        Ok(AgenteIa::find_by_id(id).one(&*self.db).await?)
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(AgenteIa::find().count(&*self.db).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create(&self, input: CreateAgenteInput) -> Result<agente_ia::Model, ServiceError> {
        let agente = agente_ia::ActiveModel {
            nombre: Set(input.nombre),
            descripcion: Set(input.descripcion),
            sistema_id: Set(input.sistema_id),
            tipo_formato_id: Set(input.tipo_formato_id),
            configuracion: Set(input.configuracion),
            modelo_ia: Set(input.modelo_ia),
            activo: Set(input.activo),
            fecha_creacion: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let agente = agente.insert(&*self.db).await?;
        info!(agente_id = agente.id, modelo = %agente.modelo_ia, "AgenteIA created");
        Ok(agente)
    }

    /// Overwrites nombre, descripcion, configuracion, modeloIA and activo.
    /// System and format links are left as they are.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdateAgenteInput,
    ) -> Result<Option<agente_ia::Model>, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut agente: agente_ia::ActiveModel = existing.into();
        agente.nombre = Set(input.nombre);
        agente.descripcion = Set(input.descripcion);
        agente.configuracion = Set(input.configuracion);
        agente.modelo_ia = Set(input.modelo_ia);
        agente.activo = Set(input.activo);

        Ok(Some(agente.update(&*self.db).await?))
    }

    #[instrument(skip(self))]
    pub async fn set_lifecycle(&self, id: i32, lifecycle: Lifecycle) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };
        let previous = existing.lifecycle();

        let mut agente: agente_ia::ActiveModel = existing.into();
        agente.activo = Set(lifecycle.is_active());
        agente.update(&*self.db).await?;

        info!(
            agente_id = id,
            from = previous.status_label(),
            to = lifecycle.status_label(),
            "AgenteIA lifecycle changed"
        );
        Ok(true)
    }
}

fn default_modelo_ia() -> String {
    DEFAULT_MODELO_IA.to_string()
}

fn default_activo() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAgenteInput {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub sistema_id: Option<i32>,
    #[serde(default)]
    pub tipo_formato_id: Option<i32>,
    #[serde(default)]
    pub configuracion: Option<String>,
    #[serde(rename = "modeloIA", default = "default_modelo_ia")]
    pub modelo_ia: String,
    #[serde(default = "default_activo")]
    pub activo: bool,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAgenteInput {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub configuracion: Option<String>,
    #[serde(rename = "modeloIA", default = "default_modelo_ia")]
    pub modelo_ia: String,
    #[serde(default = "default_activo")]
    pub activo: bool,
}

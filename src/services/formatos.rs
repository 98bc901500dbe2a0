use crate::{
    entities::{
        tipo_formato::{self, Entity as TipoFormato},
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

/// Service for document format types
#[derive(Clone)]
pub struct FormatoService {
    db: Arc<DatabaseConnection>,
}

impl FormatoService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<tipo_formato::Model>, ServiceError> {
        Ok(TipoFormato::find()
            .order_by_asc(tipo_formato::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<tipo_formato::Model>, ServiceError> {
        Ok(TipoFormato::find()
            .filter(tipo_formato::Column::Activo.eq(true))
            .order_by_asc(tipo_formato::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<tipo_formato::Model>, ServiceError> {
        Ok(TipoFormato::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn find_by_codigo(
        &self,
        codigo: &str,
    ) -> Result<Option<tipo_formato::Model>, ServiceError> {
        Ok(TipoFormato::find()
            .filter(tipo_formato::Column::Codigo.eq(codigo))
            .one(&*self.db)
            .await?)
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(TipoFormato::find().count(&*self.db).await?)
    }

    #[instrument(skip(self, input), fields(codigo = %input.codigo))]
    pub async fn create(
        &self,
        input: CreateFormatoInput,
    ) -> Result<tipo_formato::Model, ServiceError> {
        let formato = tipo_formato::ActiveModel {
            codigo: Set(input.codigo),
            nombre: Set(input.nombre),
            descripcion: Set(input.descripcion),
            plantilla: Set(input.plantilla),
            activo: Set(input.activo.unwrap_or(true)),
            ..Default::default()
        };

        let formato = formato
            .insert(&*self.db)
            .await
            .map_err(ServiceError::from_write)?;
        info!(formato_id = formato.id, "TipoFormato created");
        Ok(formato)
    }

    /// Overwrites nombre, descripcion and plantilla. The code is immutable.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdateFormatoInput,
    ) -> Result<Option<tipo_formato::Model>, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut formato: tipo_formato::ActiveModel = existing.into();
        formato.nombre = Set(input.nombre);
        formato.descripcion = Set(input.descripcion);
        formato.plantilla = Set(input.plantilla);

        Ok(Some(formato.update(&*self.db).await?))
    }

    #[instrument(skip(self))]
    pub async fn set_lifecycle(&self, id: i32, lifecycle: Lifecycle) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };
        let previous = existing.lifecycle();

        let mut formato: tipo_formato::ActiveModel = existing.into();
        formato.activo = Set(lifecycle.is_active());
        formato.update(&*self.db).await?;

        info!(
            formato_id = id,
            from = previous.status_label(),
            to = lifecycle.status_label(),
            "TipoFormato lifecycle changed"
        );
        Ok(true)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFormatoInput {
    pub codigo: String,
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub plantilla: Option<String>,
    #[serde(default)]
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFormatoInput {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub plantilla: Option<String>,
}

use crate::{
    entities::{agente_ia, documento, sistema_bms, sistema_bms::Entity as SistemaBms, Lifecycle},
    errors::ServiceError,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Service for BMS installations
#[derive(Clone)]
pub struct SistemaService {
    db: Arc<DatabaseConnection>,
}

impl SistemaService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<sistema_bms::Model>, ServiceError> {
        Ok(SistemaBms::find()
            .order_by_asc(sistema_bms::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<sistema_bms::Model>, ServiceError> {
        Ok(SistemaBms::find()
            .filter(sistema_bms::Column::Activo.eq(true))
            .order_by_asc(sistema_bms::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_by_usuario(
        &self,
        usuario_id: i32,
    ) -> Result<Vec<sistema_bms::Model>, ServiceError> {
        Ok(SistemaBms::find()
            .filter(sistema_bms::Column::UsuarioId.eq(usuario_id))
            .order_by_asc(sistema_bms::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<sistema_bms::Model>, ServiceError> {
        Ok(SistemaBms::find_by_id(id).one(&*self.db).await?)
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(SistemaBms::find().count(&*self.db).await?)
    }

    #[instrument(skip(self, input))]
    pub async fn create(
        &self,
        input: CreateSistemaInput,
    ) -> Result<sistema_bms::Model, ServiceError> {
        let sistema = sistema_bms::ActiveModel {
            nombre: Set(input.nombre),
            descripcion: Set(input.descripcion),
            protocolo_comunicacion: Set(input.protocolo_comunicacion),
            fabricante: Set(input.fabricante),
            usuario_id: Set(input.usuario_id),
            activo: Set(input.activo.unwrap_or(true)),
            fecha_creacion: Set(chrono::Utc::now()),
            ..Default::default()
        };

        let sistema = sistema.insert(&*self.db).await?;
        info!(sistema_id = sistema.id, "SistemaBMS created");
        Ok(sistema)
    }

    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdateSistemaInput,
    ) -> Result<Option<sistema_bms::Model>, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut sistema: sistema_bms::ActiveModel = existing.into();
        sistema.nombre = Set(input.nombre);
        sistema.descripcion = Set(input.descripcion);
        sistema.protocolo_comunicacion = Set(input.protocolo_comunicacion);
        sistema.fabricante = Set(input.fabricante);

        Ok(Some(sistema.update(&*self.db).await?))
    }

    /// Marks the system inactive and detaches its agents and documents, all in
    /// one transaction. Returns `false` when the system does not exist.
    #[instrument(skip(self))]
    pub async fn deactivate(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;

        let Some(existing) = SistemaBms::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(false);
        };
        let previous = existing.lifecycle();

        let agentes = agente_ia::Entity::update_many()
            .col_expr(agente_ia::Column::SistemaId, Expr::value(Option::<i32>::None))
            .filter(agente_ia::Column::SistemaId.eq(id))
            .exec(&txn)
            .await?;

        let documentos = documento::Entity::update_many()
            .col_expr(documento::Column::SistemaId, Expr::value(Option::<i32>::None))
            .filter(documento::Column::SistemaId.eq(id))
            .exec(&txn)
            .await?;

        let mut sistema: sistema_bms::ActiveModel = existing.into();
        sistema.activo = Set(Lifecycle::Inactive.is_active());
        sistema.update(&txn).await?;

        txn.commit().await?;

        info!(
            sistema_id = id,
            from = previous.status_label(),
            agentes_desvinculados = agentes.rows_affected,
            documentos_desvinculados = documentos.rows_affected,
            "SistemaBMS deactivated"
        );
        Ok(true)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSistemaInput {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub protocolo_comunicacion: Option<String>,
    #[serde(default)]
    pub fabricante: Option<String>,
    #[serde(default)]
    pub usuario_id: Option<i32>,
    #[serde(default)]
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSistemaInput {
    pub nombre: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub protocolo_comunicacion: Option<String>,
    #[serde(default)]
    pub fabricante: Option<String>,
}

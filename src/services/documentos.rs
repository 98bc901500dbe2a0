use crate::{
    entities::{
        documento::{self, Entity as Documento, EstadoDocumento},
        historial_documento, metrica_sistema,
    },
    errors::ServiceError,
};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

/// Service for generated documents
#[derive(Clone)]
pub struct DocumentoService {
    db: Arc<DatabaseConnection>,
}

impl DocumentoService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<documento::Model>, ServiceError> {
        Ok(Documento::find()
            .order_by_asc(documento::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_by_usuario(
        &self,
        usuario_id: i32,
    ) -> Result<Vec<documento::Model>, ServiceError> {
        self.list_where(documento::Column::UsuarioId, usuario_id)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_sistema(
        &self,
        sistema_id: i32,
    ) -> Result<Vec<documento::Model>, ServiceError> {
        self.list_where(documento::Column::SistemaId, sistema_id)
            .await
    }

    #[instrument(skip(self))]
    pub async fn list_by_formato(
        &self,
        tipo_formato_id: i32,
    ) -> Result<Vec<documento::Model>, ServiceError> {
        self.list_where(documento::Column::TipoFormatoId, tipo_formato_id)
            .await
    }

    async fn list_where(
        &self,
        column: documento::Column,
        id: i32,
    ) -> Result<Vec<documento::Model>, ServiceError> {
        Ok(Documento::find()
            .filter(column.eq(id))
            .order_by_asc(documento::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<documento::Model>, ServiceError> {
        Ok(Documento::find_by_id(id).one(&*self.db).await?)
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(Documento::find().count(&*self.db).await?)
    }

    #[instrument(skip(self, input), fields(titulo = %input.titulo))]
    pub async fn create(
        &self,
        input: CreateDocumentoInput,
    ) -> Result<documento::Model, ServiceError> {
        let documento = documento::ActiveModel {
            titulo: Set(input.titulo),
            contenido: Set(input.contenido),
            tipo_formato_id: Set(input.tipo_formato_id),
            sistema_id: Set(input.sistema_id),
            usuario_id: Set(input.usuario_id),
            agente_id: Set(input.agente_id),
            estado: Set(input.estado),
            version: Set(input.version.unwrap_or(1)),
            observaciones: Set(input.observaciones),
            calificacion: Set(input.calificacion),
            ..Default::default()
        };

        let documento = documento.insert(&*self.db).await?;
        info!(documento_id = documento.id, estado = %documento.estado, "Documento created");
        Ok(documento)
    }

    /// Overwrites titulo, contenido, estado, observaciones and calificacion.
    /// `version` is left alone; `fechaActualizacion` is refreshed on save.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdateDocumentoInput,
    ) -> Result<Option<documento::Model>, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut documento: documento::ActiveModel = existing.into();
        documento.titulo = Set(input.titulo);
        documento.contenido = Set(input.contenido);
        documento.estado = Set(input.estado);
        documento.observaciones = Set(input.observaciones);
        documento.calificacion = Set(input.calificacion);

        Ok(Some(documento.update(&*self.db).await?))
    }

    /// Removes the document after detaching its history and metric rows.
    /// Returns `false` when the document does not exist.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        let txn = self.db.begin().await?;

        historial_documento::Entity::update_many()
            .col_expr(
                historial_documento::Column::DocumentoId,
                Expr::value(Option::<i32>::None),
            )
            .filter(historial_documento::Column::DocumentoId.eq(id))
            .exec(&txn)
            .await?;

        metrica_sistema::Entity::update_many()
            .col_expr(
                metrica_sistema::Column::DocumentoId,
                Expr::value(Option::<i32>::None),
            )
            .filter(metrica_sistema::Column::DocumentoId.eq(id))
            .exec(&txn)
            .await?;

        let result = Documento::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        txn.commit().await?;
        info!(documento_id = id, "Documento deleted");
        Ok(true)
    }
}

fn default_estado() -> String {
    EstadoDocumento::Borrador.as_str().to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocumentoInput {
    pub titulo: String,
    pub contenido: String,
    #[serde(default)]
    pub tipo_formato_id: Option<i32>,
    #[serde(default)]
    pub sistema_id: Option<i32>,
    #[serde(default)]
    pub usuario_id: Option<i32>,
    #[serde(default)]
    pub agente_id: Option<i32>,
    #[serde(default = "default_estado")]
    pub estado: String,
    #[serde(default)]
    pub version: Option<i32>,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub calificacion: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocumentoInput {
    pub titulo: String,
    pub contenido: String,
    #[serde(default = "default_estado")]
    pub estado: String,
    #[serde(default)]
    pub observaciones: Option<String>,
    #[serde(default)]
    pub calificacion: Option<i32>,
}

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Append-only audit entry for a document.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "historial_documentos")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(nullable)]
    pub documento_id: Option<i32>,
    #[sea_orm(nullable)]
    pub usuario_id: Option<i32>,
    pub accion: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub detalles: Option<String>,
    pub fecha_accion: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::documento::Entity",
        from = "Column::DocumentoId",
        to = "super::documento::Column::Id"
    )]
    Documento,
}

impl Related<super::documento::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documento.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

use super::Lifecycle;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A building management system installation owned by a user.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sistemas_bms")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nombre: String,
    #[sea_orm(nullable)]
    pub descripcion: Option<String>,
    #[sea_orm(nullable)]
    pub protocolo_comunicacion: Option<String>,
    #[sea_orm(nullable)]
    pub fabricante: Option<String>,
    #[sea_orm(nullable)]
    pub usuario_id: Option<i32>,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::UsuarioId",
        to = "super::usuario::Column::Id"
    )]
    Usuario,
    #[sea_orm(has_many = "super::agente_ia::Entity")]
    Agentes,
    #[sea_orm(has_many = "super::documento::Entity")]
    Documentos,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
}

impl Related<super::agente_ia::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Agentes.def()
    }
}

impl Related<super::documento::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documentos.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from(self.activo)
    }
}

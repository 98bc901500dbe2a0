use super::Lifecycle;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Document template type, identified by a unique code (N1, N2, N3).
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "tipos_formato")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub codigo: String,
    pub nombre: String,
    #[sea_orm(nullable)]
    pub descripcion: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub plantilla: Option<String>,
    pub activo: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::agente_ia::Entity")]
    Agentes,
    #[sea_orm(has_many = "super::documento::Entity")]
    Documentos,
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

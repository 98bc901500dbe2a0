use super::Lifecycle;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MODELO_IA: &str = "gemini-pro";

/// Named agent configuration: system instruction, target system and format,
/// and the model used to answer.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "agentes_ia")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub nombre: String,
    #[sea_orm(nullable)]
    pub descripcion: Option<String>,
    #[sea_orm(nullable)]
    pub sistema_id: Option<i32>,
    #[sea_orm(nullable)]
    pub tipo_formato_id: Option<i32>,
    /// Free-form instruction text (often JSON) sent ahead of each chat message
    #[sea_orm(column_type = "Text", nullable)]
    pub configuracion: Option<String>,
    #[serde(rename = "modeloIA")]
    pub modelo_ia: String,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sistema_bms::Entity",
        from = "Column::SistemaId",
        to = "super::sistema_bms::Column::Id"
    )]
    Sistema,
    #[sea_orm(
        belongs_to = "super::tipo_formato::Entity",
        from = "Column::TipoFormatoId",
        to = "super::tipo_formato::Column::Id"
    )]
    TipoFormato,
}

impl Related<super::sistema_bms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sistema.def()
    }
}

impl Related<super::tipo_formato::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TipoFormato.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from(self.activo)
    }

    /// The instruction text, if a non-empty one is configured.
    pub fn system_instruction(&self) -> Option<&str> {
        self.configuracion
            .as_deref()
            .filter(|s| !s.is_empty())
    }
}

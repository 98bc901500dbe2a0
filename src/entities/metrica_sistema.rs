use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Quality metrics recorded for a document. A document may have many rows.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "metricas_sistema")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(nullable)]
    pub documento_id: Option<i32>,
    #[sea_orm(nullable)]
    pub tiempo_generacion_segundos: Option<i32>,
    pub errores_detectados: i32,
    pub observaciones_calidad: i32,
    #[sea_orm(nullable)]
    pub satisfaccion_usuario: Option<i32>,
    pub fecha_metricas: DateTime<Utc>,
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

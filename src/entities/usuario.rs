use super::Lifecycle;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// Application user. Passwords are kept as given; nothing hashes them.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "usuarios")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub nombre: String,
    pub apellido: String,
    pub rol: String,
    pub empresa: String,
    #[sea_orm(nullable)]
    pub especialidad: Option<String>,
    pub activo: bool,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sistema_bms::Entity")]
    Sistemas,
    #[sea_orm(has_many = "super::documento::Entity")]
    Documentos,
}

impl Related<super::sistema_bms::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sistemas.def()
    }
}

impl Related<super::documento::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Documentos.def()
    }
}

#[async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;
        let now = Utc::now();

        if insert {
            if let NotSet = active_model.fecha_creacion {
                active_model.fecha_creacion = Set(now);
            }
            if let NotSet = active_model.activo {
                active_model.activo = Set(true);
            }
        }

        active_model.fecha_actualizacion = Set(now);
        Ok(active_model)
    }
}

impl Model {
    pub fn lifecycle(&self) -> Lifecycle {
        Lifecycle::from(self.activo)
    }
}

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::ActiveValue::{NotSet, Set};
use serde::{Deserialize, Serialize};

/// A generated document. `estado` is stored as free text; see [`EstadoDocumento`]
/// for the recognised values.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "documentos")]
#[serde(rename_all = "camelCase")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub titulo: String,
    #[sea_orm(column_type = "Text")]
    pub contenido: String,
    #[sea_orm(nullable)]
    pub tipo_formato_id: Option<i32>,
    #[sea_orm(nullable)]
    pub sistema_id: Option<i32>,
    #[sea_orm(nullable)]
    pub usuario_id: Option<i32>,
    #[sea_orm(nullable)]
    pub agente_id: Option<i32>,
    pub estado: String,
    pub version: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub observaciones: Option<String>,
    #[sea_orm(nullable)]
    pub calificacion: Option<i32>,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_actualizacion: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::usuario::Entity",
        from = "Column::UsuarioId",
        to = "super::usuario::Column::Id"
    )]
    Usuario,
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
    #[sea_orm(has_many = "super::historial_documento::Entity")]
    Historial,
    #[sea_orm(has_many = "super::metrica_sistema::Entity")]
    Metricas,
}

impl Related<super::usuario::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Usuario.def()
    }
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

impl Related<super::historial_documento::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Historial.def()
    }
}

impl Related<super::metrica_sistema::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Metricas.def()
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
            if let NotSet = active_model.estado {
                active_model.estado = Set(EstadoDocumento::Borrador.as_str().to_string());
            }
            if let NotSet = active_model.version {
                active_model.version = Set(1);
            }
        }

        // refreshed on every save, inserts included
        active_model.fecha_actualizacion = Set(now);
        Ok(active_model)
    }
}

/// Recognised document states. Transitions are not enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EstadoDocumento {
    Borrador,
    Revision,
    Aprobado,
}

impl EstadoDocumento {
    pub const ALL: [EstadoDocumento; 3] = [
        EstadoDocumento::Borrador,
        EstadoDocumento::Revision,
        EstadoDocumento::Aprobado,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EstadoDocumento::Borrador => "BORRADOR",
            EstadoDocumento::Revision => "REVISION",
            EstadoDocumento::Aprobado => "APROBADO",
        }
    }

    /// Exact, case-sensitive match against the stored label.
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|estado| estado.as_str() == raw)
    }
}

impl Model {
    pub fn estado_conocido(&self) -> Option<EstadoDocumento> {
        EstadoDocumento::parse(&self.estado)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estado_labels_parse_exactly() {
        for estado in EstadoDocumento::ALL {
            assert_eq!(EstadoDocumento::parse(estado.as_str()), Some(estado));
        }
        assert_eq!(EstadoDocumento::parse("borrador"), None);
        assert_eq!(EstadoDocumento::parse("PUBLICADO"), None);
    }
}

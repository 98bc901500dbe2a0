use crate::{
    entities::{
        usuario::{self, Entity as Usuario},
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
use tracing::{info, instrument, warn};

/// Service for managing application users
#[derive(Clone)]
pub struct UsuarioService {
    db: Arc<DatabaseConnection>,
}

impl UsuarioService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<usuario::Model>, ServiceError> {
        Ok(Usuario::find()
            .order_by_asc(usuario::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn list_active(&self) -> Result<Vec<usuario::Model>, ServiceError> {
        Ok(Usuario::find()
            .filter(usuario::Column::Activo.eq(true))
            .order_by_asc(usuario::Column::Id)
            .all(&*self.db)
            .await?)
    }

    #[instrument(skip(self))]
    pub async fn get(&self, id: i32) -> Result<Option<usuario::Model>, ServiceError> {
        Ok(Usuario::find_by_id(id).one(&*self.db).await?)
    }

    #[instrument(skip(self))]
    pub async fn find_by_email(&self, email: &str) -> Result<Option<usuario::Model>, ServiceError> {
        Ok(Usuario::find()
            .filter(usuario::Column::Email.eq(email))
            .one(&*self.db)
            .await?)
    }

    pub async fn count(&self) -> Result<u64, ServiceError> {
        Ok(Usuario::find().count(&*self.db).await?)
    }

    /// Registers a user. A second user with the same email is a conflict.
    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create(&self, input: CreateUsuarioInput) -> Result<usuario::Model, ServiceError> {
        if self.find_by_email(&input.email).await?.is_some() {
            warn!("Rejected duplicate email");
            return Err(ServiceError::Conflict(format!(
                "Email {} already registered",
                input.email
            )));
        }

        let usuario = usuario::ActiveModel {
            email: Set(input.email),
            password_hash: Set(input.password_hash),
            nombre: Set(input.nombre),
            apellido: Set(input.apellido),
            rol: Set(input.rol),
            empresa: Set(input.empresa),
            especialidad: Set(input.especialidad),
            activo: Set(input.activo.unwrap_or(true)),
            ..Default::default()
        };

        // the unique index still guards against a concurrent insert
        let usuario = usuario
            .insert(&*self.db)
            .await
            .map_err(ServiceError::from_write)?;

        info!(usuario_id = usuario.id, "Usuario created");
        Ok(usuario)
    }

    /// Overwrites the editable profile fields. `None` when the user does not exist.
    #[instrument(skip(self, input))]
    pub async fn update(
        &self,
        id: i32,
        input: UpdateUsuarioInput,
    ) -> Result<Option<usuario::Model>, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(None);
        };

        let mut usuario: usuario::ActiveModel = existing.into();
        usuario.email = Set(input.email);
        usuario.password_hash = Set(input.password_hash);
        usuario.nombre = Set(input.nombre);
        usuario.apellido = Set(input.apellido);
        usuario.rol = Set(input.rol);
        usuario.empresa = Set(input.empresa);
        usuario.especialidad = Set(input.especialidad);

        let usuario = usuario
            .update(&*self.db)
            .await
            .map_err(ServiceError::from_write)?;
        Ok(Some(usuario))
    }

    /// Flips the `activo` flag. Returns `false` when the user does not exist.
    #[instrument(skip(self))]
    pub async fn set_lifecycle(&self, id: i32, lifecycle: Lifecycle) -> Result<bool, ServiceError> {
        let Some(existing) = self.get(id).await? else {
            return Ok(false);
        };
        let previous = existing.lifecycle();

        let mut usuario: usuario::ActiveModel = existing.into();
        usuario.activo = Set(lifecycle.is_active());
        usuario.update(&*self.db).await?;

        info!(
            usuario_id = id,
            from = previous.status_label(),
            to = lifecycle.status_label(),
            "Usuario lifecycle changed"
        );
        Ok(true)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUsuarioInput {
    pub email: String,
    #[serde(alias = "password")]
    pub password_hash: String,
    pub nombre: String,
    pub apellido: String,
    pub rol: String,
    pub empresa: String,
    #[serde(default)]
    pub especialidad: Option<String>,
    #[serde(default)]
    pub activo: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUsuarioInput {
    pub email: String,
    #[serde(alias = "password")]
    pub password_hash: String,
    pub nombre: String,
    pub apellido: String,
    pub rol: String,
    pub empresa: String,
    #[serde(default)]
    pub especialidad: Option<String>,
}

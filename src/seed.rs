//! Bootstrap data: the three document formats and three demo users.
//!
//! Each table is only touched while it is empty.

use crate::{
    errors::ServiceError,
    services::{
        formatos::{CreateFormatoInput, FormatoService},
        usuarios::{CreateUsuarioInput, UsuarioService},
    },
};
use serde::Serialize;
use tracing::info;

const FORMATOS: [(&str, &str, &str); 3] = [
    (
        "N1",
        "Formato de Comisionamiento",
        "Documentación de actividades de comisionamiento del sistema",
    ),
    (
        "N2",
        "Reporte de Pruebas",
        "Reporte técnico de pruebas realizadas al sistema",
    ),
    (
        "N3",
        "Documentación Técnica",
        "Documentación técnica del sistema integrado",
    ),
];

// email, password, nombre, apellido, rol, empresa, especialidad
const USUARIOS: [(&str, &str, &str, &str, &str, &str, &str); 3] = [
    (
        "admin@indra.com",
        "admin123",
        "Admin",
        "Sistema",
        "ADMIN",
        "INDRA",
        "Sistemas",
    ),
    (
        "supervisor@indra.com",
        "super123",
        "Carlos",
        "Supervisor",
        "SUPERVISOR",
        "INDRA",
        "HVAC",
    ),
    (
        "practicante@indra.com",
        "pract123",
        "Ana",
        "Practicante",
        "PRACTICANTE",
        "INDRA",
        "Eléctricos",
    ),
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub formatos_insertados: usize,
    pub usuarios_insertados: usize,
}

/// Inserts the fixed rows into whichever of the two tables is empty.
pub async fn seed_defaults(
    formatos: &FormatoService,
    usuarios: &UsuarioService,
) -> Result<SeedReport, ServiceError> {
    let mut report = SeedReport::default();

    if formatos.count().await? == 0 {
        for (codigo, nombre, descripcion) in FORMATOS {
            formatos
                .create(CreateFormatoInput {
                    codigo: codigo.to_string(),
                    nombre: nombre.to_string(),
                    descripcion: Some(descripcion.to_string()),
                    plantilla: None,
                    activo: Some(true),
                })
                .await?;
            report.formatos_insertados += 1;
        }
        info!("Tipos de formato N1, N2, N3 insertados");
    }

    if usuarios.count().await? == 0 {
        for (email, password, nombre, apellido, rol, empresa, especialidad) in USUARIOS {
            usuarios
                .create(CreateUsuarioInput {
                    email: email.to_string(),
                    password_hash: password.to_string(),
                    nombre: nombre.to_string(),
                    apellido: apellido.to_string(),
                    rol: rol.to_string(),
                    empresa: empresa.to_string(),
                    especialidad: Some(especialidad.to_string()),
                    activo: Some(true),
                })
                .await?;
            report.usuarios_insertados += 1;
        }
        info!("Usuarios de prueba insertados");
    }

    Ok(report)
}

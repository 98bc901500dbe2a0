pub mod agente_ia;
pub mod documento;
pub mod historial_documento;
pub mod metrica_sistema;
pub mod sistema_bms;
pub mod tipo_formato;
pub mod usuario;

use serde::{Deserialize, Serialize};

/// Two-state lifecycle behind the `activo` flag.
///
/// Inactive records stay retrievable by id; they only drop out of the
/// active-only listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Lifecycle {
    Active,
    Inactive,
}

impl Lifecycle {
    pub fn is_active(self) -> bool {
        matches!(self, Lifecycle::Active)
    }

    /// Status label reported by the deactivate/reactivate endpoints.
    pub fn status_label(self) -> &'static str {
        match self {
            Lifecycle::Active => "ACTIVO",
            Lifecycle::Inactive => "DESACTIVADO",
        }
    }
}

impl From<bool> for Lifecycle {
    fn from(activo: bool) -> Self {
        if activo {
            Lifecycle::Active
        } else {
            Lifecycle::Inactive
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_follows_flag() {
        assert_eq!(Lifecycle::from(true), Lifecycle::Active);
        assert_eq!(Lifecycle::from(false), Lifecycle::Inactive);
        assert!(Lifecycle::Active.is_active());
        assert!(!Lifecycle::Inactive.is_active());
        assert_eq!(Lifecycle::Inactive.status_label(), "DESACTIVADO");
    }
}

pub mod agentes;
pub mod chat;
pub mod common;
pub mod dashboard;
pub mod diagnostico;
pub mod documentos;
pub mod formatos;
pub mod generacion;
pub mod health;
pub mod historial;
pub mod metricas;
pub mod sistemas;
pub mod usuarios;

use crate::{
    config::AppConfig,
    db::DbPool,
    services::{
        agentes::AgenteService, chat::ChatService, dashboard::DashboardService,
        documentos::DocumentoService, formatos::FormatoService, gemini::LanguageModel,
        generacion::GeneracionService, historial::HistorialService, metricas::MetricaService,
        sistemas::SistemaService, usuarios::UsuarioService,
    },
};
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub usuarios: Arc<UsuarioService>,
    pub sistemas: Arc<SistemaService>,
    pub formatos: Arc<FormatoService>,
    pub agentes: Arc<AgenteService>,
    pub documentos: Arc<DocumentoService>,
    pub historial: Arc<HistorialService>,
    pub metricas: Arc<MetricaService>,
    pub dashboard: Arc<DashboardService>,
    pub chat: Arc<ChatService>,
    pub generacion: Arc<GeneracionService>,
}

impl AppServices {
    /// Builds every service over one shared pool. The language model is
    /// injected so tests can point chat at a stub endpoint.
    pub fn new(db_pool: Arc<DbPool>, config: &AppConfig, model: Arc<dyn LanguageModel>) -> Self {
        let usuarios = Arc::new(UsuarioService::new(db_pool.clone()));
        let sistemas = Arc::new(SistemaService::new(db_pool.clone()));
        let formatos = Arc::new(FormatoService::new(db_pool.clone()));
        let agentes = Arc::new(AgenteService::new(db_pool.clone()));
        let documentos = Arc::new(DocumentoService::new(db_pool.clone()));
        let historial = Arc::new(HistorialService::new(db_pool.clone()));
        let metricas = Arc::new(MetricaService::new(db_pool));

        let dashboard = Arc::new(DashboardService::new(
            usuarios.clone(),
            documentos.clone(),
            sistemas.clone(),
            agentes.clone(),
            metricas.clone(),
        ));
        let chat = Arc::new(ChatService::new(
            agentes.clone(),
            model,
            config.gemini_default_model.clone(),
        ));
        let generacion = Arc::new(GeneracionService::new(
            documentos.clone(),
            formatos.clone(),
        ));

        Self {
            usuarios,
            sistemas,
            formatos,
            agentes,
            documentos,
            historial,
            metricas,
            dashboard,
            chat,
            generacion,
        }
    }
}

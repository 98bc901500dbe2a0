// Entity services
pub mod agentes;
pub mod documentos;
pub mod formatos;
pub mod historial;
pub mod metricas;
pub mod sistemas;
pub mod usuarios;

// Aggregation and AI
pub mod chat;
pub mod dashboard;
pub mod gemini;
pub mod generacion;

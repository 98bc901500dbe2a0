use crate::{
    entities::{
        documento::{self, EstadoDocumento},
        metrica_sistema,
    },
    errors::ServiceError,
    services::{
        agentes::AgenteService, documentos::DocumentoService, metricas::MetricaService,
        sistemas::SistemaService, usuarios::UsuarioService,
    },
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estadisticas {
    pub total_usuarios: usize,
    pub total_documentos: usize,
    pub total_sistemas: usize,
    pub total_agentes: usize,
    pub documentos_por_estado: DocumentosPorEstado,
    pub metricas_promedio: MetricasPromedio,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct DocumentosPorEstado {
    pub borrador: u64,
    pub revision: u64,
    pub aprobado: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricasPromedio {
    pub tiempo_promedio_generacion: f64,
    pub total_errores: i64,
    pub satisfaccion_promedio: f64,
}

/// Counts documents per recognised state. Unknown states land in no bucket.
pub fn documentos_por_estado(documentos: &[documento::Model]) -> DocumentosPorEstado {
    documentos
        .iter()
        .filter_map(documento::Model::estado_conocido)
        .fold(DocumentosPorEstado::default(), |mut acc, estado| {
            match estado {
                EstadoDocumento::Borrador => acc.borrador += 1,
                EstadoDocumento::Revision => acc.revision += 1,
                EstadoDocumento::Aprobado => acc.aprobado += 1,
            }
            acc
        })
}

/// Averages and sums over every metric row. Missing values count as zero and
/// an empty slice yields zeros.
pub fn metricas_promedio(metricas: &[metrica_sistema::Model]) -> MetricasPromedio {
    if metricas.is_empty() {
        return MetricasPromedio::default();
    }

    let n = metricas.len() as f64;
    let (tiempo, errores, satisfaccion) =
        metricas
            .iter()
            .fold((0i64, 0i64, 0i64), |(tiempo, errores, satisfaccion), m| {
                (
                    tiempo + i64::from(m.tiempo_generacion_segundos.unwrap_or(0)),
                    errores + i64::from(m.errores_detectados),
                    satisfaccion + i64::from(m.satisfaccion_usuario.unwrap_or(0)),
                )
            });

    MetricasPromedio {
        tiempo_promedio_generacion: tiempo as f64 / n,
        total_errores: errores,
        satisfaccion_promedio: satisfaccion as f64 / n,
    }
}

/// Builds the dashboard statistics on every call from full listings.
#[derive(Clone)]
pub struct DashboardService {
    usuarios: Arc<UsuarioService>,
    documentos: Arc<DocumentoService>,
    sistemas: Arc<SistemaService>,
    agentes: Arc<AgenteService>,
    metricas: Arc<MetricaService>,
}

impl DashboardService {
    pub fn new(
        usuarios: Arc<UsuarioService>,
        documentos: Arc<DocumentoService>,
        sistemas: Arc<SistemaService>,
        agentes: Arc<AgenteService>,
        metricas: Arc<MetricaService>,
    ) -> Self {
        Self {
            usuarios,
            documentos,
            sistemas,
            agentes,
            metricas,
        }
    }

    #[instrument(skip(self))]
    pub async fn estadisticas(&self) -> Result<Estadisticas, ServiceError> {
        let documentos = self.documentos.list().await?;
        let metricas = self.metricas.list().await?;

        Ok(Estadisticas {
            total_usuarios: self.usuarios.list().await?.len(),
            total_documentos: documentos.len(),
            total_sistemas: self.sistemas.list().await?.len(),
            total_agentes: self.agentes.list().await?.len(),
            documentos_por_estado: documentos_por_estado(&documentos),
            metricas_promedio: metricas_promedio(&metricas),
        })
    }
}

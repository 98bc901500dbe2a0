#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    response::Response,
    Router,
};
use bms_assistant::{
    build_router,
    config::AppConfig,
    db,
    handlers::AppServices,
    seed,
    services::gemini::GeminiClient,
    AppState,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use tower_http::cors::CorsLayer;

/// Helper harness for spinning up the full router over a fresh SQLite file.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _db_dir: TempDir,
}

pub struct TestAppBuilder {
    seed: bool,
    gemini_base_url: Option<String>,
    gemini_api_key: Option<String>,
}

impl TestAppBuilder {
    /// Insert the N1/N2/N3 formats and demo users before the first request.
    pub fn seeded(mut self) -> Self {
        self.seed = true;
        self
    }

    /// Point the chat relay at a stub server.
    pub fn gemini(mut self, base_url: impl Into<String>, api_key: &str) -> Self {
        self.gemini_base_url = Some(base_url.into());
        self.gemini_api_key = Some(api_key.to_string());
        self
    }

    pub async fn build(self) -> TestApp {
        let db_dir = TempDir::new().expect("create temp dir for test database");
        let db_path = db_dir.path().join("bms_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1".to_string(),
            18_080,
            "test".to_string(),
        );
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;
        if let Some(base_url) = self.gemini_base_url {
            cfg.gemini_base_url = base_url;
        }
        cfg.gemini_api_key = self.gemini_api_key;

        let pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("failed to create test database");
        db::run_migrations(&pool)
            .await
            .expect("failed to run migrations in tests");

        let db_arc = Arc::new(pool);
        let model = Arc::new(GeminiClient::from_config(&cfg).expect("build gemini client"));
        let services = AppServices::new(db_arc.clone(), &cfg, model);

        if self.seed {
            seed::seed_defaults(&services.formatos, &services.usuarios)
                .await
                .expect("seed bootstrap data");
        }

        let state = AppState {
            db: db_arc,
            config: cfg,
            services,
        };
        let router = build_router(state.clone(), CorsLayer::permissive());

        TestApp {
            router,
            state,
            _db_dir: db_dir,
        }
    }
}

impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            seed: false,
            gemini_base_url: None,
            gemini_api_key: None,
        }
    }

    /// Empty database, no Gemini key.
    pub async fn new() -> Self {
        Self::builder().build().await
    }

    /// Send a request against the router with an optional JSON body.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);

        let body = if let Some(json) = body {
            builder = builder.header("content-type", "application/json");
            Body::from(serde_json::to_vec(&json).expect("failed to serialize json request body"))
        } else {
            Body::empty()
        };

        let request = builder.body(body).expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    /// Sends a raw, possibly malformed, JSON body.
    pub async fn request_raw(&self, method: Method, uri: &str, body: &str) -> Response {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("failed to build request");
        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("router error during test request")
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> Response {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> Response {
        self.request(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> Response {
        self.request(Method::DELETE, uri, None).await
    }

    /// POSTs `body` and returns the created entity, asserting a 200.
    pub async fn create(&self, uri: &str, body: Value) -> Value {
        let response = self.post(uri, body).await;
        assert_eq!(response.status(), StatusCode::OK, "create at {uri}");
        response_json(response).await
    }

    pub async fn create_usuario(&self, email: &str) -> Value {
        self.create(
            "/api/usuarios",
            json!({
                "email": email,
                "passwordHash": "secret",
                "nombre": "Laura",
                "apellido": "Gómez",
                "rol": "SUPERVISOR",
                "empresa": "INDRA",
                "especialidad": "HVAC"
            }),
        )
        .await
    }

    pub async fn create_sistema(&self, nombre: &str, usuario_id: Option<i64>) -> Value {
        self.create(
            "/api/sistemas",
            json!({
                "nombre": nombre,
                "descripcion": "Climatización planta 2",
                "protocoloComunicacion": "BACnet",
                "fabricante": "Honeywell",
                "usuarioId": usuario_id
            }),
        )
        .await
    }

    pub async fn create_documento(&self, titulo: &str, estado: &str) -> Value {
        self.create(
            "/api/documentos",
            json!({
                "titulo": titulo,
                "contenido": "Contenido de prueba",
                "estado": estado
            }),
        )
        .await
    }
}

pub async fn response_json(response: Response) -> Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&body).expect("response body is json")
}

pub async fn response_bytes(response: Response) -> Vec<u8> {
    to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body")
        .to_vec()
}

pub fn id_of(value: &Value) -> i64 {
    value["id"].as_i64().expect("entity has numeric id")
}

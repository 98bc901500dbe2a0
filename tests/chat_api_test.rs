mod common;

use axum::http::{Method, StatusCode};
use common::{id_of, response_json, TestApp};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gemini_reply(text: &str) -> Value {
    json!({"candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]})
}

async fn app_with_gemini(server: &MockServer) -> TestApp {
    TestApp::builder()
        .gemini(server.uri(), "test-key")
        .build()
        .await
}

#[tokio::test]
async fn relays_instruction_and_message_to_the_agent_model() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash:generateContent"))
        .and(query_param("key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("Bonjour !")))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_with_gemini(&server).await;
    let agente = app
        .create(
            "/api/agentes",
            json!({
                "nombre": "Traductor",
                "configuracion": "Responde en francés",
                "modeloIA": "gemini-1.5-flash"
            }),
        )
        .await;

    let response = app
        .post(
            "/api/chat/message",
            json!({"message": "Hola", "agentId": id_of(&agente)}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({"response": "Bonjour !", "agentName": "Traductor"})
    );

    let requests = server.received_requests().await.expect("recorded requests");
    assert_eq!(requests.len(), 1);
    let body: Value = serde_json::from_slice(&requests[0].body).unwrap();
    let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(text.contains("Responde en francés"));
    assert!(text.contains("Hola"));
    assert_eq!(body["contents"][0]["role"], "user");
}

#[tokio::test]
async fn agent_id_may_be_a_string() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("hola")))
        .mount(&server)
        .await;

    let app = app_with_gemini(&server).await;
    let id = id_of(&app.create("/api/agentes", json!({"nombre": "Eco"})).await);

    let response = app
        .post(
            "/api/chat/message",
            json!({"message": "hola", "agentId": id.to_string()}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response_json(response).await["response"], "hola");
}

#[tokio::test]
async fn upstream_failure_is_reported_inside_a_200() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let app = app_with_gemini(&server).await;
    let id = id_of(&app.create("/api/agentes", json!({"nombre": "Frágil"})).await);

    let response = app
        .post("/api/chat/message", json!({"message": "Hola", "agentId": id}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["agentName"], "Frágil");
    assert!(body["response"]
        .as_str()
        .unwrap()
        .starts_with("Error al comunicar con Gemini: "));
}

#[tokio::test]
async fn empty_candidates_yield_the_sentinel_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let app = app_with_gemini(&server).await;
    let id = id_of(&app.create("/api/agentes", json!({"nombre": "Mudo"})).await);

    let body = response_json(
        app.post("/api/chat/message", json!({"message": "Hola", "agentId": id}))
            .await,
    )
    .await;
    assert_eq!(
        body["response"],
        "Error: No se pudo obtener respuesta de Gemini."
    );
}

#[tokio::test]
async fn missing_api_key_degrades_without_calling_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_reply("never")))
        .expect(0)
        .mount(&server)
        .await;

    let app = TestApp::new().await;
    let id = id_of(&app.create("/api/agentes", json!({"nombre": "Sin clave"})).await);

    let response = app
        .post("/api/chat/message", json!({"message": "Hola", "agentId": id}))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response_json(response).await["response"]
        .as_str()
        .unwrap()
        .starts_with("Error al comunicar con Gemini: "));
}

#[tokio::test]
async fn unknown_agent_is_a_400_with_error_body() {
    let app = TestApp::new().await;

    let response = app
        .post("/api/chat/message", json!({"message": "Hola", "agentId": 999}))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        response_json(response).await,
        json!({"error": "Agente no encontrado"})
    );
}

#[tokio::test]
async fn malformed_requests_are_400() {
    let app = TestApp::new().await;

    for body in [
        json!({"agentId": 1}),
        json!({"message": "Hola"}),
        json!({"message": "Hola", "agentId": "uno"}),
    ] {
        let response = app.post("/api/chat/message", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response_json(response).await["error"].is_string());
    }

    let response = app
        .request_raw(Method::POST, "/api/chat/message", "{not json")
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(response_json(response).await["error"].is_string());
}

mod common;

use axum::http::StatusCode;
use bms_assistant::seed::{seed_defaults, SeedReport};
use common::{response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn seeding_fills_empty_tables_once() {
    let app = TestApp::new().await;
    let services = &app.state.services;

    let first = seed_defaults(&services.formatos, &services.usuarios)
        .await
        .unwrap();
    assert_eq!(
        first,
        SeedReport {
            formatos_insertados: 3,
            usuarios_insertados: 3,
        }
    );

    let second = seed_defaults(&services.formatos, &services.usuarios)
        .await
        .unwrap();
    assert_eq!(second, SeedReport::default());

    let formatos = response_json(app.get("/api/formatos").await).await;
    let codigos: Vec<_> = formatos
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["codigo"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(codigos, ["N1", "N2", "N3"]);

    let admin = response_json(app.get("/api/usuarios/email/admin@indra.com").await).await;
    assert_eq!(admin["rol"], "ADMIN");
    assert_eq!(admin["empresa"], "INDRA");
    assert_eq!(admin["especialidad"], "Sistemas");
}

#[tokio::test]
async fn seeding_checks_each_table_independently() {
    let app = TestApp::new().await;
    app.create("/api/formatos", json!({"codigo": "N7", "nombre": "Propio"}))
        .await;

    let services = &app.state.services;
    let report = seed_defaults(&services.formatos, &services.usuarios)
        .await
        .unwrap();
    assert_eq!(report.formatos_insertados, 0);
    assert_eq!(report.usuarios_insertados, 3);

    let formatos = response_json(app.get("/api/formatos").await).await;
    assert_eq!(formatos.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn generation_stub_stores_a_draft() {
    let app = TestApp::builder().seeded().build().await;
    let n2 = response_json(app.get("/api/formatos/codigo/N2").await).await;

    let response = app
        .post(
            "/api/ia/generar-documento",
            json!({"tipoFormato": "N2", "sistemaId": "4", "usuarioId": 1, "datos": {"zona": "A"}}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["mensaje"], "Documento generado exitosamente con IA");

    let documento = &body["documento"];
    assert_eq!(documento["titulo"], "Documento generado por IA - N2");
    assert_eq!(documento["estado"], "BORRADOR");
    assert_eq!(documento["tipoFormatoId"], n2["id"]);
    assert_eq!(documento["sistemaId"], json!(4));
    assert_eq!(documento["usuarioId"], json!(1));
    assert_eq!(
        documento["contenido"],
        "Este es un documento de tipo N2 generado automáticamente. Datos proporcionados: {\"zona\":\"A\"}"
    );
}

#[tokio::test]
async fn generation_falls_back_to_n1_for_unknown_codes() {
    let app = TestApp::builder().seeded().build().await;
    let n1 = response_json(app.get("/api/formatos/codigo/N1").await).await;

    let body = response_json(
        app.post(
            "/api/ia/generar-documento",
            json!({"tipoFormato": "N8", "datos": {}}),
        )
        .await,
    )
    .await;

    assert_eq!(body["documento"]["tipoFormatoId"], n1["id"]);
}

#[tokio::test]
async fn generation_rejects_non_numeric_ids() {
    let app = TestApp::builder().seeded().build().await;

    let response = app
        .post(
            "/api/ia/generar-documento",
            json!({"tipoFormato": "N1", "sistemaId": "cuatro", "datos": {}}),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

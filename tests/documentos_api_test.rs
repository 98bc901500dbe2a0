mod common;

use axum::http::StatusCode;
use common::{id_of, response_json, TestApp};
use serde_json::json;

#[tokio::test]
async fn document_defaults_to_draft_version_one() {
    let app = TestApp::new().await;

    let documento = app
        .create(
            "/api/documentos",
            json!({"titulo": "Acta de comisionamiento", "contenido": "Texto"}),
        )
        .await;

    assert_eq!(documento["estado"], "BORRADOR");
    assert_eq!(documento["version"], json!(1));
    assert!(documento["fechaCreacion"].is_string());
}

#[tokio::test]
async fn documents_filter_by_owner_system_and_format() {
    let app = TestApp::new().await;
    let usuario_id = id_of(&app.create_usuario("autor@indra.com").await);
    let sistema_id = id_of(&app.create_sistema("HVAC", Some(usuario_id)).await);
    let formato_id = id_of(
        &app.create("/api/formatos", json!({"codigo": "N2", "nombre": "Reporte"}))
            .await,
    );

    app.create(
        "/api/documentos",
        json!({
            "titulo": "Completo",
            "contenido": "c",
            "usuarioId": usuario_id,
            "sistemaId": sistema_id,
            "tipoFormatoId": formato_id
        }),
    )
    .await;
    app.create(
        "/api/documentos",
        json!({"titulo": "Solo autor", "contenido": "c", "usuarioId": usuario_id}),
    )
    .await;
    app.create_documento("Huérfano", "BORRADOR").await;

    let count = |value: serde_json::Value| value.as_array().unwrap().len();
    assert_eq!(
        count(response_json(app.get(&format!("/api/documentos/usuario/{usuario_id}")).await).await),
        2
    );
    assert_eq!(
        count(response_json(app.get(&format!("/api/documentos/sistema/{sistema_id}")).await).await),
        1
    );
    assert_eq!(
        count(response_json(app.get(&format!("/api/documentos/formato/{formato_id}")).await).await),
        1
    );
    assert_eq!(count(response_json(app.get("/api/documentos").await).await), 3);
}

#[tokio::test]
async fn update_overwrites_content_and_keeps_links() {
    let app = TestApp::new().await;
    let usuario_id = id_of(&app.create_usuario("autor@indra.com").await);
    let documento = app
        .create(
            "/api/documentos",
            json!({
                "titulo": "v1",
                "contenido": "primero",
                "usuarioId": usuario_id,
                "observaciones": "revisar",
                "calificacion": 3
            }),
        )
        .await;
    let id = id_of(&documento);

    let updated = response_json(
        app.put(
            &format!("/api/documentos/{id}"),
            json!({"titulo": "v2", "contenido": "segundo", "estado": "APROBADO", "usuarioId": 999}),
        )
        .await,
    )
    .await;

    assert_eq!(updated["titulo"], "v2");
    assert_eq!(updated["contenido"], "segundo");
    assert_eq!(updated["estado"], "APROBADO");
    assert!(updated["observaciones"].is_null());
    assert!(updated["calificacion"].is_null());
    assert_eq!(updated["usuarioId"], json!(usuario_id));
    assert_eq!(updated["version"], json!(1));
    assert_eq!(updated["fechaCreacion"], documento["fechaCreacion"]);
}

#[tokio::test]
async fn update_of_missing_document_is_404() {
    let app = TestApp::new().await;
    let response = app
        .put("/api/documentos/12", json!({"titulo": "x", "contenido": "y"}))
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_document_and_detaches_dependents() {
    let app = TestApp::new().await;
    let usuario_id = id_of(&app.create_usuario("autor@indra.com").await);
    let id = id_of(&app.create_documento("Borrable", "BORRADOR").await);

    let historial = app
        .create(
            "/api/historial",
            json!({"documentoId": id, "usuarioId": usuario_id, "accion": "CREADO"}),
        )
        .await;
    let metrica = app
        .create(
            "/api/metricas",
            json!({"documentoId": id, "tiempoGeneracionSegundos": 12}),
        )
        .await;

    let response = app.delete(&format!("/api/documentos/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response_json(response).await,
        json!({"message": "Documento eliminado correctamente", "id": id, "status": "ELIMINADO"})
    );

    assert_eq!(
        app.get(&format!("/api/documentos/{id}")).await.status(),
        StatusCode::NOT_FOUND
    );

    let entradas = response_json(app.get("/api/historial").await).await;
    let entradas = entradas.as_array().unwrap();
    assert_eq!(entradas.len(), 1);
    assert_eq!(entradas[0]["id"], historial["id"]);
    assert!(entradas[0]["documentoId"].is_null());

    let metrica = response_json(app.get(&format!("/api/metricas/{}", id_of(&metrica))).await).await;
    assert!(metrica["documentoId"].is_null());
}

#[tokio::test]
async fn history_is_append_only_and_filterable() {
    let app = TestApp::new().await;
    let usuario_id = id_of(&app.create_usuario("autor@indra.com").await);
    let doc_a = id_of(&app.create_documento("A", "BORRADOR").await);
    let doc_b = id_of(&app.create_documento("B", "BORRADOR").await);

    let entrada = app
        .create(
            "/api/historial",
            json!({"documentoId": doc_a, "usuarioId": usuario_id, "accion": "CREADO", "detalles": "v1"}),
        )
        .await;
    assert!(entrada["fechaAccion"].is_string());
    app.create(
        "/api/historial",
        json!({"documentoId": doc_a, "accion": "EDITADO"}),
    )
    .await;
    app.create(
        "/api/historial",
        json!({"documentoId": doc_b, "usuarioId": usuario_id, "accion": "CREADO"}),
    )
    .await;

    let por_doc = response_json(app.get(&format!("/api/historial/documento/{doc_a}")).await).await;
    assert_eq!(por_doc.as_array().unwrap().len(), 2);
    let por_usuario =
        response_json(app.get(&format!("/api/historial/usuario/{usuario_id}")).await).await;
    assert_eq!(por_usuario.as_array().unwrap().len(), 2);

    // no update or delete routes exist for history entries
    let response = app
        .delete(&format!("/api/historial/{}", id_of(&entrada)))
        .await;
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn metrics_create_update_and_filter() {
    let app = TestApp::new().await;
    let doc_id = id_of(&app.create_documento("Medido", "REVISION").await);

    let metrica = app
        .create(
            "/api/metricas",
            json!({"documentoId": doc_id, "tiempoGeneracionSegundos": 40, "satisfaccionUsuario": 5}),
        )
        .await;
    assert_eq!(metrica["erroresDetectados"], json!(0));
    assert_eq!(metrica["observacionesCalidad"], json!(0));
    assert!(metrica["fechaMetricas"].is_string());

    let id = id_of(&metrica);
    let updated = response_json(
        app.put(
            &format!("/api/metricas/{id}"),
            json!({"tiempoGeneracionSegundos": 20, "erroresDetectados": 2, "documentoId": 999}),
        )
        .await,
    )
    .await;
    assert_eq!(updated["tiempoGeneracionSegundos"], json!(20));
    assert_eq!(updated["erroresDetectados"], json!(2));
    assert!(updated["satisfaccionUsuario"].is_null());
    assert_eq!(updated["documentoId"], json!(doc_id));

    let por_doc = response_json(app.get(&format!("/api/metricas/documento/{doc_id}")).await).await;
    assert_eq!(por_doc.as_array().unwrap().len(), 1);

    let response = app.put("/api/metricas/404", json!({})).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

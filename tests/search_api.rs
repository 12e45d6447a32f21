mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use httpmock::prelude::*;
use serde_json::Value;

use hirescout::portals::{COMPANY_NOT_SPECIFIED, DescriptorAdapter, SiteAdapter, empleos, mifuturo};
use hirescout::{Aggregator, PdfTextExtractor};

use common::{app_with, get, send};

const EMPLEOS_HTML: &str = r#"
<html><body>
  <div class="g-brd-around g-brd-gray-light-v4">
    <a class="u-link-v5 color-gray-dark-v1" href="vacante.php?id=1">Contador General</a>
    <a class="u-link-v5 color-primary--hover">Grupo Rizek</a>
  </div>
  <div class="g-brd-around g-brd-gray-light-v4">
    <a class="u-link-v5 fs-16 fw-8" href="vacante.php?id=2">Contador Junior</a>
  </div>
  <div class="g-brd-around g-brd-gray-light-v4">
    <span>promoted banner without a title</span>
  </div>
</body></html>
"#;

const MIFUTURO_HTML: &str = r#"
<html><body>
  <a href="/oferta-de-empleo/77"><h2>Contador Senior</h2><p>Banco Popular</p></a>
</body></html>
"#;

fn aggregator_for(server: &MockServer) -> Aggregator {
    let base = server.base_url();
    let adapters: Vec<Arc<dyn SiteAdapter>> = vec![
        Arc::new(DescriptorAdapter::new(empleos::descriptor(&base)).unwrap()),
        Arc::new(DescriptorAdapter::new(mifuturo::descriptor(&base)).unwrap()),
    ];
    Aggregator::new(adapters)
}

fn titles(body: &Value) -> Vec<String> {
    body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["title"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn aggregated_search_merges_portals_in_order() {
    let server = MockServer::start_async().await;
    let empleos_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/buscar_vacantes.php")
                .query_param("Claves", "contador")
                .query_param("Pais", "6");
            then.status(200)
                .header("content-type", "text/html")
                .body(EMPLEOS_HTML);
        })
        .await;
    let mifuturo_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/empleos/de-contador");
            then.status(200)
                .header("content-type", "text/html")
                .body(MIFUTURO_HTML);
        })
        .await;

    let app = app_with(aggregator_for(&server), Arc::new(PdfTextExtractor));
    let (status, body) = send(&app, get("/api/search?q=contador")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(
        titles(&body),
        vec!["Contador General", "Contador Junior", "Contador Senior"]
    );
    assert_eq!(body["errors"].as_object().unwrap().len(), 0);

    let data = body["data"].as_array().unwrap();
    assert_eq!(
        data[0]["link"],
        format!("{}/vacante.php?id=1", server.base_url())
    );
    assert_eq!(data[0]["company"], "Grupo Rizek");
    assert_eq!(data[1]["company"], COMPANY_NOT_SPECIFIED);
    assert_eq!(data[2]["source"], "mifuturo");
    assert_eq!(
        data[2]["link"],
        format!("{}/oferta-de-empleo/77", server.base_url())
    );

    empleos_mock.assert_async().await;
    mifuturo_mock.assert_async().await;
}

#[tokio::test]
async fn failing_portal_is_reported_without_failing_search() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/buscar_vacantes.php");
            then.status(200).body(EMPLEOS_HTML);
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/empleos/de-contador");
            then.status(503);
        })
        .await;

    let app = app_with(aggregator_for(&server), Arc::new(PdfTextExtractor));
    let (status, body) = send(&app, get("/api/search?q=contador&sites=empleos,mifuturo")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(titles(&body), vec!["Contador General", "Contador Junior"]);
    let errors = body["errors"].as_object().unwrap();
    assert_eq!(errors.len(), 1);
    assert!(errors["mifuturo"].as_str().unwrap().contains("503"));
}

#[tokio::test]
async fn single_portal_search_returns_listings() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/empleos/de-contador");
            then.status(200).body(MIFUTURO_HTML);
        })
        .await;

    let app = app_with(aggregator_for(&server), Arc::new(PdfTextExtractor));
    let (status, body) = send(&app, get("/api/external-search?q=contador&site=mifuturo")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(titles(&body), vec!["Contador Senior"]);
}

#[tokio::test]
async fn single_portal_upstream_failure_is_an_error_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/buscar_vacantes.php");
            then.status(500);
        })
        .await;

    let app = app_with(aggregator_for(&server), Arc::new(PdfTextExtractor));
    let (status, body) = send(&app, get("/api/external-search?q=contador&site=empleos")).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn changed_layout_degrades_to_empty_success() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/buscar_vacantes.php");
            then.status(200).body("<html><body><main>redesigned</main></body></html>");
        })
        .await;

    let app = app_with(aggregator_for(&server), Arc::new(PdfTextExtractor));
    let (status, body) = send(&app, get("/api/external-search?q=contador&site=empleos")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn rejects_unknown_portal_and_missing_query() {
    let server = MockServer::start_async().await;
    let app = app_with(aggregator_for(&server), Arc::new(PdfTextExtractor));

    let (status, body) = send(&app, get("/api/external-search?q=contador&site=linkedin")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("linkedin"));

    let (status, _) = send(&app, get("/api/external-search?q=contador")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get("/api/external-search?site=empleos")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Missing search query");

    let (status, _) = send(&app, get("/api/search?q=contador&sites=empleos,monster")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

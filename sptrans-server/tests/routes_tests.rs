//! HTTP surface tests: the router driven with `oneshot` against a mocked
//! SPTrans upstream.

use std::time::Duration;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sptrans_server::sptrans::{SptransClient, SptransConfig};
use sptrans_server::web::{AppState, create_router};

fn app_for(server: &MockServer, deadline: Duration) -> Router {
    let config = SptransConfig::new("test-token")
        .with_base_url(server.uri())
        .with_timeout(5);
    let client = SptransClient::new(config).unwrap();
    create_router(AppState::new(client, deadline))
}

async fn mount_auth(server: &MockServer, body: &str) {
    Mock::given(method("POST"))
        .and(path("/Login/Autenticar"))
        .respond_with(ResponseTemplate::new(200).set_body_string(body))
        .mount(server)
        .await;
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        panic!(
            "{uri}: body is not JSON ({e}): {:?}",
            String::from_utf8_lossy(&bytes)
        )
    });
    (status, json)
}

// --- validation ---

#[tokio::test]
async fn missing_term_is_rejected_without_upstream_traffic() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/Login/Autenticar"))
        .respond_with(ResponseTemplate::new(200).set_body_string("true"))
        .expect(0)
        .mount(&server)
        .await;

    let app = app_for(&server, Duration::from_secs(10));
    let (status, body) = get(app, "/lines/search").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "term parameter is required");
    assert_eq!(body["kind"], "validation");
}

#[tokio::test]
async fn blank_term_is_rejected() {
    let server = MockServer::start().await;
    let app = app_for(&server, Duration::from_secs(10));

    let (status, body) = get(app, "/stops/search?term=%20%20").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "term parameter is required");
}

#[tokio::test]
async fn non_positive_codes_are_rejected() {
    let server = MockServer::start().await;

    for (uri, message) in [
        ("/stops/by-line?line_code=0", "line_code parameter must be a positive integer"),
        ("/stops/by-corridor", "corridor_code parameter must be a positive integer"),
        ("/positions/by-line?line_code=-4", "line_code parameter must be a positive integer"),
        ("/positions/garage?line_code=1273", "company_code parameter must be a positive integer"),
        ("/predictions?stop_code=1", "line_code parameter must be a positive integer"),
        ("/predictions/by-stop?stop_code=0", "stop_code parameter must be a positive integer"),
    ] {
        let app = app_for(&server, Duration::from_secs(10));
        let (status, body) = get(app, uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], message, "{uri}");
    }
}

#[tokio::test]
async fn direction_must_be_one_or_two() {
    let server = MockServer::start().await;
    let app = app_for(&server, Duration::from_secs(10));

    let (status, body) = get(app, "/lines/search-by-direction?term=8000&direction=3").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "direction parameter must be 1 or 2");
}

#[tokio::test]
async fn malformed_codes_are_json_validation_errors() {
    let server = MockServer::start().await;

    for (uri, message) in [
        ("/stops/by-line?line_code=abc", "line_code parameter must be a positive integer"),
        ("/stops/by-line?line_code=", "line_code parameter must be a positive integer"),
        (
            "/stops/by-line?line_code=99999999999999999999",
            "line_code parameter must be a positive integer",
        ),
        ("/predictions?stop_code=x&line_code=1", "stop_code parameter must be a positive integer"),
        ("/lines/search-by-direction?term=8000&direction=up", "direction parameter must be 1 or 2"),
        ("/lines/search-by-direction?term=8000&direction=", "direction parameter must be 1 or 2"),
    ] {
        let app = app_for(&server, Duration::from_secs(10));
        let (status, body) = get(app, uri).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["kind"], "validation", "{uri}");
        assert_eq!(body["error"], message, "{uri}");
    }
}

// --- success ---

#[tokio::test]
async fn health_is_ok() {
    let server = MockServer::start().await;
    let app = app_for(&server, Duration::from_secs(10));

    let response = app
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn search_lines_returns_envelope() {
    let server = MockServer::start().await;
    mount_auth(&server, "true").await;

    Mock::given(method("GET"))
        .and(path("/Linha/Buscar"))
        .and(query_param("termosBusca", "8000"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"[{"cl":100,"lc":false,"lt":"8000","sl":1,"tl":10,"tp":"A","ts":"B"}]"#,
        ))
        .mount(&server)
        .await;

    let app = app_for(&server, Duration::from_secs(10));
    let (status, body) = get(app, "/lines/search?term=8000").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_results"], 1);
    assert_eq!(body["search_term"], "8000");
    assert_eq!(body["lines"][0]["code"], 100);
    assert_eq!(body["lines"][0]["number"], "8000");
    assert_eq!(body["lines"][0]["type"], 10);
    assert_eq!(body["lines"][0]["origin"], "A");
    assert_eq!(body["lines"][0]["destination"], "B");
}

#[tokio::test]
async fn search_term_is_forwarded_and_echoed_as_typed() {
    let server = MockServer::start().await;
    mount_auth(&server, "true").await;

    Mock::given(method("GET"))
        .and(path("/Linha/Buscar"))
        .and(query_param("termosBusca", " 8000 "))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let app = app_for(&server, Duration::from_secs(10));
    let (status, body) = get(app, "/lines/search?term=%208000%20").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["search_term"], " 8000 ");
    assert_eq!(body["total_results"], 0);
}

#[tokio::test]
async fn positions_envelope_counts_vehicles() {
    let server = MockServer::start().await;
    mount_auth(&server, "true").await;

    Mock::given(method("GET"))
        .and(path("/Posicao/Linha"))
        .and(query_param("codigoLinha", "1273"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"{"hr":"18:38","l":[{"c":"8000-10","cl":1273,"sl":1,"lt0":"A","lt1":"B","qv":9,
                "vs":[{"p":11021,"a":true,"ta":"2024-05-02T18:37:46Z","py":-23.52,"px":-46.70}]}]}"#,
        ))
        .mount(&server)
        .await;

    let app = app_for(&server, Duration::from_secs(10));
    let (status, body) = get(app, "/positions/by-line?line_code=1273").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timestamp"], "18:38");
    assert_eq!(body["line_code"], 1273);
    // summed from each line's "qv"
    assert_eq!(body["total_vehicles"], 9);
    assert_eq!(body["positions"]["lines"][0]["vehicles"].as_array().unwrap().len(), 1);
    assert_eq!(body["total_lines"], 1);
}

#[tokio::test]
async fn empty_prediction_is_null_stop() {
    let server = MockServer::start().await;
    mount_auth(&server, "true").await;

    Mock::given(method("GET"))
        .and(path("/Previsao"))
        .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"hr":"20:09","p":null}"#))
        .mount(&server)
        .await;

    let app = app_for(&server, Duration::from_secs(10));
    let (status, body) = get(app, "/predictions?stop_code=700016623&line_code=1273").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_predictions"], 0);
    assert!(body["predictions"]["stop"].is_null());
}

// --- failures ---

#[tokio::test]
async fn refused_credential_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    mount_auth(&server, "false").await;

    let app = app_for(&server, Duration::from_secs(10));
    let (status, body) = get(app, "/corridors").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "authentication");
    assert_eq!(body["code"], 401);
    assert_eq!(body["error"], "Invalid authentication token");
    assert_eq!(body["details"], "SPTrans API returned false for authentication");
}

#[tokio::test]
async fn upstream_failure_maps_to_bad_gateway() {
    let server = MockServer::start().await;
    mount_auth(&server, "true").await;

    Mock::given(method("GET"))
        .and(path("/Empresa"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let app = app_for(&server, Duration::from_secs(10));
    let (status, body) = get(app, "/companies").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["kind"], "upstream");
    assert_eq!(body["code"], 500);
    assert_eq!(body["details"], "HTTP 500 for endpoint /Empresa");
}

#[tokio::test]
async fn slow_upstream_maps_to_gateway_timeout() {
    let server = MockServer::start().await;
    mount_auth(&server, "true").await;

    Mock::given(method("GET"))
        .and(path("/Corredor"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("[]")
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let app = app_for(&server, Duration::from_millis(200));
    let (status, body) = get(app, "/corridors").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["kind"], "timeout");
}

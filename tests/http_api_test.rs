//! HTTP 接口集成测试
//!
//! 直接以 `tower::ServiceExt::oneshot` 驱动路由器，不监听端口。

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use common::{PIPELINE_KEY, insert_project, setup_test_db, test_config};
use dashboard_api::app::AppContext;
use dashboard_api::management::ManagementServer;
use dashboard_api::oauth::build_http_client;
use dashboard_api::transport::NoopNotifier;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    context: Arc<AppContext>,
}

impl TestApp {
    async fn new() -> Self {
        let db = setup_test_db().await;
        insert_project(&db, "proj_a", true).await;
        insert_project(&db, "proj_b", true).await;

        let config = Arc::new(test_config("http://127.0.0.1:9"));
        let client = build_http_client(&config.http).expect("http client");
        let context = Arc::new(AppContext::with_notifier(
            config,
            db,
            client,
            Arc::new(NoopNotifier),
        ));
        let router = ManagementServer::new(Arc::clone(&context)).router();
        Self { router, context }
    }

    fn token(&self, project_id: &str) -> String {
        self.context
            .tokens
            .issue(project_id, chrono::Duration::hours(1))
            .expect("project token")
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("response body");
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, body)
    }
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(body.to_string()))
        .expect("request")
}

fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).expect("request")
}

fn callpicker_body() -> Value {
    json!({
        "source_name": "Acme",
        "numbers": [{ "name": "main", "number": "+15551234567" }],
    })
}

#[tokio::test]
async fn source_routes_require_project_token() {
    let app = TestApp::new().await;

    let (status, body) = app.send(get_request("/api/sources", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");

    let (status, _) = app
        .send(get_request("/api/sources", Some("not-a-jwt")))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_callpicker_source_returns_routing_url() {
    let app = TestApp::new().await;
    let token = app.token("proj_a");

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/sources/callpicker",
            Some(&token),
            &callpicker_body(),
        ))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["url"], "https://dash.gbs-digital.com/t/cp");
    assert_eq!(body["data"]["source"]["type"], "cp");
    assert_eq!(body["data"]["source"]["name"], "Acme");
    assert_eq!(body["data"]["source"]["projectId"], "proj_a");
    assert_eq!(
        body["data"]["source"]["config"]["numbers"],
        callpicker_body()["numbers"]
    );

    let (status, listed) = app.send(get_request("/api/sources", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed["data"].as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn other_projects_cannot_read_or_delete_sources() {
    let app = TestApp::new().await;
    let owner = app.token("proj_a");
    let stranger = app.token("proj_b");

    let (_, body) = app
        .send(json_request(
            "POST",
            "/api/sources/callpicker",
            Some(&owner),
            &callpicker_body(),
        ))
        .await;
    let id = body["data"]["source"]["id"]
        .as_str()
        .expect("source id")
        .to_string();

    let (status, body) = app
        .send(get_request(&format!("/api/sources/{id}"), Some(&stranger)))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/sources/{id}"))
        .header(header::AUTHORIZATION, format!("Bearer {stranger}"))
        .body(Body::empty())
        .expect("request");
    let (status, _) = app.send(delete).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let delete = Request::builder()
        .method("DELETE")
        .uri(format!("/api/sources/{id}"))
        .header(header::AUTHORIZATION, format!("Bearer {owner}"))
        .body(Body::empty())
        .expect("request");
    let (status, _) = app.send(delete).await;
    assert_eq!(status, StatusCode::OK);

    let (_, listed) = app.send(get_request("/api/sources", Some(&owner))).await;
    assert_eq!(listed["data"], json!([]));
}

#[tokio::test]
async fn invalid_request_bodies_are_validation_errors() {
    let app = TestApp::new().await;
    let token = app.token("proj_a");

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/sources/facebook",
            Some(&token),
            &json!({ "accountId": "act_1", "accessToken": "short", "sourceName": "  " }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let (status, body) = app
        .send(json_request(
            "POST",
            "/api/sources/google",
            Some(&token),
            &json!({ "code": "abc" }),
        ))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn pipeline_endpoint_is_key_gated_and_unwrapped() {
    let app = TestApp::new().await;

    let (status, body) = app
        .send(get_request("/api/pipeline/wrong-key/sources", None))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "error": "Forbidden" }));

    let (status, body) = app
        .send(get_request(
            &format!("/api/pipeline/{PIPELINE_KEY}/sources"),
            None,
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "sources": {} }));
}

#[tokio::test]
async fn inbound_call_is_routed_by_number() {
    let app = TestApp::new().await;
    let token = app.token("proj_a");
    app.send(json_request(
        "POST",
        "/api/sources/callpicker",
        Some(&token),
        &callpicker_body(),
    ))
    .await;

    let (status, body) = app
        .send(json_request(
            "POST",
            "/t/cp",
            None,
            &json!({ "cpNumber": "+15551234567", "caller": "+420777000111" }),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let (status, body) = app
        .send(json_request(
            "POST",
            "/t/cp",
            None,
            &json!({ "cpNumber": "+10000000000" }),
        ))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "ROUTING_ERROR");

    let (status, _) = app
        .send(json_request("POST", "/t/cp", None, &json!({ "caller": "x" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn ping_responds() {
    let app = TestApp::new().await;

    let (status, body) = app.send(get_request("/ping", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::String("pong".to_string()));
}

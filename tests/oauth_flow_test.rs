//! 第三方授权流程集成测试
//!
//! Facebook / Google 授权服务由 wiremock 模拟。

mod common;

use std::sync::Arc;

use common::{insert_project, setup_test_db, test_config};
use dashboard_api::DashboardError;
use dashboard_api::app::AppContext;
use dashboard_api::oauth::{OAuthStateStore, build_http_client};
use dashboard_api::sources::{
    CreateFacebookSource, GoogleAuthorizeRequest, GoogleCallbackRequest, SourceConfig,
};
use dashboard_api::transport::NoopNotifier;
use entity::GoogleOAuthStates;
use pretty_assertions::assert_eq;
use sea_orm::{ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn setup(server: &MockServer) -> (Arc<DatabaseConnection>, AppContext) {
    let db = setup_test_db().await;
    insert_project(&db, "proj_a", true).await;
    insert_project(&db, "proj_b", true).await;

    let config = Arc::new(test_config(&server.uri()));
    let client = build_http_client(&config.http).expect("http client");
    let context = AppContext::with_notifier(config, Arc::clone(&db), client, Arc::new(NoopNotifier));
    (db, context)
}

fn state_from_url(url: &str) -> String {
    let parsed = url::Url::parse(url).expect("valid authorization url");
    parsed
        .query_pairs()
        .find(|(key, _)| key == "state")
        .map(|(_, value)| value.into_owned())
        .expect("state parameter")
}

async fn mount_google_token(server: &MockServer, status: u16, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(query_param("grant_type", "authorization_code"))
        .and(query_param("client_id", "ga-client"))
        .respond_with(ResponseTemplate::new(status).set_body_json(body))
        .mount(server)
        .await;
}

fn authorize_request(customer_id: &str) -> GoogleAuthorizeRequest {
    serde_json::from_value(json!({
        "customerId": customer_id,
        "sourceName": "Google Ads",
    }))
    .expect("authorize request")
}

fn callback(state: &str) -> GoogleCallbackRequest {
    serde_json::from_value(json!({ "code": "auth-code", "state": state })).expect("callback")
}

#[tokio::test]
async fn google_flow_creates_source_and_consumes_state() {
    let server = MockServer::start().await;
    mount_google_token(&server, 200, json!({ "refresh_token": "rt-1" })).await;
    let (db, context) = setup(&server).await;

    let url = context
        .sources
        .authorize_google("proj_a", authorize_request("123"))
        .await
        .expect("authorization url");
    assert!(url.contains("access_type=offline"));
    assert!(url.contains("prompt=consent"));

    let state = state_from_url(&url);
    assert!(state.starts_with("proj_a"));
    assert_eq!(state.len(), "proj_a".len() + 5);

    let source = context
        .sources
        .complete_google("proj_a", callback(&state))
        .await
        .expect("google source");

    assert_eq!(source.name, "Google Ads");
    match &source.config {
        SourceConfig::GoogleAds(config) => {
            assert_eq!(config.customer_id, "123");
            assert_eq!(config.refresh_token, "rt-1");
            assert_eq!(config.manager_customer_id, None);
        }
        other => panic!("unexpected config: {other:?}"),
    }

    let remaining = GoogleOAuthStates::find().count(db.as_ref()).await.expect("count");
    assert_eq!(remaining, 0);

    // 同一个状态不能再次使用
    let err = context
        .sources
        .complete_google("proj_a", callback(&state))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn unknown_state_creates_nothing() {
    let server = MockServer::start().await;
    mount_google_token(&server, 200, json!({ "refresh_token": "rt-1" })).await;
    let (_db, context) = setup(&server).await;

    let err = context
        .sources
        .complete_google("proj_a", callback("zzzzz"))
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::NotFound { .. }));

    let sources = context.sources.registry().list("proj_a").await.expect("list");
    assert!(sources.is_empty());
}

#[tokio::test]
async fn state_issued_for_another_project_is_not_found() {
    let server = MockServer::start().await;
    mount_google_token(&server, 200, json!({ "refresh_token": "rt-1" })).await;
    let (_db, context) = setup(&server).await;

    let url = context
        .sources
        .authorize_google("proj_a", authorize_request("123"))
        .await
        .expect("authorization url");
    let token = state_from_url(&url)["proj_a".len()..].to_string();

    let err = context
        .sources
        .complete_google("proj_b", callback(&token))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    // 原项目仍可使用裸令牌完成授权
    context
        .sources
        .complete_google("proj_a", callback(&token))
        .await
        .expect("owner completes flow");
}

#[tokio::test]
async fn concurrent_consumers_have_a_single_winner() {
    let db = setup_test_db().await;
    insert_project(&db, "proj_a", true).await;
    let store = OAuthStateStore::new(Arc::clone(&db), chrono::Duration::minutes(30));

    let token = store
        .issue("proj_a", "123", Some("999"), "Ads")
        .await
        .expect("issue state");

    let mut handles = Vec::new();
    for _ in 0..8 {
        let store = store.clone();
        let token = token.clone();
        handles.push(tokio::spawn(async move {
            store.consume_and_delete("proj_a", &token).await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.expect("task") {
            Ok(record) => {
                winners += 1;
                assert_eq!(record.customer_id, "123");
                assert_eq!(record.manager_id.as_deref(), Some("999"));
            }
            Err(err) => assert!(err.is_not_found()),
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn expired_state_is_rejected() {
    let db = setup_test_db().await;
    insert_project(&db, "proj_a", true).await;
    let store = OAuthStateStore::new(Arc::clone(&db), chrono::Duration::minutes(-1));

    let token = store.issue("proj_a", "123", None, "Ads").await.expect("issue");
    let err = store.consume_and_delete("proj_a", &token).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn google_upstream_rejection_keeps_state_usable() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(query_param("code", "bad-code"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({ "error": "invalid_grant" })))
        .mount(&server)
        .await;
    mount_google_token(&server, 200, json!({ "refresh_token": "rt-2" })).await;
    let (_db, context) = setup(&server).await;

    let url = context
        .sources
        .authorize_google("proj_a", authorize_request("123"))
        .await
        .expect("authorization url");
    let state = state_from_url(&url);

    let bad: GoogleCallbackRequest =
        serde_json::from_value(json!({ "code": "bad-code", "state": state })).expect("callback");
    let err = context.sources.complete_google("proj_a", bad).await.unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Upstream {
            status: Some(400),
            ..
        }
    ));

    context
        .sources
        .complete_google("proj_a", callback(&state))
        .await
        .expect("retry with a valid code succeeds");
}

#[tokio::test]
async fn facebook_exchange_stores_long_lived_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .and(query_param("grant_type", "fb_exchange_token"))
        .and(query_param("client_id", "fb-app"))
        .and(query_param("client_secret", "fb-secret"))
        .and(query_param("fb_exchange_token", "short-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "long-token",
            "token_type": "bearer",
        })))
        .expect(1)
        .mount(&server)
        .await;
    let (_db, context) = setup(&server).await;

    let request: CreateFacebookSource = serde_json::from_value(json!({
        "accountId": "act_42",
        "accessToken": "short-token",
        "sourceName": "Ads FB",
    }))
    .expect("facebook request");

    let source = context
        .sources
        .create_facebook("proj_a", request)
        .await
        .expect("facebook source");

    assert_eq!(
        source.config,
        SourceConfig::Facebook(dashboard_api::sources::FacebookConfig {
            account_id: "act_42".to_string(),
            access_token: "long-token".to_string(),
        })
    );
}

#[tokio::test]
async fn facebook_undecodable_response_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;
    let (_db, context) = setup(&server).await;

    let request: CreateFacebookSource = serde_json::from_value(json!({
        "accountId": "act_42",
        "accessToken": "short-token",
        "sourceName": "Ads FB",
    }))
    .expect("facebook request");

    let err = context
        .sources
        .create_facebook("proj_a", request)
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::Parse { .. }));
    assert!(context.sources.registry().list("proj_a").await.expect("list").is_empty());
}

#[tokio::test]
async fn google_response_without_refresh_token_is_parse_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(query_param("code", "no-refresh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29",
            "expires_in": 3599,
        })))
        .mount(&server)
        .await;
    mount_google_token(&server, 200, json!({ "refresh_token": "rt-3" })).await;
    let (_db, context) = setup(&server).await;

    let url = context
        .sources
        .authorize_google("proj_a", authorize_request("123"))
        .await
        .expect("authorization url");
    let state = state_from_url(&url);

    let request: GoogleCallbackRequest =
        serde_json::from_value(json!({ "code": "no-refresh", "state": state })).expect("callback");
    let err = context.sources.complete_google("proj_a", request).await.unwrap_err();
    assert!(matches!(err, DashboardError::Parse { .. }));
    assert!(context.sources.registry().list("proj_a").await.expect("list").is_empty());

    // 解析失败不消费状态
    context
        .sources
        .complete_google("proj_a", callback(&state))
        .await
        .expect("retry with a valid code succeeds");
}

#[tokio::test]
async fn failed_state_delete_aborts_the_flow() {
    let server = MockServer::start().await;
    mount_google_token(&server, 200, json!({ "refresh_token": "rt-4" })).await;
    let (db, context) = setup(&server).await;

    let url = context
        .sources
        .authorize_google("proj_a", authorize_request("123"))
        .await
        .expect("authorization url");
    let state = state_from_url(&url);

    db.execute_unprepared(
        "CREATE TRIGGER oauth_states_locked BEFORE DELETE ON google_oauth_states \
         BEGIN SELECT RAISE(ABORT, 'oauth states locked'); END;",
    )
    .await
    .expect("create trigger");

    let err = context
        .sources
        .complete_google("proj_a", callback(&state))
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::Persistence { .. }));
    assert!(context.sources.registry().list("proj_a").await.expect("list").is_empty());

    let remaining = GoogleOAuthStates::find().count(db.as_ref()).await.expect("count");
    assert_eq!(remaining, 1);
}

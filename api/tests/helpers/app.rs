use api::{app, state::AppState};
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::AUTHORIZATION, header::CONTENT_TYPE},
    response::Response,
};
use db::{
    models::admin,
    store::{MemoryStore, SqlStore},
    test_utils::setup_test_db,
};
use serde_json::{Value, json};
use services::CheckInFlow;
use std::sync::Arc;
use tower::ServiceExt;
use util::config::AppConfig;

pub const BASE_URL: &str = "https://testrepo.streamlit.app/";

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

fn configure() {
    AppConfig::set_jwt_secret("test-secret");
    AppConfig::set_jwt_duration_minutes(60u64);
    AppConfig::set_checkin_base_url(BASE_URL);
}

/// App over an in-memory store holding two admins:
/// `a@x.com` / `secret` (ADM-1, Hall A) and `b@x.com` / `pw` (no id or location).
pub async fn make_test_app() -> TestApp {
    make_test_app_with(CheckInFlow::new()).await
}

pub async fn make_test_app_with(check_in: CheckInFlow) -> TestApp {
    configure();

    let store = Arc::new(MemoryStore::new());
    store
        .add_admin("a@x.com", "secret", Some("ADM-1"), Some("Hall A"))
        .await
        .unwrap();
    store.add_admin("b@x.com", "pw", None, None).await.unwrap();

    TestApp {
        router: app(AppState::with_store(store.clone(), check_in)),
        store,
    }
}

/// Same admins as [`make_test_app`], backed by a migrated in-memory SQLite database.
pub async fn make_sql_test_app() -> (Router, SqlStore) {
    configure();

    let db = setup_test_db().await;
    admin::Model::create(&db, "a@x.com", "secret", Some("ADM-1"), Some("Hall A"))
        .await
        .unwrap();
    admin::Model::create(&db, "b@x.com", "pw", None, None)
        .await
        .unwrap();

    let store = SqlStore::new(db);
    let router = app(AppState::with_store(
        Arc::new(store.clone()),
        CheckInFlow::new(),
    ));
    (router, store)
}

pub async fn get_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    builder
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

pub fn bearer_get(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

/// Logs in and returns the bearer token.
pub async fn login(router: &Router, email: &str, password: &str) -> String {
    let req = json_request(
        "POST",
        "/api/auth/login",
        json!({ "email": email, "password": password }),
        None,
    );
    let response = router.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_json_body(response).await;
    json["data"]["token"].as_str().unwrap().to_owned()
}

#[cfg(test)]
mod tests {
    use crate::helpers::{BASE_URL, get_json_body, json_request, login, make_test_app};
    use axum::http::StatusCode;
    use serde_json::json;
    use serial_test::serial;
    use services::payload;
    use tower::ServiceExt;

    /// Test Case: A logged-in admin generates a code
    #[tokio::test]
    #[serial]
    async fn test_generate_code() {
        let app = make_test_app().await;
        let token = login(&app.router, "a@x.com", "secret").await;

        let req = json_request("POST", "/api/admin/codes", json!({}), Some(&token));
        let response = app.router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        let data = &json["data"];
        assert_eq!(data["admin_id"], "ADM-1");
        assert_eq!(data["admin_location"], "Hall A");

        let code_token = data["token"].as_str().unwrap();
        let decoded = payload::decode(code_token).unwrap();
        assert_eq!(decoded.scan_date, data["scan_date"]);
        assert_eq!(decoded.scan_time, data["scan_time"]);
        assert_eq!(data["link"], format!("{BASE_URL}?data={code_token}"));
        assert_eq!(
            data["qr_url"],
            format!("/api/admin/codes/qr.png?data={code_token}")
        );

        // Nothing is persisted when a code is generated.
        assert_eq!(app.store.record_count().await, 0);
    }

    /// Test Case: An admin without id or location gets placeholders
    #[tokio::test]
    #[serial]
    async fn test_generate_code_placeholders() {
        let app = make_test_app().await;
        let token = login(&app.router, "b@x.com", "pw").await;

        let req = json_request("POST", "/api/admin/codes", json!({}), Some(&token));
        let response = app.router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["admin_id"], "UNKNOWN_ADMIN");
        assert_eq!(json["data"]["admin_location"], "UNKNOWN_LOCATION");
    }

    /// Test Case: Code generation without a session
    #[tokio::test]
    #[serial]
    async fn test_generate_code_requires_session() {
        let app = make_test_app().await;

        let req = json_request("POST", "/api/admin/codes", json!({}), None);
        let response = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let token = login(&app.router, "a@x.com", "secret").await;
        let req = json_request("POST", "/api/auth/logout", json!({}), Some(&token));
        app.router.clone().oneshot(req).await.unwrap();

        let req = json_request("POST", "/api/admin/codes", json!({}), Some(&token));
        let response = app.router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

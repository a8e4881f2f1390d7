#[cfg(test)]
mod tests {
    use crate::helpers::{bearer_get, get_json_body, login, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use serial_test::serial;
    use tower::ServiceExt;

    #[tokio::test]
    #[serial]
    async fn test_me_returns_admin_details() {
        let app = make_test_app().await;
        let token = login(&app.router, "a@x.com", "secret").await;

        let response = app
            .router
            .oneshot(bearer_get("/api/auth/me", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["email"], "a@x.com");
        assert_eq!(json["data"]["admin_id"], "ADM-1");
        assert_eq!(json["data"]["admin_location"], "Hall A");
    }

    #[tokio::test]
    #[serial]
    async fn test_me_uses_placeholders_for_missing_details() {
        let app = make_test_app().await;
        let token = login(&app.router, "b@x.com", "pw").await;

        let response = app
            .router
            .oneshot(bearer_get("/api/auth/me", &token))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["admin_id"], "UNKNOWN_ADMIN");
        assert_eq!(json["data"]["admin_location"], "UNKNOWN_LOCATION");
    }

    #[tokio::test]
    #[serial]
    async fn test_me_without_token() {
        let app = make_test_app().await;

        let req = Request::builder()
            .method("GET")
            .uri("/api/auth/me")
            .body(AxumBody::empty())
            .unwrap();
        let response = app.router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    #[serial]
    async fn test_me_with_forged_token() {
        let app = make_test_app().await;

        let response = app
            .router
            .oneshot(bearer_get("/api/auth/me", "not.a.jwt"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

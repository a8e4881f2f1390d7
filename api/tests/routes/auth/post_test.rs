#[cfg(test)]
mod tests {
    use crate::helpers::{bearer_get, get_json_body, json_request, login, make_test_app};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;
    use util::config::AppConfig;

    /// Test Case: Successful admin login
    #[tokio::test]
    #[serial]
    async fn test_login_success() {
        let app = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "a@x.com", "password": "secret" }),
            None,
        );
        let response = app.router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["message"], "Welcome a@x.com!");
        assert_eq!(json["data"]["email"], "a@x.com");
        assert!(json["data"]["token"].as_str().is_some());
        assert!(json["data"]["expires_at"].as_str().is_some());
    }

    /// Test Case: Wrong password
    #[tokio::test]
    #[serial]
    async fn test_login_wrong_password() {
        let app = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "a@x.com", "password": "wrong" }),
            None,
        );
        let response = app.router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Invalid credentials. Please try again.");
    }

    /// Test Case: Unknown email is indistinguishable from a wrong password
    #[tokio::test]
    #[serial]
    async fn test_login_unknown_email() {
        let app = make_test_app().await;

        let req = json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "nobody@x.com", "password": "secret" }),
            None,
        );
        let response = app.router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    /// Test Case: Missing fields
    #[tokio::test]
    #[serial]
    async fn test_login_missing_fields() {
        let app = make_test_app().await;

        for body in [
            json!({ "email": "", "password": "secret" }),
            json!({ "email": "a@x.com" }),
            json!({}),
        ] {
            let req = json_request("POST", "/api/auth/login", body, None);
            let response = app.router.clone().oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);

            let json = get_json_body(response).await;
            assert_eq!(json["message"], "Please enter both email and password.");
        }
    }

    /// Test Case: Logout ends the session and can be repeated
    #[tokio::test]
    #[serial]
    async fn test_logout_ends_session() {
        let app = make_test_app().await;
        let token = login(&app.router, "a@x.com", "secret").await;

        let me = app
            .router
            .clone()
            .oneshot(bearer_get("/api/auth/me", &token))
            .await
            .unwrap();
        assert_eq!(me.status(), StatusCode::OK);

        for _ in 0..2 {
            let req = json_request("POST", "/api/auth/logout", json!({}), Some(&token));
            let response = app.router.clone().oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let me = app
            .router
            .clone()
            .oneshot(bearer_get("/api/auth/me", &token))
            .await
            .unwrap();
        assert_eq!(me.status(), StatusCode::UNAUTHORIZED);
    }

    /// Test Case: Logout without a token
    #[tokio::test]
    #[serial]
    async fn test_logout_requires_token() {
        let app = make_test_app().await;

        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .body(AxumBody::empty())
            .unwrap();
        let response = app.router.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    /// Test Case: Two admins logged in at once keep separate sessions
    #[tokio::test]
    #[serial]
    async fn test_sessions_are_independent() {
        let app = make_test_app().await;
        let a = login(&app.router, "a@x.com", "secret").await;
        let b = login(&app.router, "b@x.com", "pw").await;

        let req = json_request("POST", "/api/auth/logout", json!({}), Some(&a));
        app.router.clone().oneshot(req).await.unwrap();

        let me_a = app.router.clone().oneshot(bearer_get("/api/auth/me", &a)).await.unwrap();
        assert_eq!(me_a.status(), StatusCode::UNAUTHORIZED);

        let me_b = app.router.clone().oneshot(bearer_get("/api/auth/me", &b)).await.unwrap();
        assert_eq!(me_b.status(), StatusCode::OK);
        let json = get_json_body(me_b).await;
        assert_eq!(json["data"]["email"], "b@x.com");
    }

    /// Test Case: A session duration chrono cannot represent fails the login cleanly
    #[tokio::test]
    #[serial]
    async fn test_login_with_out_of_range_duration() {
        let app = make_test_app().await;
        AppConfig::set_jwt_duration_minutes(200_000_000_000_000u64);

        let req = json_request(
            "POST",
            "/api/auth/login",
            json!({ "email": "a@x.com", "password": "secret" }),
            None,
        );
        let response = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Could not start a session");

        AppConfig::set_jwt_duration_minutes(60u64);
        let token = login(&app.router, "a@x.com", "secret").await;
        assert!(!token.is_empty());
    }
}

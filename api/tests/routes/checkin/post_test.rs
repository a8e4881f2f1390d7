#[cfg(test)]
mod tests {
    use crate::helpers::{
        get_json_body, json_request, login, make_sql_test_app, make_test_app,
    };
    use axum::http::StatusCode;
    use db::store::AttendanceStore;
    use serde_json::json;
    use serial_test::serial;
    use services::{AttendancePayload, payload};
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    fn sample_token() -> String {
        // 09:00:00 on 10-01-2024 in Lagos.
        let issued = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
        payload::encode(&AttendancePayload::mint(issued, Some("ADM-1"), Some("Hall A")))
    }

    async fn generate(router: &axum::Router) -> String {
        let token = login(router, "a@x.com", "secret").await;
        let req = json_request("POST", "/api/admin/codes", json!({}), Some(&token));
        let json = get_json_body(router.clone().oneshot(req).await.unwrap()).await;
        json["data"]["token"].as_str().unwrap().to_owned()
    }

    fn submit(token: &str, email: &str) -> axum::http::Request<axum::body::Body> {
        json_request(
            "POST",
            &format!("/api/checkin?data={token}"),
            json!({ "email": email }),
            None,
        )
    }

    /// Scenarios A-C: generate, first check-in succeeds, any later one conflicts
    #[tokio::test]
    #[serial]
    async fn test_first_check_in_wins() {
        let app = make_test_app().await;
        let token = generate(&app.router).await;

        let response = app.router.clone().oneshot(submit(&token, "s@y.com")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "You have successfully checked in");
        assert_eq!(json["data"]["email"], "s@y.com");
        assert_eq!(json["data"]["admin_id"], "ADM-1");
        assert_eq!(json["data"]["location"], "Hall A");
        assert!(json["data"]["check_in_date"].as_str().is_some());
        assert!(json["data"]["check_in_time"].as_str().is_some());

        let response = app.router.clone().oneshot(submit(&token, "t@y.com")).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let json = get_json_body(response).await;
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "You have already checked in");

        assert_eq!(app.store.record_count().await, 1);
    }

    #[tokio::test]
    #[serial]
    async fn test_scan_fields_come_from_token() {
        let app = make_test_app().await;

        let response = app
            .router
            .oneshot(submit(&sample_token(), "s@y.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["scan_date"], "10-01-2024");
        assert_eq!(json["data"]["scan_time"], "09:00:00");
    }

    #[tokio::test]
    #[serial]
    async fn test_blank_email_rejected() {
        let app = make_test_app().await;

        for body in [json!({ "email": "   " }), json!({})] {
            let req = json_request(
                "POST",
                &format!("/api/checkin?data={}", sample_token()),
                body,
                None,
            );
            let response = app.router.clone().oneshot(req).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            let json = get_json_body(response).await;
            assert_eq!(json["message"], "Please enter your registered email address.");
        }
        assert_eq!(app.store.record_count().await, 0);
    }

    /// Scenarios D-E: missing or undecodable token never reaches the store
    #[tokio::test]
    #[serial]
    async fn test_missing_or_invalid_token_rejected() {
        let app = make_test_app().await;

        let req = json_request("POST", "/api/checkin", json!({ "email": "s@y.com" }), None);
        let response = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Kindly Scan New QR Code from the Admin");

        let response = app
            .router
            .clone()
            .oneshot(submit("%7Bnot-json", "s@y.com"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_json_body(response).await;
        assert_eq!(json["message"], "Invalid QR code data in the URL.");

        assert_eq!(app.store.record_count().await, 0);
    }

    /// The relational backend enforces the same one-record-per-code rule.
    #[tokio::test]
    #[serial]
    async fn test_sql_backend_end_to_end() {
        let (router, store) = make_sql_test_app().await;
        let token = generate(&router).await;
        let decoded = payload::decode(&token).unwrap();

        let first = router.clone().oneshot(submit(&token, "s@y.com")).await.unwrap();
        assert_eq!(first.status(), StatusCode::CREATED);
        let second = router.clone().oneshot(submit(&token, "t@y.com")).await.unwrap();
        assert_eq!(second.status(), StatusCode::CONFLICT);

        let kept = store
            .find_by_scan(&decoded.scan_date, &decoded.scan_time)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(kept.email, "s@y.com");
        assert_eq!(store.list_for_admin("ADM-1").await.unwrap().len(), 1);
    }
}

#[cfg(test)]
mod tests {
    use crate::helpers::{bearer_get, get_json_body, json_request, login, make_test_app};
    use axum::http::{StatusCode, header::CONTENT_TYPE};
    use serde_json::json;
    use serial_test::serial;
    use tower::ServiceExt;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    async fn png_body(response: axum::response::Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }

    #[tokio::test]
    #[serial]
    async fn test_qr_png_for_fresh_code() {
        let app = make_test_app().await;
        let token = login(&app.router, "a@x.com", "secret").await;

        let response = app
            .router
            .oneshot(bearer_get("/api/admin/codes/qr.png", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[CONTENT_TYPE], "image/png");
        assert_eq!(&png_body(response).await[..8], &PNG_MAGIC);
    }

    #[tokio::test]
    #[serial]
    async fn test_qr_png_for_generated_code() {
        let app = make_test_app().await;
        let token = login(&app.router, "a@x.com", "secret").await;

        let req = json_request("POST", "/api/admin/codes", json!({}), Some(&token));
        let created = get_json_body(app.router.clone().oneshot(req).await.unwrap()).await;
        let qr_url = created["data"]["qr_url"].as_str().unwrap();

        let response = app
            .router
            .oneshot(bearer_get(qr_url, &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&png_body(response).await[..8], &PNG_MAGIC);
    }

    #[tokio::test]
    #[serial]
    async fn test_qr_png_rejects_bad_token() {
        let app = make_test_app().await;
        let token = login(&app.router, "a@x.com", "secret").await;

        let response = app
            .router
            .oneshot(bearer_get("/api/admin/codes/qr.png?data=garbage", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    #[serial]
    async fn test_records_lists_own_check_ins() {
        let app = make_test_app().await;
        let token = login(&app.router, "a@x.com", "secret").await;

        let req = json_request("POST", "/api/admin/codes", json!({}), Some(&token));
        let created = get_json_body(app.router.clone().oneshot(req).await.unwrap()).await;
        let code_token = created["data"]["token"].as_str().unwrap().to_owned();

        let req = json_request(
            "POST",
            &format!("/api/checkin?data={code_token}"),
            json!({ "email": "s@y.com" }),
            None,
        );
        let response = app.router.clone().oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .router
            .clone()
            .oneshot(bearer_get("/api/admin/records", &token))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = get_json_body(response).await;
        let records = json["data"].as_array().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["email"], "s@y.com");
        assert_eq!(records[0]["location"], "Hall A");

        // Another admin sees nothing of ADM-1's records.
        let other = login(&app.router, "b@x.com", "pw").await;
        let response = app
            .router
            .oneshot(bearer_get("/api/admin/records", &other))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        assert!(json["data"].as_array().unwrap().is_empty());
    }
}

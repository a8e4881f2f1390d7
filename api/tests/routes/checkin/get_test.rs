#[cfg(test)]
mod tests {
    use crate::helpers::{get_json_body, make_test_app, make_test_app_with};
    use axum::{
        body::Body as AxumBody,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use serial_test::serial;
    use services::{AttendancePayload, CheckInFlow, payload};
    use tower::ServiceExt;

    fn get(uri: &str) -> Request<AxumBody> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(AxumBody::empty())
            .unwrap()
    }

    /// Scenario: no token prompts for a scan
    #[tokio::test]
    #[serial]
    async fn test_view_without_token() {
        let app = make_test_app().await;

        let response = app.router.oneshot(get("/api/checkin")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["state"], "scan_prompt");
        assert_eq!(json["data"]["notice"]["severity"], "warning");
        assert_eq!(json["message"], "Kindly Scan New QR Code from the Admin");
        assert_eq!(app.store.record_count().await, 0);
    }

    /// Scenario: a token that is not valid JSON is reported as invalid
    #[tokio::test]
    #[serial]
    async fn test_view_with_invalid_token() {
        let app = make_test_app().await;

        let response = app
            .router
            .oneshot(get("/api/checkin?data=%7Bnot-json"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = get_json_body(response).await;
        assert_eq!(json["data"]["state"], "invalid_code");
        assert_eq!(json["data"]["notice"]["severity"], "error");
        assert_eq!(json["message"], "Invalid QR code data in the URL.");
    }

    #[tokio::test]
    #[serial]
    async fn test_view_with_valid_token() {
        let app = make_test_app().await;
        let token = payload::encode(&AttendancePayload::mint(
            Utc::now(),
            Some("ADM-1"),
            Some("Main Hall / Block B & C"),
        ));

        let response = app
            .router
            .oneshot(get(&format!("/api/checkin?data={token}")))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["state"], "awaiting_email");
        assert_eq!(json["data"]["payload"]["admin_id"], "ADM-1");
        assert_eq!(
            json["data"]["payload"]["admin_location"],
            "Main Hall / Block B & C"
        );
        assert_eq!(json["message"], "You can only check in once per day");
    }

    #[tokio::test]
    #[serial]
    async fn test_view_with_expired_token() {
        let app = make_test_app_with(CheckInFlow::with_max_age(Duration::minutes(5))).await;
        let token = payload::encode(&AttendancePayload::mint(
            Utc::now() - Duration::minutes(30),
            None,
            None,
        ));

        let response = app
            .router
            .oneshot(get(&format!("/api/checkin?data={token}")))
            .await
            .unwrap();
        let json = get_json_body(response).await;
        assert_eq!(json["data"]["state"], "expired_code");
    }
}

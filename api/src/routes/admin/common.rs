use serde::Serialize;
use services::GeneratedCode;
use services::payload::TOKEN_PARAM;

/// Path of the PNG endpoint, as seen from outside the `/api` nest.
pub const QR_PNG_PATH: &str = "/api/admin/codes/qr.png";

#[derive(Debug, Serialize, Default)]
pub struct CodeResponse {
    pub scan_date: String,
    pub scan_time: String,
    pub admin_id: String,
    pub admin_location: String,
    pub token: String,
    pub link: String,
    pub qr_url: String,
}

impl From<GeneratedCode> for CodeResponse {
    fn from(code: GeneratedCode) -> Self {
        let qr_url = format!("{QR_PNG_PATH}?{TOKEN_PARAM}={}", code.token);
        Self {
            scan_date: code.payload.scan_date,
            scan_time: code.payload.scan_time,
            admin_id: code.payload.admin_id,
            admin_location: code.payload.admin_location,
            token: code.token,
            link: code.link,
            qr_url,
        }
    }
}

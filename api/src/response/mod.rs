use serde::Serialize;

/// Envelope for every JSON response:
///
/// ```json
/// {
///   "success": true,
///   "data": { "scan_date": "10-01-2024", "scan_time": "09:00:00" },
///   "message": "QR code generated"
/// }
/// ```
///
/// Failures carry `success: false`, a default `data` and the human-readable
/// notice in `message`.
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

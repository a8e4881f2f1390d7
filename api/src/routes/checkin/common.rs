use serde::{Deserialize, Serialize};
use services::{CheckInView, Notice};

/// The page state plus the notice a form renderer should show with it.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    #[serde(flatten)]
    pub view: CheckInView,
    pub notice: Notice,
}

impl From<CheckInView> for ViewResponse {
    fn from(view: CheckInView) -> Self {
        let notice = view.notice();
        Self { view, notice }
    }
}

#[derive(Debug, Deserialize)]
pub struct CheckInRequest {
    #[serde(default)]
    pub email: String,
}

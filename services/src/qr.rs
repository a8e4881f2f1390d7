//! QR image rendering.

use image::{ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};
use std::io::Cursor;

use crate::error::FlowError;

/// Pixels per QR module.
const MODULE_PX: u32 = 10;

/// Renders `data` as a black-on-white PNG: low error correction, 10px modules,
/// standard quiet zone.
pub fn render_png(data: &str) -> Result<Vec<u8>, FlowError> {
    let code = QrCode::with_error_correction_level(data.as_bytes(), EcLevel::L)
        .map_err(|e| FlowError::Render(e.to_string()))?;

    let img = code
        .render::<Luma<u8>>()
        .module_dimensions(MODULE_PX, MODULE_PX)
        .quiet_zone(true)
        .build();

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| FlowError::Render(e.to_string()))?;
    Ok(png)
}

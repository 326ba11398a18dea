use image::ImageEncoder;
use image::codecs::png::PngEncoder;
use lasso_types::frame::CapturedFrame;
use lasso_types::geometry::Rect;

use crate::SearchError;

/// Crop the frame to a pixel-space rect and encode the result as PNG.
/// The rect is clamped to the frame; a rect entirely outside it fails.
pub fn crop_to_png(frame: &CapturedFrame, region: Rect) -> Result<Vec<u8>, SearchError> {
    let frame_bounds = Rect::new(0.0, 0.0, frame.width as f32, frame.height as f32);
    let region = region
        .intersection(&frame_bounds)
        .ok_or(SearchError::CropFailed)?;

    let x = region.x.floor() as u32;
    let y = region.y.floor() as u32;
    let width = (region.width.ceil() as u32).min(frame.width - x);
    let height = (region.height.ceil() as u32).min(frame.height - y);
    if width == 0 || height == 0 {
        return Err(SearchError::CropFailed);
    }

    let image = image::RgbaImage::from_raw(frame.width, frame.height, frame.data.as_ref().clone())
        .ok_or(SearchError::CropFailed)?;
    let cropped = image::imageops::crop_imm(&image, x, y, width, height).to_image();

    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            cropped.as_raw(),
            cropped.width(),
            cropped.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|err| SearchError::EncodeFailed(err.to_string()))?;
    Ok(buffer)
}

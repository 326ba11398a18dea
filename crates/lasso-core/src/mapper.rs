//! Pure conversions between the three coordinate spaces the pipeline touches:
//! normalized recognition coords (0..1, bottom-left origin), screen/overlay
//! coords (top-left origin), and the pixel buffer of the captured frame.

use lasso_types::geometry::{Rect, Size};

/// Normalized (bottom-left origin) to screen (top-left origin). Flips the Y
/// axis and scales by the viewport.
pub fn to_screen(normalized: Rect, viewport: Size) -> Rect {
    Rect::new(
        normalized.x * viewport.width,
        (1.0 - normalized.y - normalized.height) * viewport.height,
        normalized.width * viewport.width,
        normalized.height * viewport.height,
    )
}

/// Inverse of [`to_screen`].
pub fn to_normalized(screen: Rect, viewport: Size) -> Rect {
    let height = screen.height / viewport.height;
    Rect::new(
        screen.x / viewport.width,
        1.0 - screen.y / viewport.height - height,
        screen.width / viewport.width,
        height,
    )
}

/// Screen coords to pixel-buffer coords, rescaling for any backing-scale
/// mismatch between the viewport and the captured frame.
pub fn to_pixel(screen: Rect, image: Size, viewport: Size) -> Rect {
    let scale_x = image.width / viewport.width;
    let scale_y = image.height / viewport.height;
    Rect::new(
        screen.x * scale_x,
        screen.y * scale_y,
        screen.width * scale_x,
        screen.height * scale_y,
    )
}

//! Decides what a finalized selection resolves to, in fixed priority order:
//! barcode intent, then selected text, then reverse-image crop, then nothing.

use lasso_types::geometry::{Point, Rect, Size};
use lasso_types::observation::{BarcodePayload, DetectedBarcode};

use crate::{barcode, mapper};

#[derive(Debug, Clone, PartialEq)]
pub enum RoutedQuery {
    /// A barcode on the frame wins over everything else.
    BarcodeIntent(BarcodePayload),
    /// Literal joined text of the selected words.
    TextQuery(String),
    /// Pixel-space crop rect of the frame for reverse-image search.
    ImageSearch(Rect),
    /// Degenerate gesture; the caller tears the overlay down.
    Nothing,
}

pub fn route(
    barcodes: &[DetectedBarcode],
    selected_text: Option<&str>,
    fallback_path: Option<&[Point]>,
    image: Size,
    viewport: Size,
) -> RoutedQuery {
    if let Some(code) = barcodes.first() {
        return RoutedQuery::BarcodeIntent(barcode::parse_payload(&code.payload));
    }

    if let Some(text) = selected_text
        && !text.trim().is_empty()
    {
        return RoutedQuery::TextQuery(text.to_string());
    }

    if let Some(path) = fallback_path
        && let Some(bounds) = Rect::bounding(path)
    {
        let pixel = mapper::to_pixel(bounds, image, viewport);
        let frame_bounds = Rect::new(0.0, 0.0, image.width, image.height);
        if let Some(crop) = pixel.intersection(&frame_bounds)
            && crop.area() >= 1.0
        {
            return RoutedQuery::ImageSearch(crop);
        }
    }

    RoutedQuery::Nothing
}

#[cfg(test)]
mod tests {
    use super::*;
    use lasso_types::observation::Symbology;

    fn wifi_barcode() -> DetectedBarcode {
        DetectedBarcode {
            symbology: Symbology::Qr,
            payload: "WIFI:S:Home;T:WPA;P:secret;;".to_string(),
            rect: Rect::new(0.4, 0.4, 0.2, 0.2),
        }
    }

    const IMAGE: Size = Size {
        width: 200.0,
        height: 200.0,
    };
    const VIEWPORT: Size = Size {
        width: 100.0,
        height: 100.0,
    };

    #[test]
    fn barcode_wins_over_selected_text() {
        let query = route(
            &[wifi_barcode()],
            Some("Buy milk today"),
            None,
            IMAGE,
            VIEWPORT,
        );
        assert_eq!(
            query,
            RoutedQuery::BarcodeIntent(BarcodePayload::Wifi {
                ssid: "Home".to_string(),
                password: Some("secret".to_string()),
                security: Some("WPA".to_string()),
                hidden: false,
            })
        );
    }

    #[test]
    fn text_wins_over_the_stroke_path() {
        let path = [Point::new(10.0, 10.0), Point::new(40.0, 30.0)];
        let query = route(&[], Some("hello"), Some(&path), IMAGE, VIEWPORT);
        assert_eq!(query, RoutedQuery::TextQuery("hello".to_string()));
    }

    #[test]
    fn whitespace_text_does_not_count_as_a_query() {
        let path = [Point::new(10.0, 10.0), Point::new(40.0, 30.0)];
        let query = route(&[], Some("   "), Some(&path), IMAGE, VIEWPORT);
        // 2x backing scale between viewport and image.
        assert_eq!(
            query,
            RoutedQuery::ImageSearch(Rect::new(20.0, 20.0, 60.0, 40.0))
        );
    }

    #[test]
    fn path_crop_is_clamped_to_the_frame() {
        let path = [Point::new(-20.0, 50.0), Point::new(50.0, 120.0)];
        let query = route(&[], None, Some(&path), IMAGE, VIEWPORT);
        assert_eq!(
            query,
            RoutedQuery::ImageSearch(Rect::new(0.0, 100.0, 100.0, 100.0))
        );
    }

    #[test]
    fn fully_offscreen_or_absent_input_is_nothing() {
        let offscreen = [Point::new(-50.0, -50.0), Point::new(-10.0, -10.0)];
        assert_eq!(
            route(&[], None, Some(&offscreen), IMAGE, VIEWPORT),
            RoutedQuery::Nothing
        );
        assert_eq!(route(&[], None, None, IMAGE, VIEWPORT), RoutedQuery::Nothing);
    }
}

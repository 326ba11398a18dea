use crate::geometry::Rect;

/// One recognized text line/region. The rect is normalized (0..1) with a
/// bottom-left origin, the convention of the recognition engines we consume.
/// Region lists are replaced wholesale per snapshot, never patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRegion {
    pub text: String,
    pub rect: Rect,
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecognitionQuality {
    /// Low-accuracy pass that unblocks interaction quickly.
    Fast,
    /// Slower pass whose snapshot supersedes the fast one.
    Accurate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbology {
    Qr,
    Aztec,
    Pdf417,
    Ean8,
    Ean13,
    UpcA,
    Code39,
    Code128,
}

/// A barcode found on the captured frame, rect normalized like [`TextRegion`].
#[derive(Debug, Clone, PartialEq)]
pub struct DetectedBarcode {
    pub symbology: Symbology,
    pub payload: String,
    pub rect: Rect,
}

/// Typed interpretation of a barcode payload, parsed by prefix/pattern
/// matching (`lasso_core::barcode`). Drives which intent the router fires.
#[derive(Debug, Clone, PartialEq)]
pub enum BarcodePayload {
    Wifi {
        ssid: String,
        password: Option<String>,
        security: Option<String>,
        hidden: bool,
    },
    Url(String),
    Phone(String),
    Sms {
        number: String,
        body: Option<String>,
    },
    Contact {
        name: Option<String>,
        phone: Option<String>,
        email: Option<String>,
    },
    CalendarEvent {
        summary: Option<String>,
        starts: Option<String>,
        ends: Option<String>,
    },
    Product {
        gtin: String,
    },
    Text(String),
}

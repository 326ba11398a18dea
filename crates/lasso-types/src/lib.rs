pub mod events;
pub mod frame;
pub mod geometry;
pub mod observation;

pub use events::{AppEvent, GestureEvent, SelectionHandle};
pub use frame::{CapturedFrame, FrameId, PixelFormat, RawFrame};
pub use geometry::{Point, Rect, Size};
pub use observation::{
    BarcodePayload, DetectedBarcode, RecognitionQuality, Symbology, TextRegion,
};

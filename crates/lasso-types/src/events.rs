use crate::frame::FrameId;
use crate::geometry::Point;
use crate::observation::{DetectedBarcode, RecognitionQuality, TextRegion};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionHandle {
    Start,
    End,
}

/// User input forwarded by the overlay collaborator. Points are in
/// screen-space overlay coordinates (top-left origin).
#[derive(Debug, Clone)]
pub enum GestureEvent {
    StrokeMoved(Vec<Point>),
    StrokeEnded,
    Tap(Point),
    HandleDragged {
        handle: SelectionHandle,
        point: Point,
    },
    Escape,
}

/// Everything the interaction loop consumes. Background tasks only ever post
/// immutable snapshots here; they never touch live state directly.
#[derive(Debug, Clone)]
pub enum AppEvent {
    /// External trigger (hotkey, menu item) asking for a new capture.
    CaptureRequested,
    Gesture(GestureEvent),
    RegionsReady {
        frame: FrameId,
        quality: RecognitionQuality,
        regions: Vec<TextRegion>,
    },
    BarcodesReady {
        frame: FrameId,
        barcodes: Vec<DetectedBarcode>,
    },
    /// The process regained foreground activation while an overlay is open.
    FocusRegained,
}

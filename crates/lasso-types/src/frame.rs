use std::fmt;
use std::sync::Arc;
use std::time::SystemTime;

use uuid::Uuid;

use crate::geometry::Size;

/// Identity of one captured frame. Background results (OCR snapshots, barcode
/// detections) carry the id they were computed for, so stale results can be
/// dropped by comparison instead of timing heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameId(Uuid);

impl FrameId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FrameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FrameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Immutable RGBA pixel buffer produced by a completed capture session.
/// Cloning is cheap; the buffer itself is shared and freed with the last owner.
#[derive(Debug, Clone)]
pub struct CapturedFrame {
    pub id: FrameId,
    pub data: Arc<Vec<u8>>,
    pub width: u32,
    pub height: u32,
    pub captured_at: SystemTime,
}

impl CapturedFrame {
    pub fn new(data: Vec<u8>, width: u32, height: u32) -> Self {
        Self {
            id: FrameId::new(),
            data: Arc::new(data),
            width,
            height,
            captured_at: SystemTime::now(),
        }
    }

    pub fn size(&self) -> Size {
        Size::new(self.width as f32, self.height as f32)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgba8,
    Bgra8,
}

/// A frame as delivered by a capture stream, before conversion into the
/// transferable [`CapturedFrame`] type.
#[derive(Debug, Clone)]
pub struct RawFrame {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}

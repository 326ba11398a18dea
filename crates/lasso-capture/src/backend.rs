use async_trait::async_trait;
use lasso_config::capture::CaptureConfig;
use lasso_types::frame::{CapturedFrame, PixelFormat, RawFrame};

use crate::error::CaptureError;

#[derive(Debug, Clone)]
pub struct DisplayHandle {
    pub id: u32,
    pub width: u32,
    pub height: u32,
}

/// Platform capture capability. Implementations live at the edge of the
/// process (xcap here, anything frame-producing in tests).
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    fn permission_granted(&self) -> bool;

    async fn enumerate_displays(&self) -> anyhow::Result<Vec<DisplayHandle>>;

    async fn open_stream(
        &self,
        display: &DisplayHandle,
        config: &CaptureConfig,
    ) -> anyhow::Result<Box<dyn FrameStream>>;
}

/// An open capture stream. The session only ever pulls one frame and stops.
#[async_trait]
pub trait FrameStream: Send {
    async fn next_frame(&mut self) -> anyhow::Result<RawFrame>;

    async fn stop(&mut self);
}

/// Convert a raw stream frame into the transferable [`CapturedFrame`].
pub fn convert_frame(raw: RawFrame) -> Result<CapturedFrame, CaptureError> {
    let expected = raw.width as usize * raw.height as usize * 4;
    if raw.width == 0 || raw.height == 0 || raw.data.len() != expected {
        return Err(CaptureError::ImageConversionFailed);
    }
    let data = match raw.format {
        PixelFormat::Rgba8 => raw.data,
        PixelFormat::Bgra8 => {
            let mut data = raw.data;
            for px in data.chunks_exact_mut(4) {
                px.swap(0, 2);
            }
            data
        }
    };
    Ok(CapturedFrame::new(data, raw.width, raw.height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bgra_frames_are_swizzled_to_rgba() {
        let raw = RawFrame {
            data: vec![1, 2, 3, 4, 5, 6, 7, 8],
            width: 2,
            height: 1,
            format: PixelFormat::Bgra8,
        };
        let frame = convert_frame(raw).unwrap();
        assert_eq!(frame.data.as_slice(), &[3, 2, 1, 4, 7, 6, 5, 8]);
    }

    #[test]
    fn truncated_buffers_fail_conversion() {
        let raw = RawFrame {
            data: vec![0; 7],
            width: 2,
            height: 1,
            format: PixelFormat::Rgba8,
        };
        assert!(matches!(
            convert_frame(raw),
            Err(CaptureError::ImageConversionFailed)
        ));
    }
}

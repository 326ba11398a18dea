use anyhow::{Context, Result};
use async_trait::async_trait;
use lasso_config::capture::CaptureConfig;
use lasso_types::frame::{PixelFormat, RawFrame};
use xcap::Monitor;

use crate::backend::{CaptureBackend, DisplayHandle, FrameStream};

/// Cross-platform capture backend over xcap. Monitor access is synchronous,
/// so every call runs under spawn_blocking.
pub struct XcapBackend;

#[async_trait]
impl CaptureBackend for XcapBackend {
    fn permission_granted(&self) -> bool {
        // xcap has no separate permission probe; a denial surfaces as a
        // capture error on the stream instead.
        true
    }

    async fn enumerate_displays(&self) -> Result<Vec<DisplayHandle>> {
        let monitors = tokio::task::spawn_blocking(Monitor::all)
            .await
            .context("monitor enumeration task failed")?
            .context("failed to enumerate monitors")?;
        Ok(monitors
            .iter()
            .map(|m| DisplayHandle {
                id: m.id(),
                width: m.width(),
                height: m.height(),
            })
            .collect())
    }

    async fn open_stream(
        &self,
        display: &DisplayHandle,
        _config: &CaptureConfig,
    ) -> Result<Box<dyn FrameStream>> {
        Ok(Box::new(XcapStream {
            display_id: display.id,
        }))
    }
}

struct XcapStream {
    display_id: u32,
}

#[async_trait]
impl FrameStream for XcapStream {
    async fn next_frame(&mut self) -> Result<RawFrame> {
        let id = self.display_id;
        let image = tokio::task::spawn_blocking(move || -> Result<xcap::image::RgbaImage> {
            let monitors = Monitor::all().context("failed to enumerate monitors")?;
            let monitor = monitors
                .into_iter()
                .find(|m| m.id() == id)
                .context("monitor disappeared before the first frame")?;
            monitor.capture_image().context("failed to capture monitor")
        })
        .await
        .context("capture task failed")??;

        Ok(RawFrame {
            width: image.width(),
            height: image.height(),
            data: image.into_raw(),
            format: PixelFormat::Rgba8,
        })
    }

    async fn stop(&mut self) {}
}

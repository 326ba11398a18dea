//! Capabilities the pipeline consumes from the UI side of the process:
//! the interactive overlay, the result display, focus hand-off, and the
//! resolver for barcode intents. Rendering lives behind these traits.

use async_trait::async_trait;
use lasso_types::frame::CapturedFrame;
use lasso_types::geometry::Size;
use lasso_types::observation::BarcodePayload;

/// Opaque handle to an application the window system can reactivate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppHandle(pub String);

#[async_trait]
pub trait Overlay: Send + Sync {
    /// Present the overlay for a frame and report the viewport it occupies.
    async fn show(&self, frame: &CapturedFrame) -> anyhow::Result<Size>;

    async fn dismiss(&self);

    /// Reassert keyboard/mouse focus on the overlay window.
    async fn focus(&self) -> anyhow::Result<()>;
}

#[async_trait]
pub trait ResultDisplay: Send + Sync {
    async fn show_text(&self, query: &str);

    async fn show_url(&self, url: &str);

    async fn show_error(&self, message: &str);

    async fn hide(&self);
}

pub trait Focus: Send + Sync {
    /// The application that held focus before the overlay appeared.
    fn previous_application(&self) -> Option<AppHandle>;

    fn reactivate(&self, app: &AppHandle) -> anyhow::Result<()>;
}

/// Executes the action a decoded barcode stands for (open URL, copy WiFi
/// credentials, add contact or event, dial, compose a message).
#[async_trait]
pub trait IntentResolver: Send + Sync {
    async fn resolve(&self, payload: BarcodePayload) -> anyhow::Result<()>;
}

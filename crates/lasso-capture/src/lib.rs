mod backend;
mod error;
mod session;
mod xcap_backend;

pub use backend::{CaptureBackend, DisplayHandle, FrameStream, convert_frame};
pub use error::{CaptureError, FailureKind};
pub use session::{CaptureSession, CaptureState};
pub use xcap_backend::XcapBackend;

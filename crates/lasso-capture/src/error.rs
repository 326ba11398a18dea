use thiserror::Error;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("screen capture permission denied")]
    PermissionDenied,

    #[error("no displays found")]
    NoDisplaysFound,

    #[error("failed to open capture stream: {0}")]
    StreamCreationFailed(String),

    #[error("stream error before the first frame arrived: {0}")]
    FrameCaptureFailed(String),

    #[error("could not convert the captured frame")]
    ImageConversionFailed,

    #[error("a capture session is already active")]
    AlreadyActive,
}

/// Which step a session failed on. Carried in `CaptureState::Failed` so the
/// reason is observable without keeping the error value alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    PermissionDenied,
    NoDisplaysFound,
    StreamCreationFailed,
    FrameCaptureFailed,
    ImageConversionFailed,
}

impl CaptureError {
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            CaptureError::PermissionDenied => Some(FailureKind::PermissionDenied),
            CaptureError::NoDisplaysFound => Some(FailureKind::NoDisplaysFound),
            CaptureError::StreamCreationFailed(_) => Some(FailureKind::StreamCreationFailed),
            CaptureError::FrameCaptureFailed(_) => Some(FailureKind::FrameCaptureFailed),
            CaptureError::ImageConversionFailed => Some(FailureKind::ImageConversionFailed),
            CaptureError::AlreadyActive => None,
        }
    }

    /// User-facing hint for failures the user can actually fix.
    pub fn remediation(&self) -> Option<&'static str> {
        match self {
            CaptureError::PermissionDenied => {
                Some("Allow screen capture for this app in system settings, then try again.")
            }
            CaptureError::NoDisplaysFound => Some("Connect a display and try again."),
            _ => None,
        }
    }
}

use std::sync::{Arc, Mutex, MutexGuard};

use lasso_config::capture::CaptureConfig;
use lasso_types::frame::CapturedFrame;

use crate::backend::{CaptureBackend, convert_frame};
use crate::error::{CaptureError, FailureKind};

/// Lifecycle of one capture attempt. `Failed` is reachable from any non-Idle
/// state and resets to `Idle` once reported; `Completed` persists until
/// [`CaptureSession::release`] hands the session back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    PermissionPending,
    Starting,
    Streaming,
    FrameAcquired,
    Completed,
    Failed(FailureKind),
}

/// Owns one capture attempt at a time. `start()` is single-flight: a call
/// while any prior attempt is still running is rejected synchronously,
/// before any stream or future is created.
pub struct CaptureSession {
    backend: Arc<dyn CaptureBackend>,
    config: CaptureConfig,
    state: Mutex<CaptureState>,
}

impl CaptureSession {
    pub fn new(backend: Arc<dyn CaptureBackend>, config: CaptureConfig) -> Self {
        Self {
            backend,
            config,
            state: Mutex::new(CaptureState::Idle),
        }
    }

    pub fn current_state(&self) -> CaptureState {
        *self.state_guard()
    }

    /// Run one full capture: permission check, display enumeration, stream
    /// open, first frame, conversion. On success the session stays Completed
    /// until the caller has handed the frame on and calls [`Self::release`].
    pub async fn start(&self) -> Result<CapturedFrame, CaptureError> {
        if !self.begin() {
            tracing::warn!(
                state = ?self.current_state(),
                "capture start rejected, a session is already active"
            );
            return Err(CaptureError::AlreadyActive);
        }

        match self.run().await {
            Ok(frame) => {
                self.set_state(CaptureState::Completed);
                tracing::debug!(
                    frame = %frame.id,
                    width = frame.width,
                    height = frame.height,
                    "capture completed"
                );
                Ok(frame)
            }
            Err(err) => {
                if let Some(kind) = err.failure_kind() {
                    self.set_state(CaptureState::Failed(kind));
                }
                match err.remediation() {
                    Some(hint) => tracing::error!(error = %err, hint, "capture failed"),
                    None => tracing::error!(error = %err, "capture failed"),
                }
                self.set_state(CaptureState::Idle);
                Err(err)
            }
        }
    }

    /// Return a Completed session to Idle. Called once frame ownership has
    /// passed on (or the frame was dropped); a no-op in every other state.
    pub fn release(&self) {
        let mut state = self.state_guard();
        if *state == CaptureState::Completed {
            *state = CaptureState::Idle;
        }
    }

    /// Atomically claim the session. Only an Idle session can be claimed.
    fn begin(&self) -> bool {
        let mut state = self.state_guard();
        if *state != CaptureState::Idle {
            return false;
        }
        *state = CaptureState::PermissionPending;
        true
    }

    async fn run(&self) -> Result<CapturedFrame, CaptureError> {
        if !self.backend.permission_granted() {
            return Err(CaptureError::PermissionDenied);
        }

        self.set_state(CaptureState::Starting);
        let displays = self
            .backend
            .enumerate_displays()
            .await
            .map_err(|err| {
                tracing::debug!(error = %err, "display enumeration failed");
                CaptureError::NoDisplaysFound
            })?;
        let display = displays
            .get(self.config.display_index)
            .or_else(|| displays.first())
            .ok_or(CaptureError::NoDisplaysFound)?
            .clone();

        let mut stream = self
            .backend
            .open_stream(&display, &self.config)
            .await
            .map_err(|err| CaptureError::StreamCreationFailed(err.to_string()))?;
        self.set_state(CaptureState::Streaming);

        // Only one frame is ever needed; stop the stream on either outcome.
        let raw = match stream.next_frame().await {
            Ok(raw) => {
                stream.stop().await;
                raw
            }
            Err(err) => {
                stream.stop().await;
                return Err(CaptureError::FrameCaptureFailed(err.to_string()));
            }
        };
        self.set_state(CaptureState::FrameAcquired);

        convert_frame(raw)
    }

    fn set_state(&self, state: CaptureState) {
        *self.state_guard() = state;
    }

    fn state_guard(&self) -> MutexGuard<'_, CaptureState> {
        // The guarded value is a plain Copy enum; a poisoned lock cannot
        // leave it torn, so recover instead of panicking.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use async_trait::async_trait;
    use lasso_types::frame::{PixelFormat, RawFrame};
    use tokio::sync::Notify;
    use tokio::time::timeout;

    use super::*;
    use crate::backend::{DisplayHandle, FrameStream};

    #[derive(Default)]
    struct MockBackend {
        deny_permission: bool,
        no_displays: bool,
        fail_open: bool,
        fail_frame: bool,
        truncate_frame: bool,
        opened_streams: AtomicUsize,
        hold_frame: Option<Arc<Notify>>,
    }

    struct MockStream {
        fail_frame: bool,
        truncate_frame: bool,
        hold_frame: Option<Arc<Notify>>,
    }

    #[async_trait]
    impl CaptureBackend for MockBackend {
        fn permission_granted(&self) -> bool {
            !self.deny_permission
        }

        async fn enumerate_displays(&self) -> anyhow::Result<Vec<DisplayHandle>> {
            if self.no_displays {
                return Ok(Vec::new());
            }
            Ok(vec![DisplayHandle {
                id: 1,
                width: 4,
                height: 4,
            }])
        }

        async fn open_stream(
            &self,
            _display: &DisplayHandle,
            _config: &CaptureConfig,
        ) -> anyhow::Result<Box<dyn FrameStream>> {
            if self.fail_open {
                anyhow::bail!("virtual display refused the stream");
            }
            self.opened_streams.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(MockStream {
                fail_frame: self.fail_frame,
                truncate_frame: self.truncate_frame,
                hold_frame: self.hold_frame.clone(),
            }))
        }
    }

    #[async_trait]
    impl FrameStream for MockStream {
        async fn next_frame(&mut self) -> anyhow::Result<RawFrame> {
            if let Some(gate) = &self.hold_frame {
                gate.notified().await;
            }
            if self.fail_frame {
                anyhow::bail!("stream died");
            }
            let pixels = if self.truncate_frame { 3 } else { 64 };
            Ok(RawFrame {
                data: vec![0xAA; pixels],
                width: 4,
                height: 4,
                format: PixelFormat::Rgba8,
            })
        }

        async fn stop(&mut self) {}
    }

    fn session(backend: MockBackend) -> Arc<CaptureSession> {
        Arc::new(CaptureSession::new(
            Arc::new(backend),
            CaptureConfig::default(),
        ))
    }

    #[tokio::test]
    async fn happy_path_stays_completed_until_released() {
        let session = session(MockBackend::default());
        let frame = session.start().await.expect("capture should succeed");
        assert_eq!(frame.width, 4);
        assert_eq!(frame.height, 4);
        assert_eq!(session.current_state(), CaptureState::Completed);
        session.release();
        assert_eq!(session.current_state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn completed_session_rejects_new_starts_until_released() {
        let session = session(MockBackend::default());
        session.start().await.expect("capture should succeed");
        assert!(matches!(
            session.start().await,
            Err(CaptureError::AlreadyActive)
        ));
        session.release();
        assert!(session.start().await.is_ok());
    }

    #[tokio::test]
    async fn release_outside_completed_changes_nothing() {
        let session = session(MockBackend::default());
        session.release();
        assert_eq!(session.current_state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn permission_denial_fails_without_opening_a_stream() {
        let backend = MockBackend {
            deny_permission: true,
            ..Default::default()
        };
        let session = session(backend);
        let err = session.start().await.unwrap_err();
        assert!(matches!(err, CaptureError::PermissionDenied));
        assert!(err.remediation().is_some());
        assert_eq!(session.current_state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn zero_displays_fail_the_session() {
        let session = session(MockBackend {
            no_displays: true,
            ..Default::default()
        });
        assert!(matches!(
            session.start().await,
            Err(CaptureError::NoDisplaysFound)
        ));
        assert_eq!(session.current_state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn stream_open_failure_is_reported_as_such() {
        let session = session(MockBackend {
            fail_open: true,
            ..Default::default()
        });
        assert!(matches!(
            session.start().await,
            Err(CaptureError::StreamCreationFailed(_))
        ));
    }

    #[tokio::test]
    async fn stream_error_before_a_frame_maps_to_frame_capture_failed() {
        let session = session(MockBackend {
            fail_frame: true,
            ..Default::default()
        });
        assert!(matches!(
            session.start().await,
            Err(CaptureError::FrameCaptureFailed(_))
        ));
        assert_eq!(session.current_state(), CaptureState::Idle);
    }

    #[tokio::test]
    async fn bad_buffer_maps_to_image_conversion_failed() {
        let session = session(MockBackend {
            truncate_frame: true,
            ..Default::default()
        });
        assert!(matches!(
            session.start().await,
            Err(CaptureError::ImageConversionFailed)
        ));
    }

    #[tokio::test]
    async fn start_while_streaming_is_rejected_and_opens_no_second_stream() {
        let gate = Arc::new(Notify::new());
        let backend = Arc::new(MockBackend {
            hold_frame: Some(gate.clone()),
            ..Default::default()
        });
        let session = Arc::new(CaptureSession::new(
            backend.clone(),
            CaptureConfig::default(),
        ));

        let first = {
            let session = session.clone();
            tokio::spawn(async move { session.start().await })
        };

        // Wait until the first attempt is parked inside the stream.
        timeout(Duration::from_secs(2), async {
            while session.current_state() != CaptureState::Streaming {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("first session never reached Streaming");

        let second = session.start().await;
        assert!(matches!(second, Err(CaptureError::AlreadyActive)));
        assert_eq!(session.current_state(), CaptureState::Streaming);
        assert_eq!(backend.opened_streams.load(Ordering::SeqCst), 1);

        gate.notify_one();
        let first = timeout(Duration::from_secs(2), first)
            .await
            .expect("first session never finished")
            .expect("task panicked");
        assert!(first.is_ok());
        assert_eq!(session.current_state(), CaptureState::Completed);
    }

    #[tokio::test]
    async fn a_failed_session_can_start_again() {
        let session = session(MockBackend {
            fail_frame: true,
            ..Default::default()
        });
        assert!(session.start().await.is_err());
        // Second attempt is accepted; it fails the same way but is not
        // rejected as AlreadyActive.
        assert!(matches!(
            session.start().await,
            Err(CaptureError::FrameCaptureFailed(_))
        ));
    }
}

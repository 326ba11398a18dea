//! Shared fakes and harness for the pipeline tests. The tests play the role
//! of the interaction loop and feed events to `handle_event` directly.


use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kanal::AsyncReceiver;
use lasso_capture::{CaptureBackend, CaptureSession, DisplayHandle, FrameStream};
use lasso_config::Config;
use lasso_config::capture::CaptureConfig;
use lasso_index::{BarcodeDetector, RecognizeError, TextRecognizer, TextRegionIndexer};
use lasso_search::ReverseImageClient;
use lasso_types::events::AppEvent;
use lasso_types::frame::{CapturedFrame, PixelFormat, RawFrame};
use lasso_types::geometry::{Rect, Size};
use lasso_types::observation::{
    BarcodePayload, DetectedBarcode, RecognitionQuality, Symbology, TextRegion,
};
use tokio::time::timeout;

use crate::coordinator::OverlaySessionCoordinator;
use crate::events::{Pipeline, handle_event};
use crate::state::AppState;
use crate::surface::{AppHandle, Focus, IntentResolver, Overlay, ResultDisplay};

pub type Log = Arc<Mutex<Vec<String>>>;

pub fn new_log() -> Log {
    Arc::new(Mutex::new(Vec::new()))
}

fn push(log: &Log, entry: impl Into<String>) {
    log.lock().unwrap().push(entry.into());
}

pub fn log_count(log: &Log, needle: &str) -> usize {
    log.lock().unwrap().iter().filter(|e| e.contains(needle)).count()
}

pub async fn wait_for_log(log: &Log, needle: &str) {
    timeout(Duration::from_secs(3), async {
        loop {
            if log_count(log, needle) > 0 {
                return;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
    })
    .await
    .unwrap_or_else(|_| panic!("log entry '{needle}' never appeared"));
}

// --- collaborator fakes -------------------------------------------------

pub struct FakeOverlay {
    pub viewport: Size,
    pub log: Log,
}

#[async_trait]
impl Overlay for FakeOverlay {
    async fn show(&self, _frame: &CapturedFrame) -> anyhow::Result<Size> {
        push(&self.log, "overlay.show");
        Ok(self.viewport)
    }

    async fn dismiss(&self) {
        push(&self.log, "overlay.dismiss");
    }

    async fn focus(&self) -> anyhow::Result<()> {
        push(&self.log, "overlay.focus");
        Ok(())
    }
}

pub struct RecordingDisplay {
    pub log: Log,
}

#[async_trait]
impl ResultDisplay for RecordingDisplay {
    async fn show_text(&self, query: &str) {
        push(&self.log, format!("display.text:{query}"));
    }

    async fn show_url(&self, url: &str) {
        push(&self.log, format!("display.url:{url}"));
    }

    async fn show_error(&self, message: &str) {
        push(&self.log, format!("display.error:{message}"));
    }

    async fn hide(&self) {
        push(&self.log, "display.hide");
    }
}

pub struct FakeFocus {
    pub log: Log,
}

impl Focus for FakeFocus {
    fn previous_application(&self) -> Option<AppHandle> {
        Some(AppHandle("previous".to_string()))
    }

    fn reactivate(&self, app: &AppHandle) -> anyhow::Result<()> {
        push(&self.log, format!("focus.reactivate:{}", app.0));
        Ok(())
    }
}

pub struct RecordingIntents {
    pub log: Log,
    pub payloads: Mutex<Vec<BarcodePayload>>,
}

#[async_trait]
impl IntentResolver for RecordingIntents {
    async fn resolve(&self, payload: BarcodePayload) -> anyhow::Result<()> {
        push(&self.log, "intent.resolve");
        self.payloads.lock().unwrap().push(payload);
        Ok(())
    }
}

// --- recognition fakes --------------------------------------------------

pub struct ScriptedRecognizer {
    pub regions: Vec<TextRegion>,
}

#[async_trait]
impl TextRecognizer for ScriptedRecognizer {
    async fn recognize(
        &self,
        _frame: &CapturedFrame,
        _quality: RecognitionQuality,
    ) -> Result<Vec<TextRegion>, RecognizeError> {
        Ok(self.regions.clone())
    }
}

pub struct ScriptedDetector {
    pub barcodes: Vec<DetectedBarcode>,
}

#[async_trait]
impl BarcodeDetector for ScriptedDetector {
    async fn detect(
        &self,
        _frame: &CapturedFrame,
    ) -> Result<Vec<DetectedBarcode>, RecognizeError> {
        Ok(self.barcodes.clone())
    }
}

/// Always delivers one 200x200 frame, twice the fake overlay's viewport.
struct TestBackend;

#[async_trait]
impl CaptureBackend for TestBackend {
    fn permission_granted(&self) -> bool {
        true
    }

    async fn enumerate_displays(&self) -> anyhow::Result<Vec<DisplayHandle>> {
        Ok(vec![DisplayHandle {
            id: 1,
            width: 200,
            height: 200,
        }])
    }

    async fn open_stream(
        &self,
        _display: &DisplayHandle,
        _config: &CaptureConfig,
    ) -> anyhow::Result<Box<dyn FrameStream>> {
        Ok(Box::new(TestStream))
    }
}

struct TestStream;

#[async_trait]
impl FrameStream for TestStream {
    async fn next_frame(&mut self) -> anyhow::Result<RawFrame> {
        Ok(RawFrame {
            data: vec![0x80; 200 * 200 * 4],
            width: 200,
            height: 200,
            format: PixelFormat::Rgba8,
        })
    }

    async fn stop(&mut self) {}
}

// --- harness ------------------------------------------------------------

pub struct Harness {
    pub state: Arc<AppState>,
    pub pipeline: Pipeline,
    pub coordinator: OverlaySessionCoordinator,
    pub rx: AsyncReceiver<AppEvent>,
    pub log: Log,
    pub intents: Arc<RecordingIntents>,
}

impl Harness {
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        detector: Arc<dyn BarcodeDetector>,
    ) -> Self {
        let log = new_log();

        let mut config = Config::default();
        config.selection.brush_tolerance_px = 2.0;
        config.ocr.accurate_pass = false;
        // Nothing listens on the discard port, so uploads fail fast.
        config.search.upload_url = "http://127.0.0.1:9/upload".to_string();

        let (tx, rx) = kanal::bounded_async(64);
        let session = Arc::new(CaptureSession::new(
            Arc::new(TestBackend),
            config.capture.clone(),
        ));
        let indexer = TextRegionIndexer::new(recognizer, detector, tx, &config.ocr);
        let search = ReverseImageClient::new(&config.search).expect("client should build");
        let intents = Arc::new(RecordingIntents {
            log: log.clone(),
            payloads: Mutex::new(Vec::new()),
        });
        let display: Arc<dyn ResultDisplay> = Arc::new(RecordingDisplay { log: log.clone() });
        let coordinator = OverlaySessionCoordinator::new(
            Arc::new(FakeOverlay {
                viewport: Size::new(100.0, 100.0),
                log: log.clone(),
            }),
            display.clone(),
            Arc::new(FakeFocus { log: log.clone() }),
            config.selection.clone(),
        );
        let state = Arc::new(AppState::new(config));

        Self {
            pipeline: Pipeline {
                session,
                indexer,
                search,
                intents: intents.clone(),
                display,
            },
            state,
            coordinator,
            rx,
            log,
            intents,
        }
    }

    pub async fn handle(&mut self, event: AppEvent) {
        handle_event(&self.state, &self.pipeline, &mut self.coordinator, event).await;
    }

    /// Pump `n` background recognition events into the loop, as the real
    /// event loop would.
    pub async fn pump_recognition(&mut self, n: usize) {
        for _ in 0..n {
            let event = timeout(Duration::from_secs(2), self.rx.recv())
                .await
                .expect("recognition event never arrived")
                .expect("event channel closed");
            self.handle(event).await;
        }
    }
}

/// "Buy milk today" on one line of the 100x100 viewport: Buy at x 0..10,
/// milk at 20..30, today at 40..50, all at screen y 45..55.
pub fn line_regions() -> Vec<TextRegion> {
    [
        ("Buy", 0.0),
        ("milk", 0.2),
        ("today", 0.4),
    ]
    .into_iter()
    .map(|(text, x)| TextRegion {
        text: text.to_string(),
        rect: Rect::new(x, 0.45, 0.1, 0.1),
        confidence: 0.95,
    })
    .collect()
}

pub fn wifi_qr() -> DetectedBarcode {
    DetectedBarcode {
        symbology: Symbology::Qr,
        payload: "WIFI:S:Home;T:WPA;P:secret;;".to_string(),
        rect: Rect::new(0.4, 0.4, 0.2, 0.2),
    }
}

use std::sync::Arc;

use kanal::AsyncSender;
use lasso_config::ocr::OcrConfig;
use lasso_types::events::AppEvent;
use lasso_types::frame::CapturedFrame;
use lasso_types::observation::{RecognitionQuality, TextRegion};
use tokio::task::JoinHandle;

use crate::recognizer::{BarcodeDetector, TextRecognizer};

/// Runs recognition over a captured frame off the interaction loop and
/// publishes immutable snapshots back to it. Each snapshot is a full
/// replacement tagged with the frame id; the consumer drops stale ones by
/// identity comparison, so an in-flight scan never needs explicit cancelling.
pub struct TextRegionIndexer {
    recognizer: Arc<dyn TextRecognizer>,
    detector: Arc<dyn BarcodeDetector>,
    events: AsyncSender<AppEvent>,
    min_confidence: f32,
    accurate_pass: bool,
    enabled: bool,
}

impl TextRegionIndexer {
    pub fn new(
        recognizer: Arc<dyn TextRecognizer>,
        detector: Arc<dyn BarcodeDetector>,
        events: AsyncSender<AppEvent>,
        config: &OcrConfig,
    ) -> Self {
        Self {
            recognizer,
            detector,
            events,
            min_confidence: config.min_confidence,
            accurate_pass: config.accurate_pass,
            enabled: config.enabled,
        }
    }

    /// Start scanning one frame. Emits at least one RegionsReady snapshot,
    /// possibly empty; the accurate pass, when enabled, emits a second one
    /// that supersedes the fast result.
    pub fn scan(&self, frame: CapturedFrame) -> JoinHandle<()> {
        let recognizer = self.recognizer.clone();
        let events = self.events.clone();
        let min_confidence = self.min_confidence;
        let accurate_pass = self.accurate_pass;
        let enabled = self.enabled;

        tokio::spawn(async move {
            if !enabled {
                let _ = events
                    .send(AppEvent::RegionsReady {
                        frame: frame.id,
                        quality: RecognitionQuality::Fast,
                        regions: Vec::new(),
                    })
                    .await;
                return;
            }

            let regions =
                run_pass(&*recognizer, &frame, RecognitionQuality::Fast, min_confidence).await;
            let _ = events
                .send(AppEvent::RegionsReady {
                    frame: frame.id,
                    quality: RecognitionQuality::Fast,
                    regions,
                })
                .await;

            if accurate_pass {
                let regions = run_pass(
                    &*recognizer,
                    &frame,
                    RecognitionQuality::Accurate,
                    min_confidence,
                )
                .await;
                let _ = events
                    .send(AppEvent::RegionsReady {
                        frame: frame.id,
                        quality: RecognitionQuality::Accurate,
                        regions,
                    })
                    .await;
            }
        })
    }

    /// One barcode detection cycle per frame, published the same way.
    pub fn detect_barcodes(&self, frame: CapturedFrame) -> JoinHandle<()> {
        let detector = self.detector.clone();
        let events = self.events.clone();

        tokio::spawn(async move {
            let barcodes = match detector.detect(&frame).await {
                Ok(barcodes) => barcodes,
                Err(err) => {
                    tracing::warn!(frame = %frame.id, error = %err, "barcode detection failed");
                    Vec::new()
                }
            };
            let _ = events
                .send(AppEvent::BarcodesReady {
                    frame: frame.id,
                    barcodes,
                })
                .await;
        })
    }
}

/// Recognition failures degrade to an empty region list; OCR must never
/// block or break interaction.
async fn run_pass(
    recognizer: &dyn TextRecognizer,
    frame: &CapturedFrame,
    quality: RecognitionQuality,
    min_confidence: f32,
) -> Vec<TextRegion> {
    match recognizer.recognize(frame, quality).await {
        Ok(regions) => regions
            .into_iter()
            .filter(|r| r.confidence >= min_confidence)
            .collect(),
        Err(err) => {
            tracing::warn!(
                frame = %frame.id,
                ?quality,
                error = %err,
                "text recognition failed, emitting empty snapshot"
            );
            Vec::new()
        }
    }
}

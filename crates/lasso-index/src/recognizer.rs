use async_trait::async_trait;
use lasso_types::frame::CapturedFrame;
use lasso_types::observation::{DetectedBarcode, RecognitionQuality, TextRegion};

#[derive(Debug, thiserror::Error)]
pub enum RecognizeError {
    #[error("recognition engine unavailable: {0}")]
    Unavailable(String),

    #[error("recognition failed: {0}")]
    Failed(String),
}

/// Text recognition capability. Implementations must be safe to call from a
/// background task; the indexer never invokes them on the interaction loop.
#[async_trait]
pub trait TextRecognizer: Send + Sync {
    async fn recognize(
        &self,
        frame: &CapturedFrame,
        quality: RecognitionQuality,
    ) -> Result<Vec<TextRegion>, RecognizeError>;
}

#[async_trait]
pub trait BarcodeDetector: Send + Sync {
    async fn detect(&self, frame: &CapturedFrame) -> Result<Vec<DetectedBarcode>, RecognizeError>;
}

/// Stand-in for platforms without a recognition engine. The indexer degrades
/// its failure into an empty snapshot, keeping the pipeline interactive.
pub struct NullRecognizer;

#[async_trait]
impl TextRecognizer for NullRecognizer {
    async fn recognize(
        &self,
        _frame: &CapturedFrame,
        _quality: RecognitionQuality,
    ) -> Result<Vec<TextRegion>, RecognizeError> {
        Err(RecognizeError::Unavailable(
            "no text recognizer on this platform".to_string(),
        ))
    }
}

pub struct NullDetector;

#[async_trait]
impl BarcodeDetector for NullDetector {
    async fn detect(
        &self,
        _frame: &CapturedFrame,
    ) -> Result<Vec<DetectedBarcode>, RecognizeError> {
        Ok(Vec::new())
    }
}

mod indexer;
mod recognizer;

pub use indexer::TextRegionIndexer;
pub use recognizer::{
    BarcodeDetector, NullDetector, NullRecognizer, RecognizeError, TextRecognizer,
};

//! Age-group prediction
//!
//! Maps classifier output to labels and to the service response contract:
//! - Label sets (audio metadata bins, fixed image bins)
//! - Softmax / arg-max and `Prediction` / `PredictionResponse`
//! - `AgeClassifier` seam and end-to-end `predict_audio`

pub mod classifier;
pub mod labels;
pub mod result;

pub use classifier::{predict_audio, predict_waveform, AgeClassifier};
pub use labels::{AgeBins, IMAGE_AGE_BINS};
pub use result::{Prediction, PredictionResponse};

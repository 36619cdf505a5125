//! Error types for the feature extraction pipeline

use std::fmt;

/// Errors that can occur while decoding audio or building model input
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureError {
    /// Invalid input parameters (empty waveform, bad configuration, ...)
    InvalidInput(String),

    /// Audio decoding error
    DecodingError(String),

    /// Processing error (array assembly, resampling, ...)
    ProcessingError(String),
}

impl fmt::Display for FeatureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeatureError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            FeatureError::DecodingError(msg) => write!(f, "Decoding error: {}", msg),
            FeatureError::ProcessingError(msg) => write!(f, "Processing error: {}", msg),
        }
    }
}

impl std::error::Error for FeatureError {}

impl From<symphonia::core::errors::Error> for FeatureError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        FeatureError::DecodingError(err.to_string())
    }
}

impl From<ndarray::ShapeError> for FeatureError {
    fn from(err: ndarray::ShapeError) -> Self {
        FeatureError::ProcessingError(format!("array shape: {}", err))
    }
}

//! # Age-group audio features
//!
//! Turns speech recordings into the fixed-size MFCC tensor consumed by the
//! age-group audio classifier.
//!
//! ## Features
//!
//! - **Decoding**: WAV, FLAC, OGG/Vorbis, MP3 and AAC via Symphonia, down-mixed to mono
//! - **Resampling**: any input rate to the model rate (16 kHz) via rubato
//! - **MFCC**: librosa-compatible transform (Slaney mel, 80 dB range, orthonormal DCT)
//! - **Model input**: pad/truncate to 170 frames, global min-max scaling, shape `(1, 1, 13, 170)`
//! - **Prediction**: softmax/arg-max label mapping behind a pluggable classifier trait
//!
//! ## Quick Start
//!
//! ```no_run
//! use agegroup_features::{audio_to_mfcc, FeatureConfig};
//!
//! // Mono f32 samples at 16 kHz
//! let samples: Vec<f32> = vec![0.0; 16_000 * 3];
//!
//! let input = audio_to_mfcc(&samples, &FeatureConfig::default())?;
//! assert_eq!(input.dim(), (1, 1, 13, 170));
//! # Ok::<(), agegroup_features::FeatureError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Bytes → Decode → Mono → Resample → STFT → Mel → dB → DCT → Pad/Truncate → Min-Max → (1, 1, 13, 170)
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod features;
pub mod io;
pub mod pipeline;
pub mod prediction;
pub mod preprocessing;

use std::path::Path;

use ndarray::Array4;

// Re-export main types
pub use config::FeatureConfig;
pub use error::FeatureError;
pub use pipeline::FeaturePipeline;
pub use prediction::{AgeBins, AgeClassifier, Prediction, PredictionResponse};

/// Main feature extraction function
///
/// Converts a mono waveform sampled at `config.sample_rate` into the normalized
/// model input tensor.
///
/// # Arguments
///
/// * `samples` - Mono audio samples at `config.sample_rate`
/// * `config` - Feature extraction parameters
///
/// # Returns
///
/// Tensor of shape `(1, 1, config.n_mfcc, config.sample_length)` with values in
/// `[0, 1]`; all zeros when the padded coefficient matrix is constant.
///
/// # Errors
///
/// Returns `FeatureError::InvalidInput` for an empty waveform or an invalid
/// configuration.
///
/// # Example
///
/// ```
/// use agegroup_features::{audio_to_mfcc, FeatureConfig};
///
/// let samples: Vec<f32> = (0..16_000).map(|i| (i as f32 * 0.07).sin()).collect();
/// let input = audio_to_mfcc(&samples, &FeatureConfig::default())?;
/// assert_eq!(input.dim(), (1, 1, 13, 170));
/// # Ok::<(), agegroup_features::FeatureError>(())
/// ```
pub fn audio_to_mfcc(samples: &[f32], config: &FeatureConfig) -> Result<Array4<f32>, FeatureError> {
    FeaturePipeline::new(config.clone())?.extract_waveform(samples)
}

/// Decode encoded audio bytes and extract the model input
///
/// # Arguments
///
/// * `bytes` - Encoded file contents (e.g. an HTTP upload body)
/// * `extension` - Optional format hint such as `"wav"` or `"mp3"`
/// * `config` - Feature extraction parameters
pub fn audio_bytes_to_mfcc(
    bytes: Vec<u8>,
    extension: Option<&str>,
    config: &FeatureConfig,
) -> Result<Array4<f32>, FeatureError> {
    FeaturePipeline::new(config.clone())?.extract_bytes(bytes, extension)
}

/// Decode an audio file and extract the model input
pub fn audio_file_to_mfcc<P: AsRef<Path>>(
    path: P,
    config: &FeatureConfig,
) -> Result<Array4<f32>, FeatureError> {
    FeaturePipeline::new(config.clone())?.extract_file(path)
}

//! Configuration parameters for feature extraction
//!
//! Defaults reproduce librosa's `feature.mfcc` behaviour at 16 kHz, which is
//! what the age-group audio model was trained against.

use serde::{Deserialize, Serialize};

use crate::error::FeatureError;

/// Target sample rate the audio model expects (Hz)
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

/// Number of cepstral coefficients fed to the model
pub const DEFAULT_N_MFCC: usize = 13;

/// Number of frames the model input is fixed to
pub const DEFAULT_SAMPLE_LENGTH: usize = 170;

/// Feature extraction configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Sample rate the waveform is resampled to before analysis (default: 16000)
    pub sample_rate: u32,

    /// Number of cepstral coefficients kept (default: 13)
    pub n_mfcc: usize,

    /// Number of frames in the model input after pad/truncate (default: 170)
    pub sample_length: usize,

    // STFT parameters
    /// FFT size and window length (default: 2048)
    pub n_fft: usize,

    /// Hop between successive frames in samples (default: 512)
    pub hop_length: usize,

    /// Zero-pad `n_fft / 2` samples on both sides so frames are centered (default: true)
    pub center: bool,

    // Mel filterbank
    /// Number of mel bands (default: 128)
    pub n_mels: usize,

    /// Lowest filterbank frequency in Hz (default: 0.0)
    pub fmin: f32,

    /// Highest filterbank frequency in Hz; `None` means Nyquist (default: None)
    pub fmax: Option<f32>,

    // Power to dB
    /// Floor applied to power values before the logarithm (default: 1e-10)
    pub amin: f32,

    /// Dynamic range clamp below the peak in dB; `None` disables it (default: Some(80.0))
    pub top_db: Option<f32>,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
            n_mfcc: DEFAULT_N_MFCC,
            sample_length: DEFAULT_SAMPLE_LENGTH,
            n_fft: 2048,
            hop_length: 512,
            center: true,
            n_mels: 128,
            fmin: 0.0,
            fmax: None,
            amin: 1e-10,
            top_db: Some(80.0),
        }
    }
}

impl FeatureConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    ///
    /// # Example
    ///
    /// ```
    /// use agegroup_features::FeatureConfig;
    ///
    /// let config = FeatureConfig::from_json_str(r#"{"hop_length": 256}"#)?;
    /// assert_eq!(config.hop_length, 256);
    /// assert_eq!(config.n_mfcc, 13);
    /// # Ok::<(), agegroup_features::FeatureError>(())
    /// ```
    pub fn from_json_str(json: &str) -> Result<Self, FeatureError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| FeatureError::InvalidInput(format!("config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Upper edge of the mel filterbank in Hz
    pub fn effective_fmax(&self) -> f32 {
        self.fmax.unwrap_or(self.sample_rate as f32 / 2.0)
    }

    /// Check that the parameters describe a computable transform
    pub fn validate(&self) -> Result<(), FeatureError> {
        if self.sample_rate == 0 {
            return Err(FeatureError::InvalidInput(
                "Sample rate must be > 0".to_string(),
            ));
        }
        if self.n_fft == 0 {
            return Err(FeatureError::InvalidInput("n_fft must be > 0".to_string()));
        }
        if self.hop_length == 0 {
            return Err(FeatureError::InvalidInput(
                "Hop length must be > 0".to_string(),
            ));
        }
        if self.n_mels == 0 {
            return Err(FeatureError::InvalidInput("n_mels must be > 0".to_string()));
        }
        if self.n_mfcc == 0 || self.n_mfcc > self.n_mels {
            return Err(FeatureError::InvalidInput(format!(
                "n_mfcc must be in 1..={} (n_mels), got {}",
                self.n_mels, self.n_mfcc
            )));
        }
        if self.sample_length == 0 {
            return Err(FeatureError::InvalidInput(
                "Sample length must be > 0".to_string(),
            ));
        }

        let nyquist = self.sample_rate as f32 / 2.0;
        let fmax = self.effective_fmax();
        if !(self.fmin >= 0.0 && self.fmin < fmax && fmax <= nyquist) {
            return Err(FeatureError::InvalidInput(format!(
                "Mel range must satisfy 0 <= fmin < fmax <= {} Hz, got {}..{}",
                nyquist, self.fmin, fmax
            )));
        }
        if self.amin.is_nan() || self.amin <= 0.0 {
            return Err(FeatureError::InvalidInput("amin must be > 0".to_string()));
        }
        if let Some(top_db) = self.top_db {
            if top_db < 0.0 {
                return Err(FeatureError::InvalidInput(
                    "top_db must be non-negative".to_string(),
                ));
            }
        }
        Ok(())
    }
}

//! Reusable waveform-to-model-input pipeline
//!
//! Building the mel filterbank, DCT basis and FFT plan is the expensive part of
//! feature extraction. A [`FeaturePipeline`] builds them once and can then be
//! shared by reference across requests or worker threads.

use std::path::Path;

use ndarray::Array4;

use crate::config::FeatureConfig;
use crate::error::FeatureError;
use crate::features::mfcc::MfccExtractor;
use crate::features::model_input::to_model_input;
use crate::io::decoder::{decode_bytes, decode_file, load_mono, DecodedAudio};

/// Decoder + MFCC + normalization, configured once
#[derive(Debug)]
pub struct FeaturePipeline {
    config: FeatureConfig,
    extractor: MfccExtractor,
}

impl FeaturePipeline {
    /// Validate `config` and precompute the transform
    pub fn new(config: FeatureConfig) -> Result<Self, FeatureError> {
        let extractor = MfccExtractor::new(&config)?;
        Ok(Self { config, extractor })
    }

    /// Active configuration
    pub fn config(&self) -> &FeatureConfig {
        &self.config
    }

    /// Model input from a mono waveform already at `config.sample_rate`
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::InvalidInput` for an empty waveform
    pub fn extract_waveform(&self, samples: &[f32]) -> Result<Array4<f32>, FeatureError> {
        if samples.is_empty() {
            return Err(FeatureError::InvalidInput(
                "Empty audio samples".to_string(),
            ));
        }

        log::debug!(
            "Extracting features: {} samples at {} Hz",
            samples.len(),
            self.config.sample_rate
        );

        let mfcc = self.extractor.compute(samples)?;
        let frames = mfcc.ncols();
        let input = to_model_input(mfcc, self.config.sample_length);

        log::debug!(
            "Model input {:?} from {} frames",
            input.dim(),
            frames
        );
        Ok(input)
    }

    /// Model input from decoded audio at any rate and channel count
    pub fn extract_decoded(&self, audio: &DecodedAudio) -> Result<Array4<f32>, FeatureError> {
        let mono = load_mono(audio, self.config.sample_rate)?;
        self.extract_waveform(&mono)
    }

    /// Model input from encoded file contents
    pub fn extract_bytes(
        &self,
        bytes: Vec<u8>,
        extension: Option<&str>,
    ) -> Result<Array4<f32>, FeatureError> {
        let audio = decode_bytes(bytes, extension)?;
        self.extract_decoded(&audio)
    }

    /// Model input from an audio file on disk
    pub fn extract_file<P: AsRef<Path>>(&self, path: P) -> Result<Array4<f32>, FeatureError> {
        let audio = decode_file(path)?;
        self.extract_decoded(&audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_waveform_rejected() {
        let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
        let result = pipeline.extract_waveform(&[]);
        assert!(matches!(result, Err(FeatureError::InvalidInput(_))));
    }

    #[test]
    fn test_custom_length_and_coefficients() {
        let config = FeatureConfig {
            n_mfcc: 20,
            sample_length: 64,
            ..FeatureConfig::default()
        };
        let pipeline = FeaturePipeline::new(config).unwrap();
        assert_eq!(pipeline.config().n_mfcc, 20);
        assert_eq!(pipeline.config().sample_length, 64);
        let samples: Vec<f32> = (0..20_000).map(|i| (i as f32 * 0.05).sin()).collect();
        let input = pipeline.extract_waveform(&samples).unwrap();
        assert_eq!(input.dim(), (1, 1, 20, 64));
    }

    #[test]
    fn test_decoded_audio_is_resampled() {
        let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
        let audio = DecodedAudio {
            samples: (0..96_000).map(|i| (i as f32 * 0.01).sin() * 0.3).collect(),
            sample_rate: 48_000,
            channels: 2,
        };
        let input = pipeline.extract_decoded(&audio).unwrap();
        assert_eq!(input.dim(), (1, 1, 13, 170));
    }
}

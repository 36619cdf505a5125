//! Mel-frequency cepstral coefficients
//!
//! Pipeline per waveform:
//! 1. Power spectrogram (periodic Hann, centered frames)
//! 2. Projection onto a Slaney mel filterbank
//! 3. Power to dB with an 80 dB dynamic range
//! 4. Orthonormal DCT-II, keeping the first `n_mfcc` coefficients
//!
//! With the default [`FeatureConfig`] this reproduces `librosa.feature.mfcc`
//! at 16 kHz (`n_fft=2048`, `hop_length=512`, `n_mels=128`).
//!
//! # Example
//!
//! ```
//! use agegroup_features::features::mfcc::MfccExtractor;
//! use agegroup_features::FeatureConfig;
//!
//! let extractor = MfccExtractor::new(&FeatureConfig::default())?;
//! let samples = vec![0.0f32; 16_000];
//! let mfcc = extractor.compute(&samples)?;
//! assert_eq!(mfcc.dim(), (13, 32));
//! # Ok::<(), agegroup_features::FeatureError>(())
//! ```

pub mod cepstrum;
pub mod mel;
pub mod stft;

use ndarray::Array2;

use crate::config::FeatureConfig;
use crate::error::FeatureError;

use self::stft::PowerSpectrogram;

/// Precomputed MFCC transform
///
/// Holds the FFT plan, window, mel filterbank and DCT basis so repeated calls
/// only pay for the per-frame work. Immutable after construction and safe to
/// share between threads.
#[derive(Debug)]
pub struct MfccExtractor {
    stft: PowerSpectrogram,
    mel_basis: Array2<f32>,
    dct_basis: Array2<f32>,
    amin: f32,
    top_db: Option<f32>,
}

impl MfccExtractor {
    /// Build the transform described by `config`
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::InvalidInput` if the configuration is invalid
    pub fn new(config: &FeatureConfig) -> Result<Self, FeatureError> {
        config.validate()?;

        let mel_basis = mel::mel_filterbank(
            config.sample_rate,
            config.n_fft,
            config.n_mels,
            config.fmin,
            config.effective_fmax(),
        );
        let dct_basis = cepstrum::dct_basis(config.n_mfcc, config.n_mels);

        log::debug!(
            "MFCC extractor: sr={} n_fft={} hop={} n_mels={} n_mfcc={}",
            config.sample_rate,
            config.n_fft,
            config.hop_length,
            config.n_mels,
            config.n_mfcc
        );

        Ok(Self {
            stft: PowerSpectrogram::new(config.n_fft, config.hop_length, config.center),
            mel_basis,
            dct_basis,
            amin: config.amin,
            top_db: config.top_db,
        })
    }

    /// Number of coefficients per frame
    pub fn n_mfcc(&self) -> usize {
        self.dct_basis.nrows()
    }

    /// Compute the `(n_mfcc, frames)` coefficient matrix of `samples`
    ///
    /// `samples` must already be mono at the configured sample rate.
    pub fn compute(&self, samples: &[f32]) -> Result<Array2<f32>, FeatureError> {
        let power = self.stft.compute(samples)?;

        let mut mel_spec = self.mel_basis.dot(&power);
        cepstrum::power_to_db(&mut mel_spec, self.amin, self.top_db);

        let mfcc = self.dct_basis.dot(&mel_spec);

        log::debug!("MFCC matrix: {:?}", mfcc.dim());
        Ok(mfcc)
    }
}

/// Compute the MFCC matrix of `samples` with a one-off extractor
pub fn compute_mfcc(samples: &[f32], config: &FeatureConfig) -> Result<Array2<f32>, FeatureError> {
    MfccExtractor::new(config)?.compute(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn tone(freq: f32, seconds: f32, sample_rate: f32) -> Vec<f32> {
        (0..(seconds * sample_rate) as usize)
            .map(|i| 0.5 * (2.0 * PI * freq * i as f32 / sample_rate).sin())
            .collect()
    }

    #[test]
    fn test_frame_count_follows_hop() {
        let config = FeatureConfig::default();
        let mfcc = compute_mfcc(&tone(440.0, 2.0, 16_000.0), &config).unwrap();
        // 1 + 32000 / 512
        assert_eq!(mfcc.dim(), (13, 63));
        assert!(mfcc.iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_silence_frames_identical() {
        let config = FeatureConfig::default();
        let mfcc = compute_mfcc(&vec![0.0f32; 8000], &config).unwrap();
        // Every frame sits on the amin floor, so only the DC coefficient is non-zero
        let first = mfcc.column(0).to_owned();
        assert!(first[0] < -1000.0);
        for col in mfcc.columns() {
            for (a, b) in col.iter().zip(first.iter()) {
                assert!((a - b).abs() < 1e-3);
            }
        }
        assert!(first.iter().skip(1).all(|v| v.abs() < 1e-2));
    }

    #[test]
    fn test_different_tones_differ() {
        let config = FeatureConfig::default();
        let extractor = MfccExtractor::new(&config).unwrap();
        assert_eq!(extractor.n_mfcc(), 13);
        let low = extractor.compute(&tone(200.0, 1.0, 16_000.0)).unwrap();
        let high = extractor.compute(&tone(3000.0, 1.0, 16_000.0)).unwrap();
        assert_eq!(low.dim(), high.dim());
        assert_ne!(low, high);
    }

    #[test]
    fn test_deterministic() {
        let config = FeatureConfig::default();
        let samples = tone(523.25, 1.5, 16_000.0);
        let a = compute_mfcc(&samples, &config).unwrap();
        let b = compute_mfcc(&samples, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_coefficient_count_follows_config() {
        let config = FeatureConfig {
            n_mfcc: 20,
            ..FeatureConfig::default()
        };
        let extractor = MfccExtractor::new(&config).unwrap();
        assert_eq!(extractor.n_mfcc(), 20);
        let mfcc = extractor.compute(&tone(300.0, 0.5, 16_000.0)).unwrap();
        assert_eq!(mfcc.nrows(), extractor.n_mfcc());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = FeatureConfig {
            n_mfcc: 0,
            ..FeatureConfig::default()
        };
        assert!(MfccExtractor::new(&config).is_err());
    }
}

//! Short-time power spectrum
//!
//! Frames the waveform with a periodic Hann window and returns `|X|^2` for the
//! non-negative frequency bins, laid out as `(n_fft / 2 + 1, frames)`.

use std::f32::consts::PI;
use std::sync::Arc;

use ndarray::Array2;
use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

use crate::error::FeatureError;

/// Periodic Hann window (`0.5 - 0.5 cos(2πn / N)`), as used for spectral analysis
pub fn hann_window(length: usize) -> Vec<f32> {
    (0..length)
        .map(|n| 0.5 - 0.5 * (2.0 * PI * n as f32 / length as f32).cos())
        .collect()
}

/// Number of frames produced for `num_samples` input samples
///
/// With centering the signal is padded by `n_fft / 2` on both sides, which
/// gives `1 + num_samples / hop_length` frames.
pub fn frame_count(num_samples: usize, n_fft: usize, hop_length: usize, center: bool) -> usize {
    let padded = if center {
        num_samples + 2 * (n_fft / 2)
    } else {
        num_samples
    };
    if padded < n_fft || hop_length == 0 {
        0
    } else {
        1 + (padded - n_fft) / hop_length
    }
}

/// Reusable STFT plan
pub struct PowerSpectrogram {
    n_fft: usize,
    hop_length: usize,
    center: bool,
    window: Vec<f32>,
    fft: Arc<dyn Fft<f32>>,
}

impl std::fmt::Debug for PowerSpectrogram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PowerSpectrogram")
            .field("n_fft", &self.n_fft)
            .field("hop_length", &self.hop_length)
            .field("center", &self.center)
            .finish()
    }
}

impl PowerSpectrogram {
    /// Plan an STFT of size `n_fft` advancing by `hop_length`
    pub fn new(n_fft: usize, hop_length: usize, center: bool) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(n_fft);
        Self {
            n_fft,
            hop_length,
            center,
            window: hann_window(n_fft),
            fft,
        }
    }

    /// Number of frequency bins per frame
    pub fn num_bins(&self) -> usize {
        self.n_fft / 2 + 1
    }

    /// Compute the power spectrogram of `samples`
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::InvalidInput` if the (padded) signal is shorter
    /// than one FFT frame.
    pub fn compute(&self, samples: &[f32]) -> Result<Array2<f32>, FeatureError> {
        let n_frames = frame_count(samples.len(), self.n_fft, self.hop_length, self.center);
        if n_frames == 0 {
            return Err(FeatureError::InvalidInput(format!(
                "Audio too short for STFT: {} samples, n_fft={}",
                samples.len(),
                self.n_fft
            )));
        }

        let pad = if self.center { self.n_fft / 2 } else { 0 };
        let mut padded = vec![0.0f32; samples.len() + 2 * pad];
        padded[pad..pad + samples.len()].copy_from_slice(samples);

        let n_bins = self.num_bins();
        let mut power = Array2::<f32>::zeros((n_bins, n_frames));

        let mut buffer = vec![Complex::new(0.0f32, 0.0); self.n_fft];
        let mut scratch = vec![Complex::new(0.0f32, 0.0); self.fft.get_inplace_scratch_len()];

        for frame_idx in 0..n_frames {
            let start = frame_idx * self.hop_length;
            let frame = &padded[start..start + self.n_fft];

            for ((slot, &s), &w) in buffer.iter_mut().zip(frame).zip(&self.window) {
                *slot = Complex::new(s * w, 0.0);
            }

            self.fft.process_with_scratch(&mut buffer, &mut scratch);

            for (bin, c) in buffer.iter().take(n_bins).enumerate() {
                power[[bin, frame_idx]] = c.norm_sqr();
            }
        }

        log::debug!(
            "STFT: {} samples -> {} bins x {} frames (n_fft={}, hop={})",
            samples.len(),
            n_bins,
            n_frames,
            self.n_fft,
            self.hop_length
        );

        Ok(power)
    }
}

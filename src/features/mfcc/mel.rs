//! Slaney-style mel filterbank
//!
//! The mel scale is linear below 1 kHz and logarithmic above it, and each
//! triangular filter is scaled by `2 / bandwidth` so filters have equal area.
//! Weights are built in f64 and stored as f32.

use ndarray::Array2;

const F_SP: f64 = 200.0 / 3.0;
const MIN_LOG_HZ: f64 = 1000.0;
const MIN_LOG_MEL: f64 = MIN_LOG_HZ / F_SP;

fn log_step() -> f64 {
    6.4f64.ln() / 27.0
}

/// Convert a frequency in Hz to Slaney mels
pub fn hz_to_mel(hz: f64) -> f64 {
    if hz >= MIN_LOG_HZ {
        MIN_LOG_MEL + (hz / MIN_LOG_HZ).ln() / log_step()
    } else {
        hz / F_SP
    }
}

/// Convert Slaney mels back to Hz
pub fn mel_to_hz(mel: f64) -> f64 {
    if mel >= MIN_LOG_MEL {
        MIN_LOG_HZ * (log_step() * (mel - MIN_LOG_MEL)).exp()
    } else {
        F_SP * mel
    }
}

/// Centre frequencies of `n` points evenly spaced on the mel scale in `[fmin, fmax]`
pub fn mel_frequencies(n: usize, fmin: f64, fmax: f64) -> Vec<f64> {
    let min_mel = hz_to_mel(fmin);
    let max_mel = hz_to_mel(fmax);
    if n == 1 {
        return vec![mel_to_hz(min_mel)];
    }
    (0..n)
        .map(|i| mel_to_hz(min_mel + (max_mel - min_mel) * i as f64 / (n - 1) as f64))
        .collect()
}

/// Centre frequencies of the `n_fft / 2 + 1` non-negative FFT bins (`k * sr / n_fft`)
pub fn fft_frequencies(sample_rate: u32, n_fft: usize) -> Vec<f64> {
    (0..n_fft / 2 + 1)
        .map(|k| k as f64 * sample_rate as f64 / n_fft as f64)
        .collect()
}

/// Build a `(n_mels, n_fft / 2 + 1)` filterbank matrix
///
/// # Arguments
///
/// * `sample_rate` - Sample rate in Hz
/// * `n_fft` - FFT size used for the spectrogram
/// * `n_mels` - Number of mel bands
/// * `fmin` - Lowest band edge in Hz
/// * `fmax` - Highest band edge in Hz
pub fn mel_filterbank(
    sample_rate: u32,
    n_fft: usize,
    n_mels: usize,
    fmin: f32,
    fmax: f32,
) -> Array2<f32> {
    let n_bins = n_fft / 2 + 1;
    let fft_freqs = fft_frequencies(sample_rate, n_fft);

    let mel_f = mel_frequencies(n_mels + 2, fmin as f64, fmax as f64);
    let fdiff: Vec<f64> = mel_f.windows(2).map(|w| w[1] - w[0]).collect();

    let mut weights = Array2::<f32>::zeros((n_mels, n_bins));
    for m in 0..n_mels {
        let enorm = 2.0 / (mel_f[m + 2] - mel_f[m]);
        for (k, &f) in fft_freqs.iter().enumerate() {
            let lower = (f - mel_f[m]) / fdiff[m];
            let upper = (mel_f[m + 2] - f) / fdiff[m + 1];
            let w = lower.min(upper).max(0.0);
            weights[[m, k]] = (w * enorm) as f32;
        }
    }

    let empty = weights
        .rows()
        .into_iter()
        .filter(|row| row.iter().all(|&w| w == 0.0))
        .count();
    if empty > 0 {
        log::warn!(
            "{} of {} mel filters are empty; n_mels may be too high for n_fft={}",
            empty,
            n_mels,
            n_fft
        );
    }

    weights
}

//! Log compression and cepstral decorrelation

use ndarray::Array2;

/// Convert a power spectrogram to decibels in place
///
/// `10 * log10(max(amin, S))`, referenced to 1.0. When `top_db` is set every
/// value is clamped to at most `top_db` below the global peak.
pub fn power_to_db(spec: &mut Array2<f32>, amin: f32, top_db: Option<f32>) {
    spec.mapv_inplace(|p| 10.0 * p.max(amin).log10());

    if let Some(top_db) = top_db {
        let peak = spec.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        let floor = peak - top_db;
        spec.mapv_inplace(|db| db.max(floor));
    }
}

/// Orthonormal DCT-II basis restricted to the first `n_coeffs` rows
///
/// Row `k` is `s_k * cos(π k (2n + 1) / 2N)` with `s_0 = sqrt(1/N)` and
/// `s_k = sqrt(2/N)` otherwise, so `basis.dot(x)` gives the leading
/// coefficients of the type-II DCT with `norm="ortho"`.
pub fn dct_basis(n_coeffs: usize, n_inputs: usize) -> Array2<f32> {
    let n = n_inputs as f64;
    Array2::from_shape_fn((n_coeffs, n_inputs), |(k, i)| {
        let scale = if k == 0 {
            (1.0 / n).sqrt()
        } else {
            (2.0 / n).sqrt()
        };
        let angle = std::f64::consts::PI * k as f64 * (2.0 * i as f64 + 1.0) / (2.0 * n);
        (scale * angle.cos()) as f32
    })
}

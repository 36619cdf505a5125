//! Time-axis length fixing for feature matrices
//!
//! Feature matrices are laid out as `(coefficients, frames)`. The model takes a
//! fixed number of frames, so shorter matrices are right-padded with zero
//! columns and longer ones keep only their first frames.

use ndarray::{s, Array2};

/// Pad or truncate the frame axis (axis 1) of `matrix` to `target_length`
///
/// - fewer frames: zero columns are appended on the right
/// - more frames: the first `target_length` columns are kept
/// - equal: the matrix is returned unchanged
///
/// # Example
///
/// ```
/// use agegroup_features::preprocessing::length::fix_length;
/// use ndarray::Array2;
///
/// let m = Array2::<f32>::ones((13, 50));
/// let fixed = fix_length(m, 170);
/// assert_eq!(fixed.dim(), (13, 170));
/// assert_eq!(fixed[[0, 169]], 0.0);
/// ```
pub fn fix_length(matrix: Array2<f32>, target_length: usize) -> Array2<f32> {
    let (rows, frames) = matrix.dim();

    if frames == target_length {
        return matrix;
    }

    if frames > target_length {
        log::debug!("Truncating {} frames to {}", frames, target_length);
        return matrix.slice(s![.., ..target_length]).to_owned();
    }

    log::debug!("Padding {} frames to {}", frames, target_length);
    let mut padded = Array2::<f32>::zeros((rows, target_length));
    padded.slice_mut(s![.., ..frames]).assign(&matrix);
    padded
}

//! Model input assembly
//!
//! Turns a variable-length `(n_mfcc, frames)` matrix into the fixed
//! `(1, 1, n_mfcc, sample_length)` tensor the audio classifier consumes:
//! length fixing, then global min-max scaling, then two leading singleton
//! axes for batch and channel.

use ndarray::{Array2, Array4, Axis};

use crate::preprocessing::length::fix_length;
use crate::preprocessing::normalization::min_max_normalize;

/// Normalize a feature matrix into a rank-4 model input
///
/// # Arguments
///
/// * `features` - Coefficient matrix laid out as `(coefficients, frames)`
/// * `target_length` - Frame count of the output
///
/// # Returns
///
/// Tensor of shape `(1, 1, coefficients, target_length)` with values in
/// `[0, 1]`, or all zeros when the padded matrix is constant.
///
/// # Example
///
/// ```
/// use agegroup_features::features::model_input::to_model_input;
/// use ndarray::Array2;
///
/// let features = Array2::from_shape_fn((13, 300), |(r, c)| (r + c) as f32);
/// let input = to_model_input(features, 170);
/// assert_eq!(input.dim(), (1, 1, 13, 170));
/// ```
pub fn to_model_input(features: Array2<f32>, target_length: usize) -> Array4<f32> {
    let mut fixed = fix_length(features, target_length);
    min_max_normalize(&mut fixed);
    fixed.insert_axis(Axis(0)).insert_axis(Axis(0))
}

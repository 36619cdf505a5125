//! Feature matrix value normalization
//!
//! Scales a feature matrix into `[0, 1]` using a single global minimum and
//! maximum taken over every entry (not per coefficient row).
//!
//! # Example
//!
//! ```
//! use agegroup_features::preprocessing::normalization::min_max_normalize;
//! use ndarray::array;
//!
//! let mut m = array![[-2.0f32, 0.0], [2.0, 6.0]];
//! let range = min_max_normalize(&mut m);
//! assert_eq!(m, array![[0.0f32, 0.25], [0.5, 1.0]]);
//! assert_eq!(range.min, -2.0);
//! assert_eq!(range.max, 6.0);
//! ```

use ndarray::Array2;

/// Global value range observed before normalization
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    /// Smallest entry
    pub min: f32,
    /// Largest entry
    pub max: f32,
}

impl ValueRange {
    /// Compute the range of all entries in `matrix`
    ///
    /// An empty matrix reports `min = max = 0.0`.
    pub fn of(matrix: &Array2<f32>) -> Self {
        if matrix.is_empty() {
            return Self { min: 0.0, max: 0.0 };
        }
        let (min, max) = matrix
            .iter()
            .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        Self { min, max }
    }

    /// True when every entry is equal
    pub fn is_degenerate(&self) -> bool {
        !(self.max > self.min)
    }
}

/// Min-max normalize `matrix` in place over its global range
///
/// When `max > min` every entry becomes `(x - min) / (max - min)`, so the
/// smallest entry maps to exactly `0.0` and the largest to exactly `1.0`.
/// A constant matrix is only shifted by `min`, which leaves it all zeros
/// instead of dividing by zero.
///
/// # Returns
///
/// The range measured before scaling
pub fn min_max_normalize(matrix: &mut Array2<f32>) -> ValueRange {
    let range = ValueRange::of(matrix);

    if range.is_degenerate() {
        log::warn!(
            "Constant feature matrix (value {:.3}), producing all-zero input",
            range.min
        );
        matrix.mapv_inplace(|x| x - range.min);
    } else {
        let span = range.max - range.min;
        matrix.mapv_inplace(|x| (x - range.min) / span);
    }

    log::debug!(
        "Min-max normalized {:?} matrix over range [{:.3}, {:.3}]",
        matrix.dim(),
        range.min,
        range.max
    );

    range
}

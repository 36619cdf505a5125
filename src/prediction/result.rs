//! Prediction result types and the JSON response contract

use serde::{Deserialize, Serialize};

use super::labels::AgeBins;
use crate::error::FeatureError;

/// Numerically stable softmax
///
/// Returns an empty vector for empty input.
pub fn softmax(logits: &[f32]) -> Vec<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = logits.iter().map(|&x| (x - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// Index of the largest value; the first one wins on ties
pub fn argmax(values: &[f32]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Predicted age group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    /// Age-group label
    pub label: String,

    /// Probability of the predicted class (0.0-1.0)
    pub confidence: f32,
}

impl Prediction {
    /// Map classifier logits to the most probable label
    ///
    /// # Errors
    ///
    /// Returns `FeatureError::InvalidInput` if `logits` is empty, contains
    /// non-finite values, or does not match the number of labels.
    ///
    /// # Example
    ///
    /// ```
    /// use agegroup_features::prediction::{labels::AgeBins, result::Prediction};
    ///
    /// let bins = AgeBins::from_labels(["adult", "child", "senior"])?;
    /// let prediction = Prediction::from_logits(&[0.1, 2.0, -1.0], &bins)?;
    /// assert_eq!(prediction.label, "child");
    /// # Ok::<(), agegroup_features::FeatureError>(())
    /// ```
    pub fn from_logits(logits: &[f32], bins: &AgeBins) -> Result<Self, FeatureError> {
        if logits.len() != bins.len() {
            return Err(FeatureError::InvalidInput(format!(
                "Classifier produced {} logits for {} labels",
                logits.len(),
                bins.len()
            )));
        }
        if logits.iter().any(|x| !x.is_finite()) {
            return Err(FeatureError::InvalidInput(
                "Classifier produced non-finite logits".to_string(),
            ));
        }

        let probs = softmax(logits);
        let index = argmax(&probs)
            .ok_or_else(|| FeatureError::InvalidInput("Empty logits".to_string()))?;
        let label = bins
            .label(index)
            .ok_or_else(|| FeatureError::InvalidInput(format!("No label for index {}", index)))?;

        log::debug!("Predicted '{}' (p={:.3})", label, probs[index]);

        Ok(Self {
            label: label.to_string(),
            confidence: probs[index],
        })
    }
}

/// Response body returned to callers: a prediction or an error message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PredictionResponse {
    /// `{"label": ..., "confidence": ...}`
    Success(Prediction),
    /// `{"error": ...}`
    Failure {
        /// Human readable failure description
        error: String,
    },
}

impl PredictionResponse {
    /// Wrap a pipeline result
    pub fn from_result(result: Result<Prediction, FeatureError>) -> Self {
        match result {
            Ok(prediction) => PredictionResponse::Success(prediction),
            Err(e) => {
                log::warn!("Prediction failed: {}", e);
                PredictionResponse::Failure {
                    error: e.to_string(),
                }
            }
        }
    }

    /// True for the error variant
    pub fn is_error(&self) -> bool {
        matches!(self, PredictionResponse::Failure { .. })
    }

    /// Serialize to a JSON string
    pub fn to_json(&self) -> Result<String, FeatureError> {
        serde_json::to_string(self)
            .map_err(|e| FeatureError::ProcessingError(format!("response serialization: {}", e)))
    }
}

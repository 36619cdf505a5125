//! Classifier seam
//!
//! The model runtime is not part of this crate. Anything that maps a
//! `(1, 1, n_mfcc, sample_length)` input to one logit per age bin can be
//! plugged in through [`AgeClassifier`]; closures work too.

use ndarray::Array4;

use super::labels::AgeBins;
use super::result::Prediction;
use crate::error::FeatureError;
use crate::pipeline::FeaturePipeline;

/// A trained audio age-group classifier
pub trait AgeClassifier {
    /// Run a forward pass and return one logit per class
    fn logits(&self, input: &Array4<f32>) -> Result<Vec<f32>, FeatureError>;
}

impl<F> AgeClassifier for F
where
    F: Fn(&Array4<f32>) -> Result<Vec<f32>, FeatureError>,
{
    fn logits(&self, input: &Array4<f32>) -> Result<Vec<f32>, FeatureError> {
        self(input)
    }
}

/// Predict the age group of a mono waveform at the pipeline sample rate
pub fn predict_waveform<C: AgeClassifier + ?Sized>(
    pipeline: &FeaturePipeline,
    samples: &[f32],
    classifier: &C,
    bins: &AgeBins,
) -> Result<Prediction, FeatureError> {
    let input = pipeline.extract_waveform(samples)?;
    let logits = classifier.logits(&input)?;
    Prediction::from_logits(&logits, bins)
}

/// Decode an uploaded audio file and predict its age group
///
/// # Arguments
///
/// * `pipeline` - Feature pipeline (decoding rate and MFCC parameters)
/// * `bytes` - Encoded audio file contents
/// * `extension` - Optional format hint such as `"wav"`
/// * `classifier` - Model producing one logit per entry of `bins`
/// * `bins` - Labels in model output order
pub fn predict_audio<C: AgeClassifier + ?Sized>(
    pipeline: &FeaturePipeline,
    bytes: Vec<u8>,
    extension: Option<&str>,
    classifier: &C,
    bins: &AgeBins,
) -> Result<Prediction, FeatureError> {
    let input = pipeline.extract_bytes(bytes, extension)?;
    let logits = classifier.logits(&input)?;
    Prediction::from_logits(&logits, bins)
}

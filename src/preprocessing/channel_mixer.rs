//! Channel mixing utilities (multi-channel to mono conversion)

use crate::error::FeatureError;

/// Down-mix interleaved samples to mono by averaging the channels of each frame
///
/// # Arguments
///
/// * `interleaved` - Samples laid out as `[c0, c1, ..., c0, c1, ...]`
/// * `channels` - Number of interleaved channels
///
/// # Returns
///
/// One sample per frame. Mono input is returned as-is.
///
/// # Errors
///
/// Returns `FeatureError::InvalidInput` if `channels` is zero or the sample
/// count is not a whole number of frames.
pub fn mix_to_mono(interleaved: &[f32], channels: usize) -> Result<Vec<f32>, FeatureError> {
    if channels == 0 {
        return Err(FeatureError::InvalidInput(
            "Channel count must be > 0".to_string(),
        ));
    }

    if interleaved.len() % channels != 0 {
        return Err(FeatureError::InvalidInput(format!(
            "{} samples is not a whole number of {}-channel frames",
            interleaved.len(),
            channels
        )));
    }

    if channels == 1 {
        return Ok(interleaved.to_vec());
    }

    log::debug!(
        "Mixing {} frames of {} channels to mono",
        interleaved.len() / channels,
        channels
    );

    let scale = 1.0 / channels as f32;
    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() * scale)
        .collect())
}

//! Sample-rate conversion using rubato
//!
//! Uses the synchronous FFT resampler. Output is trimmed to compensate for the
//! resampler delay and cut to `ceil(len * to / from)` samples, so a waveform
//! keeps its duration and alignment across rates.

use rubato::{FftFixedIn, Resampler};

use crate::error::FeatureError;

/// Input frames handed to the resampler per call
const CHUNK_SIZE: usize = 1024;

/// Sub-chunks used by the FFT resampler
const SUB_CHUNKS: usize = 2;

/// Number of output samples for `len` input samples
pub fn resampled_len(len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((len as u64 * to_rate as u64).div_ceil(from_rate as u64)) as usize
}

/// Resample a mono waveform from `from_rate` to `to_rate`
///
/// Returns a copy of the input when both rates are equal.
///
/// # Errors
///
/// Returns `FeatureError::InvalidInput` for a zero rate and
/// `FeatureError::ProcessingError` if the resampler fails.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Result<Vec<f32>, FeatureError> {
    if from_rate == 0 || to_rate == 0 {
        return Err(FeatureError::InvalidInput(format!(
            "Sample rates must be > 0 (from {} to {})",
            from_rate, to_rate
        )));
    }

    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    log::debug!(
        "Resampling {} samples from {} Hz to {} Hz",
        samples.len(),
        from_rate,
        to_rate
    );

    let mut resampler = FftFixedIn::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        CHUNK_SIZE,
        SUB_CHUNKS,
        1,
    )
    .map_err(|e| FeatureError::ProcessingError(format!("resampler setup: {}", e)))?;

    let expected = resampled_len(samples.len(), from_rate, to_rate);
    let delay = resampler.output_delay();
    let mut output: Vec<f32> = Vec::with_capacity(expected + delay + CHUNK_SIZE);

    let mut pos = 0;
    while samples.len() - pos >= resampler.input_frames_next() {
        let needed = resampler.input_frames_next();
        let wave_in = [&samples[pos..pos + needed]];
        let chunk = resampler
            .process(&wave_in[..], None)
            .map_err(|e| FeatureError::ProcessingError(format!("resampling: {}", e)))?;
        output.extend_from_slice(&chunk[0]);
        pos += needed;
    }

    if pos < samples.len() {
        let wave_in = [&samples[pos..]];
        let chunk = resampler
            .process_partial(Some(&wave_in[..]), None)
            .map_err(|e| FeatureError::ProcessingError(format!("resampling: {}", e)))?;
        output.extend_from_slice(&chunk[0]);
    }

    // Flush the delay line with silence. The FFT buffers input until a whole
    // block is available, so a flush call may legitimately return nothing.
    let wanted = expected + delay;
    let max_flushes = flush_calls(wanted.saturating_sub(output.len()), from_rate, to_rate);
    for _ in 0..max_flushes {
        if output.len() >= wanted {
            break;
        }
        let chunk = resampler
            .process_partial::<&[f32]>(None, None)
            .map_err(|e| FeatureError::ProcessingError(format!("resampling: {}", e)))?;
        output.extend_from_slice(&chunk[0]);
    }

    output.drain(..delay.min(output.len()));
    if output.len() < expected {
        return Err(FeatureError::ProcessingError(format!(
            "Resampler produced {} of {} samples ({} Hz -> {} Hz)",
            output.len(),
            expected,
            from_rate,
            to_rate
        )));
    }
    output.truncate(expected);
    Ok(output)
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Upper bound on the zero-input calls needed to emit `missing` more output samples
///
/// Covers the input equivalent of `missing` plus one full FFT input block,
/// whose length is a multiple of `from / gcd(from, to)`.
fn flush_calls(missing: usize, from_rate: u32, to_rate: u32) -> usize {
    let (from, to) = (from_rate as u64, to_rate as u64);
    let block_in = (from / gcd(from, to)).max(CHUNK_SIZE as u64) as usize;
    let input_needed = resampled_len(missing, to_rate, from_rate) + 2 * block_in;
    input_needed.div_ceil(CHUNK_SIZE) + 2
}

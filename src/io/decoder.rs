//! Audio decoding using Symphonia
//!
//! Decodes any container/codec pair Symphonia supports (WAV, FLAC, OGG/Vorbis,
//! MP3, AAC in MP4) into interleaved f32 samples, then prepares a mono waveform
//! at the model sample rate.

use std::fs::File;
use std::io::Cursor;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::{MediaSource, MediaSourceStream};
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::error::FeatureError;
use crate::preprocessing::channel_mixer::mix_to_mono;

use super::resampler::resample;

/// Decoded PCM audio
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedAudio {
    /// Interleaved samples in `[-1.0, 1.0]`
    pub samples: Vec<f32>,
    /// Native sample rate in Hz
    pub sample_rate: u32,
    /// Number of interleaved channels
    pub channels: usize,
}

impl DecodedAudio {
    /// Number of sample frames (samples per channel)
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels
        }
    }

    /// Duration in seconds
    pub fn duration_seconds(&self) -> f32 {
        if self.sample_rate == 0 {
            0.0
        } else {
            self.frames() as f32 / self.sample_rate as f32
        }
    }
}

/// Decode an in-memory audio file (e.g. an upload body)
///
/// # Arguments
///
/// * `bytes` - Encoded file contents
/// * `extension` - Optional file extension used as a format hint (`"wav"`, `"mp3"`, ...)
pub fn decode_bytes(bytes: Vec<u8>, extension: Option<&str>) -> Result<DecodedAudio, FeatureError> {
    log::debug!("Decoding {} bytes (hint: {:?})", bytes.len(), extension);

    let mut hint = Hint::new();
    if let Some(ext) = extension {
        hint.with_extension(ext);
    }

    decode_source(Box::new(Cursor::new(bytes)), hint)
}

/// Decode an audio file from disk
pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<DecodedAudio, FeatureError> {
    let path = path.as_ref();
    log::debug!("Decoding audio file: {}", path.display());

    let file = File::open(path)
        .map_err(|e| FeatureError::DecodingError(format!("{}: {}", path.display(), e)))?;

    let mut hint = Hint::new();
    if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(ext);
    }

    decode_source(Box::new(file), hint)
}

fn decode_source(source: Box<dyn MediaSource>, hint: Hint) -> Result<DecodedAudio, FeatureError> {
    let mss = MediaSourceStream::new(source, Default::default());

    let probed = symphonia::default::get_probe().format(
        &hint,
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| FeatureError::DecodingError("No supported audio track found".to_string()))?;

    let track_id = track.id;
    let mut sample_rate = track.codec_params.sample_rate;
    let mut channels = track.codec_params.channels.map(|c| c.count());

    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut samples: Vec<f32> = Vec::new();
    let mut sample_buf: Option<(SampleBuffer<f32>, usize)> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(SymphoniaError::ResetRequired) => {
                log::warn!("Stream reset requested, stopping at {} samples", samples.len());
                break;
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = match decoder.decode(&packet) {
            Ok(decoded) => decoded,
            Err(SymphoniaError::DecodeError(msg)) => {
                log::warn!("Skipping corrupt packet: {}", msg);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let spec = *decoded.spec();
        let frames = decoded.capacity();

        sample_rate.get_or_insert(spec.rate);
        let stream_channels = *channels.get_or_insert(spec.channels.count());
        if stream_channels != spec.channels.count() {
            return Err(FeatureError::DecodingError(format!(
                "Channel count changed mid-stream ({} -> {})",
                stream_channels,
                spec.channels.count()
            )));
        }

        let needs_alloc = sample_buf
            .as_ref()
            .map_or(true, |(_, capacity)| *capacity < frames);
        if needs_alloc {
            sample_buf = Some((SampleBuffer::new(frames as u64, spec), frames));
        }

        if let Some((buf, _)) = sample_buf.as_mut() {
            buf.copy_interleaved_ref(decoded);
            samples.extend_from_slice(buf.samples());
        }
    }

    let sample_rate = sample_rate
        .ok_or_else(|| FeatureError::DecodingError("Unknown sample rate".to_string()))?;
    let channels = channels.unwrap_or(1);

    if samples.is_empty() {
        return Err(FeatureError::DecodingError(
            "No audio samples decoded".to_string(),
        ));
    }

    log::debug!(
        "Decoded {} samples, {} Hz, {} channel(s)",
        samples.len(),
        sample_rate,
        channels
    );

    Ok(DecodedAudio {
        samples,
        sample_rate,
        channels,
    })
}

/// Down-mix decoded audio to mono and resample it to `target_rate`
pub fn load_mono(audio: &DecodedAudio, target_rate: u32) -> Result<Vec<f32>, FeatureError> {
    let mono = mix_to_mono(&audio.samples, audio.channels)?;
    resample(&mono, audio.sample_rate, target_rate)
}

//! Audio I/O modules
//!
//! Audio decoding using Symphonia and sample-rate conversion using rubato.

pub mod decoder;
pub mod resampler;

pub use decoder::{decode_bytes, decode_file, load_mono, DecodedAudio};

//! Signal and feature preprocessing
//!
//! This module contains the steps around the cepstral transform:
//! - Channel mixing (interleaved multi-channel to mono)
//! - Length fixing of the frame axis (pad / truncate)
//! - Global min-max normalization

pub mod channel_mixer;
pub mod length;
pub mod normalization;

//! Feature extraction modules
//!
//! - MFCC computation (STFT, mel filterbank, dB, DCT)
//! - Model input assembly (length fixing, min-max scaling, rank-4 wrapping)

pub mod mfcc;
pub mod model_input;

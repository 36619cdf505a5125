//! Example: Extract the model input from a single audio file
//!
//! Usage:
//!   cargo run --release --example extract_file -- <audio-file> [--config config.json]

use agegroup_features::{audio_file_to_mfcc, FeatureConfig};
use std::env;
use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();
    let mut config = FeatureConfig::default();
    let mut path: Option<String> = None;

    while !args.is_empty() {
        let a = args.remove(0);
        match a.as_str() {
            "--config" => {
                if args.is_empty() {
                    return Err("--config requires a path".into());
                }
                let json = std::fs::read_to_string(args.remove(0))?;
                config = FeatureConfig::from_json_str(&json)?;
            }
            _ => path = Some(a),
        }
    }

    let path = match path {
        Some(p) => p,
        None => {
            eprintln!("Usage: extract_file <audio-file> [--config config.json]");
            std::process::exit(2);
        }
    };

    let t0 = Instant::now();
    let input = audio_file_to_mfcc(&path, &config)?;
    let elapsed_ms = t0.elapsed().as_secs_f64() * 1000.0;

    let (_, _, n_mfcc, frames) = input.dim();
    let mean = input.mean().unwrap_or(0.0);
    let zeros = input.iter().filter(|&&v| v == 0.0).count();

    println!("Feature Extraction Results:");
    println!("  File: {}", path);
    println!("  Shape: {:?}", input.dim());
    println!("  Mean value: {:.4}", mean);
    println!("  Zero cells: {}/{}", zeros, input.len());
    println!("  Processing time: {:.2} ms", elapsed_ms);

    // Per-coefficient averages over time
    for c in 0..n_mfcc {
        let row = input.slice(ndarray::s![0, 0, c, ..]);
        println!("  c{:<2} mean={:.4}", c, row.sum() / frames as f32);
    }

    Ok(())
}

//! Example: Extract model inputs for multiple audio files in parallel
//!
//! Usage:
//!   cargo run --release --example extract_batch -- [--jobs N] [--json] <file1> <file2> ...
//!
//! Notes:
//! - Parallelism is across files. Each extraction is single-threaded.
//! - One `FeaturePipeline` is shared by all workers.
//! - Default workers: (available CPU threads - 1), keeping one core free for the system.

use agegroup_features::{FeatureConfig, FeaturePipeline};
use rayon::prelude::*;
use std::env;
use std::time::Instant;

fn default_jobs() -> usize {
    let n = std::thread::available_parallelism().map(|v| v.get()).unwrap_or(1);
    std::cmp::max(1, n.saturating_sub(1))
}

fn percentile(mut xs: Vec<f32>, p: f32) -> Option<f32> {
    if xs.is_empty() {
        return None;
    }
    xs.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    let idx = ((xs.len() - 1) as f32 * p.clamp(0.0, 1.0)).round() as usize;
    Some(xs[idx.min(xs.len() - 1)])
}

#[derive(serde::Serialize)]
struct ItemOut {
    file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    shape: Option<[usize; 4]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    mean: Option<f32>,
    processing_time_ms: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args: Vec<String> = env::args().skip(1).collect();

    let mut json = false;
    let mut jobs: Option<usize> = None;
    let mut paths: Vec<String> = Vec::new();

    while !args.is_empty() {
        let a = args.remove(0);
        match a.as_str() {
            "--json" => json = true,
            "--jobs" => {
                if args.is_empty() {
                    return Err("--jobs requires a value".into());
                }
                let v = args.remove(0).parse::<usize>()?;
                jobs = Some(std::cmp::max(1, v));
            }
            "--help" | "-h" => {
                eprintln!(
                    "Usage: extract_batch [--jobs N] [--json] <file1> <file2> ...\n\
                     \n\
                     --jobs N   Parallel workers (default: CPU-1)\n\
                     --json     Emit one JSON object per line (JSONL)\n"
                );
                return Ok(());
            }
            _ => paths.push(a),
        }
    }

    if paths.is_empty() {
        eprintln!("ERROR: Provide at least one audio file path. Use --help for usage.");
        std::process::exit(2);
    }

    let jobs = jobs.unwrap_or_else(default_jobs);
    eprintln!("Batch: {} files, jobs={}", paths.len(), jobs);

    let pipeline = FeaturePipeline::new(FeatureConfig::default())?;

    let t0 = Instant::now();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;

    let outs: Vec<ItemOut> = pool.install(|| {
        paths
            .par_iter()
            .map(|path| {
                let start = Instant::now();
                let result = pipeline.extract_file(path);
                let processing_time_ms = start.elapsed().as_secs_f32() * 1000.0;
                match result {
                    Ok(input) => {
                        let (b, c, h, w) = input.dim();
                        ItemOut {
                            file: path.clone(),
                            shape: Some([b, c, h, w]),
                            mean: input.mean(),
                            processing_time_ms,
                            error: None,
                        }
                    }
                    Err(e) => ItemOut {
                        file: path.clone(),
                        shape: None,
                        mean: None,
                        processing_time_ms,
                        error: Some(e.to_string()),
                    },
                }
            })
            .collect()
    });

    for (idx, o) in outs.iter().enumerate() {
        if json {
            println!("{}", serde_json::to_string(o)?);
        } else if let Some(err) = &o.error {
            println!("[{}/{}] {}: ERROR: {}", idx + 1, outs.len(), o.file, err);
        } else {
            println!(
                "[{}/{}] {}: shape={:?} mean={:.4} time={:.2}ms",
                idx + 1,
                outs.len(),
                o.file,
                o.shape.unwrap_or_default(),
                o.mean.unwrap_or(0.0),
                o.processing_time_ms
            );
        }
    }

    let ok_times: Vec<f32> = outs
        .iter()
        .filter(|o| o.error.is_none())
        .map(|o| o.processing_time_ms)
        .collect();
    let wall_ms = t0.elapsed().as_secs_f64() * 1000.0;

    eprintln!(
        "Done: ok={}/{} wall={:.0}ms",
        ok_times.len(),
        outs.len(),
        wall_ms
    );
    if !ok_times.is_empty() {
        let mean = ok_times.iter().sum::<f32>() / ok_times.len() as f32;
        let p50 = percentile(ok_times.clone(), 0.50).unwrap_or(mean);
        let p90 = percentile(ok_times.clone(), 0.90).unwrap_or(mean);
        let min = ok_times.iter().cloned().fold(f32::INFINITY, f32::min);
        let max = ok_times.iter().cloned().fold(0.0, f32::max);
        eprintln!(
            "processing_time_ms: mean={:.2} p50={:.2} p90={:.2} min={:.2} max={:.2}",
            mean, p50, p90, min, max
        );
    }

    Ok(())
}

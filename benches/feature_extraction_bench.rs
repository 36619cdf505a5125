//! Performance benchmarks for feature extraction

use agegroup_features::features::mfcc::MfccExtractor;
use agegroup_features::io::resampler::resample;
use agegroup_features::{audio_to_mfcc, FeatureConfig, FeaturePipeline};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn tone(seconds: usize, sample_rate: usize) -> Vec<f32> {
    (0..sample_rate * seconds)
        .map(|i| (i as f32 * 220.0 * 2.0 * std::f32::consts::PI / sample_rate as f32).sin() * 0.5)
        .collect()
}

fn bench_audio_to_mfcc(c: &mut Criterion) {
    // ~5.4 s at 16 kHz fills the 170 frame window
    let samples = tone(6, 16_000);
    let config = FeatureConfig::default();

    c.bench_function("audio_to_mfcc_6s", |b| {
        b.iter(|| {
            let _ = audio_to_mfcc(black_box(&samples), black_box(&config));
        });
    });

    let pipeline = match FeaturePipeline::new(config.clone()) {
        Ok(p) => p,
        Err(e) => panic!("pipeline: {e}"),
    };
    c.bench_function("pipeline_extract_waveform_6s", |b| {
        b.iter(|| {
            let _ = pipeline.extract_waveform(black_box(&samples));
        });
    });
}

fn bench_mfcc_only(c: &mut Criterion) {
    let samples = tone(30, 16_000);
    let extractor = match MfccExtractor::new(&FeatureConfig::default()) {
        Ok(e) => e,
        Err(e) => panic!("extractor: {e}"),
    };

    c.bench_function("mfcc_30s", |b| {
        b.iter(|| {
            let _ = extractor.compute(black_box(&samples));
        });
    });
}

fn bench_resample(c: &mut Criterion) {
    let samples = tone(10, 44_100);

    c.bench_function("resample_44k1_to_16k_10s", |b| {
        b.iter(|| {
            let _ = resample(black_box(&samples), 44_100, 16_000);
        });
    });
}

criterion_group!(benches, bench_audio_to_mfcc, bench_mfcc_only, bench_resample);
criterion_main!(benches);

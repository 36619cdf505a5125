//! Integration tests for the feature extraction pipeline

use agegroup_features::prediction::predict_audio;
use agegroup_features::{
    audio_bytes_to_mfcc, audio_file_to_mfcc, audio_to_mfcc, AgeBins, FeatureConfig, FeatureError,
    FeaturePipeline, PredictionResponse,
};
use ndarray::{s, Array4};
use std::io::Cursor;

const HOP: usize = 512;

/// Encode interleaved samples as a 16-bit PCM WAV file in memory
fn wav_bytes(samples: &[f32], sample_rate: u32, channels: u16) -> Vec<u8> {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer
                .write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)
                .unwrap();
        }
        writer.finalize().unwrap();
    }
    cursor.into_inner()
}

/// Voice-like test signal: a few harmonics with a slow amplitude envelope
fn voiced(len: usize, sample_rate: u32) -> Vec<f32> {
    let sr = sample_rate as f32;
    (0..len)
        .map(|i| {
            let t = i as f32 / sr;
            let env = 0.5 + 0.4 * (2.0 * std::f32::consts::PI * 3.0 * t).sin();
            let f0 = 180.0;
            let tone = (1..=4)
                .map(|h| (2.0 * std::f32::consts::PI * f0 * h as f32 * t).sin() / h as f32)
                .sum::<f32>();
            0.3 * env * tone
        })
        .collect()
}

/// Sample count producing exactly `frames` centered STFT frames
fn len_for_frames(frames: usize) -> usize {
    (frames - 1) * HOP
}

fn assert_normalized(input: &Array4<f32>) {
    assert_eq!(input.dim(), (1, 1, 13, 170));
    assert!(input.iter().all(|v| v.is_finite()));
    assert!(input.iter().all(|&v| (0.0..=1.0).contains(&v)));
}

#[test]
fn test_shape_for_short_exact_and_long_audio() {
    let config = FeatureConfig::default();
    for frames in [50, 170, 300] {
        let samples = voiced(len_for_frames(frames), 16_000);
        let input = audio_to_mfcc(&samples, &config).expect("extraction should succeed");
        assert_normalized(&input);
        assert_eq!(input.iter().copied().fold(f32::MIN, f32::max), 1.0);
        assert_eq!(input.iter().copied().fold(f32::MAX, f32::min), 0.0);
    }
}

#[test]
fn test_short_audio_is_padded_on_the_right() {
    let samples = voiced(len_for_frames(50), 16_000);
    let input = audio_to_mfcc(&samples, &FeatureConfig::default()).unwrap();

    // Padding zeros become the same normalized value in every padded cell
    let padded = input.slice(s![0, 0, .., 50..]);
    let first = padded[[0usize, 0]];
    assert!(padded.iter().all(|&v| v == first));

    let voiced_part = input.slice(s![0, 0, .., ..50]);
    assert!(voiced_part.iter().any(|&v| v != first));
}

#[test]
fn test_long_audio_keeps_the_prefix() {
    // Without the dB floor no frame depends on the global peak
    let config = FeatureConfig {
        top_db: None,
        ..FeatureConfig::default()
    };
    let long = voiced(len_for_frames(300), 16_000);
    // The first 170 frames only depend on samples up to frame 170's window
    let prefix_len = len_for_frames(170) + 2048;
    let with_tail = audio_to_mfcc(&long, &config).unwrap();
    let mut altered = long.clone();
    for s in altered[prefix_len..].iter_mut() {
        *s = 0.0;
    }
    let without_tail = audio_to_mfcc(&altered, &config).unwrap();

    assert_eq!(with_tail, without_tail);
}

#[test]
fn test_extraction_is_deterministic() {
    let samples = voiced(40_000, 16_000);
    let config = FeatureConfig::default();
    let a = audio_to_mfcc(&samples, &config).unwrap();
    let b = audio_to_mfcc(&samples, &config).unwrap();
    assert_eq!(a, b);

    let pipeline = FeaturePipeline::new(config).unwrap();
    let c = pipeline.extract_waveform(&samples).unwrap();
    assert_eq!(a, c);
}

#[test]
fn test_empty_waveform_is_rejected() {
    let result = audio_to_mfcc(&[], &FeatureConfig::default());
    assert!(matches!(result, Err(FeatureError::InvalidInput(_))));
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = FeatureConfig {
        n_mfcc: 0,
        ..FeatureConfig::default()
    };
    let result = audio_to_mfcc(&[0.1; 1000], &config);
    assert!(matches!(result, Err(FeatureError::InvalidInput(_))));
}

#[test]
fn test_silence_produces_finite_output() {
    let input = audio_to_mfcc(&vec![0.0; 16_000], &FeatureConfig::default()).unwrap();
    assert_normalized(&input);
}

#[test]
fn test_wav_bytes_at_model_rate() {
    let samples = voiced(48_000, 16_000);
    let from_bytes =
        audio_bytes_to_mfcc(wav_bytes(&samples, 16_000, 1), Some("wav"), &FeatureConfig::default())
            .unwrap();
    assert_normalized(&from_bytes);
}

#[test]
fn test_stereo_44k1_wav_is_mixed_and_resampled() {
    let mono = voiced(44_100 * 3, 44_100);
    let interleaved: Vec<f32> = mono.iter().flat_map(|&s| [s, s]).collect();

    let input =
        audio_bytes_to_mfcc(wav_bytes(&interleaved, 44_100, 2), None, &FeatureConfig::default())
            .unwrap();
    assert_normalized(&input);

    // 3 s at 16 kHz is 94 frames, the rest is padding
    let padded = input.slice(s![0, 0, .., 100..]);
    let first = padded[[0usize, 0]];
    assert!(padded.iter().all(|&v| v == first));
}

#[test]
fn test_short_clip_at_odd_rate_is_extracted() {
    // 7999 Hz shares no factor with 16 kHz, so the resampler works in large blocks
    let clip = voiced(4_000, 7_999);
    let input =
        audio_bytes_to_mfcc(wav_bytes(&clip, 7_999, 1), Some("wav"), &FeatureConfig::default())
            .unwrap();
    assert_normalized(&input);
}

#[test]
fn test_decode_from_file() {
    let path = std::env::temp_dir().join(format!(
        "agegroup_features_it_{}.wav",
        std::process::id()
    ));
    std::fs::write(&path, wav_bytes(&voiced(32_000, 16_000), 16_000, 1)).unwrap();

    let result = audio_file_to_mfcc(&path, &FeatureConfig::default());
    let _ = std::fs::remove_file(&path);

    assert_normalized(&result.unwrap());
}

#[test]
fn test_missing_file_is_decoding_error() {
    let result = audio_file_to_mfcc("/nonexistent/clip.wav", &FeatureConfig::default());
    assert!(matches!(result, Err(FeatureError::DecodingError(_))));
}

#[test]
fn test_garbage_bytes_are_decoding_error() {
    let result = audio_bytes_to_mfcc(vec![7u8; 4096], Some("mp3"), &FeatureConfig::default());
    assert!(matches!(result, Err(FeatureError::DecodingError(_))));
}

#[test]
fn test_predict_audio_json_contract() {
    let pipeline = FeaturePipeline::new(FeatureConfig::default()).unwrap();
    let bins = AgeBins::from_labels(["teen", "adult", "senior", "adult"]).unwrap();
    assert_eq!(bins.len(), 3);

    // Favors the last bin ("teen" after sorting is last)
    let classifier = |input: &Array4<f32>| -> Result<Vec<f32>, FeatureError> {
        assert_eq!(input.dim(), (1, 1, 13, 170));
        Ok(vec![0.5, 0.1, 3.0])
    };

    let upload = wav_bytes(&voiced(32_000, 16_000), 16_000, 1);
    let result = predict_audio(&pipeline, upload, Some("wav"), &classifier, &bins);
    let response = PredictionResponse::from_result(result);
    assert!(!response.is_error());

    let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
    assert_eq!(json["label"], "teen");
    let confidence = json["confidence"].as_f64().unwrap();
    assert!(confidence > 0.5 && confidence < 1.0);

    let failed = predict_audio(&pipeline, b"not audio".to_vec(), None, &classifier, &bins);
    let response = PredictionResponse::from_result(failed);
    assert!(response.is_error());
    let json: serde_json::Value = serde_json::from_str(&response.to_json().unwrap()).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Decoding error"));
    assert!(json.get("label").is_none());
}

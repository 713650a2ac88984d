// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use anyhow::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_research_tools::io::{read_wav, snr_output_path, write_wav};
use rust_research_tools::mixing::{rms, MixError, NoiseMixer, SnrSweep};
use rust_research_tools::signal::{to_int, AudioClip, AudioFormat};
use tempfile::tempdir;

#[test]
fn test_single_point_sweep_end_to_end() -> Result<()> {
    let mixer = NoiseMixer::new(32768.0);
    let mut rng = StdRng::seed_from_u64(123);

    let mixes = mixer.mix_sweep(
        &[1.0, 1.0, 1.0, 1.0],
        &[2.0, 2.0, 2.0, 2.0, 2.0, 2.0],
        SnrSweep::new(0.0, 0.0, 1),
        &mut rng,
    )?;

    assert_eq!(mixes.len(), 1);
    assert_eq!(mixes[0].samples, vec![2.0, 2.0, 2.0, 2.0]);
    Ok(())
}

#[test]
fn test_silent_noise_never_yields_nan() {
    let mixer = NoiseMixer::new(32768.0);
    let mut rng = StdRng::seed_from_u64(0);

    let result = mixer.mix_sweep(
        &[1.0, 1.0],
        &[0.0, 0.0],
        SnrSweep::single(0.0),
        &mut rng,
    );
    assert_eq!(result, Err(MixError::DegenerateSignal("noise")));
}

#[test]
fn test_sweep_shares_one_alignment() -> Result<()> {
    // Noise is a ramp so the window start is visible in every mix
    let clean = vec![100.0; 50];
    let noise: Vec<f64> = (0..500).map(|i| i as f64 + 1.0).collect();
    let mixer = NoiseMixer::new(f64::MAX);
    let mut rng = StdRng::seed_from_u64(99);

    let mixes = mixer.mix_sweep(&clean, &noise, SnrSweep::new(-5.0, 5.0, 3), &mut rng)?;
    assert_eq!(mixes.len(), 3);

    let window_starts: Vec<f64> = mixes
        .iter()
        .map(|m| {
            let adjusted: Vec<f64> = m.samples.iter().map(|s| s - 100.0).collect();
            // undo the per-SNR scale: ratio of second to first sample of the ramp window
            adjusted[1] / adjusted[0]
        })
        .collect();
    for ratio in &window_starts[1..] {
        assert!((ratio - window_starts[0]).abs() < 1e-9);
    }

    // Higher SNR means quieter noise
    let residual_rms: Vec<f64> = mixes
        .iter()
        .map(|m| rms(&m.samples.iter().map(|s| s - 100.0).collect::<Vec<_>>()))
        .collect();
    assert!(residual_rms[0] > residual_rms[1]);
    assert!(residual_rms[1] > residual_rms[2]);
    Ok(())
}

#[test]
fn test_same_seed_reproduces_corpus() -> Result<()> {
    let clean: Vec<f64> = (0..64).map(|i| (i as f64 * 0.7).sin() * 5000.0).collect();
    let noise: Vec<f64> = (0..1000).map(|i| ((i * 31 % 17) as f64) - 8.0).collect();
    let mixer = NoiseMixer::new(32768.0);
    let sweep = SnrSweep::new(-10.0, 10.0, 4);

    let first = mixer.mix_sweep(&clean, &noise, sweep, &mut StdRng::seed_from_u64(5))?;
    let second = mixer.mix_sweep(&clean, &noise, sweep, &mut StdRng::seed_from_u64(5))?;
    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_wav_corpus_generation() -> Result<()> {
    let temp_dir = tempdir()?;
    let clean_path = temp_dir.path().join("speech.wav");
    let noise_path = temp_dir.path().join("babble.wav");
    let format = AudioFormat::new(16000, 16, 1);

    let clean_samples: Vec<i32> = (0..1600)
        .map(|i| ((i as f64 * 0.1).sin() * 20000.0) as i32)
        .collect();
    let noise_samples: Vec<i32> = (0..4000).map(|i| ((i * 7919) % 2001) - 1000).collect();
    write_wav(&clean_path, format, &clean_samples)?;
    write_wav(&noise_path, format, &noise_samples)?;

    let clean = read_wav(&clean_path)?;
    let noise = read_wav(&noise_path)?;
    let mixer = NoiseMixer::for_format(&clean.format);
    let mixes = mixer.mix_clips(
        &clean,
        &noise,
        SnrSweep::new(-40.0, 40.0, 19),
        &mut StdRng::seed_from_u64(2),
    )?;
    assert_eq!(mixes.len(), 19);

    for mixed in &mixes {
        let path = snr_output_path(&clean_path, temp_dir.path(), mixed.snr_db, "wav");
        write_wav(&path, clean.format, &to_int(&mixed.samples))?;
    }

    let loudest = read_wav(temp_dir.path().join("speech_snr-40.wav"))?;
    assert_eq!(loudest.format, format);
    assert_eq!(loudest.samples.len(), 1600);
    assert!(loudest.samples.iter().all(|&s| (-32768..=32767).contains(&s)));

    // -40 + 80/18 = -35.55 truncates to -35
    assert!(temp_dir.path().join("speech_snr-35.wav").exists());
    let generated = std::fs::read_dir(temp_dir.path())?
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_name().to_string_lossy().starts_with("speech_snr"))
        .count();
    assert_eq!(generated, 19);
    Ok(())
}

#[test]
fn test_format_mismatch_aborts_before_mixing() {
    let clean = AudioClip::new(AudioFormat::new(48000, 16, 1), vec![1000; 10]);
    let noise = AudioClip::new(AudioFormat::new(44100, 16, 1), vec![10; 10]);
    let mixer = NoiseMixer::for_format(&clean.format);

    let mut rng = StdRng::seed_from_u64(0);
    let err = mixer
        .mix_clips(&clean, &noise, SnrSweep::single(0.0), &mut rng)
        .unwrap_err();
    assert!(matches!(err, MixError::FormatMismatch { .. }));
    assert!(err.to_string().contains("44100"));
}

#[test]
fn test_stereo_noise_stays_on_its_channel() -> Result<()> {
    let format = AudioFormat::new(48000, 16, 2);
    let clean = AudioClip::new(format, vec![1000; 2 * 100]);
    // Interleaved noise: +1 on the left channel, -1 on the right
    let noise = AudioClip::new(format, [1, -1].repeat(175));
    let mixer = NoiseMixer::for_format(&format);

    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mixes = mixer.mix_clips(&clean, &noise, SnrSweep::single(0.0), &mut rng)?;
        let samples = &mixes[0].samples;
        assert_eq!(samples.len(), 200);
        for frame in samples.chunks_exact(2) {
            assert!(frame[0] > 1000.0, "seed {}: left {}", seed, frame[0]);
            assert!(frame[1] < 1000.0, "seed {}: right {}", seed, frame[1]);
        }
    }
    Ok(())
}

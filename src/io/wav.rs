// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! WAV container handling using hound

use crate::signal::{AudioClip, AudioFormat};
use anyhow::{Context, Result};
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use log::{debug, info};
use std::path::Path;

/// Read an integer PCM WAV file.
///
/// All channels are returned interleaved. Floating point WAV files are
/// rejected since the mixer works on integer PCM.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<AudioClip> {
    let path = path.as_ref();
    let mut reader = WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file {}", path.display()))?;
    let spec = reader.spec();

    if spec.sample_format != SampleFormat::Int {
        anyhow::bail!(
            "Unsupported sample format in {}: only integer PCM is handled",
            path.display()
        );
    }

    let format = AudioFormat::new(spec.sample_rate, spec.bits_per_sample, spec.channels);
    debug!("Reading {} ({})", path.display(), format);

    let samples = reader
        .samples::<i32>()
        .collect::<Result<Vec<i32>, _>>()
        .with_context(|| format!("Failed to read samples from {}", path.display()))?;

    Ok(AudioClip::new(format, samples))
}

/// Write integer samples as a PCM WAV file.
///
/// Samples outside the range of the bit depth are saturated.
pub fn write_wav<P: AsRef<Path>>(path: P, format: AudioFormat, samples: &[i32]) -> Result<()> {
    let path = path.as_ref();
    let spec = WavSpec {
        channels: format.channels,
        sample_rate: format.sample_rate,
        bits_per_sample: format.bit_depth,
        sample_format: SampleFormat::Int,
    };
    let range = format.amplitude_range();

    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file {}", path.display()))?;
    for &sample in samples {
        writer.write_sample(range.saturate(sample))?;
    }
    writer
        .finalize()
        .with_context(|| format!("Failed to finalize WAV file {}", path.display()))?;

    info!("WAV file saved at: {}", path.display());
    Ok(())
}

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! SNR sweep driver
//!
//! `NoiseMixer` aligns a clean and a noise signal once, then produces one
//! mixed signal per requested SNR value. Every point of the sweep shares the
//! same alignment draw. Either all points are produced or an error is
//! returned; there is no partial sweep.

use super::{align_frames, clip_guard, rms, target_rms, Alignment, MixError, SnrSweep};
use crate::signal::{AudioClip, AudioFormat};
use log::debug;
use rand::Rng;

/// One point of an SNR sweep
#[derive(Debug, Clone, PartialEq)]
pub struct MixedSignal {
    /// Requested SNR in dB
    pub snr_db: f64,
    /// Clean + scaled noise, clip-guarded
    pub samples: Vec<f64>,
}

/// Mixes noise into a clean signal at a sweep of SNR values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoiseMixer {
    max_abs_value: f64,
}

impl NoiseMixer {
    /// Create a mixer whose output peak never exceeds `max_abs_value`
    pub fn new(max_abs_value: f64) -> Self {
        Self { max_abs_value }
    }

    /// Create a mixer bounded by the integer range of `format`
    pub fn for_format(format: &AudioFormat) -> Self {
        Self::new(format.amplitude_range().max_abs_value())
    }

    pub fn max_abs_value(&self) -> f64 {
        self.max_abs_value
    }

    /// Mix two integer clips after checking that their formats agree.
    ///
    /// Interleaved multichannel clips are aligned on whole frames, so each
    /// noise channel lands on the same clean channel.
    pub fn mix_clips<R: Rng + ?Sized>(
        &self,
        clean: &AudioClip,
        noise: &AudioClip,
        sweep: SnrSweep,
        rng: &mut R,
    ) -> Result<Vec<MixedSignal>, MixError> {
        clean.format.ensure_matches(&noise.format)?;
        self.mix_frames(
            &clean.amplitudes(),
            &noise.amplitudes(),
            usize::from(clean.format.channels),
            sweep,
            rng,
        )
    }

    /// Produce one mixed signal per SNR value of `sweep`.
    ///
    /// The clean RMS is measured on the whole clean signal, the noise RMS on
    /// the aligned noise window. Output signals have the length of the
    /// shorter input. Both slices are treated as single-channel.
    ///
    /// # Arguments
    ///
    /// * `clean` - Clean signal amplitudes
    /// * `noise` - Noise signal amplitudes
    /// * `sweep` - SNR values to produce, in dB
    /// * `rng` - Source of the single alignment draw shared by every point
    ///
    /// # Returns
    ///
    /// One `MixedSignal` per sweep value, in sweep order, or the first
    /// `MixError` met before any mixing happens
    ///
    /// # Example
    ///
    /// ```
    /// use rand::rngs::StdRng;
    /// use rand::SeedableRng;
    /// use rust_research_tools::mixing::{NoiseMixer, SnrSweep};
    ///
    /// let mixer = NoiseMixer::new(32768.0);
    /// let mixes = mixer
    ///     .mix_sweep(
    ///         &[1.0, 1.0, 1.0, 1.0],
    ///         &[1.0, 1.0, 1.0, 1.0],
    ///         SnrSweep::single(0.0),
    ///         &mut StdRng::seed_from_u64(0),
    ///     )
    ///     .unwrap();
    /// assert_eq!(mixes[0].samples, vec![2.0; 4]);
    /// ```
    pub fn mix_sweep<R: Rng + ?Sized>(
        &self,
        clean: &[f64],
        noise: &[f64],
        sweep: SnrSweep,
        rng: &mut R,
    ) -> Result<Vec<MixedSignal>, MixError> {
        self.mix_frames(clean, noise, 1, sweep, rng)
    }

    fn mix_frames<R: Rng + ?Sized>(
        &self,
        clean: &[f64],
        noise: &[f64],
        channels: usize,
        sweep: SnrSweep,
        rng: &mut R,
    ) -> Result<Vec<MixedSignal>, MixError> {
        let snr_values = sweep.values()?;

        if clean.is_empty() {
            return Err(MixError::EmptySignal("clean"));
        }
        if noise.is_empty() {
            return Err(MixError::EmptySignal("noise"));
        }

        let clean_rms = rms(clean);
        if clean_rms == 0.0 {
            return Err(MixError::DegenerateSignal("clean"));
        }

        let aligned = align_frames(clean, noise, channels, rng);
        debug!(
            "Aligned {} clean / {} noise samples to {} (offset {}, truncated {:?})",
            clean.len(),
            noise.len(),
            aligned.len(),
            aligned.offset,
            aligned.truncated
        );

        if aligned.is_empty() {
            let side = if clean.len() < channels { "clean" } else { "noise" };
            return Err(MixError::EmptySignal(side));
        }

        let noise_rms = rms(aligned.noise);
        if noise_rms == 0.0 {
            return Err(MixError::DegenerateSignal("noise"));
        }

        Ok(snr_values
            .into_iter()
            .map(|snr_db| MixedSignal {
                snr_db,
                samples: self.mix_at(&aligned, clean_rms, noise_rms, snr_db),
            })
            .collect())
    }

    fn mix_at(
        &self,
        aligned: &Alignment<'_>,
        clean_rms: f64,
        noise_rms: f64,
        snr_db: f64,
    ) -> Vec<f64> {
        let scale = target_rms(clean_rms, snr_db) / noise_rms;
        debug!("SNR {} dB: noise scale {:.6}", snr_db, scale);

        let mixed = aligned
            .clean
            .iter()
            .zip(aligned.noise)
            .map(|(&c, &n)| c + n * scale)
            .collect();

        clip_guard(mixed, self.max_abs_value)
    }
}

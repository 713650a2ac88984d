// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Alignment of two signals of unequal length

use rand::Rng;

/// Which input was cut down to the shorter length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truncated {
    Neither,
    Clean,
    Noise,
}

/// Equal-length views of a clean and a noise signal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment<'a> {
    pub clean: &'a [f64],
    pub noise: &'a [f64],
    /// Start of the window taken from the longer signal
    pub offset: usize,
    pub truncated: Truncated,
}

impl Alignment<'_> {
    /// Common length of both views
    pub fn len(&self) -> usize {
        self.clean.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clean.is_empty()
    }
}

/// Cut the longer signal down to the length of the shorter one.
///
/// The window start is drawn uniformly from `[0, longer - shorter)` using
/// `rng`; the shorter signal is returned untouched. Equal lengths need no
/// draw and give an offset of 0.
///
/// # Arguments
///
/// * `clean` - Clean signal samples
/// * `noise` - Noise signal samples
/// * `rng` - Source of the window start draw
///
/// # Returns
///
/// Two views of equal length `min(clean.len(), noise.len())`
///
/// # Example
///
/// ```
/// use rand::rngs::StdRng;
/// use rand::SeedableRng;
/// use rust_research_tools::mixing::{align, Truncated};
///
/// let clean = [1.0; 4];
/// let noise = [2.0; 6];
/// let aligned = align(&clean, &noise, &mut StdRng::seed_from_u64(0));
/// assert_eq!(aligned.len(), 4);
/// assert_eq!(aligned.truncated, Truncated::Noise);
/// assert!(aligned.offset < 2);
/// ```
pub fn align<'a, R: Rng + ?Sized>(
    clean: &'a [f64],
    noise: &'a [f64],
    rng: &mut R,
) -> Alignment<'a> {
    align_frames(clean, noise, 1, rng)
}

/// Frame-wise `align` for interleaved multichannel signals.
///
/// The window start is drawn in whole frames of `channels` samples so that
/// every channel of the noise stays on the matching channel of the clean
/// signal. `Alignment::offset` is reported in samples and is always a
/// multiple of `channels`. A trailing partial frame is dropped.
pub fn align_frames<'a, R: Rng + ?Sized>(
    clean: &'a [f64],
    noise: &'a [f64],
    channels: usize,
    rng: &mut R,
) -> Alignment<'a> {
    use std::cmp::Ordering;

    let channels = channels.max(1);
    let clean_frames = clean.len() / channels;
    let noise_frames = noise.len() / channels;
    let window = clean_frames.min(noise_frames) * channels;

    match clean_frames.cmp(&noise_frames) {
        Ordering::Equal => Alignment {
            clean: &clean[..window],
            noise: &noise[..window],
            offset: 0,
            truncated: Truncated::Neither,
        },
        Ordering::Greater => {
            let offset = rng.random_range(0..clean_frames - noise_frames) * channels;
            Alignment {
                clean: &clean[offset..offset + window],
                noise: &noise[..window],
                offset,
                truncated: Truncated::Clean,
            }
        }
        Ordering::Less => {
            let offset = rng.random_range(0..noise_frames - clean_frames) * channels;
            Alignment {
                clean: &clean[..window],
                noise: &noise[offset..offset + window],
                offset,
                truncated: Truncated::Noise,
            }
        }
    }
}

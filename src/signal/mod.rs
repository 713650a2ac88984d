// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! Signal representation module
//!
//! Audio reaches the numeric core as plain integer PCM samples together with
//! the container metadata (`AudioFormat`). This module holds that metadata,
//! the admissible integer range for a bit depth and the integer/float
//! sample conversions used at the boundary.

pub mod convert;

pub use convert::{to_float, to_int};

use crate::mixing::MixError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Container metadata shared by every sample of a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFormat {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Bits per integer sample
    pub bit_depth: u16,
    /// Number of interleaved channels
    pub channels: u16,
}

impl AudioFormat {
    pub fn new(sample_rate: u32, bit_depth: u16, channels: u16) -> Self {
        Self {
            sample_rate,
            bit_depth,
            channels,
        }
    }

    /// Check that two clips can be mixed together.
    ///
    /// Sample rate, bit depth and channel count must all agree. The caller's
    /// clip is reported as `clean`, the argument as `noise`.
    pub fn ensure_matches(&self, other: &AudioFormat) -> Result<(), MixError> {
        if self != other {
            return Err(MixError::FormatMismatch {
                clean: *self,
                noise: *other,
            });
        }
        Ok(())
    }

    /// Integer range implied by the bit depth
    pub fn amplitude_range(&self) -> AmplitudeRange {
        AmplitudeRange::for_bit_depth(self.bit_depth)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} Hz / {} bit / {} ch",
            self.sample_rate, self.bit_depth, self.channels
        )
    }
}

/// Admissible signed integer sample range for a bit depth.
///
/// A 16-bit signed sample spans `[-32768, 32767]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmplitudeRange {
    pub min: i32,
    pub max: i32,
}

impl AmplitudeRange {
    /// Range for a signed PCM bit depth between 1 and 32
    pub fn for_bit_depth(bit_depth: u16) -> Self {
        let bits = u32::from(bit_depth.clamp(1, 32));
        let half = 1i64 << (bits - 1);
        Self {
            min: (-half) as i32,
            max: (half - 1) as i32,
        }
    }

    /// Clip bound used by the normalizer (`32768` for 16-bit audio)
    pub fn max_abs_value(&self) -> f64 {
        -(self.min as f64)
    }

    /// Saturate an integer sample into the range
    pub fn saturate(&self, sample: i32) -> i32 {
        sample.clamp(self.min, self.max)
    }
}

/// Integer PCM samples with their container metadata
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub format: AudioFormat,
    /// Interleaved samples, `channels` values per frame
    pub samples: Vec<i32>,
}

impl AudioClip {
    pub fn new(format: AudioFormat, samples: Vec<i32>) -> Self {
        Self { format, samples }
    }

    /// Samples widened to floating point amplitudes
    pub fn amplitudes(&self) -> Vec<f64> {
        to_float(&self.samples)
    }

    /// Duration in seconds
    pub fn duration_secs(&self) -> f64 {
        let frames = self.samples.len() / usize::from(self.format.channels.max(1));
        frames as f64 / f64::from(self.format.sample_rate.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sixteen_bit_range() {
        let range = AmplitudeRange::for_bit_depth(16);
        assert_eq!(range.min, -32768);
        assert_eq!(range.max, 32767);
        assert_eq!(range.max_abs_value(), 32768.0);
        assert_eq!(range.saturate(40000), 32767);
        assert_eq!(range.saturate(-40000), -32768);
    }

    #[test]
    fn thirty_two_bit_range_does_not_overflow() {
        let range = AmplitudeRange::for_bit_depth(32);
        assert_eq!(range.min, i32::MIN);
        assert_eq!(range.max, i32::MAX);
    }

    #[test]
    fn format_mismatch_is_reported() {
        let clean = AudioFormat::new(48000, 16, 1);
        let noise = AudioFormat::new(44100, 16, 1);

        assert!(clean.ensure_matches(&clean).is_ok());
        match clean.ensure_matches(&noise) {
            Err(MixError::FormatMismatch { clean: c, noise: n }) => {
                assert_eq!(c.sample_rate, 48000);
                assert_eq!(n.sample_rate, 44100);
            }
            other => panic!("unexpected result: {:?}", other),
        }

        let stereo = AudioFormat::new(48000, 16, 2);
        assert!(clean.ensure_matches(&stereo).is_err());
        let wide = AudioFormat::new(48000, 24, 1);
        assert!(clean.ensure_matches(&wide).is_err());
    }

    #[test]
    fn clip_duration() {
        let clip = AudioClip::new(AudioFormat::new(4, 16, 2), vec![0; 16]);
        assert_eq!(clip.duration_secs(), 2.0);
    }
}

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Rust research tools library
//!
//! Synthetic noisy-speech corpus generation: a clean signal and a noise
//! signal are mixed at a sweep of signal-to-noise ratios, and a linear
//! convolution primitive (direct and FFT) is provided for impulse-response
//! experiments. An NLMS adaptive filter covers the filtering experiments run
//! on the resulting corpora.

pub mod adaptive;
pub mod config;
pub mod convolution;
pub mod io;
pub mod mixing;
pub mod signal;

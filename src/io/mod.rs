// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//!
//! File I/O around the numeric core
//!
//! WAV containers in and out, CSV experiment results and the naming of
//! generated corpus files.

pub mod naming;
pub mod records;
pub mod wav;

pub use naming::snr_output_path;
pub use records::{
    read_coefficients, read_records, records_from_columns, write_records, ExperimentRecord,
};
pub use wav::{read_wav, write_wav};

// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

use std::path::{Path, PathBuf};

/// Output path for one point of an SNR sweep.
///
/// `<output_dir>/<clean file stem>_snr<snr>.<ext>` where the SNR is
/// truncated toward zero, so `-4.4` dB and `-4.9` dB both give `_snr-4`.
pub fn snr_output_path<P: AsRef<Path>, Q: AsRef<Path>>(
    clean_path: P,
    output_dir: Q,
    snr_db: f64,
    ext: &str,
) -> PathBuf {
    let stem = clean_path
        .as_ref()
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!("{}_snr{}.{}", stem, snr_db as i64, ext);
    output_dir.as_ref().join(name)
}

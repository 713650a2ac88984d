// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! Configuration utilities
//!
//! Schema output and the validation rules that the JSON schema cannot
//! express.

use anyhow::{Context, Result};
use log::{debug, warn};

use super::{Config, CONFIG_SCHEMA};

/// Output the embedded JSON schema to the console.
///
/// This function is called when the `--show-config-schema` flag is provided
/// on the command line.
///
/// # Example
///
/// ```bash
/// ./calc_noise_mix --show-config-schema > config_schema.json
/// ```
pub fn output_config_schema() -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;

    let formatted_schema =
        serde_json::to_string_pretty(&schema).context("Failed to format JSON schema")?;

    println!("{}", formatted_schema);

    Ok(())
}

/// Check a configuration document against the embedded JSON schema
pub(crate) fn validate_schema(document: &serde_json::Value) -> Result<()> {
    let schema: serde_json::Value =
        serde_json::from_str(CONFIG_SCHEMA).context("Failed to parse JSON schema")?;
    let validator = jsonschema::draft202012::options()
        .should_validate_formats(true)
        .build(&schema)?;

    debug!("Validating configuration against schema");
    validator
        .validate(document)
        .map_err(|error| anyhow::anyhow!("Schema violation: {}", error))
}

/// Validates the configuration against rules that aren't covered by the JSON schema.
///
/// # Validation Rules
///
/// - **Sweep**: at least one SNR value, finite start and end
/// - **Convolution output**: when set, supported PCM bit depth, non-zero rate and channels
/// - **Inputs**: clean and noise must not be the same file (warning only)
pub(crate) fn validate_specific_rules(config: &Config) -> Result<()> {
    debug!("Performing additional validation checks");

    let mix = &config.mix;
    if mix.snr_count == 0 {
        anyhow::bail!("SNR count must be at least 1");
    }
    if !mix.snr_start.is_finite() || !mix.snr_end.is_finite() {
        anyhow::bail!(
            "SNR bounds must be finite (start: {}, end: {})",
            mix.snr_start,
            mix.snr_end
        );
    }

    let convolution = &config.convolution;
    if let Some(bit_depth) = convolution.bit_depth {
        if !matches!(bit_depth, 8 | 16 | 24 | 32) {
            anyhow::bail!("Unsupported bit depth: {}", bit_depth);
        }
    }
    if convolution.sample_rate == Some(0) {
        anyhow::bail!("Sample rate must be positive");
    }
    if convolution.channels == Some(0) {
        anyhow::bail!("Channel count must be positive");
    }

    if let (Some(clean), Some(noise)) = (&mix.clean, &mix.noise) {
        if clean == noise {
            warn!("Clean and noise files are the same: {:?}", clean);
        }
    }

    Ok(())
}

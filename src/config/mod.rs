// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

//! # Configuration Management
//!
//! This module implements configuration handling for the research tools.
//! Configuration is loaded from YAML files and validated against an embedded
//! JSON Schema before being deserialized.
//!
//! ## Configuration Structure
//!
//! - `mix`: inputs, output directory and SNR sweep of the noise mixer
//! - `convolution`: algorithm and output format of the convolution tool
//!
//! Paths that must be provided by the user are `Option`s; a configuration
//! is only usable once `validate` accepts it.
//!
//! ## Usage
//!
//! ```no_run
//! use rust_research_tools::config::Config;
//! use std::path::Path;
//!
//! // Load config from file, creates a default if not found
//! let mut config = Config::from_file(Path::new("config.yaml")).unwrap();
//!
//! // Command line values win over the file
//! config.apply_args(
//!     Some("speech.wav".into()), // Clean file
//!     Some("babble.wav".into()), // Noise file
//!     Some("out".into()),        // Output directory
//!     Some(-10.0),               // SNR start
//!     Some(10.0),                // SNR end
//!     Some(5),                   // SNR count
//!     None,                      // Seed
//! );
//! config.validate().unwrap();
//! ```

mod utils;

pub use utils::output_config_schema;

use crate::convolution::ConvolutionMethod;
use crate::mixing::SnrSweep;
use crate::signal::AudioFormat;
use anyhow::{Context, Result};
use log::{debug, error};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Embedded JSON schema of the configuration file
pub(crate) const CONFIG_SCHEMA: &str = include_str!("../../resources/config.schema.json");

/// Settings of the SNR sweep noise mixer.
///
/// # Example
///
/// ```
/// use rust_research_tools::config::MixConfig;
///
/// let mix = MixConfig {
///     clean: Some("speech.wav".into()),
///     noise: Some("babble.wav".into()),
///     output_dir: Some("out".into()),
///     ..MixConfig::default()
/// };
/// assert_eq!(mix.sweep().count, 19);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixConfig {
    /// Clean speech WAV file
    #[serde(default)]
    pub clean: Option<PathBuf>,

    /// Noise WAV file, must share the clean file's format
    #[serde(default)]
    pub noise: Option<PathBuf>,

    /// Directory receiving the mixed files
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// First SNR of the sweep in dB. Default is -40.
    #[serde(default = "default_snr_start")]
    pub snr_start: f64,

    /// Last SNR of the sweep in dB. Default is 40.
    #[serde(default = "default_snr_end")]
    pub snr_end: f64,

    /// Number of SNR values. Default is 19.
    #[serde(default = "default_snr_count")]
    pub snr_count: usize,

    /// Seed for the alignment draw; `None` seeds from the operating system
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_snr_start() -> f64 {
    -40.0
}

fn default_snr_end() -> f64 {
    40.0
}

fn default_snr_count() -> usize {
    19
}

impl Default for MixConfig {
    fn default() -> Self {
        Self {
            clean: None,
            noise: None,
            output_dir: None,
            snr_start: default_snr_start(),
            snr_end: default_snr_end(),
            snr_count: default_snr_count(),
            seed: None,
        }
    }
}

impl MixConfig {
    pub fn sweep(&self) -> SnrSweep {
        SnrSweep::new(self.snr_start, self.snr_end, self.snr_count)
    }
}

/// Settings of the convolution tool.
///
/// The output WAV file takes the input file's format; each field given here
/// replaces the matching input value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConvolutionConfig {
    #[serde(default)]
    pub method: ConvolutionMethod,
    #[serde(default)]
    pub sample_rate: Option<u32>,
    #[serde(default)]
    pub bit_depth: Option<u16>,
    #[serde(default)]
    pub channels: Option<u16>,
}

impl ConvolutionConfig {
    /// Format of the convolved file for an input of format `input`
    pub fn output_format(&self, input: &AudioFormat) -> AudioFormat {
        AudioFormat::new(
            self.sample_rate.unwrap_or(input.sample_rate),
            self.bit_depth.unwrap_or(input.bit_depth),
            self.channels.unwrap_or(input.channels),
        )
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Noise mixing section, defaults apply when omitted
    #[serde(default)]
    pub mix: MixConfig,

    /// Convolution section, defaults apply when omitted
    #[serde(default)]
    pub convolution: ConvolutionConfig,
}

impl Config {
    /// Write a sample configuration next to `path` for the user to edit
    fn create_sample_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let sample_path = path.with_extension("sample.yaml");
        debug!("Creating sample configuration file at {:?}", sample_path);

        if let Some(parent) = sample_path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).with_context(|| {
                    format!(
                        "Failed to create directory for sample config at {:?}",
                        parent
                    )
                })?;
            }
        }

        Self::default()
            .save_to_file(&sample_path)
            .with_context(|| format!("Failed to save sample config to {:?}", sample_path))?;

        error!(
            "Sample configuration file created at {:?}\nPlease edit and rename it",
            sample_path
        );
        Ok(())
    }

    /// Load configuration from a file.
    ///
    /// A missing file is created with default values. A file that cannot be
    /// parsed, breaks the schema or fails the specific rules produces an
    /// error and a `.sample.yaml` file next to it.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No configuration at {:?}, writing defaults", path);
            let config = Self::default();
            config.save_to_file(path)?;
            return Ok(config);
        }

        debug!("Loading configuration from {:?}", path);
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration file at {:?}", path))?;

        Self::parse(&contents).or_else(|err| -> Result<Self> {
            error!("Rejected configuration {:?}: {:#}", path, err);
            Self::create_sample_config(path)?;
            Err(err.context(format!("Invalid configuration in {}", path.display())))
        })
    }

    /// Parse a YAML document and run every check on it
    fn parse(contents: &str) -> Result<Self> {
        // An empty document is an empty mapping
        let document: serde_yml::Value = if contents.trim().is_empty() {
            serde_yml::Value::Mapping(serde_yml::Mapping::new())
        } else {
            serde_yml::from_str(contents).context("Malformed YAML")?
        };
        let document =
            serde_json::to_value(&document).context("YAML document has no JSON form")?;

        utils::validate_schema(&document)?;
        let config: Config =
            serde_json::from_value(document).context("Unexpected configuration layout")?;
        utils::validate_specific_rules(&config)?;
        Ok(config)
    }

    /// Save the configuration to a file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yml::to_string(self).context("Failed to serialize configuration")?;
        fs::write(path, yaml).with_context(|| format!("Failed to write {:?}", path))
    }

    /// Apply command line overrides to the mix section.
    ///
    /// Only the values that were given on the command line replace the
    /// file values.
    #[allow(clippy::too_many_arguments)]
    pub fn apply_args(
        &mut self,
        clean: Option<PathBuf>,
        noise: Option<PathBuf>,
        output_dir: Option<PathBuf>,
        snr_start: Option<f64>,
        snr_end: Option<f64>,
        snr_count: Option<usize>,
        seed: Option<u64>,
    ) {
        if let Some(clean) = clean {
            debug!("Overriding clean file from command line: {:?}", clean);
            self.mix.clean = Some(clean);
        }
        if let Some(noise) = noise {
            debug!("Overriding noise file from command line: {:?}", noise);
            self.mix.noise = Some(noise);
        }
        if let Some(dir) = output_dir {
            debug!("Overriding output directory from command line: {:?}", dir);
            self.mix.output_dir = Some(dir);
        }
        if let Some(start) = snr_start {
            debug!("Overriding SNR start from command line: {}", start);
            self.mix.snr_start = start;
        }
        if let Some(end) = snr_end {
            debug!("Overriding SNR end from command line: {}", end);
            self.mix.snr_end = end;
        }
        if let Some(count) = snr_count {
            debug!("Overriding SNR count from command line: {}", count);
            self.mix.snr_count = count;
        }
        if let Some(seed) = seed {
            debug!("Overriding seed from command line: {}", seed);
            self.mix.seed = Some(seed);
        }
    }

    /// Check that the configuration is complete enough to run a noise mix.
    ///
    /// Clean file, noise file and output directory are required on top of
    /// the rules applied when loading.
    pub fn validate(&self) -> Result<()> {
        utils::validate_specific_rules(self)?;

        if self.mix.clean.is_none() {
            anyhow::bail!("No clean file given (use --clean or mix.clean)");
        }
        if self.mix.noise.is_none() {
            anyhow::bail!("No noise file given (use --noise or mix.noise)");
        }
        if self.mix.output_dir.is_none() {
            anyhow::bail!("No output directory given (use --output or mix.output_dir)");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn defaults_match_cli_defaults() {
        let config = Config::default();
        assert_eq!(config.mix.snr_start, -40.0);
        assert_eq!(config.mix.snr_end, 40.0);
        assert_eq!(config.mix.snr_count, 19);
        assert_eq!(config.convolution.method, ConvolutionMethod::Fft);
        let input = AudioFormat::new(44100, 24, 1);
        assert_eq!(config.convolution.output_format(&input), input);
    }

    #[test]
    fn output_format_fields_override_input() {
        let convolution = ConvolutionConfig {
            bit_depth: Some(16),
            ..ConvolutionConfig::default()
        };
        assert_eq!(
            convolution.output_format(&AudioFormat::new(44100, 24, 2)),
            AudioFormat::new(44100, 16, 2)
        );
    }

    #[test]
    fn malformed_yaml_creates_sample() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("bad.yaml");
        fs::write(&path, "mix: [unclosed\n")?;

        let err = Config::from_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("Malformed YAML"));
        assert!(dir.path().join("bad.sample.yaml").exists());
        Ok(())
    }

    #[test]
    fn partial_document_uses_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("partial.yaml");
        fs::write(&path, "mix:\n  snr_count: 3\nconvolution:\n  method: direct\n")?;

        let config = Config::from_file(&path)?;
        assert_eq!(config.mix.snr_count, 3);
        assert_eq!(config.mix.snr_start, -40.0);
        assert_eq!(config.convolution.method, ConvolutionMethod::Direct);
        assert_eq!(config.convolution.bit_depth, None);
        Ok(())
    }

    #[test]
    fn empty_document_is_default() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("empty.yaml");
        fs::write(&path, "")?;
        assert_eq!(Config::from_file(&path)?, Config::default());
        Ok(())
    }
}

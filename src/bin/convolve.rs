// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//! Convolution utility
//!
//! This binary tool convolves a WAV file with an impulse response stored in
//! a second WAV file (or a CSV coefficient file) and writes the full linear
//! convolution as a new WAV file.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rust_research_tools::config::Config;
use rust_research_tools::convolution::{create_convolver, ConvolutionMethod};
use rust_research_tools::io::{read_coefficients, read_wav, write_wav};
use rust_research_tools::mixing::clip_guard;
use rust_research_tools::signal::{to_int, AudioFormat};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "convolve")]
#[command(version, about = "Linear convolution of WAV files", long_about = None)]
struct Args {
    /// Input WAV file
    #[arg(short, long)]
    input: PathBuf,

    /// Impulse response, a WAV file or a CSV file of coefficients
    #[arg(short = 'r', long)]
    impulse: PathBuf,

    /// Output WAV file
    #[arg(short, long)]
    output: PathBuf,

    /// Convolution algorithm (overrides the configuration)
    #[arg(short, long, value_enum)]
    method: Option<ConvolutionMethod>,

    /// Rescale the result into the output bit depth if it would clip
    #[arg(short, long)]
    normalize: bool,

    /// YAML configuration file; its output format fields override the input's
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Impulse response taps; a WAV impulse must share the input's format
fn load_impulse(path: &Path, input: &AudioFormat) -> Result<Vec<f64>> {
    let is_csv = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if is_csv {
        return read_coefficients(path);
    }

    let impulse = read_wav(path)?;
    input
        .ensure_matches(&impulse.format)
        .with_context(|| format!("Impulse {:?} does not match the input", path))?;
    Ok(impulse.amplitudes())
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );
    let args = Args::parse();

    let convolution = match &args.config {
        Some(path) => Config::from_file(path)?.convolution,
        None => Default::default(),
    };
    let method = args.method.unwrap_or(convolution.method);

    info!("Reading input {:?}", args.input);
    let input = read_wav(&args.input)?;
    if input.format.channels != 1 {
        anyhow::bail!(
            "Input must be mono (has {} channels)",
            input.format.channels
        );
    }
    let format = convolution.output_format(&input.format);
    if format != input.format {
        info!("Writing {} output from {} input", format, input.format);
    }
    let impulse = load_impulse(&args.impulse, &input.format)?;

    info!(
        "Convolving {} samples with {} taps ({:?})",
        input.samples.len(),
        impulse.len(),
        method
    );
    let mut result = create_convolver(method).convolve(&input.amplitudes(), &impulse);

    if args.normalize {
        result = clip_guard(result, format.amplitude_range().max_abs_value());
    }

    write_wav(&args.output, format, &to_int(&result))?;
    println!("Convolution successfully written to {:?}", args.output);
    Ok(())
}

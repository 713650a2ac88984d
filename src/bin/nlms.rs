// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).
//! NLMS filtering utility
//!
//! This binary tool runs a normalized LMS adaptive filter on a desired WAV
//! signal and writes the `desired,y,error,mse` columns as CSV. With a
//! reference WAV file the filter follows it through a tapped delay line,
//! otherwise it adapts against one random regressor for every sample.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_research_tools::adaptive::{centered_uniform, NlmsFilter};
use rust_research_tools::io::{
    read_coefficients, read_wav, records_from_columns, write_records,
};
use rust_research_tools::mixing::mse;
use rust_research_tools::signal::AudioClip;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "nlms")]
#[command(version, about = "NLMS adaptive filtering of WAV files", long_about = None)]
struct Args {
    /// Desired signal, a mono WAV file
    #[arg(short, long)]
    desired: PathBuf,

    /// Reference signal driving the filter, same format as the desired file
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Output CSV file
    #[arg(short, long)]
    output: PathBuf,

    /// Filter length
    #[arg(short = 'n', long, default_value_t = 16)]
    taps: usize,

    /// Step size, strictly between 0 and 2
    #[arg(short, long, default_value_t = 1.0)]
    alpha: f64,

    /// Maximum weight updates per sample
    #[arg(short, long, default_value_t = 2)]
    updates: usize,

    /// Absolute error that ends the updates of a sample
    #[arg(short, long, default_value_t = 0.01)]
    threshold: f64,

    /// CSV file of initial coefficients, random when absent
    #[arg(short, long)]
    weights: Option<PathBuf>,

    /// Seed of the random weights and regressor
    #[arg(long)]
    seed: Option<u64>,
}

fn read_mono(path: &Path) -> Result<AudioClip> {
    let clip = read_wav(path)?;
    if clip.format.channels != 1 {
        anyhow::bail!(
            "{:?} must be mono (has {} channels)",
            path,
            clip.format.channels
        );
    }
    Ok(clip)
}

fn main() -> Result<()> {
    env_logger::init_from_env(
        env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
    );
    let args = Args::parse();

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let filter = NlmsFilter::new(args.taps, args.alpha, args.updates, args.threshold)?;
    let mut filter = match &args.weights {
        Some(path) => {
            info!("Loading initial coefficients from {:?}", path);
            filter.with_weights(read_coefficients(path)?)?
        }
        None => filter.with_random_weights(&mut rng),
    };

    info!("Reading desired signal {:?}", args.desired);
    let desired = read_mono(&args.desired)?;
    let result = match &args.reference {
        Some(path) => {
            let reference = read_mono(path)?;
            desired
                .format
                .ensure_matches(&reference.format)
                .with_context(|| format!("Reference {:?} does not match", path))?;
            filter.adapt(&reference.amplitudes(), &desired.amplitudes())?
        }
        None => {
            let regressor = centered_uniform(filter.taps(), &mut rng);
            filter.adapt_fixed(&regressor, &desired.amplitudes())?
        }
    };

    let records =
        records_from_columns(&result.desired, &result.output, &result.error, &result.mse)?;
    write_records(&args.output, &records)?;

    info!(
        "Filtered {} samples, MSE {:.6}",
        result.len(),
        mse(&result.desired, Some(&result.output))?
    );
    println!("NLMS results successfully written to {:?}", args.output);
    Ok(())
}

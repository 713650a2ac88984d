// Copyright (c) 2025 Ronan LE MEILLAT, SCTG Development
// This file is part of the rust-research-tools project and is licensed under the
// SCTG Development Non-Commercial License v1.0 (see LICENSE.md for details).

// Noisy corpus generator: mixes a noise file into a clean file at a sweep of SNR values

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_research_tools::config::{self, Config};
use rust_research_tools::io::{read_wav, snr_output_path, write_wav};
use rust_research_tools::mixing::NoiseMixer;
use rust_research_tools::signal::to_int;
use std::path::PathBuf;

/// Mix a noise file into a clean file at a sweep of signal-to-noise ratios
#[derive(Debug, Parser)]
#[command(name = "calc_noise_mix")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Clean WAV file
    #[arg(long, value_name = "FILE")]
    clean: Option<PathBuf>,

    /// Noise WAV file (same sample rate, bit depth and channels as the clean file)
    #[arg(long, value_name = "FILE")]
    noise: Option<PathBuf>,

    /// Output directory
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// First SNR value in dB [default: -40]
    #[arg(long, allow_negative_numbers = true)]
    start: Option<f64>,

    /// Last SNR value in dB [default: 40]
    #[arg(long, allow_negative_numbers = true)]
    end: Option<f64>,

    /// Number of SNR values [default: 19]
    #[arg(long)]
    div: Option<usize>,

    /// Seed of the alignment draw, for reproducible corpora
    #[arg(long)]
    seed: Option<u64>,

    /// YAML configuration file, command line values take precedence
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print the configuration JSON schema and exit
    #[arg(long)]
    show_config_schema: bool,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    /// Disable logging
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.quiet {
        log::LevelFilter::Off
    } else if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    if args.show_config_schema {
        return config::output_config_schema();
    }

    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply_args(
        args.clean,
        args.noise,
        args.output,
        args.start,
        args.end,
        args.div,
        args.seed,
    );
    config.validate()?;

    let mix = &config.mix;
    // validate() guarantees the three paths are set
    let (Some(clean_path), Some(noise_path), Some(output_dir)) =
        (&mix.clean, &mix.noise, &mix.output_dir)
    else {
        anyhow::bail!("Clean file, noise file and output directory are required");
    };

    info!("clean file path: {}", clean_path.display());
    info!("noise file path: {}", noise_path.display());
    info!("output directory: {}", output_dir.display());
    info!("start value of S/N Rate: {}", mix.snr_start);
    info!("end value of S/N Rate: {}", mix.snr_end);
    info!("number of divisions: {}", mix.snr_count);

    let clean = read_wav(clean_path)?;
    let noise = read_wav(noise_path)?;
    debug!(
        "clean: {} samples ({:.2} s), noise: {} samples ({:.2} s)",
        clean.samples.len(),
        clean.duration_secs(),
        noise.samples.len(),
        noise.duration_secs()
    );

    let mut rng = match mix.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let mixer = NoiseMixer::for_format(&clean.format);
    let mixes = mixer
        .mix_clips(&clean, &noise, mix.sweep(), &mut rng)
        .context("Noise mixing failed")?;

    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create output directory {:?}", output_dir))?;

    for mixed in &mixes {
        let output_path = snr_output_path(clean_path, output_dir, mixed.snr_db, "wav");
        write_wav(&output_path, clean.format, &to_int(&mixed.samples))?;
    }

    let snr_list: Vec<f64> = mixes.iter().map(|m| m.snr_db).collect();
    println!(
        "Successfully created following SN Rate files!! SNR: {:?}",
        snr_list
    );

    Ok(())
}

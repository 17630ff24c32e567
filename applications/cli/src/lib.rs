//! rg2soundcheck - Convert ReplayGain metadata to iTunes SoundCheck
//!
//! Command line front end for the `soundcheck` library: argument parsing,
//! settings, logging and exit status.

pub mod config;

use crate::config::Settings;
use clap::Parser;
use soundcheck::{ConvertOptions, Converter};
use std::path::PathBuf;
use std::process::ExitCode;

/// Exit status when a ReplayGain tag is missing or invalid
pub const REPLAYGAIN_ERROR_STATUS: u8 = 255;

#[derive(Parser, Debug)]
#[command(name = "rg2soundcheck")]
#[command(about = "Convert ReplayGain metadata to iTunes SoundCheck.", long_about = None)]
pub struct Cli {
    /// File(s) to process
    #[arg(value_name = "INFILE", required = true)]
    pub infiles: Vec<PathBuf>,

    /// Use album ReplayGain instead of track ReplayGain
    #[arg(short, long)]
    pub album: bool,

    /// Be verbose
    #[arg(short, long)]
    pub verbose: bool,

    /// Reset modification timestamp after altering file
    #[arg(short, long)]
    pub timestamp: bool,

    /// Configuration file path
    #[arg(short, long, env = "RG2SC_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings = Settings::load(self.config.as_deref())?;
        Ok(settings.with_flags(self.album, self.verbose, self.timestamp))
    }
}

/// Convert all files, mapping the outcome to the process exit status.
///
/// Skipped files still exit with success; a ReplayGain error stops the
/// batch and exits with [`REPLAYGAIN_ERROR_STATUS`].
pub fn convert(infiles: &[PathBuf], options: &ConvertOptions) -> ExitCode {
    match Converter::new(options).run(infiles) {
        Ok(summary) => {
            tracing::debug!(
                "Converted {} file(s), skipped {}",
                summary.processed,
                summary.skipped.len()
            );
            ExitCode::SUCCESS
        }
        Err(_) => ExitCode::from(REPLAYGAIN_ERROR_STATUS),
    }
}

/// Command line tool settings
use anyhow::Context;
use serde::{Deserialize, Serialize};
use soundcheck::ConvertOptions;
use std::path::{Path, PathBuf};

/// Settings file looked up in the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "rg2soundcheck.toml";

/// Prefix of environment overrides, e.g. `RG2SC_ALBUM=true`
pub const ENV_PREFIX: &str = "RG2SC";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    /// Use album ReplayGain instead of track ReplayGain
    #[serde(default)]
    pub album: bool,

    /// Log per-file diagnostics
    #[serde(default)]
    pub verbose: bool,

    /// Reset the modification timestamp after altering a file
    #[serde(default)]
    pub preserve_mtime: bool,
}

impl Settings {
    /// Load settings from a TOML file and the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder();

        builder = match path {
            Some(path) => builder.add_source(config::File::from(path.to_path_buf())),
            None => builder
                .add_source(config::File::from(PathBuf::from(DEFAULT_CONFIG_FILE)).required(false)),
        };

        // Override with environment variables (prefixed with RG2SC_)
        builder = builder.add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true));

        builder
            .build()
            .context("Failed to load configuration")?
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Switch on every option given as a command line flag
    pub fn with_flags(mut self, album: bool, verbose: bool, preserve_mtime: bool) -> Self {
        self.album |= album;
        self.verbose |= verbose;
        self.preserve_mtime |= preserve_mtime;
        self
    }

    pub fn convert_options(&self) -> ConvertOptions {
        ConvertOptions::new()
            .with_album(self.album)
            .with_verbose(self.verbose)
            .with_preserve_mtime(self.preserve_mtime)
    }
}

/// rg2soundcheck - Convert ReplayGain metadata to iTunes SoundCheck
use clap::Parser;
use rg2soundcheck::Cli;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rg2soundcheck=info,soundcheck=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let cli = Cli::parse();
    let settings = cli.settings()?;
    let options = settings.convert_options();

    tracing::debug!("Settings: {:?}", settings);

    Ok(rg2soundcheck::convert(&cli.infiles, &options))
}

use chrono::Utc;
use clap::Parser;
use hron_app::cli::Cli;
use hron_app::commands::run;
use hron_app::error::AppError;
use hron_core::config::load_config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Argument errors and `--help` exit here, before any config is read.
    let cli = Cli::parse();

    let (filter_layer, filter_handle) = reload::Layer::new(EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_file(true)
                .with_line_number(true),
        )
        .init();

    let config = load_config()?;

    if let Ok(filter) = EnvFilter::try_new(config.logging.level.as_str()) {
        if let Err(e) = filter_handle.modify(|current| *current = filter) {
            tracing::warn!(error = %e, "Failed to update log filter from config");
        }
    } else {
        tracing::warn!(level = %config.logging.level, "Invalid log level in config, keeping warn");
    }

    tracing::debug!(command = ?cli.command, "Running command");

    match run(&cli.command, &config, Utc::now()) {
        Ok(output) => {
            println!("{output}");
            Ok(())
        }
        Err(AppError::ScheduleError(err)) => {
            eprintln!("{}", err.display_rich());
            std::process::exit(1);
        }
        Err(err) => Err(err.into()),
    }
}

//! Travel time collector
//!
//! Periodically looks up car and public transit travel times from one origin
//! to a set of destinations and prints each cycle as a JSON line on stdout.
//! Diagnostics go to stderr.

mod cli;

use std::{future::Future, sync::Arc};

use anyhow::Context;
use application::CollectorService;
use clap::Parser;
use infrastructure::{
    AppConfig, DrivingAdapter, JsonLineSink, SchedulerError, TransitAdapter, init_logging,
    run_cycle, run_hourly, run_interval,
};
use tracing::{debug, info};

use crate::cli::{Cli, Commands, log_filter_from_verbosity};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    init_logging(&config.logging, log_filter_from_verbosity(cli.verbose))
        .context("Failed to initialize logging")?;

    cli.overrides.apply(&mut config);
    cli.command.apply(&mut config);
    config.validate().context("Invalid configuration")?;
    debug!(?config, "Configuration loaded");

    let service = build_service(&config)?;
    info!(
        origin = %service.origin().name,
        destinations = service.destinations().len(),
        "Travel time collector ready"
    );

    match cli.command {
        Commands::Once => {
            run_cycle(&service)
                .await
                .context("Collection cycle failed")?;
        },
        Commands::Interval { .. } => {
            let period = config.scheduler.interval()?;
            until_shutdown(run_interval(service, period)).await?;
        },
        Commands::Hourly { .. } => {
            let schedule = config.scheduler.hourly_schedule()?;
            until_shutdown(run_hourly(service, schedule)).await?;
        },
    }

    Ok(())
}

/// Wire the provider adapters and the stdout sink into a collector
fn build_service(config: &AppConfig) -> anyhow::Result<Arc<CollectorService>> {
    let driving = DrivingAdapter::new(&config.driving.to_driving_config())
        .context("Failed to create driving client")?;
    let transit = TransitAdapter::new(&config.transit.to_transit_config())
        .context("Failed to create transit client")?;

    Ok(Arc::new(CollectorService::new(
        config.origin_location(),
        config.destination_locations(),
        Arc::new(driving),
        Arc::new(transit),
        Arc::new(JsonLineSink::stdout()),
    )))
}

/// Run a scheduler loop until it fails or Ctrl+C is received
async fn until_shutdown(
    scheduler: impl Future<Output = Result<(), SchedulerError>>,
) -> Result<(), SchedulerError> {
    tokio::select! {
        result = scheduler => result,
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down");
            Ok(())
        }
    }
}

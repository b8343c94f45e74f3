//! Concord example driver
//!
//! Run consensus on the sample line graph and print the result as JSON.

use std::env;

use concord_cli::{config_from_args, run, sample_network};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "concord=info,concord_cli=info,concord_consensus=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config_from_args(env::args().skip(1));
    tracing::info!(?config, "starting concord");

    let mut network = sample_network()?;
    let report = run(&mut network, &config)?;

    println!("Simulation completed in {} rounds.", report.rounds);
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}

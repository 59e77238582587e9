use clap::Parser;
use common::config::Config;

use crate::model::GenericError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to config file
    #[arg(short, long, default_value = "config/atlas.yaml")]
    pub config: String,

    /// Path to the JSON metrics snapshot to evaluate
    #[arg(short, long)]
    pub input: String,
}

pub fn initialize_executable() -> Result<(Config, Args), GenericError> {
    let args = Args::parse();
    println!("Loading config from: {}", args.config);
    let config = Config::load(&args.config)?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!(
        "Starting {} (runner threads: {})",
        config.common.project_name,
        config.runner.threads
    );

    Ok((config, args))
}

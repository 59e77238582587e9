use std::error::Error;
use std::path::Path;
use std::sync::Arc;

use scoring::{
    executable_utils::initialize_executable, runner::Runner, source::JsonFileSource,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    println!("Starting atlas runner...");
    let (config, args) = initialize_executable()?;

    let source = Arc::new(JsonFileSource::load(Path::new(&args.input)).await?);

    let runner = Runner::new(config.runner, source);
    let reports = runner.run().await?;

    // The report list is the whole output; enforcement and notification
    // consumers read it from stdout
    println!("{}", serde_json::to_string_pretty(&reports)?);

    Ok(())
}

use std::path::PathBuf;

use clap::Parser;
use locator_test_shared::{Scenario, prelude::*, run_scenario};
use log::info;

#[derive(Parser)]
/// Run the location state machine against a scripted provider and print every status it
/// goes through
struct Cli {
    /// Path to the JSON scenario file
    scenario: PathBuf,

    /// Print the whole report as a single JSON document instead of one status per line
    #[arg(long)]
    report: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result {
    colog::init();
    let cli = Cli::parse();

    let scenario = Scenario::from_file(&cli.scenario)?;

    // Hanging providers resolve through the locator's timeout, no need to actually wait
    tokio::time::pause();

    info!("Running scenario {}", cli.scenario.display());
    let report = run_scenario(scenario).await;

    if cli.report {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        println!("{json}");
    } else {
        for status in report.trace.iter() {
            let line = serde_json::to_string(status).context("Failed to serialize status")?;
            println!("{line}");
        }
    }

    Ok(())
}

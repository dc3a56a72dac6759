mod cli;
mod settings;
mod workflow;

use anyhow::Result;
use cli::{OutputFormat, parse_cli, print_json, print_plain};
use settings::Settings;
use workflow::SearchWorkflow;

fn main() -> Result<()> {
    let cli = parse_cli();
    veduta::logging::init();

    let resolved = settings::load(&cli)?;

    if cli.print_config {
        resolved.print_summary();
    }

    run_search(cli.output, resolved)
}

/// Execute the search workflow and print the results in the chosen format.
fn run_search(format: OutputFormat, settings: Settings) -> Result<()> {
    let workflow = SearchWorkflow::from_settings(settings);
    let store = workflow.run()?;

    match format {
        OutputFormat::Plain => print_plain(&store),
        OutputFormat::Json => print_json(&store)?,
    }

    Ok(())
}

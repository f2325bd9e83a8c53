use anyhow::Context;
use carboncore::prelude::WorkloadType;
use carboncore::Country;
use clap::Parser;
use gui_bridge::bridge::{gui_bind_address, GuiBridge};
use gui_bridge::model::VisualizationModel;
use input::ModelChoice;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Builder as TokioBuilder;
use tokio::signal;
use workflow::config::ScenarioConfig;
use workflow::runner::{EstimateOutcome, Runner};

mod gui_bridge;
mod input;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Estimate the carbon footprint of an AI generation task")]
struct Args {
    /// Load a scenario from YAML instead of the flags below
    #[arg(long)]
    scenario: Option<PathBuf>,
    /// text, image or video
    #[arg(long, default_value_t = WorkloadType::Text)]
    workload: WorkloadType,
    /// Prompt text; text workloads derive their token count from it
    #[arg(long, default_value = "")]
    prompt: String,
    /// Number of images, or video duration in seconds
    #[arg(long)]
    units: Option<u32>,
    /// Country name or two-letter code
    #[arg(long, default_value_t = Country::Austria)]
    country: Country,
    /// Manual grid intensity in g CO2/kWh, replacing the country default
    #[arg(long)]
    intensity: Option<f64>,
    #[arg(long, default_value_t = ModelChoice::Gpt35)]
    model: ModelChoice,
    /// Print the full report as JSON
    #[arg(long, default_value_t = false)]
    json: bool,
    /// Append a one-line summary of the estimate to this file
    #[arg(long)]
    report_log: Option<PathBuf>,
    /// Keep the HTTP bridge alive for the visualizer
    #[arg(long, default_value_t = false)]
    serve: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let scenario = if let Some(path) = &args.scenario {
        ScenarioConfig::load(path)?
    } else {
        ScenarioConfig::from_args(
            args.workload,
            args.prompt.clone(),
            args.units,
            args.country,
            args.intensity,
            args.model,
        )
    };
    if let Some(description) = &scenario.description {
        println!("Scenario: {}", description);
    }

    let runner = Arc::new(Runner::new(scenario.intensity_table()));
    let gui_bridge = GuiBridge::new(runner.clone());
    let outcome = runner.execute(&scenario.to_form())?;
    let model = VisualizationModel::from_outcome(&outcome);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&model).context("serializing report")?
        );
    } else {
        print_report(&outcome, &model);
    }
    gui_bridge.publish(&model);

    if let Some(path) = &args.report_log {
        append_report(path, &outcome)?;
    }

    if args.serve {
        gui_bridge.spawn(gui_bind_address());
        gui_bridge.publish_status(&format!(
            "HTTP bridge running on {} (Ctrl+C to stop)...",
            gui_bind_address()
        ));
        let runtime = TokioBuilder::new_current_thread()
            .enable_all()
            .build()
            .context("creating runtime for signal handling")?;
        runtime.block_on(async {
            signal::ctrl_c().await.context("awaiting Ctrl+C to exit")?;
            Ok::<(), anyhow::Error>(())
        })?;
    }

    Ok(())
}

fn print_report(outcome: &EstimateOutcome, model: &VisualizationModel) {
    println!(
        "{} generation, {} {}(s), {} at {} g CO2/kWh",
        outcome.request.workload,
        outcome.request.quantity,
        model.unit_label,
        outcome.form.country.label(),
        outcome.request.intensity_g_per_kwh
    );

    let Some(result) = &outcome.result else {
        println!("Nothing to estimate.");
        return;
    };

    println!(
        "Energy: {:.2} Wh ({:.5} kWh)",
        result.energy_wh, result.energy_kwh
    );
    println!("{}", model.summary.render());
    for bar in &model.chart.bars {
        println!("  {:<24} {:>12.2} g CO2-eq", bar.label, bar.grams);
    }
    for note in &model.notes {
        println!("Note: {}", note);
    }
}

fn append_report(path: &Path, outcome: &EstimateOutcome) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening report log {}", path.display()))?;
    file.write_all(outcome.log_line().as_bytes())
        .with_context(|| format!("writing report log {}", path.display()))?;
    Ok(())
}

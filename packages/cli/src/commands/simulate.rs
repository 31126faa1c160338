use crate::scenario::{Scenario, Simulation, SimulationReport};
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use fxlayout_core::Config;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub struct SimulateArgs {
    /// Scenario JSON file
    pub scenario: PathBuf,

    /// Directory holding fxlayout.config.json (defaults to the current directory)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

pub fn simulate(args: SimulateArgs, cwd: &Path) -> Result<()> {
    let config_dir = args.config.unwrap_or_else(|| cwd.to_path_buf());
    let config = Config::load(&config_dir)?;
    let scenario = Scenario::load(&args.scenario)?;

    let report = Simulation::run(&scenario, config)?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        "text" => print_report(&args.scenario, &report),
        other => return Err(anyhow::anyhow!("Unknown format: {}. Use: text or json", other)),
    }

    Ok(())
}

fn print_report(path: &Path, report: &SimulationReport) {
    println!("🎬 {} {}", "Simulating".green().bold(), path.display());
    println!();

    for step in &report.steps {
        println!("{} {}", "▸".cyan(), step.step.bold());
        if step.writes.is_empty() {
            println!("    {}", "(no style changes)".dimmed());
        }
        for write in &step.writes {
            let style = if write.style.is_hidden() {
                write.style.to_string().yellow()
            } else {
                write.style.to_string().green()
            };
            println!("    {} {}", write.element, style);
        }
    }

    println!();
    println!("✨ {} Final styles:", "Done".green().bold());
    for (element, style) in &report.final_styles {
        println!("   {} {}", element, style);
    }
}

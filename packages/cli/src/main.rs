mod commands;
mod scenario;

use clap::{Parser, Subcommand};
use colored::Colorize;
use commands::{breakpoints, init, simulate, BreakpointsArgs, InitArgs, SimulateArgs};

/// fxlayout CLI - responsive visibility simulator
#[derive(Parser, Debug)]
#[command(name = "fxlayout")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write a default fxlayout.config.json
    Init(InitArgs),

    /// List breakpoints and their fxHide / fxShow bindings
    Breakpoints(BreakpointsArgs),

    /// Replay a scenario file and print every style application
    Simulate(SimulateArgs),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(err) => {
            eprintln!("{} Cannot get current directory: {}", "Error:".red().bold(), err);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Command::Init(args) => init(args, &cwd),
        Command::Breakpoints(args) => breakpoints(args),
        Command::Simulate(args) => simulate(args, &cwd),
    };

    if let Err(err) = result {
        eprintln!();
        eprintln!("{} {}", "Error:".red().bold(), err);
        eprintln!();
        std::process::exit(1);
    }
}

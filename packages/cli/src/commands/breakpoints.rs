use anyhow::Result;
use clap::Args;
use colored::Colorize;
use fxlayout_core::BreakpointKey;
use fxlayout_visibility::Polarity;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct BreakpointsArgs {
    /// Output format (text, json)
    #[arg(short, long, default_value = "text")]
    pub format: String,
}

#[derive(Debug, Serialize)]
struct BreakpointRow {
    breakpoint: BreakpointKey,
    priority: usize,
    hide: String,
    show: String,
}

fn rows() -> Vec<BreakpointRow> {
    BreakpointKey::ALL
        .into_iter()
        .map(|key| BreakpointRow {
            breakpoint: key,
            priority: key.priority(),
            hide: key.binding_name(Polarity::Hide.binding_prefix()),
            show: key.binding_name(Polarity::Show.binding_prefix()),
        })
        .collect()
}

pub fn breakpoints(args: BreakpointsArgs) -> Result<()> {
    let rows = rows();

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        "text" => {
            println!(
                "{:<4} {:<8} {:<16} {}",
                "#".bold(),
                "alias".bold(),
                "hide".bold(),
                "show".bold()
            );
            for row in rows {
                println!(
                    "{:<4} {:<8} {:<16} {}",
                    row.priority,
                    row.breakpoint.alias().cyan(),
                    row.hide,
                    row.show
                );
            }
        }
        other => return Err(anyhow::anyhow!("Unknown format: {}. Use: text or json", other)),
    }

    Ok(())
}

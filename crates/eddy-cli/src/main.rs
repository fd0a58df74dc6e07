//! Eddy CLI - Headless driver for the flow-field simulation

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{field, run};

#[derive(Parser)]
#[command(name = "eddy")]
#[command(about = "Flow-field particle simulation, run headless", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation against a scripted pointer and print stats
    Run {
        /// Number of frames to simulate
        #[arg(long, default_value = "600")]
        frames: u64,

        /// Viewport width in world units
        #[arg(long, default_value = "16")]
        width: f64,

        /// Viewport height in world units
        #[arg(long, default_value = "9")]
        height: f64,

        /// Seconds per frame, at most 0.25
        #[arg(long, default_value = "0.016", value_parser = parse_dt)]
        dt: f64,

        /// Noise and spawn seed (overrides the config file)
        #[arg(long)]
        seed: Option<u32>,

        /// Path to a TOML file with simulation overrides
        #[arg(long)]
        config: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },

    /// Build a flow field and print its cells
    Field {
        /// Viewport width in world units
        #[arg(long, default_value = "10")]
        width: f64,

        /// Viewport height in world units
        #[arg(long, default_value = "10")]
        height: f64,

        /// Grid rows
        #[arg(long, default_value = "4")]
        rows: usize,

        /// Grid columns
        #[arg(long, default_value = "4")]
        cols: usize,

        /// Noise seed
        #[arg(long)]
        seed: Option<u32>,

        /// Output format (text or json)
        #[arg(long, default_value = "text", value_parser = parse_format)]
        format: String,
    },
}

fn parse_format(s: &str) -> Result<String, String> {
    match s {
        "text" | "json" => Ok(s.to_string()),
        _ => Err(format!("unknown format '{}'; valid values: text, json", s)),
    }
}

fn parse_dt(s: &str) -> Result<f64, String> {
    let dt: f64 = s
        .parse()
        .map_err(|_| format!("invalid frame delta '{}'", s))?;
    if dt.is_finite() && dt > 0.0 && dt <= eddy_runtime::MAX_DELTA {
        Ok(dt)
    } else {
        Err(format!(
            "frame delta {} is outside (0, {}]",
            s,
            eddy_runtime::MAX_DELTA
        ))
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            frames,
            width,
            height,
            dt,
            seed,
            config,
            format,
        } => run::run(run::RunArgs {
            frames,
            width,
            height,
            dt,
            seed,
            config,
            format,
        }),
        Commands::Field {
            width,
            height,
            rows,
            cols,
            seed,
            format,
        } => field::run(field::FieldArgs {
            width,
            height,
            rows,
            cols,
            seed,
            format,
        }),
    }
}

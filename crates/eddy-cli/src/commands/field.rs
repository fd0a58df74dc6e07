//! Field command — builds a flow field and prints every cell

use anyhow::{Context, Result};
use eddy_core::Viewport;
use eddy_particles::config::{DEFAULT_SEED, STRENGTH};
use eddy_particles::{FlowField, SimplexNoise};
use serde::Serialize;

pub struct FieldArgs {
    pub width: f64,
    pub height: f64,
    pub rows: usize,
    pub cols: usize,
    pub seed: Option<u32>,
    pub format: String,
}

#[derive(Serialize)]
struct CellReport {
    x: usize,
    y: usize,
    angle: f64,
    vector: [f64; 2],
}

pub fn run(args: FieldArgs) -> Result<()> {
    let viewport = Viewport::new(args.width, args.height).context("Invalid viewport")?;
    let noise = SimplexNoise::new(args.seed.unwrap_or(DEFAULT_SEED));
    let field = FlowField::build(&noise, viewport, args.rows, args.cols, STRENGTH)
        .context("Failed to build flow field")?;

    let cells: Vec<CellReport> = field
        .cells()
        .iter()
        .enumerate()
        .map(|(i, v)| CellReport {
            x: i % field.cols(),
            y: i / field.cols(),
            angle: v.y.atan2(v.x),
            vector: v.to_array(),
        })
        .collect();

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&cells)?),
        _ => {
            let (cw, ch) = field.cell_size();
            println!(
                "Flow field: {} rows x {} cols, cell {:.4} x {:.4}, seed {}",
                field.rows(),
                field.cols(),
                cw,
                ch,
                noise.seed()
            );
            for cell in &cells {
                println!(
                    "  ({:>3}, {:>3})  angle {:>8.4}  ({:+.6}, {:+.6})",
                    cell.x, cell.y, cell.angle, cell.vector[0], cell.vector[1]
                );
            }
        }
    }

    Ok(())
}

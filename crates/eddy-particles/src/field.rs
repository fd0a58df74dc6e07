//! Flow field: a fixed grid of steering vectors built from coherent noise

use crate::noise_source::NoiseSource;
use eddy_core::{EddyError, Result, Viewport};
use glam::DVec2;
use std::f64::consts::PI;

/// Row-major grid of `rows * cols` vectors; cell `(x, y)` lives at `x + y * cols`.
///
/// Immutable once built. A viewport change means building a new field.
#[derive(Clone, Debug, PartialEq)]
pub struct FlowField {
    cells: Vec<DVec2>,
    rows: usize,
    cols: usize,
    strength: f64,
    viewport: Viewport,
}

impl FlowField {
    /// Sample `noise` once per cell and turn each sample into a direction
    /// of length `strength`.
    ///
    /// The row of cell `i` is `i / rows`, not `i / cols`. With a non-square
    /// grid this samples noise rows past the viewport; the result is kept
    /// as-is so recorded fields stay reproducible.
    pub fn build(
        noise: &dyn NoiseSource,
        viewport: Viewport,
        rows: usize,
        cols: usize,
        strength: f64,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(EddyError::InvalidGrid { rows, cols });
        }

        let width = viewport.width();
        let height = viewport.height();
        let (cell_width, cell_height) = viewport.cell_size(rows, cols);

        let cells = (0..rows * cols)
            .map(|i| {
                let cx = (i % cols) as f64;
                let cy = (i / rows) as f64;
                let u = cx * cell_width / width;
                let v = cy * cell_height / height;

                let angle = noise.sample(u, v) * PI;
                DVec2::new(angle.cos(), angle.sin()) * strength
            })
            .collect();

        Ok(Self {
            cells,
            rows,
            cols,
            strength,
            viewport,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn strength(&self) -> f64 {
        self.strength
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[DVec2] {
        &self.cells
    }

    /// `(cell_width, cell_height)` in world units
    pub fn cell_size(&self) -> (f64, f64) {
        self.viewport.cell_size(self.rows, self.cols)
    }

    /// Vector stored for grid cell `(x, y)`, if it is inside the grid
    pub fn get(&self, x: usize, y: usize) -> Option<DVec2> {
        if x >= self.cols || y >= self.rows {
            return None;
        }
        self.cells.get(x + y * self.cols).copied()
    }

    /// Vector under a world-space position, or zero when the flat index
    /// `floor(x / cell_width) + floor(y / cell_height) * cols` falls outside
    /// the grid.
    ///
    /// Only the flat index is bounds-checked: a column just left of the grid
    /// wraps onto the previous row, same as a plain slice lookup would.
    pub fn force_at(&self, position: DVec2, cell_width: f64, cell_height: f64) -> DVec2 {
        let x = (position.x / cell_width).floor();
        let y = (position.y / cell_height).floor();
        let index = x + y * self.cols as f64;

        if index.is_finite() && index >= 0.0 && index < self.cells.len() as f64 {
            self.cells[index as usize]
        } else {
            DVec2::ZERO
        }
    }
}

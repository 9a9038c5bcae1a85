use anyhow::{Context, Result, bail, ensure};
use serde::{Deserialize, Serialize};
use std::path::Path;

use super::state::Cell;

/// Largest field extent in pixels, whatever the viewport offers
pub const MAX_FIELD_SIZE: i32 = 400;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Size of one grid cell in pixels
    pub cell_size: i32,
    /// Width and height of the square playing field in pixels
    pub field_size: i32,
    /// Starting tile of the snake, in cells from the left edge
    pub start_column: i32,
    /// Starting tile of the snake, in cells from the top edge
    pub start_row: i32,
    /// Tick period at the start of a game
    pub initial_speed_ms: u64,
    /// How much faster each food makes the game
    pub speed_step_ms: u64,
    /// Tick period never drops below this
    pub min_speed_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cell_size: 20,
            field_size: MAX_FIELD_SIZE,
            start_column: 8,
            start_row: 8,
            initial_speed_ms: 200,
            speed_step_ms: 10,
            min_speed_ms: 50,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with a custom field extent
    pub fn new(field_size: i32) -> Self {
        Self {
            field_size,
            ..Default::default()
        }
    }

    /// A 10x10 field for tests
    pub fn small() -> Self {
        Self::new(200)
    }

    /// Read a JSON config file; absent fields keep their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let config: Self = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell size must be positive");
        ensure!(
            self.field_size >= self.cell_size,
            "field size {} is smaller than one cell ({})",
            self.field_size,
            self.cell_size
        );
        ensure!(
            self.field_size % self.cell_size == 0,
            "field size {} is not a multiple of the cell size {}",
            self.field_size,
            self.cell_size
        );
        let tiles = self.tile_count();
        ensure!(
            (0..tiles).contains(&self.start_column) && (0..tiles).contains(&self.start_row),
            "start tile ({}, {}) lies outside the {}x{} field",
            self.start_column,
            self.start_row,
            tiles,
            tiles
        );
        ensure!(self.min_speed_ms > 0, "minimum speed must be positive");
        ensure!(
            self.min_speed_ms <= self.initial_speed_ms,
            "minimum speed {}ms is above the initial speed {}ms",
            self.min_speed_ms,
            self.initial_speed_ms
        );
        Ok(())
    }

    /// Number of cells along one side of the field
    pub fn tile_count(&self) -> i32 {
        self.field_size / self.cell_size
    }

    pub fn start_cell(&self) -> Cell {
        Cell::from_tile(self.start_column, self.start_row, self.cell_size)
    }

    /// Shrink the field so that at most `max_tiles` cells fit along a side.
    ///
    /// The field is capped at [`MAX_FIELD_SIZE`] and rounded down to whole
    /// cells. A start tile that falls outside the shrunken field moves to the
    /// centre.
    pub fn fit_viewport(&self, max_tiles: i32) -> Result<Self> {
        if max_tiles < 1 {
            bail!("terminal is too small to show a single cell");
        }

        let capped = self.field_size.min(MAX_FIELD_SIZE);
        let tiles = (capped / self.cell_size).min(max_tiles);
        if tiles < 1 {
            bail!("field size {} holds no whole cell", capped);
        }

        let mut fitted = Self {
            field_size: tiles * self.cell_size,
            ..self.clone()
        };
        if fitted.start_column >= tiles || fitted.start_row >= tiles {
            fitted.start_column = tiles / 2;
            fitted.start_row = tiles / 2;
        }
        Ok(fitted)
    }

    /// Tick period after eating one more food
    pub fn sped_up(&self, period_ms: u64) -> u64 {
        if period_ms > self.min_speed_ms {
            period_ms
                .saturating_sub(self.speed_step_ms)
                .max(self.min_speed_ms)
        } else {
            period_ms
        }
    }
}

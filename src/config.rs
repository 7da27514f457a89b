use std::time::Duration;

use anyhow::{ensure, Result};

use crate::geometry::Grid;
use crate::render::Rgb;

pub const SCREEN_WIDTH: u32 = 640;
pub const SCREEN_HEIGHT: u32 = 480;
pub const CELL_SIZE: u32 = 20;
pub const TICKS_PER_SECOND: u32 = 20;

pub const BACKGROUND_COLOR: Rgb = Rgb(0, 0, 0);
pub const BORDER_COLOR: Rgb = Rgb(93, 216, 228);
pub const FOOD_COLOR: Rgb = Rgb(255, 0, 0);
pub const SNAKE_COLOR: Rgb = Rgb(0, 255, 0);

/// Board and speed settings. Defaults give a 32x24 grid at 20 ticks per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    pub screen_width: u32,
    pub screen_height: u32,
    pub cell_size: u32,
    pub ticks_per_second: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cell_size: CELL_SIZE,
            ticks_per_second: TICKS_PER_SECOND,
        }
    }
}

impl GameConfig {
    /// Config whose grid is exactly `width` x `height` cells.
    pub fn with_grid(width: u32, height: u32) -> Self {
        GameConfig {
            screen_width: width * CELL_SIZE,
            screen_height: height * CELL_SIZE,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(self.cell_size > 0, "cell size must be positive");
        ensure!(self.ticks_per_second > 0, "tick rate must be positive");
        let grid = self.grid();
        ensure!(
            grid.width() >= 2 && grid.height() >= 2,
            "grid must be at least 2x2 cells, got {}x{}",
            grid.width(),
            grid.height()
        );
        Ok(())
    }

    pub fn grid(&self) -> Grid {
        Grid::new(self.screen_width / self.cell_size, self.screen_height / self.cell_size)
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_secs(1) / self.ticks_per_second
    }
}

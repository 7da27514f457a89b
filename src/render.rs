use anyhow::Result;

use crate::geometry::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Drawing surface the game paints onto. Cells are addressed in grid units.
pub trait Renderer {
    /// Fill a bordered cell.
    fn draw_cell(&mut self, pos: Position, color: Rgb) -> Result<()>;

    /// Paint a cell with the background, without a border.
    fn erase_cell(&mut self, pos: Position) -> Result<()>;

    fn clear(&mut self) -> Result<()>;

    /// Push everything drawn this tick to the screen.
    fn present(&mut self) -> Result<()>;
}

pub trait Drawable {
    fn draw(&self, renderer: &mut dyn Renderer) -> Result<()>;
}

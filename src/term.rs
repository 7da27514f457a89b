use std::convert::TryFrom;
use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::{ensure, Context, Result};
use crossterm::event::{poll, read, Event};
use crossterm::style::{self, Color};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue};

use crate::config::{BACKGROUND_COLOR, BORDER_COLOR};
use crate::geometry::{Grid, Position};
use crate::input::{map_key_event, InputEvent, InputSource};
use crate::render::{Renderer, Rgb};

// Terminal characters are about twice as tall as they are wide
const COLUMNS_PER_CELL: u16 = 2;
const CELL_GLYPH: &str = "[]";
const EMPTY_GLYPH: &str = "  ";

/// Draws the grid on the terminal through crossterm.
pub struct TermManager {
    width: u16,
    height: u16,
    stdout: Stdout,
}

impl TermManager {
    pub fn new(grid: &Grid) -> Result<Self> {
        let (width, height) = screen_size(grid)?;

        let (cols, rows) = terminal::size().context("Error reading terminal size")?;
        ensure!(
            cols >= width && rows >= height,
            "terminal is {}x{}, the game needs at least {}x{}",
            cols,
            rows,
            width,
            height
        );

        Ok(TermManager { width, height, stdout: stdout() })
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("Error entering alt screen")?;
        terminal::enable_raw_mode().context("Error setting raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)
            .context("Error hiding cursor")?;
        Ok(())
    }

    /// Gives the terminal back to the shell. Safe to call after a failed setup.
    pub fn restore() -> Result<()> {
        let mut out = stdout();
        terminal::disable_raw_mode().context("Error unsetting raw mode")?;
        execute!(out, style::ResetColor, cursor::Show, cursor::EnableBlinking, LeaveAlternateScreen)
            .context("Error leaving alt screen")?;
        Ok(())
    }

    fn paint(&mut self, pos: Position, fg: Rgb, bg: Rgb, glyph: &str) -> Result<()> {
        let x = pos.x as u16 * COLUMNS_PER_CELL;
        queue!(
            self.stdout,
            cursor::MoveTo(x, pos.y as u16),
            style::SetForegroundColor(to_color(fg)),
            style::SetBackgroundColor(to_color(bg)),
            style::Print(glyph),
            style::ResetColor
        )?;
        Ok(())
    }
}

impl Renderer for TermManager {
    fn draw_cell(&mut self, pos: Position, color: Rgb) -> Result<()> {
        self.paint(pos, BORDER_COLOR, color, CELL_GLYPH)
    }

    fn erase_cell(&mut self, pos: Position) -> Result<()> {
        self.paint(pos, BACKGROUND_COLOR, BACKGROUND_COLOR, EMPTY_GLYPH)
    }

    fn clear(&mut self) -> Result<()> {
        queue!(self.stdout, terminal::Clear(ClearType::All))?;

        let row = " ".repeat(self.width as usize);
        for y in 0..self.height {
            queue!(
                self.stdout,
                cursor::MoveTo(0, y),
                style::SetBackgroundColor(to_color(BACKGROUND_COLOR)),
                style::Print(&row),
                style::ResetColor
            )?;
        }

        Ok(())
    }

    fn present(&mut self) -> Result<()> {
        self.stdout.flush().context("Error flushing")
    }
}

/// Non-blocking keyboard reader.
pub struct TermInput;

impl InputSource for TermInput {
    fn poll_events(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = vec![];

        while poll(Duration::from_millis(0))? {
            if let Event::Key(ev) = read()? {
                if let Some(event) = map_key_event(&ev) {
                    events.push(event);
                }
            }
        }

        Ok(events)
    }
}

/// Terminal columns and rows the grid covers.
fn screen_size(grid: &Grid) -> Result<(u16, u16)> {
    let width = u16::try_from(grid.width())
        .ok()
        .and_then(|w| w.checked_mul(COLUMNS_PER_CELL))
        .context("grid is too wide for a terminal")?;
    let height = u16::try_from(grid.height()).context("grid is too tall for a terminal")?;
    Ok((width, height))
}

fn to_color(rgb: Rgb) -> Color {
    let Rgb(r, g, b) = rgb;
    Color::Rgb { r, g, b }
}

//! Rendering layer — all terminal output lives here.
//!
//! Scenes draw through the [`Canvas`] trait using logical field
//! coordinates.  [`TerminalCanvas`] scales those onto the terminal grid with
//! crossterm and owns frame pacing.

use std::io::Write;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::config::Field;
use crate::entities::Vector2;

/// What a filled circle represents.  Each kind gets its own colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    Player,
    Enemy,
    Bullet,
}

/// Drawing surface the scenes render onto.
pub trait Canvas {
    fn begin_frame(&mut self) -> std::io::Result<()>;
    fn end_frame(&mut self) -> std::io::Result<()>;
    fn fill_circle(&mut self, center: Vector2, radius: f32, paint: Paint) -> std::io::Result<()>;
    fn text(&mut self, x: f32, y: f32, text: &str) -> std::io::Result<()>;
}

// ── Colour palette ────────────────────────────────────────────────────────────

const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::Blue;
const C_BULLET: Color = Color::Red;
const C_TEXT: Color = Color::Yellow;

const FILL: &str = "█";

fn colour_of(paint: Paint) -> Color {
    match paint {
        Paint::Player => C_PLAYER,
        Paint::Enemy => C_ENEMY,
        Paint::Bullet => C_BULLET,
    }
}

// ── Terminal canvas ───────────────────────────────────────────────────────────

pub struct TerminalCanvas<W: Write> {
    out: W,
    field: Field,
    /// Fixed grid size; `None` re-reads the terminal size every frame.
    fixed_size: Option<(u16, u16)>,
    cols: u16,
    rows: u16,
    frame_duration: Duration,
    frame_start: Instant,
}

impl<W: Write> TerminalCanvas<W> {
    /// Canvas that follows the live terminal size.
    pub fn new(out: W, field: Field, frame_duration: Duration) -> std::io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self::build(out, field, None, cols, rows, frame_duration))
    }

    /// Canvas with a fixed grid, for writers that are not a terminal.
    pub fn with_size(out: W, field: Field, cols: u16, rows: u16, frame_duration: Duration) -> Self {
        Self::build(out, field, Some((cols, rows)), cols, rows, frame_duration)
    }

    fn build(
        out: W,
        field: Field,
        fixed_size: Option<(u16, u16)>,
        cols: u16,
        rows: u16,
        frame_duration: Duration,
    ) -> Self {
        TerminalCanvas {
            out,
            field,
            fixed_size,
            cols,
            rows,
            frame_duration,
            frame_start: Instant::now(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn scale(&self) -> (f32, f32) {
        (
            self.cols as f32 / self.field.width,
            self.rows as f32 / self.field.height,
        )
    }

    /// Logical point → terminal cell, if it lands on screen.
    fn cell_of(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let (sx, sy) = self.scale();
        let col = (x * sx).floor();
        let row = (y * sy).floor();
        if col < 0.0 || row < 0.0 || col >= self.cols as f32 || row >= self.rows as f32 {
            return None;
        }
        Some((col as u16, row as u16))
    }

    fn put(&mut self, col: u16, row: u16) -> std::io::Result<()> {
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(Print(FILL))?;
        Ok(())
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn begin_frame(&mut self) -> std::io::Result<()> {
        self.frame_start = Instant::now();
        if self.fixed_size.is_none() {
            let (cols, rows) = terminal::size()?;
            self.cols = cols;
            self.rows = rows;
        }
        self.out.queue(terminal::Clear(terminal::ClearType::All))?;
        Ok(())
    }

    fn end_frame(&mut self) -> std::io::Result<()> {
        // Park cursor in a harmless spot and flush
        self.out.queue(style::ResetColor)?;
        self.out.queue(cursor::MoveTo(0, self.rows.saturating_sub(1)))?;
        self.out.flush()?;

        let elapsed = self.frame_start.elapsed();
        if elapsed < self.frame_duration {
            std::thread::sleep(self.frame_duration - elapsed);
        }
        Ok(())
    }

    /// Fill every cell whose centre lies inside the scaled ellipse.  A
    /// circle smaller than one cell still paints the cell under its centre.
    fn fill_circle(&mut self, center: Vector2, radius: f32, paint: Paint) -> std::io::Result<()> {
        let (sx, sy) = self.scale();
        let cx = center.x * sx;
        let cy = center.y * sy;
        let rx = (radius * sx).max(f32::EPSILON);
        let ry = (radius * sy).max(f32::EPSILON);

        self.out.queue(style::SetForegroundColor(colour_of(paint)))?;

        if let Some((col, row)) = self.cell_of(center.x, center.y) {
            self.put(col, row)?;
        }

        let first_col = (cx - rx).floor().max(0.0) as i32;
        let last_col = ((cx + rx).ceil() as i32).min(self.cols as i32 - 1);
        let first_row = (cy - ry).floor().max(0.0) as i32;
        let last_row = ((cy + ry).ceil() as i32).min(self.rows as i32 - 1);

        for row in first_row..=last_row {
            for col in first_col..=last_col {
                let dx = (col as f32 + 0.5 - cx) / rx;
                let dy = (row as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.put(col as u16, row as u16)?;
                }
            }
        }
        Ok(())
    }

    fn text(&mut self, x: f32, y: f32, text: &str) -> std::io::Result<()> {
        let Some((col, row)) = self.cell_of(x, y) else {
            return Ok(());
        };
        let room = (self.cols - col) as usize;
        let clipped: String = text.chars().take(room).collect();
        self.out.queue(cursor::MoveTo(col, row))?;
        self.out.queue(style::SetForegroundColor(C_TEXT))?;
        self.out.queue(Print(clipped))?;
        Ok(())
    }
}

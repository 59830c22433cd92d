//! Terminal host surfaces.
//!
//! The simulation works in logical pixels; the terminal shows a grid of
//! character cells, each standing in for a `CELL_WIDTH` x `CELL_HEIGHT`
//! block of pixels.  Drawing goes into an in-memory cell grid which
//! `present` writes out in one pass.

use std::collections::HashMap;
use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    QueueableCommand,
};

use crate::surface::{Align, Canvas, Rect, Shade, Sound, SoundPlayer, Sprite, TextStyle};

pub const CELL_WIDTH: usize = 8;
pub const CELL_HEIGHT: usize = 16;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_RAVEN: Color = Color::Grey;
const C_BOOM: Color = Color::Yellow;

// ── Glyph sheets ──────────────────────────────────────────────────────────────

const RAVEN_GLYPHS: [[&str; 3]; 6] = [
    [r"\\   //", r" \(o)/ ", r"  \_/  "],
    [r"       ", r"=\(o)/=", r"  \_/  "],
    [r"       ", r"__(o)__", r"/ \_/ \"],
    [r"       ", r"  (o)  ", r"//\_/\\"],
    [r"       ", r"__(o)__", r"/ \_/ \"],
    [r"       ", r"=\(o)/=", r"  \_/  "],
];

const BOOM_GLYPHS: [[&str; 3]; 6] = [
    ["     ", "  *  ", "     "],
    ["  .  ", " *#* ", "  '  "],
    [" *.* ", "*#@#*", " *'* "],
    ["* # *", "#@@@#", "* # *"],
    [". * .", "* # *", ". * ."],
    ["  .  ", ".   .", "  .  "],
];

/// One sprite sheet as text art: a list of frames, each a list of rows.
/// Spaces are transparent.
#[derive(Clone, Debug)]
pub struct GlyphSheet {
    frames: Vec<Vec<Vec<char>>>,
    color: Color,
}

impl GlyphSheet {
    pub fn builtin(sprite: Sprite) -> Self {
        let (frames, color): (&[[&str; 3]], Color) = match sprite {
            Sprite::Raven => (RAVEN_GLYPHS.as_slice(), C_RAVEN),
            Sprite::Boom => (BOOM_GLYPHS.as_slice(), C_BOOM),
        };
        GlyphSheet {
            frames: frames
                .iter()
                .map(|rows| rows.iter().map(|row| row.chars().collect()).collect())
                .collect(),
            color,
        }
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

// ── Canvas ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub color: Color,
}

const BLANK: Cell = Cell { ch: ' ', color: Color::Reset };

pub struct TerminalCanvas {
    cols: u16,
    rows: u16,
    cells: Vec<Cell>,
    sheets: HashMap<Sprite, GlyphSheet>,
}

impl TerminalCanvas {
    pub fn new(cols: u16, rows: u16) -> Self {
        let sheets = [Sprite::Raven, Sprite::Boom]
            .into_iter()
            .map(|sprite| (sprite, GlyphSheet::builtin(sprite)))
            .collect();
        TerminalCanvas {
            cols,
            rows,
            cells: vec![BLANK; cols as usize * rows as usize],
            sheets,
        }
    }

    /// Drop a sprite sheet, as if it had failed to load.
    pub fn without_sprite(mut self, sprite: Sprite) -> Self {
        self.sheets.remove(&sprite);
        self
    }

    /// Viewport size in logical pixels.
    pub fn viewport(&self) -> (usize, usize) {
        (self.cols as usize * CELL_WIDTH, self.rows as usize * CELL_HEIGHT)
    }

    pub fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.cells[row as usize * self.cols as usize + col as usize])
    }

    /// Text of one row with trailing blanks trimmed.
    pub fn row_text(&self, row: u16) -> String {
        let text: String = (0..self.cols)
            .filter_map(|col| self.cell(col, row))
            .map(|c| c.ch)
            .collect();
        text.trim_end().to_string()
    }

    fn put(&mut self, col: i64, row: i64, cell: Cell) {
        if col < 0 || row < 0 || col >= self.cols as i64 || row >= self.rows as i64 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = cell;
    }

    /// Write the whole grid to the terminal, row by row.
    pub fn present<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let mut current = Color::Reset;
        out.queue(style::ResetColor)?;
        for row in 0..self.rows {
            out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if cell.color != current {
                    out.queue(style::SetForegroundColor(cell.color))?;
                    current = cell.color;
                }
                out.queue(Print(cell.ch))?;
            }
        }
        out.queue(style::ResetColor)?;
        out.flush()?;
        Ok(())
    }
}

/// Cell span `[start, end)` covered by pixel range `origin..origin + extent`.
fn cell_span(origin: f32, extent: f32, cell: usize) -> (i64, i64) {
    let start = (origin / cell as f32).floor() as i64;
    let end = ((origin + extent) / cell as f32).ceil() as i64;
    (start, end.max(start + 1))
}

impl Canvas for TerminalCanvas {
    fn clear(&mut self) {
        self.cells.fill(BLANK);
    }

    fn draw_sprite(&mut self, sprite: Sprite, frame: u32, dest: Rect) {
        let Some(sheet) = self.sheets.get(&sprite) else {
            return;
        };
        let Some(glyphs) = sheet.frames.get(frame as usize).cloned() else {
            return;
        };
        let color = sheet.color;
        let (c0, c1) = cell_span(dest.x, dest.w, CELL_WIDTH);
        let (r0, r1) = cell_span(dest.y, dest.h, CELL_HEIGHT);
        let (span_cols, span_rows) = ((c1 - c0) as usize, (r1 - r0) as usize);
        let glyph_rows = glyphs.len();

        for (dr, row) in (r0..r1).enumerate() {
            let src_row = &glyphs[(dr * glyph_rows / span_rows).min(glyph_rows - 1)];
            for (dc, col) in (c0..c1).enumerate() {
                let ch = src_row[(dc * src_row.len() / span_cols).min(src_row.len() - 1)];
                if ch != ' ' {
                    self.put(col, row, Cell { ch, color });
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle) {
        let color = match style.shade {
            Shade::Black => Color::Black,
            Shade::White => Color::White,
        };
        let len = text.chars().count() as i64;
        let mut col = (x / CELL_WIDTH as f32).floor() as i64;
        if style.align == Align::Center {
            col -= len / 2;
        }
        let row = (y / CELL_HEIGHT as f32).floor() as i64;
        for (i, ch) in text.chars().enumerate() {
            self.put(col + i as i64, row, Cell { ch, color });
        }
    }
}

/// Viewport pixel at the center of a terminal cell.
pub fn cell_center(col: u16, row: u16) -> (f32, f32) {
    (
        (col as usize * CELL_WIDTH + CELL_WIDTH / 2) as f32,
        (row as usize * CELL_HEIGHT + CELL_HEIGHT / 2) as f32,
    )
}

// ── Sound ─────────────────────────────────────────────────────────────────────

/// Plays sounds as the terminal bell on the next `ring`.
#[derive(Default)]
pub struct TerminalBell {
    pending: bool,
}

impl TerminalBell {
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub fn ring<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        if !std::mem::take(&mut self.pending) {
            return Ok(());
        }
        out.queue(Print('\u{7}'))?;
        out.flush()
    }
}

impl SoundPlayer for TerminalBell {
    fn play(&mut self, sound: Sound) {
        match sound {
            Sound::Boom => self.pending = true,
        }
    }
}

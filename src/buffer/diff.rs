//! Diffing Engine: Turn buffer changes into the shortest ANSI stream.
//!
//! A frame of the grid is mostly `▀` cells whose two colors change, so
//! the cost that matters is SGR color sequences, then cursor moves. The
//! [`Pen`] remembers the last colors sent and the cursor position, and a
//! changed cell only pays for what differs from it.
//!
//! All output is appended to one `Vec<u8>` for a single write.

use super::{Buffer, Cell, Rgb};
use std::io::Write;

/// Terminal state as last written: cursor position and SGR colors.
///
/// `None` means unknown, and forces the next cell to re-emit it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pen {
    cursor: Option<(u16, u16)>,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

impl Pen {
    /// A pen that knows nothing about the terminal.
    pub const fn new() -> Self {
        Self {
            cursor: None,
            fg: None,
            bg: None,
        }
    }

    /// A pen sitting at the home position with unknown colors.
    const fn at_home() -> Self {
        Self {
            cursor: Some((0, 0)),
            fg: None,
            bg: None,
        }
    }

    /// Forget everything, e.g. after a full repaint or a resize.
    pub const fn reset(&mut self) {
        *self = Self::new();
    }

    /// Put the cursor at `(x, y)`. Returns whether a move was emitted.
    fn move_to(&mut self, output: &mut Vec<u8>, x: u16, y: u16) -> bool {
        if self.cursor == Some((x, y)) {
            return false;
        }
        emit_cursor_move(output, x, y);
        self.cursor = Some((x, y));
        true
    }

    /// Write `cell` at the cursor. Returns the number of color sequences.
    fn paint(&mut self, output: &mut Vec<u8>, cell: &Cell) -> usize {
        let mut colors = 0;
        if self.fg != Some(cell.fg()) {
            emit_sgr_color(output, 38, cell.fg());
            self.fg = Some(cell.fg());
            colors += 1;
        }
        if self.bg != Some(cell.bg()) {
            emit_sgr_color(output, 48, cell.bg());
            self.bg = Some(cell.bg());
            colors += 1;
        }

        let mut utf8 = [0u8; 4];
        output.extend_from_slice(cell.glyph().encode_utf8(&mut utf8).as_bytes());

        let advance = u16::from(cell.display_width().max(1));
        self.cursor = self.cursor.map(|(x, y)| (x.saturating_add(advance), y));
        colors
    }
}

/// What one diff emitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DiffResult {
    /// Cells whose content differed.
    pub cells_changed: usize,
    /// Cursor move sequences emitted.
    pub cursor_moves: usize,
    /// Color sequences emitted.
    pub color_changes: usize,
}

/// Append the sequences that turn `current` into `next` on screen.
///
/// Both buffers must have the same dimensions.
pub fn render_diff(current: &Buffer, next: &Buffer, output: &mut Vec<u8>, pen: &mut Pen) -> DiffResult {
    debug_assert_eq!(current.width(), next.width());
    debug_assert_eq!(current.height(), next.height());

    let mut result = DiffResult::default();
    for (y, (old_row, new_row)) in (0u16..).zip(current.rows().zip(next.rows())) {
        for (x, (old, new)) in (0u16..).zip(old_row.iter().zip(new_row)) {
            // Continuations are drawn by the wide glyph to their left
            if old == new || new.is_wide_continuation() {
                continue;
            }
            result.cells_changed += 1;
            if pen.move_to(output, x, y) {
                result.cursor_moves += 1;
            }
            result.color_changes += pen.paint(output, new);
        }
    }
    result
}

/// Append a repaint of every cell of `buffer`, for the first frame and
/// whenever the screen contents are unknown.
pub fn render_full(buffer: &Buffer, output: &mut Vec<u8>) {
    output.extend_from_slice(b"\x1b[?25l\x1b[H");

    let mut pen = Pen::at_home();
    for (y, row) in (0u16..).zip(buffer.rows()) {
        pen.move_to(output, 0, y);
        for cell in row.iter().filter(|cell| !cell.is_wide_continuation()) {
            pen.paint(output, cell);
        }
    }

    output.extend_from_slice(b"\x1b[0m");
}

/// Cursor move in its shortest form: `ESC[H`, `ESC[{row}H` or `ESC[{row};{col}H`.
#[inline]
fn emit_cursor_move(output: &mut Vec<u8>, x: u16, y: u16) {
    let (row, col) = (u32::from(y) + 1, u32::from(x) + 1);
    let _ = match (row, col) {
        (1, 1) => output.write_all(b"\x1b[H"),
        (row, 1) => write!(output, "\x1b[{row}H"),
        (row, col) => write!(output, "\x1b[{row};{col}H"),
    };
}

/// True-color SGR; `layer` is 38 for foreground and 48 for background.
#[inline]
fn emit_sgr_color(output: &mut Vec<u8>, layer: u8, color: Rgb) {
    let _ = write!(output, "\x1b[{layer};2;{};{};{}m", color.r, color.g, color.b);
}

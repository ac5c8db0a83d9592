//! Presenter: Double-buffered terminal output.
//!
//! The canvas is blitted into the `next` buffer as half blocks, one
//! terminal cell per two pixel rows. [`Presenter::present`] diffs `next`
//! against `current` and flushes the result in a single write.

use super::canvas::Canvas;
use crate::buffer::diff::{render_diff, render_full, Pen};
use crate::buffer::{Buffer, Cell, Rgb};
use crate::layout::Rect;
use std::io::{self, Write};
use std::time::Instant;

/// Copy `canvas` into `buffer` at `area`, two pixel rows per terminal row.
///
/// The top pixel becomes the foreground of a `▀`, the bottom pixel the
/// background. An odd last pixel row is paired with `pad`. Anything outside
/// `area` or the buffer is clipped.
pub fn blit(canvas: &Canvas, buffer: &mut Buffer, area: Rect, pad: Rgb) {
    let cols = u32::from(area.width).min(canvas.width());
    let rows = u32::from(area.height).min(canvas.height().div_ceil(2));

    for row in 0..rows {
        let Ok(y) = u16::try_from(u32::from(area.y) + row) else {
            break;
        };
        for col in 0..cols {
            let Ok(x) = u16::try_from(u32::from(area.x) + col) else {
                break;
            };
            let top = canvas.pixel(col, row * 2).unwrap_or(pad);
            let bottom = canvas.pixel(col, row * 2 + 1).unwrap_or(pad);
            if !buffer.set(x, y, Cell::half_block(top, bottom)) {
                break;
            }
        }
    }
}

/// Output statistics.
#[derive(Debug, Clone, Default)]
pub struct PresentStats {
    /// Total frames presented.
    pub frames: u64,
    /// Total cells changed across all frames.
    pub cells_changed: u64,
    /// Total bytes written to the terminal.
    pub bytes_written: u64,
    /// Smoothed present time in microseconds.
    pub avg_present_us: u64,
    /// Last present time in microseconds.
    pub last_present_us: u64,
}

/// Owns the writer and both frame buffers.
pub struct Presenter<W: Write> {
    /// What is on screen.
    current: Buffer,
    /// What the next present will show.
    next: Buffer,
    pen: Pen,
    /// Pre-allocated output buffer.
    output: Vec<u8>,
    writer: W,
    stats: PresentStats,
    needs_full_redraw: bool,
}

impl<W: Write> Presenter<W> {
    /// Create a presenter for a `width`×`height` terminal. Zero sizes are
    /// raised to one cell.
    pub fn new(writer: W, width: u16, height: u16) -> Self {
        let (width, height) = (width.max(1), height.max(1));
        Self {
            current: Buffer::new(width, height),
            next: Buffer::new(width, height),
            pen: Pen::new(),
            output: Vec::with_capacity(65536),
            writer,
            stats: PresentStats::default(),
            needs_full_redraw: true,
        }
    }

    /// The buffer being composed for the next present.
    #[inline]
    pub const fn buffer_mut(&mut self) -> &mut Buffer {
        &mut self.next
    }

    /// Terminal size the buffers are sized for.
    #[inline]
    pub const fn size(&self) -> (u16, u16) {
        (self.next.width(), self.next.height())
    }

    /// Force the next present to repaint every cell.
    pub const fn invalidate(&mut self) {
        self.needs_full_redraw = true;
    }

    /// Resize both buffers. Contents are discarded and the next present
    /// is a full redraw.
    pub fn resize(&mut self, width: u16, height: u16) {
        let (width, height) = (width.max(1), height.max(1));
        self.current.resize(width, height);
        self.next.resize(width, height);
        self.invalidate();
    }

    /// Write the difference between the screen and the next buffer.
    ///
    /// # Errors
    ///
    /// Returns any error from writing or flushing the writer.
    pub fn present(&mut self) -> io::Result<()> {
        let start = Instant::now();
        self.output.clear();

        if self.needs_full_redraw {
            render_full(&self.next, &mut self.output);
            self.needs_full_redraw = false;
            self.pen.reset();
            self.stats.cells_changed += self.next.len() as u64;
        } else {
            let result = render_diff(
                &self.current,
                &self.next,
                &mut self.output,
                &mut self.pen,
            );
            self.stats.cells_changed += result.cells_changed as u64;
        }

        if !self.output.is_empty() {
            self.writer.write_all(&self.output)?;
            self.writer.flush()?;
        }

        self.current.copy_from(&self.next);

        let elapsed = start.elapsed();
        self.stats.frames += 1;
        self.stats.bytes_written += self.output.len() as u64;
        self.stats.last_present_us = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        if self.stats.avg_present_us == 0 {
            self.stats.avg_present_us = self.stats.last_present_us;
        } else {
            self.stats.avg_present_us =
                (self.stats.avg_present_us * 15 + self.stats.last_present_us) / 16;
        }
        log::trace!(
            "present: {} bytes in {}us",
            self.output.len(),
            self.stats.last_present_us
        );

        Ok(())
    }

    /// Output statistics so far.
    #[inline]
    pub const fn stats(&self) -> &PresentStats {
        &self.stats
    }

    /// The underlying writer.
    #[inline]
    pub const fn writer_mut(&mut self) -> &mut W {
        &mut self.writer
    }
}

impl<W: Write> std::fmt::Debug for Presenter<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Presenter")
            .field("size", &self.size())
            .field("needs_full_redraw", &self.needs_full_redraw)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

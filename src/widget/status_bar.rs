//! Status Bar Widget: One-line, three-section status bar.
//!
//! Left and right sections are anchored to the edges and win over the
//! centre when the line is too narrow for all three. Widths are measured
//! in terminal columns, not chars.

use super::traits::Widget;
use crate::buffer::{Buffer, Cell, Rgb};
use crate::layout::Rect;
use unicode_width::UnicodeWidthChar;

/// Colors for the status bar.
#[derive(Debug, Clone)]
pub struct StatusBarConfig {
    /// Background color.
    pub bg: Rgb,
    /// Left section text color.
    pub left_fg: Rgb,
    /// Center section text color.
    pub center_fg: Rgb,
    /// Right section text color.
    pub right_fg: Rgb,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self {
            bg: Rgb::new(40, 40, 40),
            left_fg: Rgb::WHITE,
            center_fg: Rgb::new(150, 150, 150),
            right_fg: Rgb::new(100, 200, 100),
        }
    }
}

/// A three-section status bar (left, center, right).
#[derive(Debug)]
pub struct StatusBar {
    left: String,
    center: String,
    right: String,
    bounds: Rect,
    config: StatusBarConfig,
    dirty: bool,
}

impl StatusBar {
    /// Create an empty status bar.
    pub fn new(bounds: Rect) -> Self {
        Self::with_config(bounds, StatusBarConfig::default())
    }

    /// Create an empty status bar with custom colors.
    pub const fn with_config(bounds: Rect, config: StatusBarConfig) -> Self {
        Self {
            left: String::new(),
            center: String::new(),
            right: String::new(),
            bounds,
            config,
            dirty: true,
        }
    }

    /// Set the left section.
    pub fn set_left(&mut self, text: impl Into<String>) {
        Self::replace(&mut self.left, text.into(), &mut self.dirty);
    }

    /// Set the center section.
    pub fn set_center(&mut self, text: impl Into<String>) {
        Self::replace(&mut self.center, text.into(), &mut self.dirty);
    }

    /// Set the right section.
    pub fn set_right(&mut self, text: impl Into<String>) {
        Self::replace(&mut self.right, text.into(), &mut self.dirty);
    }

    fn replace(slot: &mut String, text: String, dirty: &mut bool) {
        if *slot != text {
            *slot = text;
            *dirty = true;
        }
    }
}

/// Longest prefix of `text` at most `max` columns wide, and its width.
fn clip(text: &str, max: u16) -> (&str, u16) {
    let mut width = 0u16;
    for (idx, c) in text.char_indices() {
        let w = u16::try_from(c.width().unwrap_or(0)).unwrap_or(1);
        if width.saturating_add(w) > max {
            return (&text[..idx], width);
        }
        width += w;
    }
    (text, width)
}

impl Widget for StatusBar {
    fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
        self.dirty = true;
    }

    fn render(&self, buffer: &mut Buffer) {
        let Rect { x, y, width, .. } = self.bounds;
        if width == 0 {
            return;
        }
        buffer.fill_rect(x, y, width, 1, Cell::new(' ').with_bg(self.config.bg));

        let (left, left_width) = clip(&self.left, width);
        buffer.draw_text(x, y, left, self.config.left_fg, self.config.bg);

        // One column gap between sections
        let remaining = width.saturating_sub(left_width.saturating_add(1));
        let (right, right_width) = clip(&self.right, remaining);
        let right_x = x + width - right_width;
        buffer.draw_text(right_x, y, right, self.config.right_fg, self.config.bg);

        // The centre is shown whole or not at all
        let gap_start = x.saturating_add(left_width).saturating_add(1);
        let gap_end = right_x.saturating_sub(1);
        let (center, center_width) = clip(&self.center, u16::MAX);
        if center_width > 0 && center_width <= gap_end.saturating_sub(gap_start) {
            let ideal = x + (width - center_width) / 2;
            let center_x = ideal.clamp(gap_start, gap_end - center_width);
            buffer.draw_text(center_x, y, center, self.config.center_fg, self.config.bg);
        }
    }

    fn needs_redraw(&self) -> bool {
        self.dirty
    }

    fn clear_redraw(&mut self) {
        self.dirty = false;
    }
}

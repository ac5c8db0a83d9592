//! Pointer input: where a click lands and what it does.

mod mapper;

pub use mapper::CoordinateMapper;

use crate::actor::KeyModifiers;
use crate::pattern::{PatternSpec, GLIDER, PULSAR};

/// What a left click does to the cell under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickAction {
    /// Flip the cell.
    Toggle,
    /// Stamp a glider centered on the cell.
    SpawnGlider,
    /// Stamp a pulsar centered on the cell.
    SpawnPulsar,
}

impl ClickAction {
    /// Route a click by its modifier keys.
    ///
    /// Shift selects the pulsar. Control, alt or super select the glider.
    /// With both groups held the pulsar wins.
    pub const fn from_modifiers(modifiers: KeyModifiers) -> Self {
        if modifiers.shift {
            Self::SpawnPulsar
        } else if modifiers.control || modifiers.alt || modifiers.super_key {
            Self::SpawnGlider
        } else {
            Self::Toggle
        }
    }

    /// The stamp this action places, if any.
    pub const fn pattern(self) -> Option<PatternSpec> {
        match self {
            Self::Toggle => None,
            Self::SpawnGlider => Some(GLIDER),
            Self::SpawnPulsar => Some(PULSAR),
        }
    }
}

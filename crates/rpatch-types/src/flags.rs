//! Repeat flags controlling how edges and the middle region are filled.
//!
//! The mask is seven bits wide and bit-exact with the wire layout hosts
//! store in their own settings:
//!
//! | bit | flag           |
//! |-----|----------------|
//! | 0   | `INNER_X`      |
//! | 1   | `INNER_Y`      |
//! | 2   | `OUTER_TOP`    |
//! | 3   | `OUTER_BOTTOM` |
//! | 4   | `OUTER_LEFT`   |
//! | 5   | `OUTER_RIGHT`  |
//! | 6   | `MODE_CUTOFF`  |
//!
//! An all-zero mask means Discrete sizing, no inner tiling, no outer tiling.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Tiling and sizing switches for a nine-region draw.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct RepeatFlags: u8 {
        const INNER_X = 1;
        const INNER_Y = 1 << 1;
        const INNER_BOTH = Self::INNER_X.bits() | Self::INNER_Y.bits();
        const OUTER_TOP = 1 << 2;
        const OUTER_BOTTOM = 1 << 3;
        const OUTER_LEFT = 1 << 4;
        const OUTER_RIGHT = 1 << 5;
        const OUTER_ALL = Self::OUTER_TOP.bits()
            | Self::OUTER_BOTTOM.bits()
            | Self::OUTER_LEFT.bits()
            | Self::OUTER_RIGHT.bits();
        const MODE_CUTOFF = 1 << 6;
    }
}

/// Which middle-region axes repeat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InnerMode {
    Both,
    None,
    X,
    Y,
}

/// How the target rectangle is fitted to whole middle tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizingMode {
    /// Round the target down to whole middle-tile repetitions.
    #[default]
    Discrete,
    /// Use the target exactly; the trailing tile may be partial.
    Cutoff,
}

/// One of the four border edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];

    /// The outer flag that turns on tiling for this edge.
    pub const fn flag(self) -> RepeatFlags {
        match self {
            Edge::Top => RepeatFlags::OUTER_TOP,
            Edge::Bottom => RepeatFlags::OUTER_BOTTOM,
            Edge::Left => RepeatFlags::OUTER_LEFT,
            Edge::Right => RepeatFlags::OUTER_RIGHT,
        }
    }
}

impl RepeatFlags {
    /// Number of meaningful bits in the mask.
    pub const WIDTH: u32 = 7;

    /// Build from a raw mask, dropping bits above bit 6.
    pub const fn from_mask(mask: u8) -> Self {
        Self::from_bits_truncate(mask)
    }

    pub const fn mask(self) -> u8 {
        self.bits()
    }

    pub fn inner_mode(self) -> InnerMode {
        match (self.contains(Self::INNER_X), self.contains(Self::INNER_Y)) {
            (true, true) => InnerMode::Both,
            (false, false) => InnerMode::None,
            (true, false) => InnerMode::X,
            (false, true) => InnerMode::Y,
        }
    }

    pub fn sizing_mode(self) -> SizingMode {
        if self.contains(Self::MODE_CUTOFF) {
            SizingMode::Cutoff
        } else {
            SizingMode::Discrete
        }
    }

    /// Whether the given edge tiles (otherwise it stretches).
    pub fn tiles_edge(self, edge: Edge) -> bool {
        self.contains(edge.flag())
    }

    /// Replace the inner bits, leaving outer and sizing untouched.
    pub fn with_inner(self, mode: InnerMode) -> Self {
        let inner = match mode {
            InnerMode::Both => Self::INNER_BOTH,
            InnerMode::None => Self::empty(),
            InnerMode::X => Self::INNER_X,
            InnerMode::Y => Self::INNER_Y,
        };
        self.difference(Self::INNER_BOTH) | inner
    }

    /// Replace the sizing bit, leaving inner and outer untouched.
    pub fn with_sizing(self, mode: SizingMode) -> Self {
        let mut out = self;
        out.set(Self::MODE_CUTOFF, mode == SizingMode::Cutoff);
        out
    }

    /// Replace the outer bits with exactly the given edges.
    pub fn with_outer(self, edges: &[Edge]) -> Self {
        edges
            .iter()
            .fold(self.difference(Self::OUTER_ALL), |acc, e| acc | e.flag())
    }
}

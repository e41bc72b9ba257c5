//! rpatch core: nine-region image slicing, layout, and compositing.
//!
//! A [`PatchRenderer`] is built once from a marked-up source bitmap. Row 0
//! and column 0 of the source carry opaque marker pixels that delimit the
//! repeatable middle band on each axis; the last row and column are
//! reserved. Everything between the markers is sliced into nine patches,
//! which the renderer lays out and paints into any target rectangle.

// Re-exports from rpatch-types (foundation types and traits).
pub use rpatch_types::bitmap;
pub use rpatch_types::color;
pub use rpatch_types::config;
pub use rpatch_types::error;
pub use rpatch_types::flags;
pub use rpatch_types::geometry;
pub use rpatch_types::surface;

pub mod border;
pub mod compositor;
pub mod codec;
pub mod layout;
pub mod patch;
pub mod renderer;

#[cfg(test)]
pub(crate) mod test_utils;

pub use patch::{Patch, PatchDimensions, PatchSet};
pub use renderer::PatchRenderer;

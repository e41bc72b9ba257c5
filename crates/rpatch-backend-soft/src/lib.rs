//! Software output surface for rpatch.
//!
//! [`SoftwareSurface`] paints into an in-memory RGBA buffer. It is the
//! surface the command-line tools render into and the reference for what
//! the compositor's shader fills should look like on any backend.

pub mod surface;

pub use surface::SoftwareSurface;

//! Foundation types and traits for rpatch.
//!
//! This crate contains the platform-agnostic types shared by all rpatch
//! crates: RGBA bitmaps, integer geometry, repeat flags, the output surface
//! trait, render configuration, and error types.

pub mod bitmap;
pub mod color;
pub mod config;
pub mod error;
pub mod flags;
pub mod geometry;
pub mod surface;

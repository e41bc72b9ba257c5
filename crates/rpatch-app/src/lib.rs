//! Host-side pieces of the rpatch command-line tools.
//!
//! The renderer itself lives in `rpatch-core`. This crate holds what a host
//! application owns: argument parsing, the option controls that compose a
//! repeat mask, and helpers that render into a software surface.

pub mod cli;
pub mod controls;
pub mod render;

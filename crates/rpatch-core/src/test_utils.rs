//! Shared test utilities for rpatch-core tests.
//!
//! Provides source-image builders and a [`RecordingSurface`] that records
//! all paint calls for assertion.

use std::ops::Range;

use rpatch_types::bitmap::Bitmap;
use rpatch_types::color::Color;
use rpatch_types::error::Result;
use rpatch_types::geometry::Rect;
use rpatch_types::surface::{Shader, Surface, TileMode, Transform};

/// Unique, fully opaque color for interior pixel `(x, y)`.
pub fn interior_color(x: u32, y: u32) -> Color {
    Color::rgba(x as u8, y as u8, 128, 255)
}

/// Build a `w x h` source whose row 0 is opaque over `h_markers`, whose
/// column 0 is opaque over `v_markers`, and whose interior pixels carry
/// [`interior_color`]. The last row and column are transparent.
pub fn marked_source(w: u32, h: u32, h_markers: Range<u32>, v_markers: Range<u32>) -> Bitmap {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let c = if y == 0 {
                if h_markers.contains(&x) || (x == 0 && v_markers.contains(&0)) {
                    Color::BLACK
                } else {
                    Color::TRANSPARENT
                }
            } else if x == 0 {
                if v_markers.contains(&y) {
                    Color::BLACK
                } else {
                    Color::TRANSPARENT
                }
            } else if x == w - 1 || y == h - 1 {
                Color::TRANSPARENT
            } else {
                interior_color(x, y)
            };
            data.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }
    Bitmap::from_rgba(w, h, data).unwrap()
}

/// Copy of `src` with pixel `(x, y)` set to black at the given alpha.
pub fn with_pixel(src: &Bitmap, x: u32, y: u32, alpha: u8) -> Bitmap {
    let mut data = src.as_rgba().to_vec();
    let off = ((y * src.width() + x) * 4) as usize;
    data[off..off + 4].copy_from_slice(&[0, 0, 0, alpha]);
    Bitmap::from_rgba(src.width(), src.height(), data).unwrap()
}

/// A recorded paint call.
#[derive(Debug, Clone, PartialEq)]
pub enum PaintCall {
    Blit {
        size: (u32, u32),
        x: i32,
        y: i32,
    },
    Fill {
        rect: Rect,
        size: (u32, u32),
        tile_x: TileMode,
        tile_y: TileMode,
        transform: Transform,
    },
}

/// A surface that records paint calls instead of touching pixels.
#[derive(Default)]
pub struct RecordingSurface {
    pub calls: Vec<PaintCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn blits(&self) -> Vec<&PaintCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, PaintCall::Blit { .. }))
            .collect()
    }

    pub fn fills(&self) -> Vec<&PaintCall> {
        self.calls
            .iter()
            .filter(|c| matches!(c, PaintCall::Fill { .. }))
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn blit(&mut self, image: &Bitmap, x: i32, y: i32) -> Result<()> {
        self.calls.push(PaintCall::Blit {
            size: image.dimensions(),
            x,
            y,
        });
        Ok(())
    }

    fn fill_rect_shader(&mut self, rect: Rect, shader: &Shader<'_>) -> Result<()> {
        self.calls.push(PaintCall::Fill {
            rect,
            size: shader.image.dimensions(),
            tile_x: shader.tile_x,
            tile_y: shader.tile_y,
            transform: shader.transform,
        });
        Ok(())
    }
}

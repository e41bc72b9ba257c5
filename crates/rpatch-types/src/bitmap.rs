//! Immutable RGBA8 pixel buffers.

use crate::color::Color;
use crate::error::{RPatchError, Result};

/// An RGBA bitmap, 4 bytes per pixel, rows packed top to bottom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Bitmap {
    /// Wrap an RGBA buffer. The buffer length must be `width * height * 4`.
    pub fn from_rgba(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| RPatchError::Decode(format!("bitmap too large: {width}x{height}")))?;
        if pixels.len() != expected {
            return Err(RPatchError::Decode(format!(
                "bitmap data size mismatch: expected {expected}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A bitmap filled with a single color.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let count = width as usize * height as usize;
        let mut pixels = Vec::with_capacity(count * 4);
        for _ in 0..count {
            pixels.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True when the bitmap has no pixels (zero width or height).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw RGBA bytes.
    pub fn as_rgba(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_rgba(self) -> Vec<u8> {
        self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * 4;
        Some(Color::rgba(
            self.pixels[off],
            self.pixels[off + 1],
            self.pixels[off + 2],
            self.pixels[off + 3],
        ))
    }

    /// Alpha channel at `(x, y)`; 0 outside the bitmap.
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        self.pixel(x, y).map_or(0, |c| c.a)
    }

    /// Copy out a sub-rectangle. Zero-sized regions are allowed as long as
    /// their origin lies inside (or on the edge of) the bitmap.
    pub fn sub_image(&self, x: u32, y: u32, w: u32, h: u32) -> Result<Bitmap> {
        let fits_x = x.checked_add(w).is_some_and(|r| r <= self.width);
        let fits_y = y.checked_add(h).is_some_and(|b| b <= self.height);
        if !fits_x || !fits_y {
            return Err(RPatchError::MalformedSourceImage(format!(
                "region {w}x{h}+{x}+{y} outside {}x{} bitmap",
                self.width, self.height
            )));
        }
        let row_bytes = w as usize * 4;
        let mut pixels = Vec::with_capacity(row_bytes * h as usize);
        for row in y..y + h {
            let start = (row as usize * self.width as usize + x as usize) * 4;
            pixels.extend_from_slice(&self.pixels[start..start + row_bytes]);
        }
        Ok(Bitmap {
            width: w,
            height: h,
            pixels,
        })
    }
}

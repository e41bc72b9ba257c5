//! Output surface trait definitions.
//!
//! The renderer never touches pixels directly. Every write goes through the
//! [`Surface`] trait, which hosts implement on top of whatever canvas they
//! paint into. The software framebuffer in `rpatch-backend-soft` is the
//! reference implementation.

use crate::bitmap::Bitmap;
use crate::error::Result;
use crate::geometry::Rect;

/// How a shader addresses texels outside the source image along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileMode {
    /// Wrap around, repeating the image at native size.
    Repeat,
    /// Reuse the nearest edge texel.
    Clamp,
}

/// Scale-then-translate affine transform from image space to surface space:
/// `surface = image * scale + translate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale_x: f32,
    pub scale_y: f32,
    pub translate_x: f32,
    pub translate_y: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            scale_x: 1.0,
            scale_y: 1.0,
            translate_x: x,
            translate_y: y,
        }
    }

    /// Scale in image space before the existing translation.
    pub const fn pre_scale(self, sx: f32, sy: f32) -> Self {
        Self {
            scale_x: self.scale_x * sx,
            scale_y: self.scale_y * sy,
            translate_x: self.translate_x,
            translate_y: self.translate_y,
        }
    }

    /// Map a surface-space point back into image space. Returns `None` if
    /// either scale is zero.
    pub fn invert_point(&self, x: f32, y: f32) -> Option<(f32, f32)> {
        if self.scale_x == 0.0 || self.scale_y == 0.0 {
            return None;
        }
        Some((
            (x - self.translate_x) / self.scale_x,
            (y - self.translate_y) / self.scale_y,
        ))
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A bitmap shader: source image, per-axis addressing, and local transform.
#[derive(Debug, Clone, Copy)]
pub struct Shader<'a> {
    pub image: &'a Bitmap,
    pub tile_x: TileMode,
    pub tile_y: TileMode,
    pub transform: Transform,
}

/// Output surface the compositor paints into.
///
/// Both methods may be called with regions that fall partly or wholly
/// outside the surface; implementations clip.
pub trait Surface {
    /// Copy `image` 1:1 with its top-left corner at `(x, y)`.
    fn blit(&mut self, image: &Bitmap, x: i32, y: i32) -> Result<()>;

    /// Fill `rect` by sampling `shader` at every covered pixel.
    fn fill_rect_shader(&mut self, rect: Rect, shader: &Shader<'_>) -> Result<()>;
}

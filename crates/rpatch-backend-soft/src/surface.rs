//! Software RGBA framebuffer surface.
//!
//! Implements `Surface` by drawing into a `Vec<u8>` RGBA buffer. Shader
//! fills sample the source with nearest-neighbour lookup at pixel centres,
//! mapped back through the shader's inverse transform.

use rpatch_types::bitmap::Bitmap;
use rpatch_types::color::Color;
use rpatch_types::error::Result;
use rpatch_types::geometry::Rect;
use rpatch_types::surface::{Shader, Surface, TileMode};

/// Software RGBA framebuffer.
pub struct SoftwareSurface {
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    clip: Option<Rect>,
}

impl SoftwareSurface {
    /// Create a surface with the given resolution, cleared to transparent.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize * 4;
        Self {
            width,
            height,
            buffer: vec![0; size],
            clip: None,
        }
    }

    /// Get a read-only reference to the RGBA pixel buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Buffer dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Overwrite every pixel, alpha included.
    pub fn clear(&mut self, color: Color) {
        for pixel in self.buffer.chunks_exact_mut(4) {
            pixel[0] = color.r;
            pixel[1] = color.g;
            pixel[2] = color.b;
            pixel[3] = color.a;
        }
    }

    /// Restrict subsequent drawing to `rect`.
    pub fn set_clip_rect(&mut self, rect: Rect) {
        self.clip = Some(rect);
    }

    pub fn reset_clip_rect(&mut self) {
        self.clip = None;
    }

    /// Color at `(x, y)`, or `None` outside the buffer.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let off = (y as usize * self.width as usize + x as usize) * 4;
        Some(Color::rgba(
            self.buffer[off],
            self.buffer[off + 1],
            self.buffer[off + 2],
            self.buffer[off + 3],
        ))
    }

    /// Consume the surface into a bitmap.
    pub fn into_bitmap(self) -> Result<Bitmap> {
        Bitmap::from_rgba(self.width, self.height, self.buffer)
    }

    /// Drawable area: the buffer, narrowed by the clip rect if any.
    fn drawable(&self) -> Option<Rect> {
        let full = Rect::sized(self.width as i32, self.height as i32);
        match &self.clip {
            Some(clip) => full.intersect(clip),
            None if full.is_empty() => None,
            None => Some(full),
        }
    }

    /// Write one pixel with straight-alpha source-over blending. The caller
    /// has already clipped `(x, y)` to the drawable area.
    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        let offset = (y as usize * self.width as usize + x as usize) * 4;
        if color.a == 255 {
            self.buffer[offset] = color.r;
            self.buffer[offset + 1] = color.g;
            self.buffer[offset + 2] = color.b;
            self.buffer[offset + 3] = 255;
        } else if color.a > 0 {
            // Weights are scaled by 255 * 255.
            let src_w = u32::from(color.a) * 255;
            let dst_w = u32::from(self.buffer[offset + 3]) * (255 - u32::from(color.a));
            let out_w = src_w + dst_w;
            let mix = |s: u8, d: u8| {
                ((u32::from(s) * src_w + u32::from(d) * dst_w + out_w / 2) / out_w) as u8
            };
            self.buffer[offset] = mix(color.r, self.buffer[offset]);
            self.buffer[offset + 1] = mix(color.g, self.buffer[offset + 1]);
            self.buffer[offset + 2] = mix(color.b, self.buffer[offset + 2]);
            self.buffer[offset + 3] = ((out_w + 127) / 255) as u8;
        }
    }
}

/// Map an image-space coordinate onto a texel index along one axis.
fn address(coord: f32, len: u32, mode: TileMode) -> u32 {
    let i = coord.floor() as i64;
    let n = i64::from(len);
    match mode {
        TileMode::Repeat => i.rem_euclid(n) as u32,
        TileMode::Clamp => i.clamp(0, n - 1) as u32,
    }
}

impl Surface for SoftwareSurface {
    fn blit(&mut self, image: &Bitmap, x: i32, y: i32) -> Result<()> {
        let dest = Rect::from_xywh(x, y, image.width() as i32, image.height() as i32);
        let Some(area) = self.drawable().and_then(|d| d.intersect(&dest)) else {
            return Ok(());
        };
        for py in area.top..area.bottom {
            for px in area.left..area.right {
                if let Some(color) = image.pixel((px - x) as u32, (py - y) as u32) {
                    self.put_pixel(px, py, color);
                }
            }
        }
        Ok(())
    }

    fn fill_rect_shader(&mut self, rect: Rect, shader: &Shader<'_>) -> Result<()> {
        let image = shader.image;
        if image.is_empty() {
            return Ok(());
        }
        let Some(area) = self.drawable().and_then(|d| d.intersect(&rect)) else {
            return Ok(());
        };
        for py in area.top..area.bottom {
            for px in area.left..area.right {
                let Some((u, v)) = shader
                    .transform
                    .invert_point(px as f32 + 0.5, py as f32 + 0.5)
                else {
                    log::debug!("shader transform not invertible, skipping fill");
                    return Ok(());
                };
                let sx = address(u, image.width(), shader.tile_x);
                let sy = address(v, image.height(), shader.tile_y);
                if let Some(color) = image.pixel(sx, sy) {
                    self.put_pixel(px, py, color);
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rpatch_types::surface::Transform;

    /// 1-pixel-high strip whose red channel is the column index + 1.
    fn strip(w: u32) -> Bitmap {
        let mut data = Vec::new();
        for x in 0..w {
            data.extend_from_slice(&[x as u8 + 1, 0, 0, 255]);
        }
        Bitmap::from_rgba(w, 1, data).unwrap()
    }

    fn red_row(s: &SoftwareSurface, y: u32) -> Vec<u8> {
        (0..s.dimensions().0).map(|x| s.pixel(x, y).unwrap().r).collect()
    }

    #[test]
    fn new_creates_buffer() {
        let s = SoftwareSurface::new(48, 27);
        assert_eq!(s.buffer().len(), 48 * 27 * 4);
        assert_eq!(s.dimensions(), (48, 27));
    }

    #[test]
    fn clear_fills_buffer() {
        let mut s = SoftwareSurface::new(4, 4);
        s.clear(Color::rgb(255, 0, 0));
        assert_eq!(s.pixel(0, 0), Some(Color::rgb(255, 0, 0)));
        assert_eq!(s.pixel(3, 3), Some(Color::rgb(255, 0, 0)));
    }

    #[test]
    fn blit_copies_one_to_one() {
        let mut s = SoftwareSurface::new(6, 3);
        s.blit(&strip(3), 2, 1).unwrap();
        assert_eq!(red_row(&s, 1), vec![0, 0, 1, 2, 3, 0]);
        assert_eq!(red_row(&s, 0), vec![0; 6]);
    }

    #[test]
    fn blit_clips_negative_and_overflow() {
        let mut s = SoftwareSurface::new(4, 1);
        s.blit(&strip(3), -1, 0).unwrap();
        assert_eq!(red_row(&s, 0), vec![2, 3, 0, 0]);
        s.blit(&strip(3), 3, 0).unwrap();
        assert_eq!(red_row(&s, 0), vec![2, 3, 0, 1]);
        s.blit(&strip(3), 10, 10).unwrap();
    }

    #[test]
    fn repeat_wraps_partial_tile() {
        let mut s = SoftwareSurface::new(8, 1);
        let shader = Shader {
            image: &strip(3),
            tile_x: TileMode::Repeat,
            tile_y: TileMode::Clamp,
            transform: Transform::translate(0.0, 0.0),
        };
        s.fill_rect_shader(Rect::sized(8, 1), &shader).unwrap();
        // Trailing partial tile shows the tile's leading pixels.
        assert_eq!(red_row(&s, 0), vec![1, 2, 3, 1, 2, 3, 1, 2]);
    }

    #[test]
    fn repeat_is_anchored_at_translation() {
        let mut s = SoftwareSurface::new(6, 1);
        let shader = Shader {
            image: &strip(3),
            tile_x: TileMode::Repeat,
            tile_y: TileMode::Clamp,
            transform: Transform::translate(2.0, 0.0),
        };
        s.fill_rect_shader(Rect::new(2, 0, 6, 1), &shader).unwrap();
        assert_eq!(red_row(&s, 0), vec![0, 0, 1, 2, 3, 1]);
    }

    #[test]
    fn clamp_with_scale_stretches() {
        let mut s = SoftwareSurface::new(6, 1);
        let shader = Shader {
            image: &strip(3),
            tile_x: TileMode::Clamp,
            tile_y: TileMode::Clamp,
            transform: Transform::IDENTITY.pre_scale(2.0, 1.0),
        };
        s.fill_rect_shader(Rect::sized(6, 1), &shader).unwrap();
        assert_eq!(red_row(&s, 0), vec![1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn clamp_without_scale_smears_edge() {
        let mut s = SoftwareSurface::new(5, 2);
        let shader = Shader {
            image: &strip(2),
            tile_x: TileMode::Clamp,
            tile_y: TileMode::Clamp,
            transform: Transform::IDENTITY,
        };
        s.fill_rect_shader(Rect::sized(5, 2), &shader).unwrap();
        assert_eq!(red_row(&s, 0), vec![1, 2, 2, 2, 2]);
        assert_eq!(red_row(&s, 1), vec![1, 2, 2, 2, 2]);
    }

    #[test]
    fn zero_scale_fill_is_noop() {
        let mut s = SoftwareSurface::new(3, 1);
        let shader = Shader {
            image: &strip(2),
            tile_x: TileMode::Clamp,
            tile_y: TileMode::Clamp,
            transform: Transform::IDENTITY.pre_scale(0.0, 1.0),
        };
        s.fill_rect_shader(Rect::sized(3, 1), &shader).unwrap();
        assert_eq!(red_row(&s, 0), vec![0, 0, 0]);
    }

    #[test]
    fn clip_rect_restricts_drawing() {
        let mut s = SoftwareSurface::new(5, 1);
        s.set_clip_rect(Rect::new(1, 0, 3, 1));
        s.blit(&strip(5), 0, 0).unwrap();
        assert_eq!(red_row(&s, 0), vec![0, 2, 3, 0, 0]);
        s.reset_clip_rect();
        s.blit(&strip(5), 0, 0).unwrap();
        assert_eq!(red_row(&s, 0), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn translucent_pixels_blend_source_over() {
        let mut s = SoftwareSurface::new(1, 1);
        s.clear(Color::rgb(0, 0, 200));
        let half = Bitmap::filled(1, 1, Color::rgba(255, 0, 0, 128));
        s.blit(&half, 0, 0).unwrap();
        let px = s.pixel(0, 0).unwrap();
        assert!(px.r > 100 && px.r < 150);
        assert!(px.b > 80 && px.b < 120);
        assert_eq!(px.a, 255);
    }

    #[test]
    fn translucent_onto_transparent_keeps_color() {
        let mut s = SoftwareSurface::new(1, 1);
        s.clear(Color::TRANSPARENT);
        s.blit(&Bitmap::filled(1, 1, Color::rgba(255, 0, 0, 128)), 0, 0)
            .unwrap();
        assert_eq!(s.pixel(0, 0), Some(Color::rgba(255, 0, 0, 128)));
    }

    #[test]
    fn translucent_layers_accumulate_alpha() {
        let mut s = SoftwareSurface::new(1, 1);
        let half_green = Bitmap::filled(1, 1, Color::rgba(0, 255, 0, 128));
        s.blit(&half_green, 0, 0).unwrap();
        s.blit(&half_green, 0, 0).unwrap();
        let px = s.pixel(0, 0).unwrap();
        // 128 + 128 * 127 / 255 = 192, and the color stays pure green.
        assert_eq!(px, Color::rgba(0, 255, 0, 192));
    }

    #[test]
    fn transparent_pixels_leave_destination() {
        let mut s = SoftwareSurface::new(1, 1);
        s.clear(Color::WHITE);
        s.blit(&Bitmap::filled(1, 1, Color::TRANSPARENT), 0, 0).unwrap();
        assert_eq!(s.pixel(0, 0), Some(Color::WHITE));
    }

    #[test]
    fn into_bitmap_keeps_pixels() {
        let mut s = SoftwareSurface::new(2, 2);
        s.clear(Color::rgb(9, 8, 7));
        let bmp = s.into_bitmap().unwrap();
        assert_eq!(bmp.pixel(1, 1), Some(Color::rgb(9, 8, 7)));
    }
}

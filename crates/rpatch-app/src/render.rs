//! Rendering helpers shared by the `rpatch` and `rpatch-gallery` binaries.

use rpatch_backend_soft::SoftwareSurface;
use rpatch_core::PatchRenderer;
use rpatch_core::bitmap::Bitmap;
use rpatch_core::color::Color;
use rpatch_core::error::{RPatchError, Result};
use rpatch_core::geometry::Rect;
use serde_json::json;

/// Render into a fresh `width x height` surface cleared to `background`.
pub fn render_to_bitmap(
    renderer: &PatchRenderer,
    width: u32,
    height: u32,
    background: Color,
) -> Result<Bitmap> {
    let target = target_rect(width, height)?;
    let mut surface = SoftwareSurface::new(width, height);
    surface.clear(background);
    renderer.draw(target, &mut surface)?;
    surface.into_bitmap()
}

/// Target rectangle at the origin. Fails for sizes that do not fit in `i32`.
pub fn target_rect(width: u32, height: u32) -> Result<Rect> {
    match (i32::try_from(width), i32::try_from(height)) {
        (Ok(w), Ok(h)) => Ok(Rect::sized(w, h)),
        _ => Err(RPatchError::Surface(format!(
            "target {width}x{height} exceeds {}",
            i32::MAX
        ))),
    }
}

/// Describe where each region lands for `target`, plus the settings used.
pub fn layout_report(renderer: &PatchRenderer, target: Rect) -> serde_json::Value {
    json!({
        "target": target,
        "repeat_mask": renderer.repeat_bits(),
        "centered": renderer.draw_centered(),
        "sizing": renderer.repeat_flags().sizing_mode(),
        "inner": renderer.repeat_flags().inner_mode(),
        "bands": renderer.dimensions(),
        "minimum_size": [renderer.minimum_width(), renderer.minimum_height()],
        "layout": renderer.layout(target),
    })
}

/// Procedural 26x26 marked source used when no image is supplied.
///
/// Bands are 8/8/8 on both axes. Corners are solid, edges carry a gradient
/// along their length so tiling and stretching are visible, and the middle
/// is a 4px checkerboard.
pub fn demo_source() -> Result<Bitmap> {
    const SIZE: u32 = 26;
    const BAND: u32 = 8;
    let mut data = Vec::with_capacity((SIZE * SIZE * 4) as usize);
    for y in 0..SIZE {
        for x in 0..SIZE {
            let c = demo_pixel(x, y, SIZE, BAND);
            data.extend_from_slice(&[c.r, c.g, c.b, c.a]);
        }
    }
    Bitmap::from_rgba(SIZE, SIZE, data)
}

fn demo_pixel(x: u32, y: u32, size: u32, band: u32) -> Color {
    let mid = (band + 1)..=(2 * band);
    if y == 0 {
        return if mid.contains(&x) { Color::BLACK } else { Color::TRANSPARENT };
    }
    if x == 0 {
        return if mid.contains(&y) { Color::BLACK } else { Color::TRANSPARENT };
    }
    if x == size - 1 || y == size - 1 {
        return Color::TRANSPARENT;
    }
    let col = (x - 1) / band;
    let row = (y - 1) / band;
    let (u, v) = ((x - 1) % band, (y - 1) % band);
    let ramp = |t: u32| (64 + t * 24) as u8;
    match (col, row) {
        (1, 1) if (u / 4 + v / 4) % 2 == 0 => Color::rgb(230, 230, 230),
        (1, 1) => Color::rgb(160, 170, 190),
        (1, _) => Color::rgb(ramp(u), 90, 200),
        (_, 1) => Color::rgb(200, ramp(v), 90),
        _ => Color::rgb(40, 40, 60),
    }
}

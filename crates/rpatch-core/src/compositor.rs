//! Painting the nine patches into their destination rectangles.
//!
//! Corners are blitted 1:1. Edges and the middle are filled through a
//! bitmap shader whose transform is anchored at the destination origin. On
//! a tiled axis the shader repeats the patch at native size; on a clamped
//! axis the patch is pre-scaled so a single copy spans the destination.
//!
//! | region  | flag set                | flag clear             |
//! |---------|-------------------------|------------------------|
//! | top/bot | repeat X, clamp Y       | clamp both, scale X    |
//! | lft/rgt | clamp X, repeat Y       | clamp both, scale Y    |
//!
//! The middle follows the two inner bits: both tiles both axes, none
//! scales both, X-only tiles X and scales Y, Y-only tiles Y and scales X.

use rpatch_types::error::Result;
use rpatch_types::flags::{Edge, InnerMode, RepeatFlags};
use rpatch_types::geometry::Rect;
use rpatch_types::surface::{Shader, Surface, TileMode, Transform};

use crate::layout::PatchLayout;
use crate::patch::{Patch, PatchSet};

/// One paint operation produced by [`plan`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionPaint {
    /// Copy a corner patch 1:1 with its top-left at `(x, y)`.
    Blit { patch: Patch, x: i32, y: i32 },
    /// Fill `rect` with a shader over `patch`.
    Fill {
        patch: Patch,
        rect: Rect,
        tile_x: TileMode,
        tile_y: TileMode,
        transform: Transform,
    },
}

impl RegionPaint {
    pub fn patch(&self) -> Patch {
        match self {
            RegionPaint::Blit { patch, .. } | RegionPaint::Fill { patch, .. } => *patch,
        }
    }
}

/// Compute paint operations in drawing order (row by row, left to right).
/// Regions that would paint nothing are left out.
pub fn plan(patches: &PatchSet, layout: &PatchLayout, flags: RepeatFlags) -> Vec<RegionPaint> {
    let mut ops = Vec::with_capacity(9);
    for patch in Patch::ALL {
        let image = patches.get(patch);
        let rect = layout.region(patch);
        if image.is_empty() || rect.is_empty() {
            continue;
        }
        let op = match patch {
            Patch::TopLeft | Patch::TopRight | Patch::BotLeft | Patch::BotRight => {
                RegionPaint::Blit {
                    patch,
                    x: rect.left,
                    y: rect.top,
                }
            }
            Patch::TopMid => horizontal_edge(patch, rect, image.width(), flags.tiles_edge(Edge::Top)),
            Patch::BotMid => {
                horizontal_edge(patch, rect, image.width(), flags.tiles_edge(Edge::Bottom))
            }
            Patch::MidLeft => {
                vertical_edge(patch, rect, image.height(), flags.tiles_edge(Edge::Left))
            }
            Patch::MidRight => {
                vertical_edge(patch, rect, image.height(), flags.tiles_edge(Edge::Right))
            }
            Patch::Mid => middle(rect, image.dimensions(), flags.inner_mode()),
        };
        ops.push(op);
    }
    ops
}

/// Execute a plan against a surface.
pub fn paint(
    patches: &PatchSet,
    ops: &[RegionPaint],
    surface: &mut dyn Surface,
) -> Result<()> {
    for op in ops {
        match *op {
            RegionPaint::Blit { patch, x, y } => surface.blit(patches.get(patch), x, y)?,
            RegionPaint::Fill {
                patch,
                rect,
                tile_x,
                tile_y,
                transform,
            } => {
                let shader = Shader {
                    image: patches.get(patch),
                    tile_x,
                    tile_y,
                    transform,
                };
                surface.fill_rect_shader(rect, &shader)?;
            }
        }
    }
    Ok(())
}

/// Plan and paint in one step.
pub fn composite(
    patches: &PatchSet,
    layout: &PatchLayout,
    flags: RepeatFlags,
    surface: &mut dyn Surface,
) -> Result<()> {
    let ops = plan(patches, layout, flags);
    paint(patches, &ops, surface)
}

fn origin(rect: Rect) -> Transform {
    Transform::translate(rect.left as f32, rect.top as f32)
}

/// Destination extent over source extent, for a clamped axis.
fn fit_scale(dest: i32, src: u32) -> f32 {
    dest as f32 / src as f32
}

fn horizontal_edge(patch: Patch, rect: Rect, src_w: u32, tiled: bool) -> RegionPaint {
    let (tile_x, transform) = if tiled {
        (TileMode::Repeat, origin(rect))
    } else {
        (
            TileMode::Clamp,
            origin(rect).pre_scale(fit_scale(rect.width(), src_w), 1.0),
        )
    };
    RegionPaint::Fill {
        patch,
        rect,
        tile_x,
        tile_y: TileMode::Clamp,
        transform,
    }
}

fn vertical_edge(patch: Patch, rect: Rect, src_h: u32, tiled: bool) -> RegionPaint {
    let (tile_y, transform) = if tiled {
        (TileMode::Repeat, origin(rect))
    } else {
        (
            TileMode::Clamp,
            origin(rect).pre_scale(1.0, fit_scale(rect.height(), src_h)),
        )
    };
    RegionPaint::Fill {
        patch,
        rect,
        tile_x: TileMode::Clamp,
        tile_y,
        transform,
    }
}

fn middle(rect: Rect, (src_w, src_h): (u32, u32), mode: InnerMode) -> RegionPaint {
    let sx = fit_scale(rect.width(), src_w);
    let sy = fit_scale(rect.height(), src_h);
    let (tile_x, tile_y, transform) = match mode {
        InnerMode::Both => (TileMode::Repeat, TileMode::Repeat, origin(rect)),
        InnerMode::None => (TileMode::Clamp, TileMode::Clamp, origin(rect).pre_scale(sx, sy)),
        InnerMode::X => (TileMode::Repeat, TileMode::Clamp, origin(rect).pre_scale(1.0, sy)),
        InnerMode::Y => (TileMode::Clamp, TileMode::Repeat, origin(rect).pre_scale(sx, 1.0)),
    };
    RegionPaint::Fill {
        patch: Patch::Mid,
        rect,
        tile_x,
        tile_y,
        transform,
    }
}

//! Destination rectangles for the nine regions.
//!
//! Layout happens in two steps. First the target is fitted to the sizing
//! mode: Discrete rounds the space between the corners down to whole middle
//! tiles (either trimming the trailing edges or splitting the leftover
//! around the image when centered), Cutoff keeps the target as-is. Then the
//! corners are pinned to the fitted bounds at native size and the edges and
//! middle take whatever is between them.
//!
//! Targets smaller than the corners never fail. Fitting is skipped on the
//! short axis, the corners stay pinned to the target's corners (so opposite
//! corners overlap), and edge and middle extents collapse to zero.

use serde::Serialize;

use rpatch_types::flags::SizingMode;
use rpatch_types::geometry::Rect;

use crate::patch::{Patch, PatchDimensions};

/// Fitted bounds plus one destination rectangle per region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PatchLayout {
    pub bounds: Rect,
    pub top_left: Rect,
    pub top: Rect,
    pub top_right: Rect,
    pub left: Rect,
    pub middle: Rect,
    pub right: Rect,
    pub bottom_left: Rect,
    pub bottom: Rect,
    pub bottom_right: Rect,
}

impl PatchLayout {
    /// Destination rectangle for a patch.
    pub fn region(&self, patch: Patch) -> Rect {
        match patch {
            Patch::TopLeft => self.top_left,
            Patch::TopMid => self.top,
            Patch::TopRight => self.top_right,
            Patch::MidLeft => self.left,
            Patch::Mid => self.middle,
            Patch::MidRight => self.right,
            Patch::BotLeft => self.bottom_left,
            Patch::BotMid => self.bottom,
            Patch::BotRight => self.bottom_right,
        }
    }
}

/// Fit `target` to the sizing mode without placing any regions.
pub fn fit_bounds(
    target: Rect,
    dims: &PatchDimensions,
    sizing: SizingMode,
    centered: bool,
) -> Rect {
    if sizing == SizingMode::Cutoff {
        return target;
    }
    let (left, right) = fit_axis(
        target.left,
        target.right,
        dims.left_width,
        dims.mid_width,
        dims.right_width,
        centered,
    );
    let (top, bottom) = fit_axis(
        target.top,
        target.bottom,
        dims.top_height,
        dims.mid_height,
        dims.bot_height,
        centered,
    );
    Rect::new(left, top, right, bottom)
}

/// Fit one axis `[start, end)` to whole middle tiles. Computed in `i64`;
/// the result always lies within `[start, end]`.
fn fit_axis(start: i32, end: i32, lead: u32, mid: u32, trail: u32, centered: bool) -> (i32, i32) {
    let (lo, hi) = (i64::from(start), i64::from(end));
    let (lead, mid, trail) = (i64::from(lead), i64::from(mid), i64::from(trail));
    let avail = hi - lo - lead - trail;
    if avail < 0 || mid == 0 {
        log::debug!("axis {start}..{end} narrower than its corners ({lead}+{trail}), not fitting");
        return (start, end);
    }
    let used = (avail / mid) * mid;
    let (lo, hi) = if centered {
        let diff = avail - used;
        let lead_share = diff / 2;
        (lo + lead_share, hi - (diff - lead_share))
    } else {
        (lo, lo + lead + trail + used)
    };
    (clamp_i32(lo), clamp_i32(hi))
}

fn clamp_i32(v: i64) -> i32 {
    v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

/// Full layout of all nine regions inside `target`.
///
/// Band offsets saturate at the `i32` range, so targets near the limits
/// produce clipped rectangles rather than wrapping.
pub fn compute_layout(
    target: Rect,
    dims: &PatchDimensions,
    sizing: SizingMode,
    centered: bool,
) -> PatchLayout {
    let b = fit_bounds(target, dims, sizing, centered);
    let band = |v: u32| i32::try_from(v).unwrap_or(i32::MAX);
    let (lw, rw) = (band(dims.left_width), band(dims.right_width));
    let (th, bh) = (band(dims.top_height), band(dims.bot_height));

    let left_end = b.left.saturating_add(lw);
    let right_start = b.right.saturating_sub(rw);
    let top_end = b.top.saturating_add(th);
    let bottom_start = b.bottom.saturating_sub(bh);

    let inner_left = left_end;
    let inner_right = right_start.max(inner_left);
    let inner_top = top_end;
    let inner_bottom = bottom_start.max(inner_top);

    let layout = PatchLayout {
        bounds: b,
        top_left: Rect::new(b.left, b.top, left_end, top_end),
        top: Rect::new(inner_left, b.top, inner_right, top_end),
        top_right: Rect::new(right_start, b.top, b.right, top_end),
        left: Rect::new(b.left, inner_top, left_end, inner_bottom),
        middle: Rect::new(inner_left, inner_top, inner_right, inner_bottom),
        right: Rect::new(right_start, inner_top, b.right, inner_bottom),
        bottom_left: Rect::new(b.left, bottom_start, left_end, b.bottom),
        bottom: Rect::new(inner_left, bottom_start, inner_right, b.bottom),
        bottom_right: Rect::new(right_start, bottom_start, b.right, b.bottom),
    };
    log::trace!("layout for {target:?}: {layout:?}");
    layout
}

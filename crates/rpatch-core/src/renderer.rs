//! The nine-region renderer.

use rpatch_types::bitmap::Bitmap;
use rpatch_types::config::RenderConfig;
use rpatch_types::error::Result;
use rpatch_types::flags::RepeatFlags;
use rpatch_types::geometry::Rect;
use rpatch_types::surface::Surface;

use crate::codec::{DecodeOptions, decode_png};
use crate::compositor;
use crate::layout::{PatchLayout, compute_layout};
use crate::patch::{Patch, PatchDimensions, PatchSet};

/// Scalable image built from a marked-up source bitmap.
///
/// The patches are sliced once at construction and never change. Repeat
/// flags and centering are plain settings the host may change between
/// draws; drawing itself does not mutate the renderer.
#[derive(Debug, Clone)]
pub struct PatchRenderer {
    patches: PatchSet,
    flags: RepeatFlags,
    centered: bool,
}

impl PatchRenderer {
    /// Slice `source`. Fails with `MalformedSourceImage` if the markers are
    /// missing or describe impossible bands.
    pub fn new(source: &Bitmap) -> Result<Self> {
        Ok(Self {
            patches: PatchSet::extract(source)?,
            flags: RepeatFlags::empty(),
            centered: false,
        })
    }

    /// Decode PNG bytes with default options and slice the result.
    pub fn from_png(bytes: &[u8]) -> Result<Self> {
        Self::new(&decode_png(bytes, &DecodeOptions::default())?)
    }

    /// Apply the repeat and centering settings from a config.
    pub fn apply_config(&mut self, config: &RenderConfig) {
        self.flags = config.to_flags();
        self.centered = config.centered;
    }

    pub fn set_repeat_flags(&mut self, flags: RepeatFlags) {
        self.flags = flags;
    }

    pub fn repeat_flags(&self) -> RepeatFlags {
        self.flags
    }

    /// Set the raw 7-bit mask. Bits above bit 6 are ignored.
    pub fn set_repeat_bits(&mut self, mask: u8) {
        self.flags = RepeatFlags::from_mask(mask);
    }

    pub fn repeat_bits(&self) -> u8 {
        self.flags.mask()
    }

    pub fn set_draw_centered(&mut self, centered: bool) {
        self.centered = centered;
    }

    pub fn draw_centered(&self) -> bool {
        self.centered
    }

    /// Where each region would land for `target` under current settings.
    pub fn layout(&self, target: Rect) -> PatchLayout {
        compute_layout(
            target,
            self.patches.dimensions(),
            self.flags.sizing_mode(),
            self.centered,
        )
    }

    /// Paint into `target` on `surface`. Geometry never fails; errors come
    /// only from the surface.
    pub fn draw(&self, target: Rect, surface: &mut dyn Surface) -> Result<()> {
        let layout = self.layout(target);
        compositor::composite(&self.patches, &layout, self.flags, surface)
    }

    pub fn patch(&self, patch: Patch) -> &Bitmap {
        self.patches.get(patch)
    }

    /// Patch by row-major index `0..=8`.
    pub fn patch_at(&self, index: usize) -> Option<&Bitmap> {
        Patch::from_index(index).map(|p| self.patches.get(p))
    }

    pub fn patches(&self) -> &PatchSet {
        &self.patches
    }

    pub fn dimensions(&self) -> &PatchDimensions {
        self.patches.dimensions()
    }

    pub fn minimum_width(&self) -> u32 {
        self.dimensions().content_width()
    }

    pub fn minimum_height(&self) -> u32 {
        self.dimensions().content_height()
    }

    pub fn intrinsic_width(&self) -> u32 {
        self.minimum_width()
    }

    pub fn intrinsic_height(&self) -> u32 {
        self.minimum_height()
    }
}

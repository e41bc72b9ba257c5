//! Render configuration loaded from TOML.
//!
//! ```toml
//! centered = true
//! background = "#202020ff"
//!
//! [repeat]
//! inner = "both"          # both | none | x | y
//! outer = ["top", "left"] # "all", "none", or a list of edges
//! sizing = "discrete"     # discrete | cutoff
//! ```
//!
//! A raw `mask = 0..127` under `[repeat]` overrides the named fields.

use std::path::Path;

use serde::Deserialize;

use crate::color::Color;
use crate::error::{RPatchError, Result};
use crate::flags::{Edge, InnerMode, RepeatFlags, SizingMode};

/// Top-level render settings.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    #[serde(default)]
    pub centered: bool,
    #[serde(default)]
    pub repeat: RepeatConfig,
    /// Color the output surface is cleared to before drawing.
    #[serde(default = "default_background")]
    pub background: String,
}

/// Named repeat settings, folded into a [`RepeatFlags`] mask.
#[derive(Debug, Clone, Deserialize)]
pub struct RepeatConfig {
    #[serde(default = "default_inner")]
    pub inner: InnerMode,
    #[serde(default = "default_outer")]
    pub outer: OuterEdges,
    #[serde(default)]
    pub sizing: SizingMode,
    #[serde(default)]
    pub mask: Option<u8>,
}

/// Outer edges either as a preset or an explicit edge list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum OuterEdges {
    Preset(OuterPreset),
    Edges(Vec<Edge>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OuterPreset {
    All,
    None,
}

fn default_background() -> String {
    "#00000000".to_string()
}
fn default_inner() -> InnerMode {
    InnerMode::Both
}
fn default_outer() -> OuterEdges {
    OuterEdges::Preset(OuterPreset::None)
}

impl Default for RepeatConfig {
    fn default() -> Self {
        Self {
            inner: default_inner(),
            outer: default_outer(),
            sizing: SizingMode::Discrete,
            mask: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            centered: false,
            repeat: RepeatConfig::default(),
            background: default_background(),
        }
    }
}

impl RenderConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading render config from {}", path.display());
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if let Some(mask) = self.repeat.mask.filter(|m| u32::from(*m) >> RepeatFlags::WIDTH != 0) {
            return Err(RPatchError::Config(format!(
                "repeat mask {mask} exceeds {} bits",
                RepeatFlags::WIDTH
            )));
        }
        self.background_color()?;
        Ok(())
    }

    /// Fold the repeat settings into a flag mask.
    pub fn to_flags(&self) -> RepeatFlags {
        if let Some(mask) = self.repeat.mask {
            return RepeatFlags::from_mask(mask);
        }
        let base = RepeatFlags::empty()
            .with_inner(self.repeat.inner)
            .with_sizing(self.repeat.sizing);
        match &self.repeat.outer {
            OuterEdges::Preset(OuterPreset::All) => base | RepeatFlags::OUTER_ALL,
            OuterEdges::Preset(OuterPreset::None) => base,
            OuterEdges::Edges(edges) => base.with_outer(edges),
        }
    }

    pub fn background_color(&self) -> Result<Color> {
        Color::from_hex(&self.background).ok_or_else(|| {
            RPatchError::Config(format!("invalid background color: {}", self.background))
        })
    }
}

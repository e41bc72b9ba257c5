//! Render a source image under every repeat preset for visual comparison.
//!
//! Usage:
//!   rpatch-gallery [source.png] [out_dir] [WIDTHxHEIGHT]
//!
//! Without a source a procedural demo image is used. Output:
//!   {out_dir}/patch_0.png .. patch_8.png      -- the nine sliced patches
//!   {out_dir}/{inner}_{outer}_{sizing}[_centered].png
//!   {out_dir}/layouts.json                    -- layout of every preset

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use rpatch_app::cli::parse_size;
use rpatch_app::render::{demo_source, layout_report, render_to_bitmap, target_rect};
use rpatch_backend_soft::SoftwareSurface;
use rpatch_core::PatchRenderer;
use rpatch_core::bitmap::Bitmap;
use rpatch_core::codec::{DecodeOptions, load_png, save_png};
use rpatch_core::color::Color;
use rpatch_core::flags::{InnerMode, RepeatFlags, SizingMode};
use rpatch_core::surface::Surface;

const INNER: [(&str, InnerMode); 4] = [
    ("both", InnerMode::Both),
    ("none", InnerMode::None),
    ("x", InnerMode::X),
    ("y", InnerMode::Y),
];
const OUTER: [(&str, RepeatFlags); 2] = [
    ("outerall", RepeatFlags::OUTER_ALL),
    ("outernone", RepeatFlags::empty()),
];
const SIZING: [(&str, SizingMode); 2] = [
    ("discrete", SizingMode::Discrete),
    ("cutoff", SizingMode::Cutoff),
];

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let source = match args.next() {
        Some(path) => load_png(Path::new(&path), &DecodeOptions::default())
            .with_context(|| format!("decoding {path}"))?,
        None => demo_source()?,
    };
    let out_dir = PathBuf::from(args.next().unwrap_or_else(|| "gallery".to_string()));
    let (w, h) = match args.next() {
        Some(size) => parse_size(&size)?,
        None => (150, 100),
    };

    let mut renderer = PatchRenderer::new(&source)?;
    fs::create_dir_all(&out_dir)?;

    for (which, patch) in renderer.patches().iter() {
        if patch.is_empty() {
            log::debug!("skipping empty patch {which:?}");
            continue;
        }
        save_png(patch, &out_dir.join(format!("patch_{}.png", which.index())))?;
    }

    let target = target_rect(w, h)?;
    let background = Color::rgb(32, 32, 32);
    let mut layouts = serde_json::Map::new();
    let mut count = 0;
    for (inner_name, inner) in INNER {
        for (outer_name, outer) in OUTER {
            for (sizing_name, sizing) in SIZING {
                for centered in [false, true] {
                    let flags = RepeatFlags::empty()
                        .with_inner(inner)
                        .with_sizing(sizing)
                        | outer;
                    renderer.set_repeat_flags(flags);
                    renderer.set_draw_centered(centered);

                    let name = preset_name(inner_name, outer_name, sizing_name, centered);
                    let image = render_to_bitmap(&renderer, w, h, background)?;
                    save_png(&image, &out_dir.join(format!("{name}.png")))?;
                    layouts.insert(name, layout_report(&renderer, target));
                    count += 1;
                }
            }
        }
    }

    let json = serde_json::to_string_pretty(&serde_json::Value::Object(layouts))?;
    fs::write(out_dir.join("layouts.json"), json)?;
    log::info!("Wrote {count} presets to {}", out_dir.display());
    save_contact_sheet(&renderer, &out_dir, background)?;
    Ok(())
}

fn preset_name(inner: &str, outer: &str, sizing: &str, centered: bool) -> String {
    let suffix = if centered { "_centered" } else { "" };
    format!("{inner}_{outer}_{sizing}{suffix}")
}

/// One image growing the default preset through a range of sizes, so
/// discrete snapping is visible side by side.
fn save_contact_sheet(renderer: &PatchRenderer, out_dir: &Path, background: Color) -> Result<()> {
    let mut renderer = renderer.clone();
    renderer.set_repeat_flags(RepeatFlags::INNER_BOTH | RepeatFlags::OUTER_ALL);
    renderer.set_draw_centered(false);

    let min_w = renderer.minimum_width().max(1);
    let min_h = renderer.minimum_height().max(1);
    let cells: Vec<Bitmap> = (0..6)
        .map(|step| {
            let w = min_w + step * min_w / 3;
            let h = min_h + step * min_h / 3;
            render_to_bitmap(&renderer, w, h, background)
        })
        .collect::<rpatch_core::error::Result<_>>()?;

    let sheet_w: u32 = cells.iter().map(Bitmap::width).sum::<u32>() + 4 * (cells.len() as u32 + 1);
    let sheet_h: u32 = cells.iter().map(Bitmap::height).max().unwrap_or(0) + 8;
    let mut sheet = SoftwareSurface::new(sheet_w, sheet_h);
    sheet.clear(Color::BLACK);
    let mut x = 4;
    for cell in &cells {
        sheet.blit(cell, x, 4)?;
        x += cell.width() as i32 + 4;
    }
    save_png(&sheet.into_bitmap()?, &out_dir.join("sizes.png"))?;
    Ok(())
}

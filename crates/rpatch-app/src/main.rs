//! rpatch: render a marked-up PNG into a target size.
//!
//! Usage:
//!   rpatch <source.png> <WIDTH>x<HEIGHT> [-c config.toml] [-o out.png]
//!          [--mask N] [--centered] [--layout]
//!
//! Settings are applied in order: config file, then `--mask`, then
//! `--centered`. With `--layout` the computed region layout is printed as
//! JSON on stdout.

use anyhow::{Context, Result};

use rpatch_app::cli::Args;
use rpatch_app::render::{layout_report, render_to_bitmap, target_rect};
use rpatch_core::PatchRenderer;
use rpatch_core::codec::{DecodeOptions, load_png, save_png};
use rpatch_core::config::RenderConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse(std::env::args().skip(1))?;

    let config = match &args.config {
        Some(path) => RenderConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RenderConfig::default(),
    };

    let source = load_png(&args.source, &DecodeOptions::default())
        .with_context(|| format!("decoding {}", args.source.display()))?;
    let mut renderer = PatchRenderer::new(&source)
        .with_context(|| format!("slicing {}", args.source.display()))?;
    renderer.apply_config(&config);
    if let Some(mask) = args.mask {
        renderer.set_repeat_bits(mask);
    }
    if args.centered {
        renderer.set_draw_centered(true);
    }

    log::info!(
        "Rendering {} ({}x{}) to {}x{}, mask {:#09b}{}",
        args.source.display(),
        source.width(),
        source.height(),
        args.width,
        args.height,
        renderer.repeat_bits(),
        if renderer.draw_centered() { ", centered" } else { "" },
    );

    if args.layout {
        let target = target_rect(args.width, args.height)?;
        println!(
            "{}",
            serde_json::to_string_pretty(&layout_report(&renderer, target))?
        );
    }

    let output = render_to_bitmap(
        &renderer,
        args.width,
        args.height,
        config.background_color()?,
    )?;
    save_png(&output, &args.output)?;
    Ok(())
}

//! Argument parsing for the `rpatch` binary.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};

pub const USAGE: &str = "usage: rpatch <source.png> <WIDTH>x<HEIGHT> \
[-c config.toml] [-o out.png] [--mask N] [--centered] [--layout]";

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub source: PathBuf,
    pub width: u32,
    pub height: u32,
    pub config: Option<PathBuf>,
    pub output: PathBuf,
    /// Raw repeat mask, applied after the config.
    pub mask: Option<u8>,
    pub centered: bool,
    /// Print the computed layout as JSON instead of only rendering.
    pub layout: bool,
}

impl Args {
    /// Parse arguments, not including the program name.
    pub fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut positional = Vec::new();
        let mut config = None;
        let mut output = None;
        let mut mask = None;
        let mut centered = false;
        let mut layout = false;

        let mut iter = args.into_iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "-c" | "--config" => config = Some(PathBuf::from(value(&mut iter, &arg)?)),
                "-o" | "--output" => output = Some(PathBuf::from(value(&mut iter, &arg)?)),
                "--mask" => mask = Some(parse_mask(&value(&mut iter, &arg)?)?),
                "--centered" => centered = true,
                "--layout" => layout = true,
                s if s.starts_with('-') => bail!("unknown option {s}\n{USAGE}"),
                _ => positional.push(arg),
            }
        }

        let [source, size] = <[String; 2]>::try_from(positional)
            .map_err(|p| anyhow::anyhow!("expected 2 positional arguments, got {}\n{USAGE}", p.len()))?;
        let (width, height) = parse_size(&size)?;
        Ok(Self {
            source: PathBuf::from(source),
            width,
            height,
            config,
            output: output.unwrap_or_else(|| PathBuf::from("rpatch-out.png")),
            mask,
            centered,
            layout,
        })
    }
}

fn value(iter: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    iter.next()
        .with_context(|| format!("{flag} needs a value"))
}

/// Parse `WIDTHxHEIGHT`, e.g. `320x200`. Both sides must fit in `i32`.
pub fn parse_size(s: &str) -> Result<(u32, u32)> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .with_context(|| format!("size {s:?} is not WIDTHxHEIGHT"))?;
    let w: u32 = w.trim().parse().with_context(|| format!("bad width in {s:?}"))?;
    let h: u32 = h.trim().parse().with_context(|| format!("bad height in {s:?}"))?;
    if i32::try_from(w).is_err() || i32::try_from(h).is_err() {
        bail!("size {s:?} exceeds {}", i32::MAX);
    }
    Ok((w, h))
}

/// Parse a repeat mask in decimal, `0x` hex or `0b` binary.
pub fn parse_mask(s: &str) -> Result<u8> {
    let parsed = if let Some(hex) = s.strip_prefix("0x") {
        u8::from_str_radix(hex, 16)
    } else if let Some(bin) = s.strip_prefix("0b") {
        u8::from_str_radix(bin, 2)
    } else {
        s.parse()
    };
    let mask = parsed.with_context(|| format!("bad repeat mask {s:?}"))?;
    if mask > 127 {
        bail!("repeat mask {mask} does not fit in 7 bits");
    }
    Ok(mask)
}

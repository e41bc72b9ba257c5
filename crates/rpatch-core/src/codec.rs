//! PNG decoding into RGBA source bitmaps, and encoding rendered output.
//!
//! Decoding is configured per call through [`DecodeOptions`]; there is no
//! shared decoder state.

use std::io::Cursor;
use std::path::Path;

use rpatch_types::bitmap::Bitmap;
use rpatch_types::error::{RPatchError, Result};

/// Options for a single decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Expand palettes, low bit depths and `tRNS` chunks to 8-bit channels.
    pub expand: bool,
    /// Reduce 16-bit channels to 8 bits.
    pub strip_16: bool,
    /// Reject images with more pixels than this.
    pub max_pixels: u64,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            expand: true,
            strip_16: true,
            max_pixels: 16 * 1024 * 1024,
        }
    }
}

/// Decode PNG bytes into an RGBA bitmap.
pub fn decode_png(bytes: &[u8], options: &DecodeOptions) -> Result<Bitmap> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    let mut transformations = png::Transformations::IDENTITY;
    if options.expand {
        transformations |= png::Transformations::EXPAND;
    }
    if options.strip_16 {
        transformations |= png::Transformations::STRIP_16;
    }
    decoder.set_transformations(transformations);

    let mut reader = decoder.read_info()?;
    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if u64::from(width) * u64::from(height) > options.max_pixels {
        return Err(RPatchError::Decode(format!(
            "image {width}x{height} exceeds {} pixel limit",
            options.max_pixels
        )));
    }

    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf)?;
    buf.truncate(frame.buffer_size());

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(RPatchError::Decode(format!(
            "unsupported bit depth {:?}",
            frame.bit_depth
        )));
    }

    let pixel_count = width as usize * height as usize;
    let rgba = match frame.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => {
            let mut out = Vec::with_capacity(pixel_count * 4);
            for px in buf.chunks_exact(3) {
                out.extend_from_slice(&[px[0], px[1], px[2], 255]);
            }
            out
        }
        png::ColorType::GrayscaleAlpha => {
            let mut out = Vec::with_capacity(pixel_count * 4);
            for px in buf.chunks_exact(2) {
                out.extend_from_slice(&[px[0], px[0], px[0], px[1]]);
            }
            out
        }
        png::ColorType::Grayscale => {
            let mut out = Vec::with_capacity(pixel_count * 4);
            for &g in &buf {
                out.extend_from_slice(&[g, g, g, 255]);
            }
            out
        }
        png::ColorType::Indexed => {
            return Err(RPatchError::Decode(
                "indexed PNG requires palette expansion".into(),
            ));
        }
    };

    log::debug!("decoded {width}x{height} {:?} PNG", frame.color_type);
    Bitmap::from_rgba(width, height, rgba)
}

/// Read and decode a PNG file.
pub fn load_png(path: &Path, options: &DecodeOptions) -> Result<Bitmap> {
    let bytes = std::fs::read(path)?;
    decode_png(&bytes, options)
}

/// Encode an RGBA bitmap as PNG bytes.
pub fn encode_png(bitmap: &Bitmap) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, bitmap.width(), bitmap.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(bitmap.as_rgba())?;
    }
    Ok(out)
}

/// Encode a bitmap and write it to `path`.
pub fn save_png(bitmap: &Bitmap, path: &Path) -> Result<()> {
    let bytes = encode_png(bitmap)?;
    std::fs::write(path, bytes)?;
    log::info!(
        "wrote {}x{} PNG to {}",
        bitmap.width(),
        bitmap.height(),
        path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::marked_source;
    use rpatch_types::color::Color;

    fn encode_raw(w: u32, h: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, w, h);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn rgba_survives_encode_decode() {
        let src = marked_source(9, 7, 2..5, 1..4);
        let bytes = encode_png(&src).unwrap();
        let back = decode_png(&bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(back, src);
    }

    #[test]
    fn rgb_gets_opaque_alpha() {
        let bytes = encode_raw(2, 1, png::ColorType::Rgb, &[10, 20, 30, 40, 50, 60]);
        let bmp = decode_png(&bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(bmp.pixel(1, 0), Some(Color::rgb(40, 50, 60)));
    }

    #[test]
    fn gray_alpha_expands() {
        let bytes = encode_raw(2, 1, png::ColorType::GrayscaleAlpha, &[100, 0, 200, 255]);
        let bmp = decode_png(&bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(bmp.pixel(0, 0), Some(Color::rgba(100, 100, 100, 0)));
        assert_eq!(bmp.pixel(1, 0), Some(Color::rgba(200, 200, 200, 255)));
    }

    #[test]
    fn grayscale_expands() {
        let bytes = encode_raw(1, 2, png::ColorType::Grayscale, &[7, 9]);
        let bmp = decode_png(&bytes, &DecodeOptions::default()).unwrap();
        assert_eq!(bmp.pixel(0, 1), Some(Color::rgb(9, 9, 9)));
    }

    #[test]
    fn pixel_limit_enforced() {
        let bytes = encode_png(&Bitmap::filled(8, 8, Color::WHITE)).unwrap();
        let options = DecodeOptions {
            max_pixels: 63,
            ..DecodeOptions::default()
        };
        assert!(matches!(
            decode_png(&bytes, &options),
            Err(RPatchError::Decode(_))
        ));
    }

    #[test]
    fn garbage_is_an_error() {
        assert!(matches!(
            decode_png(b"definitely not a png", &DecodeOptions::default()),
            Err(RPatchError::PngDecode(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            load_png(Path::new("/nonexistent/source.png"), &DecodeOptions::default()),
            Err(RPatchError::Io(_))
        ));
    }
}

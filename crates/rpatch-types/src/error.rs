//! Error types for rpatch.

use std::io;

/// Errors produced by rpatch.
#[derive(Debug, thiserror::Error)]
pub enum RPatchError {
    #[error("malformed source image: {0}")]
    MalformedSourceImage(String),

    #[error("decode error: {0}")]
    Decode(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("PNG decode error: {0}")]
    PngDecode(#[from] png::DecodingError),

    #[error("PNG encode error: {0}")]
    PngEncode(#[from] png::EncodingError),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, RPatchError>;

//! Container persistence: binary and text layouts, plus file helpers
//!
//! # Module Structure
//!
//! - [`binary`] - Fixed little-endian layout, byte-exact
//! - [`text`] - Tolerant line-oriented layout with base64 coordinates

pub mod binary;
pub mod text;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::models::Container;

pub use binary::{decode_binary, encode_binary, read_binary, write_binary};
pub use text::{decode_text, encode_text, TextDecodeResult};

/// Error type for load and save operations
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CodecError {
    /// Underlying file open/read/write failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Binary stream ended before its declared counts were satisfied
    #[error("truncated {section} at byte {offset}: needed {needed} bytes, {available} left")]
    DecodeOverrun {
        section: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// More elements than the 32-bit count field can express
    #[error("{0} elements do not fit a 32-bit count")]
    TooLarge(usize),

    /// Text pixel payload is not valid base64
    #[error("invalid pixel data: {0}")]
    InvalidPixelData(#[from] base64::DecodeError),

    /// File opens with the text header but is not UTF-8
    #[error("text container is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),
}

/// On-disk layout of a container file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    #[default]
    Binary,
    Text,
}

impl Format {
    /// Guess the layout from a file extension: `.txt` and `.ascii` are
    /// text, anything else is binary.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("txt") || ext.eq_ignore_ascii_case("ascii") => {
                Format::Text
            }
            _ => Format::Binary,
        }
    }

    /// Layout of file contents: text when `bytes` open with the text header
    /// (leading whitespace allowed), otherwise whatever the extension of
    /// `path` says.
    pub fn detect(bytes: &[u8], path: &Path) -> Self {
        let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
        if bytes[start..].starts_with(text::HEADER.as_bytes()) {
            Format::Text
        } else {
            Format::from_path(path)
        }
    }
}

fn ensure_parent(path: &Path) -> Result<(), CodecError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Load a binary container file.
pub fn load(path: &Path) -> Result<Container, CodecError> {
    let bytes = fs::read(path)?;
    let container = decode_binary(&bytes)?;
    tracing::info!(
        path = %path.display(),
        vertices = container.palette.len(),
        pixels = container.pixels.len(),
        "loaded binary container"
    );
    Ok(container)
}

/// Write already-encoded contents, leaving `path` untouched when encoding
/// failed.
fn replace_file(path: &Path, encoded: Result<Vec<u8>, CodecError>) -> Result<(), CodecError> {
    let bytes = encoded?;
    ensure_parent(path)?;
    fs::write(path, bytes)?;
    Ok(())
}

/// Save a container in the binary layout.
///
/// The container is encoded before the file is opened, so a container too
/// large to encode never clobbers an existing file.
pub fn save(path: &Path, container: &Container) -> Result<(), CodecError> {
    replace_file(path, encode_binary(container))?;
    tracing::info!(
        path = %path.display(),
        vertices = container.palette.len(),
        pixels = container.pixels.len(),
        "saved binary container"
    );
    Ok(())
}

/// Load a text container file, keeping the recovered warnings.
pub fn read_text(path: &Path) -> Result<TextDecodeResult, CodecError> {
    let content = fs::read_to_string(path)?;
    let result = decode_text(&content)?;
    tracing::info!(
        path = %path.display(),
        vertices = result.container.palette.len(),
        pixels = result.container.pixels.len(),
        warnings = result.warnings.len(),
        "loaded text container"
    );
    Ok(result)
}

/// Load a text container file. Skipped entries are only logged.
pub fn load_text(path: &Path) -> Result<Container, CodecError> {
    read_text(path).map(|result| result.container)
}

/// Save a container in the text layout.
pub fn save_text(path: &Path, container: &Container) -> Result<(), CodecError> {
    replace_file(path, Ok(to_text(container).into_bytes()))?;
    tracing::info!(
        path = %path.display(),
        vertices = container.palette.len(),
        pixels = container.pixels.len(),
        "saved text container"
    );
    Ok(())
}

/// The text layout as a string, for previews that never touch the disk.
pub fn to_text(container: &Container) -> String {
    encode_text(container)
}

/// Load in the given layout, keeping warnings (always empty for binary).
pub fn read_as(path: &Path, format: Format) -> Result<TextDecodeResult, CodecError> {
    match format {
        Format::Binary => {
            load(path).map(|container| TextDecodeResult { container, warnings: Vec::new() })
        }
        Format::Text => read_text(path),
    }
}

/// Save in the given layout.
pub fn save_as(path: &Path, container: &Container, format: Format) -> Result<(), CodecError> {
    match format {
        Format::Binary => save(path, container),
        Format::Text => save_text(path, container),
    }
}

/// Load with the layout detected from the contents, falling back to the
/// extension. Keeps the text warnings (always empty for binary).
pub fn read_detect(path: &Path) -> Result<TextDecodeResult, CodecError> {
    let bytes = fs::read(path)?;
    let format = Format::detect(&bytes, path);
    tracing::debug!(path = %path.display(), ?format, "detected container layout");

    let result = match format {
        Format::Binary => TextDecodeResult { container: decode_binary(&bytes)?, warnings: Vec::new() },
        Format::Text => decode_text(&String::from_utf8(bytes)?)?,
    };
    tracing::info!(
        path = %path.display(),
        vertices = result.container.palette.len(),
        pixels = result.container.pixels.len(),
        warnings = result.warnings.len(),
        "loaded container"
    );
    Ok(result)
}

/// Load with the layout detected from the contents, falling back to the
/// extension.
pub fn load_auto(path: &Path) -> Result<Container, CodecError> {
    read_detect(path).map(|result| result.container)
}

/// Save with the layout guessed from the extension.
pub fn save_auto(path: &Path, container: &Container) -> Result<(), CodecError> {
    save_as(path, container, Format::from_path(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorVertex, Pixel, Rgb};
    use tempfile::TempDir;

    fn sample() -> Container {
        Container::from_parts(
            vec![ColorVertex::new(Rgb::new(1, 2, 3), 0.5, -0.5)],
            vec![Pixel::new(0.1, 0.2), Pixel::new(-0.3, 0.4)],
        )
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("a.txt")), Format::Text);
        assert_eq!(Format::from_path(Path::new("a.ASCII")), Format::Text);
        assert_eq!(Format::from_path(Path::new("a.bin")), Format::Binary);
        assert_eq!(Format::from_path(Path::new("noext")), Format::Binary);
    }

    #[test]
    fn test_binary_file_roundtrip() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("c.bin");
        save(&path, &sample()).unwrap();
        assert_eq!(load(&path).unwrap(), sample());
    }

    #[test]
    fn test_text_file_roundtrip() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("c.txt");
        save_text(&path, &sample()).unwrap();
        assert_eq!(load_text(&path).unwrap(), sample());
        assert_eq!(fs::read_to_string(&path).unwrap(), to_text(&sample()));
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("nested/deeper/c.bin");
        save(&path, &sample()).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_auto_picks_layout() {
        let temp = TempDir::new().expect("should create temp dir");
        let text_path = temp.path().join("c.txt");
        let bin_path = temp.path().join("c.dat");
        save_auto(&text_path, &sample()).unwrap();
        save_auto(&bin_path, &sample()).unwrap();
        assert!(fs::read_to_string(&text_path).unwrap().starts_with(text::HEADER));
        assert_eq!(fs::read(&bin_path).unwrap()[..4], [1, 0, 0, 0]);
        assert_eq!(load_auto(&text_path).unwrap(), sample());
        assert_eq!(load_auto(&bin_path).unwrap(), sample());
    }

    #[test]
    fn test_detect_text_header_regardless_of_extension() {
        let text = to_text(&sample());
        assert_eq!(Format::detect(text.as_bytes(), Path::new("c.bin")), Format::Text);
        let padded = format!("\r\n  {}", text);
        assert_eq!(Format::detect(padded.as_bytes(), Path::new("c.dat")), Format::Text);

        let bytes = encode_binary(&sample()).unwrap();
        assert_eq!(Format::detect(&bytes, Path::new("c.dat")), Format::Binary);
        assert_eq!(Format::detect(&[], Path::new("c.txt")), Format::Text);
        assert_eq!(Format::detect(b"   ", Path::new("c.bin")), Format::Binary);
    }

    #[test]
    fn test_load_auto_reads_text_saved_under_binary_extension() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("c.dat");
        save_as(&path, &sample(), Format::Text).unwrap();

        assert_eq!(load_auto(&path).unwrap(), sample());
        assert!(read_detect(&path).unwrap().warnings.is_empty());
    }

    #[test]
    fn test_failed_encode_keeps_existing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = temp.path().join("c.bin");
        save(&path, &sample()).unwrap();
        let before = fs::read(&path).unwrap();

        let err = replace_file(&path, Err(CodecError::TooLarge(usize::MAX))).unwrap_err();
        assert!(matches!(err, CodecError::TooLarge(_)));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let err = load(&temp.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
        let err = load_text(&temp.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }
}

//! Tolerant line-oriented text layout
//!
//! ```text
//! GRAPHIC_CONTAINER {
//!   "version": "1.0",
//!   "type": "hex_palette_container",
//!   "palette": [
//!     {"index": 0, "color": "RRGGBB", "position": "<base64 of f32 x, f32 y>"},
//!     ...
//!   ],
//!   "pixels": {
//!     "count": N,
//!     "data": "<base64 of N × (f32 x, f32 y)>"
//!   }
//! }
//! ```
//!
//! It looks like JSON but is not read as JSON. The decoder is a small line
//! scanner: one palette vertex per line inside the palette block, plus the
//! `"count"` and `"data"` scalar lines. Unrecognized lines are skipped.
//! A broken vertex line drops that vertex with a warning instead of failing
//! the load.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::fmt::Write as _;

use super::CodecError;
use crate::color::{format_hex, parse_hex, ColorError};
use crate::models::{ColorVertex, Container, Pixel, Rgb, Warning};

pub const HEADER: &str = "GRAPHIC_CONTAINER {";
pub const FORMAT_VERSION: &str = "1.0";
pub const FORMAT_TYPE: &str = "hex_palette_container";

const PALETTE_START: &str = "\"palette\": [";
const COUNT_KEY: &str = "\"count\":";
const DATA_KEY: &str = "\"data\":";

/// Result of decoding a text container.
#[derive(Debug, Clone, Default)]
pub struct TextDecodeResult {
    pub container: Container,
    pub warnings: Vec<Warning>,
}

fn encode_point(x: f32, y: f32) -> String {
    let mut bytes = [0u8; 8];
    bytes[..4].copy_from_slice(&x.to_le_bytes());
    bytes[4..].copy_from_slice(&y.to_le_bytes());
    STANDARD.encode(bytes)
}

fn encode_pixels(pixels: &[Pixel]) -> String {
    let bytes: Vec<u8> = pixels
        .iter()
        .flat_map(|p| p.x.to_le_bytes().into_iter().chain(p.y.to_le_bytes()))
        .collect();
    STANDARD.encode(bytes)
}

/// Render a container in the text layout.
pub fn encode_text(container: &Container) -> String {
    let mut out = String::new();

    out.push_str(HEADER);
    out.push('\n');
    let _ = writeln!(out, "  \"version\": \"{}\",", FORMAT_VERSION);
    let _ = writeln!(out, "  \"type\": \"{}\",", FORMAT_TYPE);

    out.push_str("  ");
    out.push_str(PALETTE_START);
    out.push('\n');
    let last = container.palette.len().saturating_sub(1);
    for (i, vertex) in container.palette.iter().enumerate() {
        let (x, y) = vertex.position;
        let _ = write!(
            out,
            "    {{\"index\": {}, \"color\": \"{}\", \"position\": \"{}\"}}",
            i,
            format_hex(vertex.color),
            encode_point(x, y)
        );
        out.push_str(if i < last { ",\n" } else { "\n" });
    }
    out.push_str("  ],\n");

    out.push_str("  \"pixels\": {\n");
    let _ = writeln!(out, "    {} {},", COUNT_KEY, container.pixels.len());
    let _ = writeln!(out, "    {} \"{}\"", DATA_KEY, encode_pixels(&container.pixels));
    out.push_str("  }\n");
    out.push_str("}\n");

    out
}

/// Where the scanner is relative to the palette block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    Header,
    InPalette,
    AfterPalette,
}

/// Why a single vertex line was dropped.
#[derive(Debug)]
enum EntryError {
    Missing(&'static str),
    Color(ColorError),
    Position(String),
}

impl std::fmt::Display for EntryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryError::Missing(field) => write!(f, "missing \"{}\"", field),
            EntryError::Color(e) => write!(f, "bad color: {}", e),
            EntryError::Position(msg) => write!(f, "bad position: {}", msg),
        }
    }
}

fn strip_value(raw: &str) -> &str {
    raw.trim().trim_end_matches(',').trim().trim_matches('"')
}

/// Pull `color` and `position` out of a `{"k": v, ...}` line.
fn split_fields(line: &str) -> (Option<&str>, Option<&str>) {
    let mut color = None;
    let mut position = None;

    let body = line.trim_matches(|c| c == '{' || c == '}');
    for part in body.split(',') {
        let mut kv = part.split(':');
        let (Some(key), Some(value), None) = (kv.next(), kv.next(), kv.next()) else {
            continue;
        };
        let key = key.trim().trim_matches('"');
        let value = value.trim().trim_matches('"');
        match key {
            "color" => color = Some(value),
            "position" => position = Some(value),
            _ => {}
        }
    }

    (color.filter(|v| !v.is_empty()), position.filter(|v| !v.is_empty()))
}

fn decode_point(encoded: &str) -> Result<(f32, f32), EntryError> {
    let bytes = STANDARD.decode(encoded).map_err(|e| EntryError::Position(e.to_string()))?;
    if bytes.len() < 8 {
        return Err(EntryError::Position(format!("{} bytes, expected 8", bytes.len())));
    }
    let x = f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
    let y = f32::from_le_bytes([bytes[4], bytes[5], bytes[6], bytes[7]]);
    Ok((x, y))
}

/// Parse one vertex line, pushing recovered problems onto `warnings`.
fn parse_vertex(line: &str, line_number: usize, warnings: &mut Vec<Warning>) -> Result<ColorVertex, EntryError> {
    let (color, position) = split_fields(line);
    let color = color.ok_or(EntryError::Missing("color"))?;
    let position = position.ok_or(EntryError::Missing("position"))?;

    let color = match parse_hex(color) {
        Ok(c) => c,
        Err(ColorError::InvalidLength(len)) => {
            let message = format!("color \"{}\" has {} digits, using black", color, len);
            tracing::warn!(line = line_number, "{}", message);
            warnings.push(Warning { message, line: line_number });
            Rgb::BLACK
        }
        Err(e) => return Err(EntryError::Color(e)),
    };
    let (x, y) = decode_point(position)?;

    Ok(ColorVertex::new(color, x, y))
}

fn decode_pixels(data: &str, count: usize, line: usize, warnings: &mut Vec<Warning>) -> Result<Vec<Pixel>, CodecError> {
    let bytes = STANDARD.decode(data)?;
    let available = bytes.len() / 8;
    if available < count {
        let message = format!("pixel data holds {} of {} declared pixels", available, count);
        tracing::warn!(line, "{}", message);
        warnings.push(Warning { message, line });
    }

    Ok(bytes
        .chunks_exact(8)
        .take(count)
        .map(|b| {
            Pixel::new(
                f32::from_le_bytes([b[0], b[1], b[2], b[3]]),
                f32::from_le_bytes([b[4], b[5], b[6], b[7]]),
            )
        })
        .collect())
}

/// Decode the text layout.
///
/// Malformed palette lines are dropped and reported in
/// [`TextDecodeResult::warnings`]. Only undecodable pixel data fails the
/// whole load.
pub fn decode_text(content: &str) -> Result<TextDecodeResult, CodecError> {
    let mut state = ScanState::Header;
    let mut warnings = Vec::new();
    let mut palette = Vec::new();
    let mut count = 0usize;
    let mut data: Option<(&str, usize)> = None;

    for (idx, raw) in content.split('\n').enumerate() {
        let line_number = idx + 1;
        let line = raw.trim();

        if let Some(value) = line.strip_prefix(COUNT_KEY) {
            let value = strip_value(value);
            count = match value.parse::<i64>() {
                Ok(n) => usize::try_from(n).unwrap_or(0),
                Err(_) => {
                    let message = format!("pixel count \"{}\" is not a number", value);
                    tracing::warn!(line = line_number, "{}", message);
                    warnings.push(Warning { message, line: line_number });
                    0
                }
            };
            continue;
        }
        if let Some(value) = line.strip_prefix(DATA_KEY) {
            data = Some((strip_value(value), line_number));
            continue;
        }

        state = match state {
            ScanState::Header | ScanState::AfterPalette if line.starts_with(PALETTE_START) => {
                ScanState::InPalette
            }
            ScanState::InPalette if line == "]," || line == "]" => ScanState::AfterPalette,
            ScanState::InPalette if line.starts_with('{') => {
                match parse_vertex(line.trim_end_matches(','), line_number, &mut warnings) {
                    Ok(vertex) => palette.push(vertex),
                    Err(e) => {
                        let message = format!("skipped palette entry: {}", e);
                        tracing::warn!(line = line_number, "{}", message);
                        warnings.push(Warning { message, line: line_number });
                    }
                }
                ScanState::InPalette
            }
            other => other,
        };
    }

    let pixels = match data {
        Some((data, line)) if !data.is_empty() && count > 0 => {
            decode_pixels(data, count, line, &mut warnings)?
        }
        _ => Vec::new(),
    };

    Ok(TextDecodeResult { container: Container::from_parts(palette, pixels), warnings })
}

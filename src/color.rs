//! Hex color parsing and formatting
//!
//! Container files store colors as bare `RRGGBB`. User-facing inputs
//! (command line, config) may also carry a leading `#`.

use crate::models::Rgb;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Invalid length (must be exactly 6 hex chars)
    #[error("invalid color length {0}, expected 6")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Parse a bare 6-digit `RRGGBB` hex string.
///
/// ```
/// use hexpal::color::parse_hex;
/// use hexpal::models::Rgb;
///
/// assert_eq!(parse_hex("FF8000").unwrap(), Rgb::new(255, 128, 0));
/// assert!(parse_hex("#FF8000").is_err());
/// ```
pub fn parse_hex(hex: &str) -> Result<Rgb, ColorError> {
    if hex.is_empty() {
        return Err(ColorError::Empty);
    }

    let len = hex.chars().count();
    if len != 6 {
        return Err(ColorError::InvalidLength(len));
    }

    // All ASCII from here on, so byte slicing lands on char boundaries
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }

    let r = parse_hex_pair(&hex[0..2])?;
    let g = parse_hex_pair(&hex[2..4])?;
    let b = parse_hex_pair(&hex[4..6])?;
    Ok(Rgb::new(r, g, b))
}

/// Parse a user-supplied color: `RRGGBB` or `#RRGGBB`.
pub fn parse_color(s: &str) -> Result<Rgb, ColorError> {
    let s = s.trim();
    parse_hex(s.strip_prefix('#').unwrap_or(s))
}

/// Format a color as uppercase `RRGGBB`.
pub fn format_hex(color: Rgb) -> String {
    color.to_string()
}

/// Parse a single hex digit (0-9, A-F, a-f) to u8 (0-15)
fn parse_hex_digit(c: char) -> Result<u8, ColorError> {
    match c {
        '0'..='9' => Ok(c as u8 - b'0'),
        'a'..='f' => Ok(c as u8 - b'a' + 10),
        'A'..='F' => Ok(c as u8 - b'A' + 10),
        _ => Err(ColorError::InvalidHex(c)),
    }
}

/// Parse a two-character hex string to u8 (0-255)
fn parse_hex_pair(s: &str) -> Result<u8, ColorError> {
    let mut chars = s.chars();
    let high = chars.next().ok_or(ColorError::InvalidLength(0)).and_then(parse_hex_digit)?;
    let low = chars.next().ok_or(ColorError::InvalidLength(1)).and_then(parse_hex_digit)?;
    Ok(high * 16 + low)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_upper_and_lower() {
        assert_eq!(parse_hex("C8643C").unwrap(), Rgb::new(200, 100, 60));
        assert_eq!(parse_hex("c8643c").unwrap(), Rgb::new(200, 100, 60));
    }

    #[test]
    fn test_parse_hex_empty() {
        assert_eq!(parse_hex(""), Err(ColorError::Empty));
    }

    #[test]
    fn test_parse_hex_wrong_length() {
        assert_eq!(parse_hex("FFF"), Err(ColorError::InvalidLength(3)));
        assert_eq!(parse_hex("FF00FF00"), Err(ColorError::InvalidLength(8)));
    }

    #[test]
    fn test_parse_hex_bad_digit() {
        assert_eq!(parse_hex("GG0000"), Err(ColorError::InvalidHex('G')));
        assert_eq!(parse_hex("00000z"), Err(ColorError::InvalidHex('z')));
    }

    #[test]
    fn test_parse_hex_multibyte_does_not_panic() {
        assert!(parse_hex("ééé").is_err());
        assert!(parse_hex("aé0000").is_err());
    }

    #[test]
    fn test_parse_color_accepts_hash() {
        assert_eq!(parse_color("#0000FF").unwrap(), Rgb::new(0, 0, 255));
        assert_eq!(parse_color(" 00FF00 ").unwrap(), Rgb::new(0, 255, 0));
    }

    #[test]
    fn test_format_hex() {
        assert_eq!(format_hex(Rgb::new(1, 171, 255)), "01ABFF");
    }
}

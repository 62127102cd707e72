//! Data models for palette containers (colors, vertices, pixels)

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an array, in `[r, g, b]` order.
    pub const fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// A palette anchor: a color pinned to a point of the 2D domain.
///
/// Positions conventionally sit on or inside the unit circle, but nothing
/// enforces it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorVertex {
    pub color: Rgb,
    pub position: (f32, f32),
}

impl ColorVertex {
    pub fn new(color: Rgb, x: f32, y: f32) -> Self {
        Self { color, position: (x, y) }
    }
}

/// A colorless sample point. Its displayed color is always derived from the
/// palette at read time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pixel {
    pub x: f32,
    pub y: f32,
}

impl Pixel {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn distance_to(&self, (x, y): (f32, f32)) -> f64 {
        let dx = f64::from(self.x) - f64::from(x);
        let dy = f64::from(self.y) - f64::from(y);
        (dx * dx + dy * dy).sqrt()
    }
}

/// A palette plus a pixel set: the unit of persistence and transformation.
///
/// Palette order is insertion order and survives save/load round trips.
/// Editing operations consume `self` and hand back the edited value so the
/// owner swaps in a complete container, never a half-rebuilt one.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Container {
    pub palette: Vec<ColorVertex>,
    pub pixels: Vec<Pixel>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_parts(palette: Vec<ColorVertex>, pixels: Vec<Pixel>) -> Self {
        Self { palette, pixels }
    }

    /// Append a single sample point.
    pub fn with_pixel(mut self, pixel: Pixel) -> Self {
        self.pixels.push(pixel);
        self
    }

    /// Drop every pixel, keeping the palette.
    pub fn without_pixels(mut self) -> Self {
        self.pixels.clear();
        self
    }

    /// Remove the pixel closest to `point`. The first of several equally
    /// close pixels is the one removed.
    pub fn without_nearest_pixel(mut self, point: (f32, f32)) -> Self {
        let mut nearest: Option<(usize, f64)> = None;
        for (idx, pixel) in self.pixels.iter().enumerate() {
            let d = pixel.distance_to(point);
            if nearest.map_or(true, |(_, best)| d < best) {
                nearest = Some((idx, d));
            }
        }

        if let Some((idx, _)) = nearest {
            self.pixels.remove(idx);
        }
        self
    }

    /// Replace the palette wholesale.
    pub fn with_palette(mut self, palette: Vec<ColorVertex>) -> Self {
        self.palette = palette;
        self
    }

    /// Recolor vertex `index`, leaving its position alone.
    ///
    /// Returns `None` when `index` is out of range.
    pub fn with_vertex_color(mut self, index: usize, color: Rgb) -> Option<Self> {
        self.palette.get_mut(index)?.color = color;
        Some(self)
    }

    pub fn is_empty(&self) -> bool {
        self.palette.is_empty() && self.pixels.is_empty()
    }
}

/// A recovered problem from a lenient decode.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Warning {
    pub message: String,
    pub line: usize,
}

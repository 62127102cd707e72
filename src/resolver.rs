//! Color resolution: mapping a domain point to a color from the palette
//!
//! The palette is read as a circular gradient. Vertices are ordered by their
//! polar angle around the origin, a point's angle selects the sector between
//! two angularly adjacent vertices, and the two colors are blended linearly
//! across that sector. The result is then scaled by the point's distance
//! from the origin (capped at 1), so the center of the domain always fades
//! to black.

use std::f64::consts::TAU;

use crate::models::{ColorVertex, Container, Pixel, Rgb};

/// Polar angle of `(x, y)` in `[0, 2π)`.
fn polar_angle(x: f32, y: f32) -> f64 {
    let angle = f64::from(y).atan2(f64::from(x));
    if angle < 0.0 {
        angle + TAU
    } else {
        angle
    }
}

/// Scale a channel by `radius`, clamp to the byte range and truncate.
fn finish_channel(value: f64, radius: f64) -> u8 {
    // `as` truncates toward zero; the clamp keeps it in range
    (value * radius).clamp(0.0, 255.0) as u8
}

/// A palette pre-sorted by angle, ready for repeated lookups.
///
/// Building the wheel once and resolving many points avoids re-sorting the
/// palette per pixel.
#[derive(Debug, Clone)]
pub struct ColorWheel {
    stops: Vec<(Rgb, f64)>,
}

impl ColorWheel {
    pub fn new(palette: &[ColorVertex]) -> Self {
        let mut stops: Vec<(Rgb, f64)> = palette
            .iter()
            .map(|v| (v.color, polar_angle(v.position.0, v.position.1)))
            .collect();
        // Stable: vertices sharing an angle keep their palette order
        stops.sort_by(|a, b| a.1.total_cmp(&b.1));
        Self { stops }
    }

    /// Index of the sector containing `angle`.
    ///
    /// Sector `i` spans `[angle_i, angle_{i+1})`, wrapping through `2π` when
    /// the next stop has a smaller angle. Falls back to the first sector when
    /// no sector matches (all stops share one angle).
    fn sector_of(&self, angle: f64) -> usize {
        let n = self.stops.len();
        (0..n)
            .find(|&i| {
                let start = self.stops[i].1;
                let end = self.stops[(i + 1) % n].1;
                if end > start {
                    angle >= start && angle < end
                } else if end < start {
                    angle >= start || angle < end
                } else {
                    false
                }
            })
            .unwrap_or(0)
    }

    /// Resolve the color at `(x, y)`.
    pub fn resolve(&self, (x, y): (f32, f32)) -> Rgb {
        let angle = polar_angle(x, y);
        let radius = f64::from(x).hypot(f64::from(y)).min(1.0);

        match self.stops.as_slice() {
            [] => return Rgb::BLACK,
            [(only, _)] => {
                let [r, g, b] = only.channels().map(|c| finish_channel(f64::from(c), radius));
                return Rgb::new(r, g, b);
            }
            _ => {}
        }

        let n = self.stops.len();
        let sector = self.sector_of(angle);
        let (from, from_angle) = self.stops[sector];
        let (to, to_angle) = self.stops[(sector + 1) % n];

        let mut span = to_angle - from_angle;
        if span <= 0.0 {
            span += TAU;
        }
        let mut rel = angle - from_angle;
        if rel < 0.0 {
            rel += TAU;
        }
        let t = if span == 0.0 { 0.0 } else { rel / span };

        let blend = |a: u8, b: u8| f64::from(a) * (1.0 - t) + f64::from(b) * t;
        Rgb::new(
            finish_channel(blend(from.r, to.r), radius),
            finish_channel(blend(from.g, to.g), radius),
            finish_channel(blend(from.b, to.b), radius),
        )
    }
}

/// Resolve the color of a single domain point against `palette`.
///
/// Total and pure: an empty palette yields black, a single vertex yields its
/// color scaled by the point's radius.
///
/// ```
/// use hexpal::models::{ColorVertex, Rgb};
/// use hexpal::resolver::resolve_color;
///
/// let palette = [ColorVertex::new(Rgb::new(200, 100, 50), 1.0, 0.0)];
/// assert_eq!(resolve_color((1.0, 0.0), &palette), Rgb::new(200, 100, 50));
/// assert_eq!(resolve_color((0.0, 0.0), &palette), Rgb::BLACK);
/// ```
pub fn resolve_color(point: (f32, f32), palette: &[ColorVertex]) -> Rgb {
    ColorWheel::new(palette).resolve(point)
}

/// Resolve the color of one pixel of a container.
pub fn resolve_pixel(pixel: &Pixel, palette: &[ColorVertex]) -> Rgb {
    resolve_color((pixel.x, pixel.y), palette)
}

/// Resolve every pixel of `container`, in pixel order.
pub fn resolve_all(container: &Container) -> Vec<Rgb> {
    let wheel = ColorWheel::new(&container.palette);
    tracing::debug!(
        pixels = container.pixels.len(),
        vertices = container.palette.len(),
        "resolving container colors"
    );
    container.pixels.iter().map(|p| wheel.resolve((p.x, p.y))).collect()
}

//! Built-in palette layouts.
//!
//! The hexagon is the starting point for a fresh container: six vertices on
//! the unit circle, 60° apart, starting on the positive x axis.

use rand::Rng;
use std::f64::consts::FRAC_PI_3;

use crate::models::{ColorVertex, Rgb};

/// Number of vertices in the hexagon layout.
pub const HEXAGON_VERTICES: usize = 6;

/// Lowest channel value used for random palette colors, so no vertex is
/// too dark to read against the black center.
const RANDOM_CHANNEL_MIN: u8 = 64;

/// Positions of the hexagon vertices, counter-clockwise from angle 0.
pub fn hexagon_positions() -> [(f32, f32); HEXAGON_VERTICES] {
    std::array::from_fn(|i| {
        let angle = FRAC_PI_3 * i as f64;
        (angle.cos() as f32, angle.sin() as f32)
    })
}

/// A hexagon palette with the given colors, in vertex order.
pub fn hexagon(colors: [Rgb; HEXAGON_VERTICES]) -> Vec<ColorVertex> {
    hexagon_positions()
        .into_iter()
        .zip(colors)
        .map(|((x, y), color)| ColorVertex::new(color, x, y))
        .collect()
}

/// A random bright color, each channel in `[64, 255]`.
pub fn random_color<R: Rng + ?Sized>(rng: &mut R) -> Rgb {
    Rgb::new(
        rng.gen_range(RANDOM_CHANNEL_MIN..=u8::MAX),
        rng.gen_range(RANDOM_CHANNEL_MIN..=u8::MAX),
        rng.gen_range(RANDOM_CHANNEL_MIN..=u8::MAX),
    )
}

/// A hexagon palette with random colors drawn from `rng`.
pub fn random_hexagon<R: Rng + ?Sized>(rng: &mut R) -> Vec<ColorVertex> {
    let colors: [Rgb; HEXAGON_VERTICES] = std::array::from_fn(|_| random_color(rng));
    hexagon(colors)
}

//! Procedural pattern generation.
//!
//! Every pattern produces a fresh container with a two-vertex palette
//! (primary at `(-1, -1)`, secondary at `(1, 1)`) and pixels laid out over
//! the `[-1, 1]²` domain. Image dimensions only set the grid pitch; no image
//! is rendered.
//!
//! Coordinates are stepped by repeated `f32` addition, so the exact set of
//! points is stable across runs and matches files produced by earlier
//! versions of the generator.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::models::{ColorVertex, Container, Pixel, Rgb};

/// Smallest tile edge, in image pixels
const MIN_TILE_SIZE: u32 = 5;
/// Smallest distance between circle centers, in image pixels
const MIN_CIRCLE_SPACING: u32 = 10;
/// Fewest gradient columns
const MIN_GRADIENT_STEPS: u32 = 20;
/// Smallest stripe width, in image pixels
const MIN_STRIPE_WIDTH: u32 = 5;

const CIRCLE_RADIUS_FACTOR: f32 = 0.3;
const CIRCLE_ANGLE_STEP: f32 = 0.1;
const GRADIENT_Y_STEP: f32 = 0.02;
const STRIPE_Y_STEP: f32 = 0.01;

/// Which layout to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PatternType {
    /// Checkerboard of sample points
    #[default]
    Tiles,
    /// Rings of points on a grid of centers
    Circles,
    /// Evenly spaced full-height columns
    Gradient,
    /// Alternating filled and empty vertical bands
    Stripes,
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternType::Tiles => "tiles",
            PatternType::Circles => "circles",
            PatternType::Gradient => "gradient",
            PatternType::Stripes => "stripes",
        };
        f.write_str(name)
    }
}

impl FromStr for PatternType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiles" => Ok(PatternType::Tiles),
            "circles" => Ok(PatternType::Circles),
            "gradient" => Ok(PatternType::Gradient),
            "stripes" => Ok(PatternType::Stripes),
            other => Err(format!("unknown pattern type '{}'", other)),
        }
    }
}

/// Inputs to [`generate_pattern`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PatternParams {
    pub pattern_type: PatternType,
    pub primary: Rgb,
    pub secondary: Rgb,
    /// Tile edge, circle spacing, gradient steps or stripe width
    pub element_size: u32,
    pub image_width: u32,
    pub image_height: u32,
    /// Accepted and carried, not yet used by any layout
    pub density: f32,
}

impl Default for PatternParams {
    fn default() -> Self {
        Self {
            pattern_type: PatternType::Tiles,
            primary: Rgb::new(0x33, 0x66, 0xFF),
            secondary: Rgb::new(0xFF, 0x99, 0x33),
            element_size: 20,
            image_width: 400,
            image_height: 400,
            density: 0.5,
        }
    }
}

/// Values from `-1.0` upward by `step` while `<= 1.0`.
///
/// Stops early if adding `step` no longer changes the value, so a degenerate
/// step can't loop forever.
fn domain_steps(step: f32) -> impl Iterator<Item = f32> {
    std::iter::successors(Some(-1.0f32), move |&v| {
        let next = v + step;
        (next > v).then_some(next)
    })
    .take_while(|&v| v <= 1.0)
}

/// Grid pitch in domain units for `size` image pixels across `extent`.
fn pitch(extent: u32, size: u32) -> f32 {
    2.0 / extent as f32 * size as f32
}

fn is_even(value: f32) -> bool {
    (value.floor() as i64).rem_euclid(2) == 0
}

/// Build a container from procedural rules.
///
/// Deterministic: the same parameters always give the same pixels in the
/// same order.
pub fn generate_pattern(params: &PatternParams) -> Container {
    let palette = vec![
        ColorVertex::new(params.primary, -1.0, -1.0),
        ColorVertex::new(params.secondary, 1.0, 1.0),
    ];

    let pixels = match params.pattern_type {
        PatternType::Tiles => tiles(params),
        PatternType::Circles => circles(params),
        PatternType::Gradient => gradient(params),
        PatternType::Stripes => stripes(params),
    };

    tracing::info!(
        pattern = %params.pattern_type,
        element_size = params.element_size,
        pixels = pixels.len(),
        "generated pattern"
    );
    Container::from_parts(palette, pixels)
}

fn tiles(params: &PatternParams) -> Vec<Pixel> {
    let tile = params.element_size.max(MIN_TILE_SIZE);
    let (w, h) = (params.image_width as f32, params.image_height as f32);
    let tile_f = tile as f32;

    let mut pixels = Vec::new();
    for x in domain_steps(pitch(params.image_width, tile)) {
        for y in domain_steps(pitch(params.image_height, tile)) {
            let cell = (x * w / tile_f).floor() + (y * h / tile_f).floor();
            if is_even(cell) {
                pixels.push(Pixel::new(x, y));
            }
        }
    }
    pixels
}

fn circles(params: &PatternParams) -> Vec<Pixel> {
    let spacing = params.element_size.max(MIN_CIRCLE_SPACING);
    let shortest = params.image_width.min(params.image_height) as f32;
    let radius = spacing as f32 * CIRCLE_RADIUS_FACTOR / shortest;

    let mut pixels = Vec::new();
    for cx in domain_steps(pitch(params.image_width, spacing)) {
        for cy in domain_steps(pitch(params.image_height, spacing)) {
            let mut angle = 0.0f32;
            while f64::from(angle) < TAU {
                let a = f64::from(angle);
                let px = cx + (a.cos() as f32) * radius;
                let py = cy + (a.sin() as f32) * radius;
                if px.abs() <= 1.0 && py.abs() <= 1.0 {
                    pixels.push(Pixel::new(px, py));
                }
                angle += CIRCLE_ANGLE_STEP;
            }
        }
    }
    pixels
}

fn gradient(params: &PatternParams) -> Vec<Pixel> {
    let steps = params.element_size.max(MIN_GRADIENT_STEPS);

    let mut pixels = Vec::new();
    for i in 0..=steps {
        let t = i as f32 / steps as f32;
        let x = -1.0 + 2.0 * t;
        pixels.extend(domain_steps(GRADIENT_Y_STEP).map(|y| Pixel::new(x, y)));
    }
    pixels
}

fn stripes(params: &PatternParams) -> Vec<Pixel> {
    let stripe = params.element_size.max(MIN_STRIPE_WIDTH);
    let w = params.image_width as f32;
    let band_width = 2.0 * stripe as f32;

    let mut pixels = Vec::new();
    for x in domain_steps(pitch(params.image_width, stripe)) {
        if is_even((x + 1.0) * w / band_width) {
            pixels.extend(domain_steps(STRIPE_Y_STEP).map(|y| Pixel::new(x, y)));
        }
    }
    pixels
}

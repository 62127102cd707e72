//! hexpal - Library for hexagon palette containers
//!
//! A container holds a palette of colored vertices placed around the unit
//! circle and a set of colorless sample points. A point's color is always
//! derived from the palette by angular interpolation, so recoloring the
//! palette recolors every point.
//!
//! This library provides functionality to:
//! - Resolve point colors from a palette ([`resolver`])
//! - Generate sample-point patterns ([`pattern`])
//! - Move points and adjust palette colors ([`transforms`])
//! - Read and write containers in binary and text layouts ([`codec`])

pub mod cli;
pub mod codec;
pub mod color;
pub mod config;
pub mod logging;
pub mod models;
pub mod palettes;
pub mod pattern;
pub mod resolver;
pub mod transforms;

pub use models::{ColorVertex, Container, Pixel, Rgb, Warning};
pub use resolver::resolve_color;

//! Palette command implementation

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::Path;
use std::process::ExitCode;

use crate::codec::Format;
use crate::config::HexpalConfig;
use crate::models::Container;
use crate::palettes::random_hexagon;

use super::{output_format, save_output};

/// Execute the palette command: a random hexagon palette and no pixels
pub fn run_palette(
    config: &HexpalConfig,
    output: &Path,
    seed: Option<u64>,
    format: Option<Format>,
) -> ExitCode {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let palette = random_hexagon(&mut rng);
    for vertex in &palette {
        println!("{} at ({}, {})", vertex.color, vertex.position.0, vertex.position.1);
    }

    let container = Container::new().with_palette(palette);
    save_output(output, &container, output_format(output, format, config))
}

//! Generate command implementation

use std::path::Path;
use std::process::ExitCode;

use crate::codec::Format;
use crate::config::{merge_cli_overrides, CliOverrides, HexpalConfig};
use crate::pattern::{generate_pattern, PatternType};

use super::{output_format, save_output, EXIT_INVALID_ARGS};

/// Flags given to `hexpal generate`; unset ones fall back to the config.
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub pattern_type: Option<PatternType>,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub size: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub density: Option<f32>,
    pub format: Option<Format>,
}

/// Execute the generate command
pub fn run_generate(config: HexpalConfig, output: &Path, options: GenerateOptions) -> ExitCode {
    let overrides = CliOverrides {
        pattern_type: options.pattern_type,
        primary: options.primary,
        secondary: options.secondary,
        element_size: options.size,
        width: options.width,
        height: options.height,
        density: options.density,
        format: options.format,
    };

    let config = match merge_cli_overrides(config, &overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let params = match config.pattern.to_params() {
        Ok(params) => params,
        Err(e) => {
            eprintln!("Error: Invalid color: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let container = generate_pattern(&params);
    let format = output_format(output, None, &config);
    save_output(output, &container, format)
}

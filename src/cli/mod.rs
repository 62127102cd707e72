//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod convert;
mod generate;
mod palette;
mod show;
mod transform;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::codec::{self, CodecError, Format};
use crate::config::{load_config, HexpalConfig};
use crate::models::Container;
use crate::pattern::PatternType;

pub use transform::TransformArgs;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// hexpal - Hexagon palette containers: generate, transform, inspect
#[derive(Parser)]
#[command(name = "hexpal")]
#[command(about = "hexpal - Generate, transform and inspect hexagon palette containers")]
#[command(version)]
pub struct Cli {
    /// Use this hexpal.toml instead of searching for one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log more (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a pattern container from two colors
    Generate {
        /// Output container file (.txt/.ascii for text, anything else binary)
        output: PathBuf,

        /// Pattern layout
        #[arg(long = "type", value_enum)]
        pattern_type: Option<PatternType>,

        /// Primary color (RRGGBB or #RRGGBB)
        #[arg(long)]
        primary: Option<String>,

        /// Secondary color (RRGGBB or #RRGGBB)
        #[arg(long)]
        secondary: Option<String>,

        /// Element size in image pixels
        #[arg(long)]
        size: Option<u32>,

        /// Image width the grid is derived from
        #[arg(long)]
        width: Option<u32>,

        /// Image height the grid is derived from
        #[arg(long)]
        height: Option<u32>,

        /// Pattern density (0.0 - 1.0)
        #[arg(long)]
        density: Option<f32>,

        /// Output layout, overriding the extension
        #[arg(long, value_enum)]
        format: Option<Format>,
    },

    /// Move pixels and recolor the palette of a container
    Transform {
        /// Input container file
        input: PathBuf,

        /// Output container file
        output: PathBuf,

        #[command(flatten)]
        args: TransformArgs,
    },

    /// Rewrite a container in the other layout
    Convert {
        /// Input container file
        input: PathBuf,

        /// Output container file
        output: PathBuf,

        /// Output layout, overriding the extension
        #[arg(long, value_enum)]
        format: Option<Format>,
    },

    /// Print a container as text, or a JSON summary
    Show {
        /// Input container file
        input: PathBuf,

        /// Output a JSON summary instead of the text layout
        #[arg(long)]
        json: bool,
    },

    /// Print the color a container's palette gives a point
    Resolve {
        /// Input container file
        input: PathBuf,

        /// X coordinate in the domain
        #[arg(allow_negative_numbers = true)]
        x: f32,

        /// Y coordinate in the domain
        #[arg(allow_negative_numbers = true)]
        y: f32,
    },

    /// Write a fresh random hexagon palette with no pixels
    Palette {
        /// Output container file
        output: PathBuf,

        /// Seed for a reproducible palette
        #[arg(long)]
        seed: Option<u64>,

        /// Output layout, overriding the extension
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = crate::logging::init(cli.verbose) {
        eprintln!("Warning: {}", e);
    }

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    match cli.command {
        Commands::Generate {
            output,
            pattern_type,
            primary,
            secondary,
            size,
            width,
            height,
            density,
            format,
        } => generate::run_generate(
            config,
            &output,
            generate::GenerateOptions {
                pattern_type,
                primary,
                secondary,
                size,
                width,
                height,
                density,
                format,
            },
        ),
        Commands::Transform { input, output, args } => {
            transform::run_transform(&config, &input, &output, &args)
        }
        Commands::Convert { input, output, format } => {
            convert::run_convert(&config, &input, &output, format)
        }
        Commands::Show { input, json } => show::run_show(&input, json),
        Commands::Resolve { input, x, y } => show::run_resolve(&input, x, y),
        Commands::Palette { output, seed, format } => {
            palette::run_palette(&config, &output, seed, format)
        }
    }
}

/// Pick the output layout: explicit flag, then config, then extension.
pub(crate) fn output_format(path: &Path, flag: Option<Format>, config: &HexpalConfig) -> Format {
    flag.or(config.output.format).unwrap_or_else(|| Format::from_path(path))
}

/// Load a container for a command, printing text-layout warnings.
///
/// The layout comes from the file contents, so text written under any
/// extension reads back. An unreadable input is an argument problem; a
/// corrupt one is an error.
pub(crate) fn load_input(path: &Path) -> Result<Container, ExitCode> {
    match codec::read_detect(path) {
        Ok(result) => {
            for warning in &result.warnings {
                eprintln!("Warning: line {}: {}", warning.line, warning.message);
            }
            Ok(result.container)
        }
        Err(CodecError::Io(e)) => {
            eprintln!("Error: Cannot open input file '{}': {}", path.display(), e);
            Err(ExitCode::from(EXIT_INVALID_ARGS))
        }
        Err(e) => {
            eprintln!("Error: Cannot read '{}': {}", path.display(), e);
            Err(ExitCode::from(EXIT_ERROR))
        }
    }
}

/// Save a command's result and report where it went.
pub(crate) fn save_output(path: &Path, container: &Container, format: Format) -> ExitCode {
    if let Err(e) = codec::save_as(path, container, format) {
        eprintln!("Error: Failed to save '{}': {}", path.display(), e);
        return ExitCode::from(EXIT_ERROR);
    }
    println!("Saved: {}", path.display());
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_output_format_precedence() {
        let mut config = HexpalConfig::default();
        let path = Path::new("out.txt");
        assert_eq!(output_format(path, None, &config), Format::Text);

        config.output.format = Some(Format::Binary);
        assert_eq!(output_format(path, None, &config), Format::Binary);
        assert_eq!(output_format(path, Some(Format::Text), &config), Format::Text);
    }

    #[test]
    fn test_parse_generate_args() {
        let cli = Cli::try_parse_from([
            "hexpal", "-vv", "generate", "out.bin", "--type", "circles", "--size", "8",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Generate { pattern_type, size, .. } => {
                assert_eq!(pattern_type, Some(PatternType::Circles));
                assert_eq!(size, Some(8));
            }
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_parse_resolve_negative_coordinates() {
        let cli = Cli::try_parse_from(["hexpal", "resolve", "c.bin", "-0.5", "0.25"]).unwrap();
        match cli.command {
            Commands::Resolve { x, y, .. } => {
                assert_eq!(x, -0.5);
                assert_eq!(y, 0.25);
            }
            _ => panic!("expected resolve"),
        }
    }
}

//! Transform command implementation

use clap::Args;
use std::path::Path;
use std::process::ExitCode;

use crate::config::HexpalConfig;
use crate::transforms::{preview, ColorParams, GeometricParams};

use super::{load_input, output_format, save_output, EXIT_INVALID_ARGS};

/// Transform flags; each one overrides the matching `hexpal.toml` value.
#[derive(Debug, Default, Args)]
pub struct TransformArgs {
    /// Uniform scale factor
    #[arg(long)]
    pub scale: Option<f32>,

    /// Counter-clockwise rotation in degrees
    #[arg(long, allow_negative_numbers = true)]
    pub rotate: Option<f32>,

    /// Translation along X
    #[arg(long, allow_negative_numbers = true)]
    pub offset_x: Option<f32>,

    /// Translation along Y
    #[arg(long, allow_negative_numbers = true)]
    pub offset_y: Option<f32>,

    /// Negate X coordinates
    #[arg(long)]
    pub mirror_x: bool,

    /// Negate Y coordinates
    #[arg(long)]
    pub mirror_y: bool,

    /// Added to every channel
    #[arg(long, allow_negative_numbers = true)]
    pub brightness: Option<i32>,

    /// Contrast factor around mid-gray
    #[arg(long)]
    pub contrast: Option<f32>,

    /// Saturation factor around the channel mean
    #[arg(long)]
    pub saturation: Option<f32>,

    /// Legacy hue nudge
    #[arg(long, allow_negative_numbers = true)]
    pub hue: Option<f32>,
}

impl TransformArgs {
    /// Layer these flags over configured defaults.
    pub fn resolve(
        &self,
        geometric: GeometricParams,
        color: ColorParams,
    ) -> (GeometricParams, ColorParams) {
        let geometric = GeometricParams {
            scale: self.scale.unwrap_or(geometric.scale),
            rotation_degrees: self.rotate.unwrap_or(geometric.rotation_degrees),
            offset_x: self.offset_x.unwrap_or(geometric.offset_x),
            offset_y: self.offset_y.unwrap_or(geometric.offset_y),
            mirror_x: self.mirror_x || geometric.mirror_x,
            mirror_y: self.mirror_y || geometric.mirror_y,
        };
        let color = ColorParams {
            brightness: self.brightness.unwrap_or(color.brightness),
            contrast: self.contrast.unwrap_or(color.contrast),
            saturation: self.saturation.unwrap_or(color.saturation),
            hue: self.hue.unwrap_or(color.hue),
        };
        (geometric, color)
    }
}

/// Execute the transform command
///
/// Pixels get the geometric transform, palette colors get the color
/// transform.
pub fn run_transform(
    config: &HexpalConfig,
    input: &Path,
    output: &Path,
    args: &TransformArgs,
) -> ExitCode {
    let (geometric, color) = args.resolve(config.transform, config.color);
    if !geometric.scale.is_finite() || geometric.scale <= 0.0 {
        eprintln!("Error: --scale must be a positive number");
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let container = match load_input(input) {
        Ok(container) => container,
        Err(code) => return code,
    };

    tracing::info!(%geometric, %color, "transforming container");
    let transformed = preview(&container, &geometric, &color);
    save_output(output, &transformed, output_format(output, None, config))
}

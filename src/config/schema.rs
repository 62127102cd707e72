//! Configuration schema types for `hexpal.toml`
//!
//! Every section is optional; missing keys fall back to the same defaults
//! the library uses.

use serde::{Deserialize, Serialize};

use crate::codec::Format;
use crate::color::{parse_color, ColorError};
use crate::pattern::{PatternParams, PatternType};
use crate::transforms::{ColorParams, GeometricParams};

/// Defaults for `hexpal generate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternConfig {
    /// Layout to generate
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    /// Primary color, `RRGGBB` or `#RRGGBB`
    pub primary: String,
    /// Secondary color, `RRGGBB` or `#RRGGBB`
    pub secondary: String,
    /// Tile edge, circle spacing, gradient steps or stripe width
    pub element_size: u32,
    /// Image width the grid pitch is derived from
    pub width: u32,
    /// Image height the grid pitch is derived from
    pub height: u32,
    /// Carried through to the generator, in `[0, 1]`
    pub density: f32,
}

impl Default for PatternConfig {
    fn default() -> Self {
        let defaults = PatternParams::default();
        Self {
            pattern_type: defaults.pattern_type,
            primary: defaults.primary.to_string(),
            secondary: defaults.secondary.to_string(),
            element_size: defaults.element_size,
            width: defaults.image_width,
            height: defaults.image_height,
            density: defaults.density,
        }
    }
}

impl PatternConfig {
    /// Turn the section into generator parameters.
    pub fn to_params(&self) -> Result<PatternParams, ColorError> {
        Ok(PatternParams {
            pattern_type: self.pattern_type,
            primary: parse_color(&self.primary)?,
            secondary: parse_color(&self.secondary)?,
            element_size: self.element_size,
            image_width: self.width,
            image_height: self.height,
            density: self.density,
        })
    }
}

/// Output settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Layout used when no `--format` flag is given; the output extension
    /// decides when this is unset too
    pub format: Option<Format>,
}

/// Complete hexpal.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HexpalConfig {
    /// Pattern generator defaults
    pub pattern: PatternConfig,
    /// Geometric transform defaults
    pub transform: GeometricParams,
    /// Color transform defaults
    pub color: ColorParams,
    /// Output settings
    pub output: OutputConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "pattern.width")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "hexpal.toml: '{}' {}", self.field, self.message)
    }
}

fn check_color(field: &str, value: &str, errors: &mut Vec<ConfigValidationError>) {
    if let Err(e) = parse_color(value) {
        errors.push(ConfigValidationError {
            field: field.to_string(),
            message: format!("is not a valid color: {}", e),
        });
    }
}

impl HexpalConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        check_color("pattern.primary", &self.pattern.primary, &mut errors);
        check_color("pattern.secondary", &self.pattern.secondary, &mut errors);

        if self.pattern.width == 0 {
            errors.push(ConfigValidationError {
                field: "pattern.width".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if self.pattern.height == 0 {
            errors.push(ConfigValidationError {
                field: "pattern.height".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }
        if !(0.0..=1.0).contains(&self.pattern.density) {
            errors.push(ConfigValidationError {
                field: "pattern.density".to_string(),
                message: "must be between 0 and 1".to_string(),
            });
        }

        if !self.transform.scale.is_finite() || self.transform.scale <= 0.0 {
            errors.push(ConfigValidationError {
                field: "transform.scale".to_string(),
                message: "must be a positive number".to_string(),
            });
        }

        for (field, value) in [
            ("transform.rotation_degrees", self.transform.rotation_degrees),
            ("transform.offset_x", self.transform.offset_x),
            ("transform.offset_y", self.transform.offset_y),
            ("color.contrast", self.color.contrast),
            ("color.saturation", self.color.saturation),
            ("color.hue", self.color.hue),
        ] {
            if !value.is_finite() {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: "must be a finite number".to_string(),
                });
            }
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rgb;

    #[test]
    fn test_empty_config_parse() {
        let config: HexpalConfig = toml::from_str("").unwrap();
        assert_eq!(config, HexpalConfig::default());
        assert!(config.is_valid());
    }

    #[test]
    fn test_full_config_parse() {
        let toml = r##"
[pattern]
type = "stripes"
primary = "#FF0000"
secondary = "00FF00"
element_size = 12
width = 640
height = 480
density = 0.25

[transform]
scale = 1.5
rotation_degrees = 30.0
mirror_y = true

[color]
brightness = 10
hue = 5.0

[output]
format = "text"
"##;
        let config: HexpalConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.pattern.pattern_type, PatternType::Stripes);
        assert_eq!(config.pattern.width, 640);
        assert_eq!(config.transform.scale, 1.5);
        assert!(config.transform.mirror_y);
        assert_eq!(config.transform.offset_x, 0.0);
        assert_eq!(config.color.brightness, 10);
        assert_eq!(config.color.contrast, 1.0);
        assert_eq!(config.output.format, Some(Format::Text));
        assert!(config.is_valid());

        let params = config.pattern.to_params().unwrap();
        assert_eq!(params.primary, Rgb::new(255, 0, 0));
        assert_eq!(params.secondary, Rgb::new(0, 255, 0));
        assert_eq!(params.image_height, 480);
    }

    #[test]
    fn test_unknown_pattern_type_rejected() {
        let result: Result<HexpalConfig, _> = toml::from_str("[pattern]\ntype = \"zigzag\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_validation_bad_color() {
        let mut config = HexpalConfig::default();
        config.pattern.primary = "red".to_string();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "pattern.primary");
    }

    #[test]
    fn test_validation_zero_dimensions() {
        let mut config = HexpalConfig::default();
        config.pattern.width = 0;
        config.pattern.height = 0;
        assert_eq!(config.validate().len(), 2);
    }

    #[test]
    fn test_validation_scale_and_density() {
        let mut config = HexpalConfig::default();
        config.transform.scale = 0.0;
        config.pattern.density = 1.5;
        let fields: Vec<String> = config.validate().into_iter().map(|e| e.field).collect();
        assert!(fields.contains(&"transform.scale".to_string()));
        assert!(fields.contains(&"pattern.density".to_string()));
    }

    #[test]
    fn test_validation_message_format() {
        let error = ConfigValidationError {
            field: "pattern.width".to_string(),
            message: "must be a positive integer".to_string(),
        };
        assert_eq!(error.to_string(), "hexpal.toml: 'pattern.width' must be a positive integer");
    }
}

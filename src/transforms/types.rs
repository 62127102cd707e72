//! Transform parameter records
//!
//! `GeometricParams` moves pixels; `ColorParams` adjusts colors. Both are
//! plain values with serde support so they can come straight out of the
//! `[transform]` and `[color]` config sections.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters for the pixel-moving transform.
///
/// Applied per pixel in a fixed order: scale, rotate, translate, mirror.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometricParams {
    /// Uniform scale factor (1.0 = unchanged)
    pub scale: f32,
    /// Counter-clockwise rotation in degrees
    pub rotation_degrees: f32,
    /// Translation along X, applied after rotation
    pub offset_x: f32,
    /// Translation along Y, applied after rotation
    pub offset_y: f32,
    /// Negate X as the last step
    pub mirror_x: bool,
    /// Negate Y as the last step
    pub mirror_y: bool,
}

impl Default for GeometricParams {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotation_degrees: 0.0,
            offset_x: 0.0,
            offset_y: 0.0,
            mirror_x: false,
            mirror_y: false,
        }
    }
}

impl GeometricParams {
    /// True when applying these parameters leaves every pixel where it is.
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for GeometricParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "scale {} rotate {}° offset ({}, {})",
            self.scale, self.rotation_degrees, self.offset_x, self.offset_y
        )?;
        if self.mirror_x {
            write!(f, " mirror-x")?;
        }
        if self.mirror_y {
            write!(f, " mirror-y")?;
        }
        Ok(())
    }
}

/// Parameters for the per-color adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorParams {
    /// Added to every channel
    pub brightness: i32,
    /// Stretch around mid-gray (1.0 = unchanged)
    pub contrast: f32,
    /// Stretch around the channel mean (1.0 = unchanged, 0.0 = gray)
    pub saturation: f32,
    /// Legacy hue nudge; see [`apply_color_transform`](super::apply_color_transform)
    pub hue: f32,
}

impl Default for ColorParams {
    fn default() -> Self {
        Self {
            brightness: 0,
            contrast: 1.0,
            saturation: 1.0,
            hue: 0.0,
        }
    }
}

impl ColorParams {
    /// True when these parameters describe "no change".
    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

impl fmt::Display for ColorParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "brightness {:+} contrast {} saturation {} hue {}",
            self.brightness, self.contrast, self.saturation, self.hue
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_identity() {
        assert!(GeometricParams::default().is_identity());
        assert!(ColorParams::default().is_identity());
    }

    #[test]
    fn test_non_identity() {
        let geo = GeometricParams { mirror_y: true, ..Default::default() };
        assert!(!geo.is_identity());
        let color = ColorParams { hue: 5.0, ..Default::default() };
        assert!(!color.is_identity());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let geo: GeometricParams = toml::from_str("scale = 2.0\nmirror_x = true").unwrap();
        assert_eq!(geo.scale, 2.0);
        assert!(geo.mirror_x);
        assert_eq!(geo.rotation_degrees, 0.0);

        let color: ColorParams = toml::from_str("brightness = -20").unwrap();
        assert_eq!(color.brightness, -20);
        assert_eq!(color.contrast, 1.0);
    }

    #[test]
    fn test_display() {
        let geo = GeometricParams { scale: 2.0, mirror_x: true, ..Default::default() };
        assert_eq!(geo.to_string(), "scale 2 rotate 0° offset (0, 0) mirror-x");
        let color = ColorParams { brightness: 5, ..Default::default() };
        assert_eq!(color.to_string(), "brightness +5 contrast 1 saturation 1 hue 0");
    }
}

//! Color adjustments: brightness, contrast, saturation and the legacy hue nudge

use crate::models::{ColorVertex, Container, Rgb};
use crate::resolver::ColorWheel;

use super::geometric::apply_geometric_transform;
use super::types::{ColorParams, GeometricParams};

fn clamp_channel(value: i32) -> i32 {
    value.clamp(0, 255)
}

/// Adjust a single color.
///
/// Stages run in order, each working on whole-number channels and clamping
/// to `[0, 255]` before the next:
///
/// 1. brightness: `c + brightness`
/// 2. contrast: `128 + (c - 128) * contrast`
/// 3. saturation: `gray + (c - gray) * saturation`, `gray` being the mean of
///    the post-contrast channels
/// 4. hue: when `hue != 0` and the color is not a pure gray, shift red and
///    green up and blue down by `hue * 0.3`. The shift is truncated to a
///    whole number before it is applied, so `hue = 5` moves each channel by
///    1, not 1.5.
///
/// The hue stage is not a hue rotation. It keeps the behavior of existing
/// files and presets; a value of `hue` has no meaning in degrees.
pub fn apply_color_transform(color: Rgb, params: &ColorParams) -> Rgb {
    let mut ch = color.channels().map(i32::from);

    for c in &mut ch {
        *c = clamp_channel(c.saturating_add(params.brightness));
    }

    for c in &mut ch {
        *c = clamp_channel(((*c - 128) as f32 * params.contrast + 128.0) as i32);
    }

    let gray = ch.iter().sum::<i32>() as f32 / 3.0;
    for c in &mut ch {
        *c = clamp_channel((gray + (*c as f32 - gray) * params.saturation) as i32);
    }

    if params.hue != 0.0 {
        let max = ch.iter().copied().max().unwrap_or(0);
        let min = ch.iter().copied().min().unwrap_or(0);
        if max != min {
            let shift = (params.hue * 0.3) as i32;
            ch[0] = clamp_channel(ch[0].saturating_add(shift));
            ch[1] = clamp_channel(ch[1].saturating_add(shift));
            ch[2] = clamp_channel(ch[2].saturating_sub(shift));
        }
    }

    // Every channel went through clamp_channel, so the casts are lossless
    Rgb::new(ch[0] as u8, ch[1] as u8, ch[2] as u8)
}

/// Contrast with the factor truncated to a whole number first.
///
/// Older tooling exposed contrast this way: factors below 1 collapse to
/// flat mid-gray and fractional parts are dropped.
pub fn apply_stepped_contrast(color: Rgb, factor: f64) -> Rgb {
    let factor = factor as i32;
    let [r, g, b] = color.channels().map(|c| {
        let stretched = (i32::from(c) - 128).saturating_mul(factor).saturating_add(128);
        clamp_channel(stretched) as u8
    });
    Rgb::new(r, g, b)
}

/// Apply `params` to every palette color, keeping positions and pixels.
///
/// Identity parameters return an unchanged copy.
pub fn apply_color_transform_to_palette(container: &Container, params: &ColorParams) -> Container {
    if params.is_identity() {
        return container.clone();
    }

    tracing::debug!(vertices = container.palette.len(), %params, "recoloring palette");
    let palette = container
        .palette
        .iter()
        .map(|v| ColorVertex { color: apply_color_transform(v.color, params), ..*v })
        .collect();
    Container::from_parts(palette, container.pixels.clone())
}

/// Resolve each pixel's color and adjust it, in pixel order.
pub fn recolor_pixels(container: &Container, params: &ColorParams) -> Vec<Rgb> {
    let wheel = ColorWheel::new(&container.palette);
    container
        .pixels
        .iter()
        .map(|p| apply_color_transform(wheel.resolve((p.x, p.y)), params))
        .collect()
}

/// Resolve each pixel's color and apply stepped contrast, in pixel order.
pub fn stepped_contrast_pixels(container: &Container, factor: f64) -> Vec<Rgb> {
    let wheel = ColorWheel::new(&container.palette);
    container
        .pixels
        .iter()
        .map(|p| apply_stepped_contrast(wheel.resolve((p.x, p.y)), factor))
        .collect()
}

/// Both transforms at once: recolored palette, moved pixels.
///
/// This is what an editor shows before committing; committing the same
/// parameters yields the same container.
pub fn preview(container: &Container, geometric: &GeometricParams, color: &ColorParams) -> Container {
    let moved = apply_geometric_transform(container, geometric);
    apply_color_transform_to_palette(&moved, color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pixel;

    fn params(brightness: i32, contrast: f32, saturation: f32, hue: f32) -> ColorParams {
        ColorParams { brightness, contrast, saturation, hue }
    }

    #[test]
    fn test_identity() {
        let c = Rgb::new(10, 20, 30);
        assert_eq!(apply_color_transform(c, &ColorParams::default()), c);
    }

    #[test]
    fn test_brightness_clamps() {
        let out = apply_color_transform(Rgb::new(250, 100, 0), &params(10, 1.0, 1.0, 0.0));
        assert_eq!(out, Rgb::new(255, 110, 10));

        let out = apply_color_transform(Rgb::new(30, 60, 90), &params(-300, 1.0, 1.0, 0.0));
        assert_eq!(out, Rgb::BLACK);
    }

    #[test]
    fn test_contrast() {
        let out = apply_color_transform(Rgb::new(128, 100, 156), &params(0, 2.0, 1.0, 0.0));
        assert_eq!(out, Rgb::new(128, 72, 184));
    }

    #[test]
    fn test_zero_saturation_is_gray() {
        let out = apply_color_transform(Rgb::new(30, 60, 90), &params(0, 1.0, 0.0, 0.0));
        assert_eq!(out, Rgb::new(60, 60, 60));
    }

    #[test]
    fn test_brightness_runs_before_contrast() {
        let out = apply_color_transform(Rgb::new(128, 128, 128), &params(10, 2.0, 1.0, 0.0));
        assert_eq!(out, Rgb::new(148, 148, 148));
    }

    #[test]
    fn test_hue_nudge_is_not_a_rotation() {
        // Known limitation: red and green rise together, blue falls
        let out = apply_color_transform(Rgb::new(100, 150, 200), &params(0, 1.0, 1.0, 10.0));
        assert_eq!(out, Rgb::new(103, 153, 197));

        let out = apply_color_transform(Rgb::new(100, 150, 200), &params(0, 1.0, 1.0, -10.0));
        assert_eq!(out, Rgb::new(97, 147, 203));
    }

    #[test]
    fn test_hue_shift_is_whole_number() {
        // 5 * 0.3 = 1.5 moves each channel by 1
        let out = apply_color_transform(Rgb::new(100, 150, 200), &params(0, 1.0, 1.0, 5.0));
        assert_eq!(out, Rgb::new(101, 151, 199));

        // Below one whole step the color is unchanged
        let out = apply_color_transform(Rgb::new(100, 150, 200), &params(0, 1.0, 1.0, 3.0));
        assert_eq!(out, Rgb::new(100, 150, 200));
    }

    #[test]
    fn test_hue_skips_grays() {
        let gray = Rgb::new(100, 100, 100);
        assert_eq!(apply_color_transform(gray, &params(0, 1.0, 1.0, 50.0)), gray);
    }

    #[test]
    fn test_hue_clamps() {
        let out = apply_color_transform(Rgb::new(250, 0, 5), &params(0, 1.0, 1.0, 100.0));
        assert_eq!(out, Rgb::new(255, 30, 0));
    }

    #[test]
    fn test_stepped_contrast_truncates_factor() {
        let c = Rgb::new(100, 128, 200);
        assert_eq!(apply_stepped_contrast(c, 1.9), c);
        assert_eq!(apply_stepped_contrast(c, 2.5), Rgb::new(72, 128, 255));
        assert_eq!(apply_stepped_contrast(c, 0.5), Rgb::new(128, 128, 128));
    }

    fn sample() -> Container {
        Container::from_parts(
            vec![
                ColorVertex::new(Rgb::new(100, 150, 200), 1.0, 0.0),
                ColorVertex::new(Rgb::new(30, 60, 90), -1.0, 0.0),
            ],
            vec![Pixel::new(1.0, 0.0), Pixel::new(-1.0, 0.0), Pixel::new(0.0, 0.0)],
        )
    }

    #[test]
    fn test_palette_transform_keeps_positions_and_pixels() {
        let c = sample();
        let out = apply_color_transform_to_palette(&c, &params(0, 1.0, 0.0, 0.0));
        assert_eq!(out.palette[0].color, Rgb::new(150, 150, 150));
        assert_eq!(out.palette[1].color, Rgb::new(60, 60, 60));
        assert_eq!(out.palette[0].position, (1.0, 0.0));
        assert_eq!(out.pixels, c.pixels);
    }

    #[test]
    fn test_palette_transform_identity_is_copy() {
        let c = sample();
        assert_eq!(apply_color_transform_to_palette(&c, &ColorParams::default()), c);
    }

    #[test]
    fn test_recolor_pixels() {
        let colors = recolor_pixels(&sample(), &params(10, 1.0, 1.0, 0.0));
        assert_eq!(colors, vec![Rgb::new(110, 160, 210), Rgb::new(40, 70, 100), Rgb::new(10, 10, 10)]);
    }

    #[test]
    fn test_stepped_contrast_pixels() {
        let colors = stepped_contrast_pixels(&sample(), 0.0);
        assert_eq!(colors, vec![Rgb::new(128, 128, 128); 3]);
    }

    #[test]
    fn test_preview_combines_both() {
        let geo = GeometricParams { mirror_x: true, ..Default::default() };
        let color = params(0, 1.0, 0.0, 0.0);
        let out = preview(&sample(), &geo, &color);
        assert_eq!(out.pixels[0], Pixel::new(-1.0, 0.0));
        assert_eq!(out.palette[0].color, Rgb::new(150, 150, 150));
    }
}

//! Geometric transform: moves pixels, leaves the palette alone

use crate::models::{Container, Pixel};

use super::types::GeometricParams;

/// Apply `params` to every pixel of `container`, producing a new container.
///
/// The palette is copied unchanged; only pixels move. Per pixel the steps
/// run in a fixed order: scale, rotate (skipped at 0°), translate, mirror.
pub fn apply_geometric_transform(container: &Container, params: &GeometricParams) -> Container {
    tracing::debug!(pixels = container.pixels.len(), %params, "applying geometric transform");

    let rotation = (params.rotation_degrees != 0.0).then(|| {
        let radians = f64::from(params.rotation_degrees).to_radians();
        (radians.cos(), radians.sin())
    });

    let pixels = container
        .pixels
        .iter()
        .map(|pixel| transform_pixel(*pixel, params, rotation))
        .collect();

    Container::from_parts(container.palette.clone(), pixels)
}

fn transform_pixel(pixel: Pixel, params: &GeometricParams, rotation: Option<(f64, f64)>) -> Pixel {
    let mut x = pixel.x * params.scale;
    let mut y = pixel.y * params.scale;

    if let Some((cos, sin)) = rotation {
        let (fx, fy) = (f64::from(x), f64::from(y));
        x = (fx * cos - fy * sin) as f32;
        y = (fx * sin + fy * cos) as f32;
    }

    x += params.offset_x;
    y += params.offset_y;

    if params.mirror_x {
        x = -x;
    }
    if params.mirror_y {
        y = -y;
    }

    Pixel::new(x, y)
}

//! Show and resolve command implementations

use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

use crate::codec::to_text;
use crate::models::Container;
use crate::resolver::resolve_color;

use super::{load_input, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Debug, Serialize)]
struct VertexSummary {
    color: String,
    x: f32,
    y: f32,
}

#[derive(Debug, Serialize)]
struct ContainerSummary {
    vertices: Vec<VertexSummary>,
    pixel_count: usize,
    bounds: Option<[f32; 4]>,
}

impl ContainerSummary {
    fn of(container: &Container) -> Self {
        let vertices = container
            .palette
            .iter()
            .map(|v| VertexSummary {
                color: v.color.to_string(),
                x: v.position.0,
                y: v.position.1,
            })
            .collect();

        let bounds = container.pixels.iter().fold(None, |acc: Option<[f32; 4]>, p| {
            Some(match acc {
                None => [p.x, p.y, p.x, p.y],
                Some([min_x, min_y, max_x, max_y]) => {
                    [min_x.min(p.x), min_y.min(p.y), max_x.max(p.x), max_y.max(p.y)]
                }
            })
        });

        Self { vertices, pixel_count: container.pixels.len(), bounds }
    }
}

/// Execute the show command
pub fn run_show(input: &Path, json: bool) -> ExitCode {
    let container = match load_input(input) {
        Ok(container) => container,
        Err(code) => return code,
    };

    if json {
        match serde_json::to_string_pretty(&ContainerSummary::of(&container)) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Error: Failed to serialize summary: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        print!("{}", to_text(&container));
    }

    ExitCode::from(EXIT_SUCCESS)
}

/// Execute the resolve command
pub fn run_resolve(input: &Path, x: f32, y: f32) -> ExitCode {
    let container = match load_input(input) {
        Ok(container) => container,
        Err(code) => return code,
    };

    println!("{}", resolve_color((x, y), &container.palette));
    ExitCode::from(EXIT_SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ColorVertex, Pixel, Rgb};

    #[test]
    fn test_summary_of_container() {
        let container = Container::from_parts(
            vec![ColorVertex::new(Rgb::new(0xAB, 0xCD, 0xEF), 1.0, 0.0)],
            vec![Pixel::new(-0.5, 0.25), Pixel::new(0.5, -0.75)],
        );
        let summary = ContainerSummary::of(&container);
        assert_eq!(summary.pixel_count, 2);
        assert_eq!(summary.vertices[0].color, "ABCDEF");
        assert_eq!(summary.bounds, Some([-0.5, -0.75, 0.5, 0.25]));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["vertices"][0]["x"], 1.0);
        assert_eq!(json["pixel_count"], 2);
    }

    #[test]
    fn test_summary_of_empty_container() {
        let summary = ContainerSummary::of(&Container::new());
        assert!(summary.vertices.is_empty());
        assert_eq!(summary.bounds, None);
    }
}

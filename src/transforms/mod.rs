//! Transform operations for containers and colors
//!
//! # Module Structure
//!
//! - [`types`] - Parameter records for both transform kinds
//! - [`geometric`] - Pixel transform (scale, rotate, translate, mirror)
//! - [`color`] - Color adjustment, palette recoloring and previews

pub mod color;
pub mod geometric;
pub mod types;

// Re-export main types at the module level for convenience
pub use color::{
    apply_color_transform, apply_color_transform_to_palette, apply_stepped_contrast, preview,
    recolor_pixels, stepped_contrast_pixels,
};
pub use geometric::apply_geometric_transform;
pub use types::{ColorParams, GeometricParams};

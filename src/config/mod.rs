//! Configuration for the hexpal command line
//!
//! Provides types and parsing for the optional `hexpal.toml` file.

pub mod loader;
pub mod schema;

pub use loader::*;
pub use schema::*;

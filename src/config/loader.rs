//! Configuration loading and discovery for `hexpal.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::HexpalConfig;
use crate::codec::Format;
use crate::pattern::PatternType;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in each directory
pub const CONFIG_FILE_NAME: &str = "hexpal.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse hexpal.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override pattern type
    pub pattern_type: Option<PatternType>,
    /// Override primary color
    pub primary: Option<String>,
    /// Override secondary color
    pub secondary: Option<String>,
    /// Override element size
    pub element_size: Option<u32>,
    /// Override image width
    pub width: Option<u32>,
    /// Override image height
    pub height: Option<u32>,
    /// Override density
    pub density: Option<f32>,
    /// Override output format
    pub format: Option<Format>,
}

/// Find hexpal.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for hexpal.toml
/// 2. Check XDG_CONFIG_HOME/hexpal/hexpal.toml (or ~/.config/hexpal/hexpal.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find hexpal.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("hexpal").join(CONFIG_FILE_NAME);
    config_path.exists().then_some(config_path)
}

/// Find hexpal.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from a hexpal.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] to locate one. If nothing is found, returns the defaults.
///
/// # Example
/// ```ignore
/// let config = load_config(None)?;
/// let config = load_config(Some(Path::new("art/hexpal.toml")))?;
/// ```
pub fn load_config(path: Option<&Path>) -> Result<HexpalConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            tracing::debug!("no hexpal.toml found, using defaults");
            Ok(default_config())
        }
    }
}

fn load_config_file(path: &Path) -> Result<HexpalConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: HexpalConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

/// Configuration used when no hexpal.toml is found.
pub fn default_config() -> HexpalConfig {
    HexpalConfig::default()
}

/// Apply CLI overrides on top of a loaded configuration.
///
/// The result is validated again so a bad flag fails the same way a bad
/// file entry does.
pub fn merge_cli_overrides(
    mut config: HexpalConfig,
    overrides: &CliOverrides,
) -> Result<HexpalConfig, ConfigError> {
    if let Some(pattern_type) = overrides.pattern_type {
        config.pattern.pattern_type = pattern_type;
    }
    if let Some(ref primary) = overrides.primary {
        config.pattern.primary = primary.clone();
    }
    if let Some(ref secondary) = overrides.secondary {
        config.pattern.secondary = secondary.clone();
    }
    if let Some(size) = overrides.element_size {
        config.pattern.element_size = size;
    }
    if let Some(width) = overrides.width {
        config.pattern.width = width;
    }
    if let Some(height) = overrides.height {
        config.pattern.height = height;
    }
    if let Some(density) = overrides.density {
        config.pattern.density = density;
    }
    if let Some(format) = overrides.format {
        config.output.format = Some(format);
    }

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE_NAME);
        fs::write(&path, contents).expect("should write config");
        path
    }

    #[test]
    fn test_find_config_from_walks_up() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");
        let nested = temp.path().join("a/b/c");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config_from(nested), Some(config_path));
    }

    #[test]
    fn test_find_config_from_prefers_nearest() {
        let temp = TempDir::new().expect("should create temp dir");
        write_config(temp.path(), "");
        let inner = temp.path().join("inner");
        fs::create_dir_all(&inner).unwrap();
        let inner_config = write_config(&inner, "");

        assert_eq!(find_config_from(inner), Some(inner_config));
    }

    #[test]
    fn test_load_config_explicit_path() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(
            temp.path(),
            "[pattern]\ntype = \"circles\"\nelement_size = 8\n",
        );

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.pattern.pattern_type, PatternType::Circles);
        assert_eq!(config.pattern.element_size, 8);
        assert_eq!(config.pattern.width, 400);
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(temp.path(), "[pattern\nwidth = ");

        let result = load_config(Some(&path));
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let path = write_config(temp.path(), "[pattern]\nwidth = 0\nprimary = \"xyz\"\n");

        match load_config(Some(&path)) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.iter().any(|e| e.contains("pattern.width")));
                assert!(errors.iter().any(|e| e.contains("pattern.primary")));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_cli_overrides() {
        let overrides = CliOverrides {
            pattern_type: Some(PatternType::Gradient),
            primary: Some("#000000".to_string()),
            width: Some(100),
            format: Some(Format::Text),
            ..Default::default()
        };

        let merged = merge_cli_overrides(default_config(), &overrides).unwrap();
        assert_eq!(merged.pattern.pattern_type, PatternType::Gradient);
        assert_eq!(merged.pattern.primary, "#000000");
        assert_eq!(merged.pattern.width, 100);
        assert_eq!(merged.pattern.height, 400);
        assert_eq!(merged.output.format, Some(Format::Text));
    }

    #[test]
    fn test_merge_cli_overrides_empty_is_noop() {
        let merged = merge_cli_overrides(default_config(), &CliOverrides::default()).unwrap();
        assert_eq!(merged, default_config());
    }

    #[test]
    fn test_merge_cli_overrides_revalidates() {
        let overrides = CliOverrides { height: Some(0), ..Default::default() };
        let result = merge_cli_overrides(default_config(), &overrides);
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}

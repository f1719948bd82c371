//! Configuration for the hosteldesk TUI.
//!
//! A single flat TOML file merged with `HOSTELDESK_*` environment
//! overrides. Every knob has a default, so the dashboard runs with no
//! file at all; an explicitly passed path must exist.

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use hosteldesk_core::ListingLimits;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config struct ──────────────────────────────────────────────

/// All tunable UI constants.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UiConfig {
    /// Toast lifetime before auto-dismiss, in milliseconds.
    #[serde(default = "default_notice_duration_ms")]
    pub notice_duration_ms: u64,

    /// Quiet period before a search draft is applied, in milliseconds.
    #[serde(default = "default_search_debounce_ms")]
    pub search_debounce_ms: u64,

    /// Upper size bound for a listing photo, in bytes.
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,

    /// MIME types accepted as listing photos.
    #[serde(default = "default_allowed_image_types")]
    pub allowed_image_types: Vec<String>,

    /// Lower bound on room-type entries in the listing form.
    #[serde(default = "default_min_room_types")]
    pub min_room_types: usize,

    /// Upper bound on room-type entries in the listing form.
    #[serde(default = "default_max_room_types")]
    pub max_room_types: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_duration_ms: default_notice_duration_ms(),
            search_debounce_ms: default_search_debounce_ms(),
            max_image_bytes: default_max_image_bytes(),
            allowed_image_types: default_allowed_image_types(),
            min_room_types: default_min_room_types(),
            max_room_types: default_max_room_types(),
        }
    }
}

fn default_notice_duration_ms() -> u64 {
    5000
}
fn default_search_debounce_ms() -> u64 {
    300
}
fn default_max_image_bytes() -> u64 {
    5 * 1024 * 1024
}
fn default_allowed_image_types() -> Vec<String> {
    vec![
        "image/jpeg".to_string(),
        "image/png".to_string(),
        "image/webp".to_string(),
    ]
}
fn default_min_room_types() -> usize {
    1
}
fn default_max_room_types() -> usize {
    10
}

impl UiConfig {
    /// Rejects combinations the dashboard cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_room_types < 1 {
            return Err(ConfigError::Validation {
                field: "min_room_types".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.max_room_types < self.min_room_types {
            return Err(ConfigError::Validation {
                field: "max_room_types".into(),
                reason: format!(
                    "must be >= min_room_types ({})",
                    self.min_room_types
                ),
            });
        }
        if self.allowed_image_types.is_empty() {
            return Err(ConfigError::Validation {
                field: "allowed_image_types".into(),
                reason: "must list at least one MIME type".into(),
            });
        }
        Ok(())
    }

    /// Bounds handed to the listing form.
    pub fn listing_limits(&self) -> ListingLimits {
        ListingLimits {
            min_room_types: self.min_room_types,
            max_room_types: self.max_room_types,
            max_image_bytes: self.max_image_bytes,
            allowed_image_types: self.allowed_image_types.clone(),
        }
    }

    pub fn notice_lifetime(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }

    pub fn search_delay(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "hosteldesk", "hosteldesk").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("hosteldesk");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from the canonical path (which may be absent) plus environment.
pub fn load_config() -> Result<UiConfig, ConfigError> {
    extract(Toml::file(config_path()))
}

/// Load from an explicitly chosen file, which must exist, plus
/// environment.
pub fn load_config_from(path: &Path) -> Result<UiConfig, ConfigError> {
    extract(Toml::file_exact(path))
}

/// Load from the canonical path, falling back to defaults on any error.
pub fn load_config_or_default() -> UiConfig {
    load_config().unwrap_or_default()
}

fn extract(file: figment::providers::Data<figment::providers::Toml>) -> Result<UiConfig, ConfigError> {
    let config: UiConfig = Figment::new()
        .merge(Serialized::defaults(UiConfig::default()))
        .merge(file)
        .merge(Env::prefixed("HOSTELDESK_"))
        .extract()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_match_the_documented_constants() {
        let config = UiConfig::default();
        assert_eq!(config.notice_duration_ms, 5000);
        assert_eq!(config.search_debounce_ms, 300);
        assert_eq!(config.max_image_bytes, 5_242_880);
        assert_eq!(
            config.allowed_image_types,
            vec!["image/jpeg", "image/png", "image/webp"]
        );
        assert_eq!(config.min_room_types, 1);
        assert_eq!(config.max_room_types, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_override_defaults_field_by_field() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "notice_duration_ms = 2500").unwrap();
        writeln!(file, "max_room_types = 6").unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.notice_duration_ms, 2500);
        assert_eq!(config.max_room_types, 6);
        assert_eq!(config.search_debounce_ms, 300);
    }

    #[test]
    fn an_explicit_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            load_config_from(&missing),
            Err(ConfigError::Figment(_))
        ));
    }

    #[test]
    fn environment_overrides_beat_the_file() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("config.toml", "search_debounce_ms = 200")?;
            jail.set_env("HOSTELDESK_SEARCH_DEBOUNCE_MS", "150");

            let config = extract(Toml::file(jail.directory().join("config.toml")))
                .expect("config should load");
            assert_eq!(config.search_debounce_ms, 150);
            Ok(())
        });
    }

    #[test]
    fn inverted_room_type_bounds_are_rejected() {
        let config = UiConfig {
            min_room_types: 5,
            max_room_types: 2,
            ..UiConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "max_room_types"));
    }

    #[test]
    fn a_zero_minimum_is_rejected() {
        let config = UiConfig {
            min_room_types: 0,
            ..UiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn an_empty_mime_allow_list_is_rejected() {
        let config = UiConfig {
            allowed_image_types: Vec::new(),
            ..UiConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn listing_limits_mirror_the_config() {
        let config = UiConfig::default();
        let limits = config.listing_limits();
        assert_eq!(limits.min_room_types, 1);
        assert_eq!(limits.max_room_types, 10);
        assert_eq!(limits.max_image_bytes, 5_242_880);
        assert_eq!(limits.allowed_image_types, config.allowed_image_types);
        assert_eq!(config.notice_lifetime(), Duration::from_millis(5000));
        assert_eq!(config.search_delay(), Duration::from_millis(300));
    }
}

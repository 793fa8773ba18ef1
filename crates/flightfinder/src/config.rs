//! Configuration management for flightfinder.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::experience::Coordinate;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Directory under the user config dir holding our files.
const APP_DIR_NAME: &str = "flightfinder";

/// Prefix of environment overrides.
const ENV_PREFIX: &str = "FLIGHTFINDER_";

/// Separator between section and key in environment overrides. Keys contain
/// single underscores, so sections are split on a double one.
const ENV_SEPARATOR: &str = "__";

/// Highest zoom level the default tile server serves.
const MAX_ZOOM: u8 = 19;

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `FLIGHTFINDER_`, with `__`
///    between section and key, e.g. `FLIGHTFINDER_MAP__FIT_PADDING`)
/// 2. TOML config file at `~/.config/flightfinder/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dataset configuration.
    pub data: DataConfig,
    /// Map configuration.
    pub map: MapConfig,
    /// Display configuration.
    pub display: DisplayConfig,
}

/// Where the catalog comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Path to the experiences JSON document.
    pub dataset_path: PathBuf,
}

/// Map widget configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Initial view centre latitude.
    pub center_lat: f64,
    /// Initial view centre longitude.
    pub center_lng: f64,
    /// Initial zoom level.
    pub zoom: u8,
    /// Tile URL template.
    pub tile_url: String,
    /// Tile attribution.
    pub attribution: String,
    /// Padding in pixels when fitting bounds after a re-render.
    pub fit_padding: u32,
    /// Padding in pixels when re-fitting after the map view is shown.
    pub resize_fit_padding: u32,
    /// Delay before re-fitting after the map view is shown, in milliseconds.
    pub resize_delay_ms: u64,
}

/// Display configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Symbol prefixed to prices.
    pub currency_symbol: String,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/experiences.json"),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            // South-east England
            center_lat: 51.15,
            center_lng: -0.1,
            zoom: 9,
            tile_url: "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png".to_string(),
            attribution: "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors".to_string(),
            fit_padding: 50,
            resize_fit_padding: 30,
            resize_delay_ms: 150,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "£".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from all sources, with an optional custom config
    /// path in place of the default one.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file).nested())
            .merge(Env::prefixed(ENV_PREFIX).split(ENV_SEPARATOR));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.map.center_lat) {
            return Err(Error::config_validation(format!(
                "center_lat ({}) must be between -90 and 90",
                self.map.center_lat
            )));
        }

        if !(-180.0..=180.0).contains(&self.map.center_lng) {
            return Err(Error::config_validation(format!(
                "center_lng ({}) must be between -180 and 180",
                self.map.center_lng
            )));
        }

        if self.map.zoom > MAX_ZOOM {
            return Err(Error::config_validation(format!(
                "zoom ({}) must be at most {MAX_ZOOM}",
                self.map.zoom
            )));
        }

        if self.map.tile_url.trim().is_empty() {
            return Err(Error::config_validation("tile_url must not be empty"));
        }

        if self.display.currency_symbol.is_empty() {
            return Err(Error::config_validation(
                "currency_symbol must not be empty",
            ));
        }

        Ok(())
    }

    /// Initial view centre.
    #[must_use]
    pub fn map_center(&self) -> Coordinate {
        Coordinate::new(self.map.center_lat, self.map.center_lng)
    }

    /// Delay before re-fitting once the map view is shown.
    #[must_use]
    pub fn resize_delay(&self) -> Duration {
        Duration::from_millis(self.map.resize_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use figment::Jail;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(
            config.data.dataset_path,
            PathBuf::from("data/experiences.json")
        );
        assert_eq!(config.map.zoom, 9);
        assert_eq!(config.display.currency_symbol, "£");
    }

    #[test]
    fn test_default_map_config() {
        let map = MapConfig::default();

        assert!((map.center_lat - 51.15).abs() < f64::EPSILON);
        assert!((map.center_lng + 0.1).abs() < f64::EPSILON);
        assert!(map.tile_url.contains("openstreetmap"));
        assert!(map.attribution.contains("OpenStreetMap"));
        assert_eq!(map.fit_padding, 50);
        assert_eq!(map.resize_fit_padding, 30);
        assert_eq!(map.resize_delay_ms, 150);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_latitude_out_of_range() {
        let mut config = Config::default();
        config.map.center_lat = 95.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("center_lat"));
    }

    #[test]
    fn test_validate_longitude_out_of_range() {
        let mut config = Config::default();
        config.map.center_lng = -200.0;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("center_lng"));
    }

    #[test]
    fn test_validate_zoom_too_deep() {
        let mut config = Config::default();
        config.map.zoom = 22;

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("zoom"));
    }

    #[test]
    fn test_validate_empty_tile_url() {
        let mut config = Config::default();
        config.map.tile_url = "  ".to_string();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("tile_url"));
    }

    #[test]
    fn test_validate_empty_currency() {
        let mut config = Config::default();
        config.display.currency_symbol.clear();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("currency_symbol"));
    }

    #[test]
    fn test_map_center_and_delay() {
        let config = Config::default();
        assert_eq!(config.map_center(), Coordinate::new(51.15, -0.1));
        assert_eq!(config.resize_delay(), Duration::from_millis(150));
    }

    #[test]
    fn test_default_config_path() {
        let path = Config::default_config_path();
        assert!(path.to_string_lossy().contains("flightfinder"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_load_nonexistent_config() {
        Jail::expect_with(|_jail| {
            let config = Config::load_from(Some(PathBuf::from("/nonexistent/config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config, Config::default());
            Ok(())
        });
    }

    #[test]
    fn test_load_toml_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                "[map]\nzoom = 11\nfit_padding = 20\n\n[display]\ncurrency_symbol = \"$\"",
            )?;

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.map.zoom, 11);
            assert_eq!(config.map.fit_padding, 20);
            assert_eq!(config.map.resize_fit_padding, 30);
            assert_eq!(config.display.currency_symbol, "$");
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_multi_word_keys() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[map]\nfit_padding = 20")?;
            jail.set_env("FLIGHTFINDER_MAP__ZOOM", "11");
            jail.set_env("FLIGHTFINDER_MAP__FIT_PADDING", "7");
            jail.set_env("FLIGHTFINDER_MAP__RESIZE_DELAY_MS", "300");
            jail.set_env("FLIGHTFINDER_DATA__DATASET_PATH", "/tmp/x.json");
            jail.set_env("FLIGHTFINDER_DISPLAY__CURRENCY_SYMBOL", "€");

            let config = Config::load_from(Some(PathBuf::from("config.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.map.zoom, 11);
            assert_eq!(config.map.fit_padding, 7);
            assert_eq!(config.map.resize_delay_ms, 300);
            assert_eq!(config.data.dataset_path, PathBuf::from("/tmp/x.json"));
            assert_eq!(config.display.currency_symbol, "€");
            Ok(())
        });
    }

    #[test]
    fn test_load_invalid_value_fails_validation() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", "[map]\nzoom = 25")?;

            let err = Config::load_from(Some(PathBuf::from("config.toml"))).unwrap_err();
            assert!(matches!(err, Error::ConfigValidation { .. }));
            Ok(())
        });
    }

    #[test]
    fn test_map_config_deserialize() {
        let json = r#"{"zoom": 7, "resize_delay_ms": 300}"#;
        let map: MapConfig = serde_json::from_str(json).unwrap();
        assert_eq!(map.zoom, 7);
        assert_eq!(map.resize_delay_ms, 300);
        assert_eq!(map.fit_padding, 50);
    }

    #[test]
    fn test_config_serialize() {
        let json = serde_json::to_string(&Config::default()).unwrap();
        assert!(json.contains("dataset_path"));
        assert!(json.contains("currency_symbol"));
    }
}

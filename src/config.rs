//! @ai:module:intent Configuration structs for the job tracker
//! @ai:module:layer infrastructure
//! @ai:module:public_api TrackerConfig, StoreConfig, ReportConfig, FuelConfig
//! @ai:module:stateless true

use crate::project::FuelPrices;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "job-tracker.toml";

/// @ai:intent Main configuration for the job tracker
/// @ai:effects pure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackerConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub fuel: FuelConfig,
}

/// @ai:intent Where project files live
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

/// @ai:intent Where generated reports are written
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

/// @ai:intent Fuel prices copied into each new project
/// @ai:effects pure
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelConfig {
    #[serde(default)]
    pub gas: f64,
    #[serde(default)]
    pub diesel: f64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("projects")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("reports")
}

impl FuelConfig {
    pub fn prices(&self) -> FuelPrices {
        FuelPrices {
            gas: self.gas,
            diesel: self.diesel,
        }
    }
}

impl TrackerConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Load the given file, the default file, or built-in defaults
    /// @ai:effects fs:read
    pub fn load_or_default(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);

                if default_path.exists() {
                    Self::load(default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// @ai:intent Reject fuel prices that could not be entered through an edit
    /// @ai:effects pure
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, price) in [("gas", self.fuel.gas), ("diesel", self.fuel.diesel)] {
            if !price.is_finite() || price < 0.0 {
                anyhow::bail!("fuel.{} must be a non-negative number, got {}", name, price);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_when_sections_missing() {
        let config: TrackerConfig = toml::from_str("").unwrap();
        assert_eq!(config, TrackerConfig::default());
        assert_eq!(config.store.data_dir, PathBuf::from("projects"));
    }

    #[test]
    fn test_partial_config() {
        let config: TrackerConfig = toml::from_str(
            r#"
[fuel]
gas = 3.89
"#,
        )
        .unwrap();

        assert_eq!(config.fuel.prices(), FuelPrices { gas: 3.89, diesel: 0.0 });
        assert_eq!(config.report.output_dir, PathBuf::from("reports"));
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("job-tracker.toml");
        let config = TrackerConfig {
            store: StoreConfig {
                data_dir: PathBuf::from("/var/lib/jobs"),
            },
            fuel: FuelConfig { gas: 4.0, diesel: 4.5 },
            ..Default::default()
        };

        config.save(&path).unwrap();
        assert_eq!(TrackerConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn test_negative_fuel_price_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "[fuel]\ndiesel = -2.0\n").unwrap();

        assert!(TrackerConfig::load(&path).is_err());
    }
}

//! Configuration file support for liftplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/liftplan/config.toml`.

use crate::preferences::FrequencyPolicy;
use crate::{Catalog, EquipmentKind, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Exercise catalog source
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// Replacement catalog in the bundled TOML format
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

/// Generation policy
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct GenerationConfig {
    /// Require 4+ muscle groups for 5+ days and 2+ for 3-4 days
    #[serde(default)]
    pub enforce_frequency_minimums: bool,
}

impl GenerationConfig {
    pub fn frequency_policy(&self) -> FrequencyPolicy {
        if self.enforce_frequency_minimums {
            FrequencyPolicy::EnforceMinimums
        } else {
            FrequencyPolicy::CallerEnforced
        }
    }
}

/// Fallbacks for preferences the user did not give
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_equipment")]
    pub equipment: BTreeSet<EquipmentKind>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            equipment: default_equipment(),
        }
    }
}

// Default value functions
fn home_dir_or_current() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

fn default_data_dir() -> PathBuf {
    let base =
        dirs::data_local_dir().unwrap_or_else(|| home_dir_or_current().join(".local/share"));
    base.join("liftplan")
}

fn default_equipment() -> BTreeSet<EquipmentKind> {
    [EquipmentKind::Bodyweight].into_iter().collect()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir().unwrap_or_else(|| home_dir_or_current().join(".config"));
        base.join("liftplan").join("config.toml")
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Path of the saved-plan library inside the data directory
    pub fn plans_path(&self) -> PathBuf {
        self.data.data_dir.join("plans.json")
    }

    /// The configured replacement catalog, if any
    ///
    /// Callers fall back to `default_catalog()` on `None`. A replacement that
    /// fails validation is rejected with `Error::Catalog`.
    pub fn load_catalog(&self) -> Result<Option<Catalog>> {
        let Some(path) = &self.catalog.path else {
            return Ok(None);
        };

        let catalog = Catalog::load(path)?;
        let problems = catalog.validate();
        if !problems.is_empty() {
            return Err(Error::Catalog(format!(
                "{:?} failed validation: {}",
                path,
                problems.join("; ")
            )));
        }
        Ok(Some(catalog))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.defaults.equipment.contains(&EquipmentKind::Bodyweight));
        assert!(!config.generation.enforce_frequency_minimums);
        assert_eq!(
            config.generation.frequency_policy(),
            FrequencyPolicy::CallerEnforced
        );
        assert!(config.catalog.path.is_none());
        assert!(config.plans_path().ends_with("liftplan/plans.json"));
    }

    #[test]
    fn test_config_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.generation.enforce_frequency_minimums = true;
        config.defaults.equipment.insert(EquipmentKind::Dumbbells);
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert!(loaded.generation.enforce_frequency_minimums);
        assert_eq!(loaded.defaults.equipment, config.defaults.equipment);
        assert_eq!(loaded.data.data_dir, config.data.data_dir);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[generation]
enforce_frequency_minimums = true
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.generation.frequency_policy(),
            FrequencyPolicy::EnforceMinimums
        );
        assert_eq!(config.defaults.equipment.len(), 1); // default
    }

    #[test]
    fn test_replacement_catalog() {
        let temp_dir = tempfile::tempdir().unwrap();
        let catalog_path = temp_dir.path().join("catalog.toml");
        std::fs::write(&catalog_path, "[[exercise]]\nname = \"\"\nmuscles = [\"abs\"]\nequipment = [\"bodyweight\"]\ngoals = [\"endurance\"]\n").unwrap();

        let mut config = Config::default();
        assert!(config.load_catalog().unwrap().is_none());

        config.catalog.path = Some(catalog_path);
        assert!(matches!(config.load_catalog(), Err(Error::Catalog(_))));
    }
}

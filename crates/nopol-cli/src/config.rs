use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use nopol_core::RegionCodeTable;
use nopol_generate::generators::engine_number::{DEFAULT_DIGITS, DEFAULT_FAMILIES};
use nopol_generate::{EngineNumberGenerator, GenerationError, OutputFormat, VinGenerator};

pub const DEFAULT_CONFIG_FILE: &str = "nopol.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml decode error in {}: {source}", path.display())]
    TomlDecode {
        path: PathBuf,
        source: toml::de::Error,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub generate: GenerateSettings,
    pub regions: RegionSettings,
    pub engine: EngineSettings,
    pub vin: VinSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GenerateSettings {
    pub count: u64,
    pub seed: Option<u64>,
    pub format: OutputFormat,
    pub region: Option<String>,
}

impl Default for GenerateSettings {
    fn default() -> Self {
        Self {
            count: 10,
            seed: None,
            format: OutputFormat::Csv,
            region: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegionSettings {
    /// JSON region table replacing the built-in one.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSettings {
    pub digits: Option<usize>,
    pub families: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VinSettings {
    pub check_digit: bool,
}

/// Load settings from `explicit`, else `./nopol.toml` when present, else defaults.
///
/// A relative region table path is resolved against the config file's directory.
pub fn load_settings(explicit: Option<&Path>) -> ConfigResult<Settings> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let path = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                return Ok(Settings::default());
            }
            path
        }
    };

    let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    let mut settings: Settings =
        toml::from_str(&content).map_err(|source| ConfigError::TomlDecode {
            path: path.clone(),
            source,
        })?;

    if let Some(regions) = settings.regions.path.as_mut()
        && regions.is_relative()
        && let Some(parent) = path.parent()
    {
        *regions = parent.join(&*regions);
    }

    Ok(settings)
}

impl Settings {
    /// Region table from `override_path`, the configured path, or the built-in data.
    pub fn region_table(
        &self,
        override_path: Option<&Path>,
    ) -> nopol_core::Result<Arc<RegionCodeTable>> {
        let table = match override_path.or(self.regions.path.as_deref()) {
            Some(path) => RegionCodeTable::from_path(path)?,
            None => RegionCodeTable::indonesia(),
        };
        Ok(Arc::new(table))
    }

    pub fn engine_generator(&self) -> Result<EngineNumberGenerator, GenerationError> {
        let families = match &self.engine.families {
            Some(families) => families.clone(),
            None => DEFAULT_FAMILIES
                .iter()
                .map(|family| family.to_string())
                .collect(),
        };
        let digits = self.engine.digits.unwrap_or(DEFAULT_DIGITS);
        EngineNumberGenerator::with_format(families, digits)
    }

    pub fn vin_generator(&self, check_digit: bool) -> VinGenerator {
        VinGenerator::with_check_digit(check_digit || self.vin.check_digit)
    }
}

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use rand::RngCore;
use serde_json::Value;

use nopol_core::RegionCodeTable;

use crate::errors::GenerationError;
use crate::params::ParamSpec;

pub mod engine_number;
pub mod plate;
pub mod vin;

pub use engine_number::{EngineNumber, EngineNumberGenerator};
pub use plate::{LicensePlate, LicensePlateGenerator};
pub use vin::{Vin, VinGenerator};

/// A named identifier generator driven by JSON params.
pub trait Generator: Send + Sync {
    fn id(&self) -> &'static str;

    fn params(&self) -> &'static [ParamSpec] {
        &[]
    }

    fn generate(
        &self,
        params: Option<&Value>,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError>;
}

/// Generators addressable by id.
pub struct GeneratorRegistry {
    generators: BTreeMap<&'static str, Box<dyn Generator>>,
}

impl GeneratorRegistry {
    /// Registry over the built-in Indonesian region table.
    pub fn new() -> Self {
        Self::with_table(Arc::new(RegionCodeTable::indonesia()))
    }

    pub fn with_table(table: Arc<RegionCodeTable>) -> Self {
        let mut registry = Self::empty();
        registry.register_generator(Box::new(LicensePlateGenerator::new(table)));
        registry.register_generator(Box::new(VinGenerator::new()));
        registry.register_generator(Box::new(EngineNumberGenerator::new()));
        registry
    }

    pub fn empty() -> Self {
        Self {
            generators: BTreeMap::new(),
        }
    }

    /// Adds `generator`, replacing any generator registered under the same id.
    pub fn register_generator(&mut self, generator: Box<dyn Generator>) {
        self.generators.insert(generator.id(), generator);
    }

    pub fn generator(&self, id: &str) -> Option<&dyn Generator> {
        self.generators.get(id).map(|generator| generator.as_ref())
    }

    /// Registered ids, sorted.
    pub fn generator_ids(&self) -> Vec<&'static str> {
        self.generators.keys().copied().collect()
    }

    pub fn generate(
        &self,
        id: &str,
        params: Option<&Value>,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        let generator = self
            .generator(id)
            .ok_or_else(|| GenerationError::InvalidParams(format!("unknown generator '{id}'")))?;
        generator.generate(params, rng)
    }
}

impl Default for GeneratorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GeneratorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorRegistry")
            .field("generators", &self.generator_ids())
            .finish()
    }
}

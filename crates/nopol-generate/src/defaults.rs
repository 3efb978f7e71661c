//! Convenience entry points over the built-in Indonesian region table and
//! the thread-local random generator.

use std::sync::{Arc, OnceLock};

use nopol_core::RegionCodeTable;

use crate::errors::GenerationError;
use crate::generators::{EngineNumberGenerator, LicensePlateGenerator, VinGenerator};

static DEFAULT_TABLE: OnceLock<Arc<RegionCodeTable>> = OnceLock::new();

/// The built-in table, built on first use and shared afterwards.
pub fn default_table() -> &'static Arc<RegionCodeTable> {
    DEFAULT_TABLE.get_or_init(|| Arc::new(RegionCodeTable::indonesia()))
}

/// Plate for `region`, or for a random region when `None`.
pub fn generate_license_plate(region: Option<&str>) -> Result<String, GenerationError> {
    let generator = LicensePlateGenerator::new(Arc::clone(default_table()));
    let plate = generator.generate(region, &mut rand::rng())?;
    Ok(plate.to_string())
}

pub fn generate_vin() -> String {
    VinGenerator::new().generate(&mut rand::rng()).to_string()
}

pub fn generate_engine_number() -> String {
    EngineNumberGenerator::new()
        .generate(&mut rand::rng())
        .to_string()
}

pub fn region_list() -> Vec<&'static str> {
    default_table().region_list()
}

pub fn region_codes(region: &str) -> nopol_core::Result<&'static [String]> {
    default_table().region_codes(region)
}

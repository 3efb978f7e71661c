//! Identifier generation for synthetic Indonesian vehicles.
//!
//! Produces license plates, VIN-shaped frame numbers and engine numbers from
//! an injected random source, and composes them into vehicle records that
//! can be written as CSV or JSON lines.

pub mod defaults;
pub mod engine;
pub mod errors;
pub mod generators;
pub mod model;
pub mod output;
pub mod params;

pub use defaults::{
    generate_engine_number, generate_license_plate, generate_vin, region_codes, region_list,
};
pub use engine::{GenerationEngine, GenerationResult};
pub use errors::GenerationError;
pub use generators::{
    EngineNumber, EngineNumberGenerator, Generator, GeneratorRegistry, LicensePlate,
    LicensePlateGenerator, Vin, VinGenerator,
};
pub use model::{GenerateOptions, GenerationReport, VehicleRecord};
pub use nopol_core::{Error as CoreError, RegionCodeTable, RegionEntry};
pub use output::{OutputFormat, write_records};

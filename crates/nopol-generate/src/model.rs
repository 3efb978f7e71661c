use serde::{Deserialize, Serialize};

use crate::generators::{EngineNumber, LicensePlate, Vin};

/// One synthetic vehicle: the three identifiers plus the plate's region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub license_plate: LicensePlate,
    pub region: String,
    pub vin: Vin,
    pub engine_number: EngineNumber,
}

/// Options for a batch of vehicle records.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateOptions {
    /// Number of records to produce.
    pub count: u64,
    /// Seed for the batch random source; drawn from the thread generator when absent.
    pub seed: Option<u64>,
    /// Restrict plates to one region.
    pub region: Option<String>,
}

/// Summary of a generated batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationReport {
    pub seed: u64,
    pub records: u64,
    pub region: Option<String>,
    pub duration_ms: u128,
}

use std::sync::Arc;
use std::time::Instant;

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use nopol_core::{Error as CoreError, RegionCodeTable};

use crate::errors::GenerationError;
use crate::generators::{EngineNumberGenerator, LicensePlateGenerator, VinGenerator};
use crate::model::{GenerateOptions, GenerationReport, VehicleRecord};

/// Result of a batch run.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    pub records: Vec<VehicleRecord>,
    pub report: GenerationReport,
}

/// Composes the three generators into whole vehicle records.
#[derive(Debug, Clone)]
pub struct GenerationEngine {
    plates: LicensePlateGenerator,
    vins: VinGenerator,
    engines: EngineNumberGenerator,
}

impl GenerationEngine {
    pub fn new(
        plates: LicensePlateGenerator,
        vins: VinGenerator,
        engines: EngineNumberGenerator,
    ) -> Self {
        Self {
            plates,
            vins,
            engines,
        }
    }

    /// Engine over `table` with default VIN and engine-number formats.
    pub fn with_table(table: Arc<RegionCodeTable>) -> Self {
        Self::new(
            LicensePlateGenerator::new(table),
            VinGenerator::new(),
            EngineNumberGenerator::new(),
        )
    }

    pub fn table(&self) -> &RegionCodeTable {
        self.plates.table()
    }

    /// Draw one record; the three identifiers are independent of each other.
    pub fn vehicle<R: Rng + ?Sized>(
        &self,
        region: Option<&str>,
        rng: &mut R,
    ) -> Result<VehicleRecord, GenerationError> {
        let region = match region {
            Some(region) => region,
            None => self
                .table()
                .entries()
                .choose(rng)
                .map(|entry| entry.name.as_str())
                .ok_or_else(|| CoreError::InvalidTable("table has no regions".to_string()))?,
        };
        let license_plate = self.plates.generate(Some(region), rng)?;
        let region = region.to_string();
        let vin = self.vins.generate(rng);
        let engine_number = self.engines.generate(rng);

        Ok(VehicleRecord {
            license_plate,
            region,
            vin,
            engine_number,
        })
    }

    /// Generate `options.count` records from a single seeded source.
    ///
    /// The same seed and options always yield the same records.
    pub fn run(&self, options: &GenerateOptions) -> Result<GenerationResult, GenerationError> {
        let start = Instant::now();
        let seed = options.seed.unwrap_or_else(|| rand::rng().random());
        let region = options.region.as_deref();

        if let Some(region) = region
            && !self.table().contains_region(region)
        {
            return Err(GenerationError::InvalidRegion(region.to_string()));
        }

        info!(
            count = options.count,
            seed,
            region = region.unwrap_or("*"),
            "generation started"
        );

        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let capacity = usize::try_from(options.count).unwrap_or(usize::MAX);
        let mut records = Vec::with_capacity(capacity.min(1 << 16));
        for index in 0..options.count {
            let record = self.vehicle(region, &mut rng)?;
            debug!(index, plate = %record.license_plate, "vehicle generated");
            records.push(record);
        }

        let duration_ms = start.elapsed().as_millis();
        info!(records = records.len(), duration_ms, "generation finished");

        Ok(GenerationResult {
            report: GenerationReport {
                seed,
                records: records.len() as u64,
                region: options.region.clone(),
                duration_ms,
            },
            records,
        })
    }
}

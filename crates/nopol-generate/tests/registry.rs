use std::sync::Arc;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde_json::json;

use nopol_generate::generators::vin::Vin;
use nopol_generate::{GenerationError, GeneratorRegistry, LicensePlate, RegionCodeTable, RegionEntry};

#[test]
fn generator_ids_are_sorted_and_unique() {
    let registry = GeneratorRegistry::new();
    let ids = registry.generator_ids();
    assert_eq!(
        ids,
        ["vehicle.engine_number", "vehicle.license_plate", "vehicle.vin"]
    );

    let mut sorted = ids.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(ids, sorted);
}

#[test]
fn plate_generator_accepts_region_param() {
    let registry = GeneratorRegistry::new();
    let generator = registry
        .generator("vehicle.license_plate")
        .expect("generator exists");
    let params = json!({"region": "DKI Jakarta"});
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let value = generator.generate(Some(&params), &mut rng).expect("plate");
    let plate: LicensePlate = value.parse().expect("valid plate");
    assert_eq!(plate.region_code(), "B");
}

#[test]
fn plate_generator_rejects_unknown_region_param() {
    let registry = GeneratorRegistry::new();
    let params = json!({"region": "NonexistentRegionXYZ"});
    let mut rng = ChaCha8Rng::seed_from_u64(1);

    let result = registry.generate("vehicle.license_plate", Some(&params), &mut rng);
    assert!(matches!(result, Err(GenerationError::InvalidRegion(_))));
}

#[test]
fn generators_reject_unknown_or_mistyped_params() {
    let registry = GeneratorRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(2);

    let unknown = json!({"colour": "red"});
    for id in registry.generator_ids() {
        let result = registry.generate(id, Some(&unknown), &mut rng);
        assert!(
            matches!(result, Err(GenerationError::InvalidParams(_))),
            "{id}"
        );
    }

    let mistyped = json!({"check_digit": "yes"});
    assert!(matches!(
        registry.generate("vehicle.vin", Some(&mistyped), &mut rng),
        Err(GenerationError::InvalidParams(_))
    ));
}

#[test]
fn vin_generator_check_digit_param() {
    let registry = GeneratorRegistry::new();
    let params = json!({"check_digit": true});
    let mut rng = ChaCha8Rng::seed_from_u64(3);

    for _ in 0..50 {
        let value = registry
            .generate("vehicle.vin", Some(&params), &mut rng)
            .expect("vin");
        let vin: Vin = value.parse().expect("valid vin");
        assert!(vin.check_digit_valid());
    }
}

#[test]
fn unknown_generator_id_errors() {
    let registry = GeneratorRegistry::new();
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    assert!(registry.generator("vehicle.colour").is_none());
    assert!(registry.generate("vehicle.colour", None, &mut rng).is_err());
}

#[test]
fn registry_over_fixture_table() {
    let table = RegionCodeTable::new(vec![RegionEntry::new("Fixture", &["Q"])]).expect("table");
    let registry = GeneratorRegistry::with_table(Arc::new(table));
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    let value = registry
        .generate("vehicle.license_plate", None, &mut rng)
        .expect("plate");
    assert!(value.starts_with("Q "));
}

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rand::seq::IndexedRandom;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use nopol_core::{Error as CoreError, RegionCodeTable, is_region_code};

use crate::errors::GenerationError;
use crate::generators::Generator;
use crate::params::{ParamKind, ParamSpec, validate_params};

/// Suffix letters: A-Z without I and O, which read as 1 and 0 on a plate.
pub const SUFFIX_LETTERS: &[u8; 24] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

pub const MAX_PLATE_NUMBER: u16 = 9999;

/// An Indonesian registration plate such as `L 42 AB`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct LicensePlate {
    region_code: String,
    number: u16,
    suffix: String,
}

impl LicensePlate {
    pub fn region_code(&self) -> &str {
        &self.region_code
    }

    pub fn number(&self) -> u16 {
        self.number
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl fmt::Display for LicensePlate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.region_code, self.number, self.suffix)
    }
}

impl FromStr for LicensePlate {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || GenerationError::InvalidIdentifier(format!("license plate '{value}'"));

        let mut parts = value.split(' ');
        let (Some(code), Some(number), Some(suffix), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };

        if !is_region_code(code) {
            return Err(invalid());
        }
        if number.starts_with('0') || !number.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }
        let number: u16 = number.parse().map_err(|_| invalid())?;
        if !(1..=MAX_PLATE_NUMBER).contains(&number) {
            return Err(invalid());
        }
        if !(1..=3).contains(&suffix.len()) || !suffix.bytes().all(|b| SUFFIX_LETTERS.contains(&b))
        {
            return Err(invalid());
        }

        Ok(Self {
            region_code: code.to_string(),
            number,
            suffix: suffix.to_string(),
        })
    }
}

impl From<LicensePlate> for String {
    fn from(value: LicensePlate) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for LicensePlate {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Produces plates for regions of a shared [`RegionCodeTable`].
#[derive(Debug, Clone)]
pub struct LicensePlateGenerator {
    table: Arc<RegionCodeTable>,
}

impl LicensePlateGenerator {
    pub fn new(table: Arc<RegionCodeTable>) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &RegionCodeTable {
        &self.table
    }

    /// Generate a plate for `region`, or for a uniformly chosen region.
    ///
    /// An unknown region is an error; it is never replaced by a random one.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        region: Option<&str>,
        rng: &mut R,
    ) -> Result<LicensePlate, GenerationError> {
        let codes = match region {
            Some(region) => self.table.region_codes(region).map_err(|err| match err {
                CoreError::NotFound(name) => GenerationError::InvalidRegion(name),
                other => GenerationError::Table(other),
            })?,
            None => {
                let entry = self.table.entries().choose(rng).ok_or_else(|| {
                    CoreError::InvalidTable("table has no regions".to_string())
                })?;
                entry.codes.as_slice()
            }
        };
        let region_code = codes
            .choose(rng)
            .ok_or_else(|| CoreError::InvalidTable("region has no codes".to_string()))?
            .clone();

        let number = rng.random_range(1..=MAX_PLATE_NUMBER);
        let suffix_len = rng.random_range(1..=3);
        let suffix = (0..suffix_len)
            .map(|_| char::from(SUFFIX_LETTERS[rng.random_range(0..SUFFIX_LETTERS.len())]))
            .collect();

        Ok(LicensePlate {
            region_code,
            number,
            suffix,
        })
    }
}

const PLATE_PARAMS: &[ParamSpec] = &[ParamSpec::new("region", ParamKind::String, false)];

impl Generator for LicensePlateGenerator {
    fn id(&self) -> &'static str {
        "vehicle.license_plate"
    }

    fn params(&self) -> &'static [ParamSpec] {
        PLATE_PARAMS
    }

    fn generate(
        &self,
        params: Option<&Value>,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        let params = validate_params(params, PLATE_PARAMS, Generator::id(self))?;
        let plate = LicensePlateGenerator::generate(self, params.get_str("region"), rng)?;
        Ok(plate.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rendered_plates() {
        let plate: LicensePlate = "AB 1234 XYZ".parse().expect("valid plate");
        assert_eq!(plate.region_code(), "AB");
        assert_eq!(plate.number(), 1234);
        assert_eq!(plate.suffix(), "XYZ");
        assert_eq!(plate.to_string(), "AB 1234 XYZ");
    }

    #[test]
    fn rejects_malformed_plates() {
        for value in [
            "",
            "B 42",
            "B 042 A",
            "B 0 A",
            "B 10000 A",
            "B 42 AI",
            "B 42 ABCD",
            "b 42 A",
            "B  42 A",
            "B 42 A X",
        ] {
            assert!(value.parse::<LicensePlate>().is_err(), "{value:?}");
        }
    }

    #[test]
    fn suffix_alphabet_skips_confusable_letters() {
        assert!(!SUFFIX_LETTERS.contains(&b'I'));
        assert!(!SUFFIX_LETTERS.contains(&b'O'));
        assert!(SUFFIX_LETTERS.iter().all(u8::is_ascii_uppercase));
    }
}

use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GenerationError;
use crate::generators::Generator;
use crate::params::{ParamKind, ParamSpec, validate_params};

/// VIN characters: A-Z without I, O and Q, then the ten digits.
pub const VIN_ALPHABET: &[u8; 33] = b"ABCDEFGHJKLMNPRSTUVWXYZ0123456789";

pub const VIN_LENGTH: usize = 17;

const CHECK_DIGIT_POSITION: usize = 8;
const CHECK_WEIGHTS: [u32; VIN_LENGTH] = [8, 7, 6, 5, 4, 3, 2, 10, 0, 9, 8, 7, 6, 5, 4, 3, 2];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Manufacturer {
    pub wmi: &'static str,
    pub name: &'static str,
}

/// World manufacturer identifiers of plants assembling for the Indonesian market.
pub const MANUFACTURERS: &[Manufacturer] = &[
    Manufacturer {
        wmi: "MHF",
        name: "Toyota Astra Motor",
    },
    Manufacturer {
        wmi: "MHK",
        name: "Astra Daihatsu Motor",
    },
    Manufacturer {
        wmi: "MHR",
        name: "Honda Prospect Motor",
    },
    Manufacturer {
        wmi: "MHY",
        name: "Suzuki Indomobil Motor",
    },
    Manufacturer {
        wmi: "MK2",
        name: "Mitsubishi Motors Krama Yudha Indonesia",
    },
    Manufacturer {
        wmi: "MHL",
        name: "Mercedes-Benz Distribution Indonesia",
    },
];

/// A 17 character frame number laid out as WMI, descriptor, year, plant, serial.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Vin(String);

impl Vin {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First three characters.
    pub fn wmi(&self) -> &str {
        &self.0[..3]
    }

    pub fn manufacturer(&self) -> Option<&'static Manufacturer> {
        MANUFACTURERS.iter().find(|maker| maker.wmi == self.wmi())
    }

    /// Whether position 9 holds the ISO 3779 check digit.
    ///
    /// Generated VINs only pass when the generator was built with
    /// [`VinGenerator::with_check_digit`].
    pub fn check_digit_valid(&self) -> bool {
        let bytes = self.0.as_bytes();
        check_digit(bytes).is_some_and(|digit| bytes[CHECK_DIGIT_POSITION] == digit)
    }
}

impl fmt::Display for Vin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Vin {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if value.len() != VIN_LENGTH || !value.bytes().all(|byte| VIN_ALPHABET.contains(&byte)) {
            return Err(GenerationError::InvalidIdentifier(format!("vin '{value}'")));
        }
        Ok(Self(value.to_string()))
    }
}

impl From<Vin> for String {
    fn from(value: Vin) -> Self {
        value.0
    }
}

impl TryFrom<String> for Vin {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// ISO 3779 check character for a 17 character VIN (position 9 is ignored).
///
/// Returns `None` when the input is not 17 VIN characters.
pub fn check_digit(vin: &[u8]) -> Option<u8> {
    if vin.len() != VIN_LENGTH {
        return None;
    }
    let mut sum = 0_u32;
    for (byte, weight) in vin.iter().zip(CHECK_WEIGHTS) {
        sum += transliterate(*byte)? * weight;
    }
    match sum % 11 {
        10 => Some(b'X'),
        remainder => Some(b'0' + remainder as u8),
    }
}

fn transliterate(byte: u8) -> Option<u32> {
    let value = match byte {
        b'0'..=b'9' => byte - b'0',
        b'A' | b'J' => 1,
        b'B' | b'K' | b'S' => 2,
        b'C' | b'L' | b'T' => 3,
        b'D' | b'M' | b'U' => 4,
        b'E' | b'N' | b'V' => 5,
        b'F' | b'W' => 6,
        b'G' | b'P' | b'X' => 7,
        b'H' | b'Y' => 8,
        b'R' | b'Z' => 9,
        _ => return None,
    };
    Some(u32::from(value))
}

/// Generates VIN-shaped frame numbers.
///
/// By default no check digit is computed; position 9 is as random as the
/// rest of the descriptor.
#[derive(Debug, Clone, Default)]
pub struct VinGenerator {
    check_digit: bool,
}

impl VinGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_check_digit(check_digit: bool) -> Self {
        Self { check_digit }
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Vin {
        self.generate_with(self.check_digit, rng)
    }

    fn generate_with<R: Rng + ?Sized>(&self, check: bool, rng: &mut R) -> Vin {
        let maker = &MANUFACTURERS[rng.random_range(0..MANUFACTURERS.len())];
        let mut chars = Vec::with_capacity(VIN_LENGTH);
        chars.extend_from_slice(maker.wmi.as_bytes());

        // descriptor (6), model year (1), plant (1)
        for _ in 0..8 {
            chars.push(VIN_ALPHABET[rng.random_range(0..VIN_ALPHABET.len())]);
        }
        for _ in 0..6 {
            chars.push(b'0' + rng.random_range(0..=9_u8));
        }

        if check && let Some(digit) = check_digit(&chars) {
            chars[CHECK_DIGIT_POSITION] = digit;
        }

        Vin(chars.into_iter().map(char::from).collect())
    }
}

const VIN_PARAMS: &[ParamSpec] = &[ParamSpec::new("check_digit", ParamKind::Bool, false)];

impl Generator for VinGenerator {
    fn id(&self) -> &'static str {
        "vehicle.vin"
    }

    fn params(&self) -> &'static [ParamSpec] {
        VIN_PARAMS
    }

    fn generate(
        &self,
        params: Option<&Value>,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        let params = validate_params(params, VIN_PARAMS, Generator::id(self))?;
        let check = params.get_bool("check_digit").unwrap_or(self.check_digit);
        Ok(self.generate_with(check, rng).to_string())
    }
}

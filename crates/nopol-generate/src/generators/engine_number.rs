use std::fmt;
use std::str::FromStr;

use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::GenerationError;
use crate::generators::Generator;
use crate::params::validate_params;

/// Engine family prefixes used when no custom families are configured.
pub const DEFAULT_FAMILIES: &[&str] = &["KRB", "NRE", "GDN", "LFB", "HRA", "DHC", "SKY", "TRC"];

pub const DEFAULT_DIGITS: usize = 7;
pub const MIN_DIGITS: usize = 6;
pub const MAX_DIGITS: usize = 8;

/// An engine serial: a 1 to 3 letter family prefix and a numeric block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct EngineNumber {
    value: String,
    prefix_len: usize,
}

impl EngineNumber {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    pub fn family(&self) -> &str {
        &self.value[..self.prefix_len]
    }

    pub fn serial(&self) -> &str {
        &self.value[self.prefix_len..]
    }
}

impl fmt::Display for EngineNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl FromStr for EngineNumber {
    type Err = GenerationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let prefix_len = value
            .bytes()
            .take_while(|byte| byte.is_ascii_uppercase())
            .count();
        let digits = &value[prefix_len..];
        let valid = (1..=3).contains(&prefix_len)
            && (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
            && digits.bytes().all(|byte| byte.is_ascii_digit());
        if !valid {
            return Err(GenerationError::InvalidIdentifier(format!(
                "engine number '{value}'"
            )));
        }
        Ok(Self {
            value: value.to_string(),
            prefix_len,
        })
    }
}

impl From<EngineNumber> for String {
    fn from(value: EngineNumber) -> Self {
        value.value
    }
}

impl TryFrom<String> for EngineNumber {
    type Error = GenerationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Generates engine numbers with a constant shape: every family has the same
/// length and the numeric block has a fixed width.
#[derive(Debug, Clone)]
pub struct EngineNumberGenerator {
    families: Vec<String>,
    digits: usize,
}

impl Default for EngineNumberGenerator {
    fn default() -> Self {
        Self {
            families: DEFAULT_FAMILIES.iter().map(|s| s.to_string()).collect(),
            digits: DEFAULT_DIGITS,
        }
    }
}

impl EngineNumberGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(families: Vec<String>, digits: usize) -> Result<Self, GenerationError> {
        if !(MIN_DIGITS..=MAX_DIGITS).contains(&digits) {
            return Err(GenerationError::InvalidFormat(format!(
                "engine number digits must be between {MIN_DIGITS} and {MAX_DIGITS}, got {digits}"
            )));
        }
        let Some(first) = families.first() else {
            return Err(GenerationError::InvalidFormat(
                "engine families must not be empty".to_string(),
            ));
        };
        let prefix_len = first.len();
        for family in &families {
            if !(1..=3).contains(&family.len())
                || !family.bytes().all(|byte| byte.is_ascii_uppercase())
            {
                return Err(GenerationError::InvalidFormat(format!(
                    "engine family '{family}' must be 1 to 3 uppercase letters"
                )));
            }
            if family.len() != prefix_len {
                return Err(GenerationError::InvalidFormat(format!(
                    "engine family '{family}' differs in length from '{first}'"
                )));
            }
        }
        Ok(Self { families, digits })
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    /// Total length of every engine number this generator produces.
    pub fn output_len(&self) -> usize {
        self.families.first().map_or(0, String::len) + self.digits
    }

    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> EngineNumber {
        let family = &self.families[rng.random_range(0..self.families.len())];
        let upper = 10_u64.pow(self.digits as u32);
        let serial = rng.random_range(0..upper);
        let width = self.digits;
        EngineNumber {
            value: format!("{family}{serial:0width$}"),
            prefix_len: family.len(),
        }
    }
}

impl Generator for EngineNumberGenerator {
    fn id(&self) -> &'static str {
        "vehicle.engine_number"
    }

    fn generate(
        &self,
        params: Option<&Value>,
        rng: &mut dyn RngCore,
    ) -> Result<String, GenerationError> {
        validate_params(params, &[], Generator::id(self))?;
        Ok(EngineNumberGenerator::generate(self, rng).to_string())
    }
}

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

///
/// The value the random source was last seeded with.
///
/// On disk this is `null`, a JSON integer, or a JSON string. Integers outside
/// the `i64` range are kept as text of their digits, the same as typing them.
///
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Seed {
    #[default]
    Unset,
    Numeric(i64),
    Textual(String),
}

impl Seed {
    /// Empty input unsets; anything that parses as an integer is numeric.
    pub fn parse(input: &str) -> Seed {
        let input = input.trim();
        if input.is_empty() {
            Seed::Unset
        } else if let Ok(number) = input.parse::<i64>() {
            Seed::Numeric(number)
        } else {
            Seed::Textual(input.to_string())
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Seed::Unset)
    }

    pub fn to_u64(&self) -> Option<u64> {
        match self {
            Seed::Unset => None,
            Seed::Numeric(number) => Some(*number as u64),
            Seed::Textual(text) => Some(fnv1a(text.as_bytes())),
        }
    }

    /// A fresh generator. Unset means seeded from the OS.
    pub fn rng(&self) -> StdRng {
        match self.to_u64() {
            Some(value) => StdRng::seed_from_u64(value),
            None => StdRng::from_entropy(),
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Unset => write!(f, "none"),
            Seed::Numeric(number) => write!(f, "{}", number),
            Seed::Textual(text) => write!(f, "{}", text),
        }
    }
}

struct SeedVisitor;

impl<'de> Visitor<'de> for SeedVisitor {
    type Value = Seed;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "null, an integer or a string")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Seed, E> {
        Ok(Seed::Unset)
    }

    fn visit_none<E: de::Error>(self) -> Result<Seed, E> {
        Ok(Seed::Unset)
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Seed, E> {
        Ok(Seed::Numeric(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Seed, E> {
        Ok(match i64::try_from(value) {
            Ok(value) => Seed::Numeric(value),
            Err(_) => Seed::Textual(value.to_string()),
        })
    }

    // serde_json hands over integers past u64 as floats
    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Seed, E> {
        if value.is_finite() && value.fract() == 0.0 {
            Ok(Seed::Textual(format!("{:.0}", value)))
        } else {
            Err(E::invalid_value(de::Unexpected::Float(value), &self))
        }
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Seed, E> {
        Ok(Seed::Textual(value.to_string()))
    }
}

impl<'de> Deserialize<'de> for Seed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Seed, D::Error> {
        deserializer.deserialize_any(SeedVisitor)
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |hash, byte| {
        (hash ^ *byte as u64).wrapping_mul(FNV_PRIME)
    })
}

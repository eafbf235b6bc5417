//! Comma-grouped counter values.
//!
//! View and like counts live in the store file (and on the wire) as display
//! strings with thousands separators, e.g. `"1,234,567"`. In memory they are
//! plain `u64`s; the functions here are the only place the two shapes meet.
//! Fields opt in with `#[serde(with = "crate::store::counter")]`.

use std::num::ParseIntError;

use serde::{de, Deserialize, Deserializer, Serializer};

/// Formats a count with comma thousands separators.
pub fn encode(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.insert(0, ',');
        }
        out.insert(0, c);
    }
    out
}

/// Parses a previously encoded count. Anything that is not digits and comma
/// separators is a parse failure.
pub fn decode(value: &str) -> Result<u64, ParseIntError> {
    value.replace(',', "").parse()
}

pub fn serialize<S>(count: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&encode(*count))
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    decode(&value).map_err(|_| de::Error::custom(format!("invalid counter value {value:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_groups_by_threes() {
        assert_eq!(encode(0), "0");
        assert_eq!(encode(999), "999");
        assert_eq!(encode(1_000), "1,000");
        assert_eq!(encode(654_321), "654,321");
        assert_eq!(encode(1_234_567), "1,234,567");
    }

    #[test]
    fn decode_inverts_encode() {
        for n in [0u64, 1, 42, 999, 1_000, 110_499, 1_000_999, 87_654_321] {
            assert_eq!(decode(&encode(n)).unwrap(), n);
        }
    }

    #[test]
    fn decode_accepts_ungrouped_digits() {
        assert_eq!(decode("987654").unwrap(), 987_654);
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(decode("").is_err());
        assert!(decode("12a4").is_err());
        assert!(decode("-5").is_err());
        assert!(decode("1.5").is_err());
    }
}

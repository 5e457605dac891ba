//! Common types

use chrono::{DateTime, NaiveTime, Timelike, Utc};
use rand::Rng;

use crate::constants::ID_RANDOM_SUFFIX_LEN;
use crate::utils::to_base36;

pub type EntityId = String;

/// Time-ordered record id: base-36 epoch milliseconds followed by a random
/// base-36 suffix.
pub fn new_id() -> EntityId {
    new_id_at(Utc::now())
}

pub fn new_id_at(at: DateTime<Utc>) -> EntityId {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    let mut id = to_base36(at.timestamp_millis().max(0) as u64);
    for _ in 0..ID_RANDOM_SUFFIX_LEN {
        id.push(ALPHABET[rng.random_range(0..ALPHABET.len())] as char);
    }
    id
}

/// Current wall-clock time truncated to minutes.
pub fn now_hhmm() -> NaiveTime {
    let now = chrono::Local::now().time();
    NaiveTime::from_hms_opt(now.hour(), now.minute(), 0).unwrap_or(now)
}

/// `HH:MM` serde representation for [`NaiveTime`].
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const FORMAT: &str = "%H:%M";

    pub fn serialize<S: Serializer>(time: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&time.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    /// Accepts `HH:MM` and, for records written by other clients, `HH:MM:SS`.
    pub fn parse(raw: &str) -> Result<NaiveTime, chrono::ParseError> {
        NaiveTime::parse_from_str(raw, FORMAT)
            .or_else(|_| NaiveTime::parse_from_str(raw, "%H:%M:%S"))
    }
}

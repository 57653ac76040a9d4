//! Conversion between the device's JSON wire format and [`Reading`].

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde_json::{Map, Value};
use thiserror::Error;

use super::dto::{MessageResponse, SensorData};
use crate::db::models::{Reading, NOT_AVAILABLE};

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("request body is empty")]
    Empty,
    #[error("request body is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("request body is not a JSON object")]
    NotAnObject,
}

/// Parse a request body into a `Reading`.
///
/// Unknown keys are ignored. Missing or `null` fields become `"N/A"`.
/// A key repeated at the top level makes the body malformed.
pub fn decode(body: &[u8]) -> Result<Reading, DecodeError> {
    if body.is_empty() {
        return Err(DecodeError::Empty);
    }

    let Body::Object(map) = serde_json::from_slice::<Body>(body)? else {
        return Err(DecodeError::NotAnObject);
    };

    Ok(Reading {
        soil_health: field(&map, "soil_health"),
        water_level: field(&map, "water_level"),
        temperature: field(&map, "temperature"),
        humidity: field(&map, "humidity"),
        pump_status: field(&map, "pump_status"),
    })
}

pub fn encode(reading: Reading) -> SensorData {
    SensorData::Reading(reading)
}

pub fn encode_empty(message: &str) -> SensorData {
    SensorData::Message(MessageResponse {
        message: message.to_owned(),
    })
}

/// Strings are kept verbatim, `null` falls back to the sentinel, and any
/// other value keeps its compact JSON text.
fn field(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        None | Some(Value::Null) => NOT_AVAILABLE.to_owned(),
        Some(v) => v.to_string(),
    }
}

/// Top-level shape of a request body.
enum Body {
    Object(Map<String, Value>),
    Other,
}

impl<'de> Deserialize<'de> for Body {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(BodyVisitor)
    }
}

struct BodyVisitor;

impl<'de> Visitor<'de> for BodyVisitor {
    type Value = Body;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Body, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut map = Map::new();
        while let Some(key) = access.next_key::<String>()? {
            if map.contains_key(&key) {
                return Err(de::Error::custom(format_args!("duplicate key `{key}`")));
            }
            let value: Value = access.next_value()?;
            map.insert(key, value);
        }
        Ok(Body::Object(map))
    }

    fn visit_seq<A>(self, mut seq: A) -> Result<Body, A::Error>
    where
        A: SeqAccess<'de>,
    {
        while seq.next_element::<IgnoredAny>()?.is_some() {}
        Ok(Body::Other)
    }

    fn visit_bool<E>(self, _: bool) -> Result<Body, E>
    where
        E: de::Error,
    {
        Ok(Body::Other)
    }

    fn visit_i64<E>(self, _: i64) -> Result<Body, E>
    where
        E: de::Error,
    {
        Ok(Body::Other)
    }

    fn visit_u64<E>(self, _: u64) -> Result<Body, E>
    where
        E: de::Error,
    {
        Ok(Body::Other)
    }

    fn visit_f64<E>(self, _: f64) -> Result<Body, E>
    where
        E: de::Error,
    {
        Ok(Body::Other)
    }

    fn visit_str<E>(self, _: &str) -> Result<Body, E>
    where
        E: de::Error,
    {
        Ok(Body::Other)
    }

    fn visit_unit<E>(self) -> Result<Body, E>
    where
        E: de::Error,
    {
        Ok(Body::Other)
    }
}

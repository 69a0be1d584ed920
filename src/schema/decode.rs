//! Case-insensitive structural decoding of response bodies.
//!
//! Decoding performs no business validation; it only maps a JSON value
//! onto one schema. A shape mismatch comes back as
//! [`HarnessError::Decode`] tagged with the expected schema name, so a
//! test either propagates it as a failure or treats it as evidence of an
//! unexpected response.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::core::{HarnessError, Result};
use crate::schema::{Cart, CartLine, InfoMessage, Page, User};

/// Lowercase every object key, recursively. Response property casing is
/// not part of the contract being verified, so `Total` and `total` must
/// decode identically.
pub fn lower_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut lowered = Map::with_capacity(map.len());
            for (key, inner) in map {
                lowered.insert(key.to_lowercase(), lower_keys(inner));
            }
            Value::Object(lowered)
        }
        Value::Array(items) => Value::Array(items.iter().map(lower_keys).collect()),
        other => other.clone(),
    }
}

fn decode_as<T: DeserializeOwned>(value: &Value, expected: &'static str) -> Result<T> {
    serde_json::from_value(lower_keys(value)).map_err(|err| HarnessError::decode(expected, err))
}

pub fn decode_user(value: &Value) -> Result<User> {
    decode_as(value, "User")
}

pub fn decode_cart(value: &Value) -> Result<Cart> {
    decode_as(value, "Cart")
}

pub fn decode_line(value: &Value) -> Result<CartLine> {
    decode_as(value, "CartLine")
}

pub fn decode_message(value: &Value) -> Result<InfoMessage> {
    decode_as(value, "InfoMessage")
}

pub fn decode_page(value: &Value) -> Result<Page> {
    decode_as(value, "Page")
}

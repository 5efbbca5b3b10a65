//! [`TypeProvider`] over `serde_json::Value`.

use codecforge_core::{CodecError, DataResult, MapView, TypeProvider};
use serde_json::{Map, Number, Value};

/// Lets any codec read and write `serde_json::Value` trees.
///
/// Number handling follows serde_json: integers are whatever fits an `i64`,
/// floats are `f64`. JSON has no NaN or infinities, so encoding a
/// non-finite float fails with `OutOfRange`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProvider;

impl TypeProvider for JsonProvider {
    type Value = Value;

    fn null(&self) -> Value {
        Value::Null
    }

    fn is_null(&self, value: &Value) -> bool {
        value.is_null()
    }

    fn create_map(&self) -> Value {
        Value::Object(Map::new())
    }

    fn create_map_from(&self, entries: Vec<(String, Value)>) -> Value {
        Value::Object(entries.into_iter().collect())
    }

    fn merge(&self, current: Value, addition: Value) -> DataResult<Value> {
        match (current, addition) {
            (Value::Null, addition) => Ok(addition),
            (Value::Object(mut current), Value::Object(addition)) => {
                current.extend(addition);
                Ok(Value::Object(current))
            }
            (current, addition) => Err(CodecError::merge_failure(&current, &addition)),
        }
    }

    fn get_map<'a>(&self, value: &'a Value) -> DataResult<MapView<'a, Value>> {
        match value {
            Value::Object(map) => Ok(MapView::new(map.iter().map(|(k, v)| (k.as_str(), v)))),
            other => Err(CodecError::type_mismatch("a map", other)),
        }
    }

    fn create_boolean(&self, value: bool) -> Value {
        Value::Bool(value)
    }

    fn create_integer(&self, value: i64) -> Value {
        Value::Number(Number::from(value))
    }

    fn create_float(&self, value: f64) -> DataResult<Value> {
        match Number::from_f64(value) {
            Some(number) => Ok(Value::Number(number)),
            None => {
                tracing::debug!(value, "non-finite float has no JSON form");
                Err(CodecError::OutOfRange {
                    value: value.to_string(),
                    target: "a JSON number",
                })
            }
        }
    }

    fn create_string(&self, value: &str) -> Value {
        Value::String(value.to_owned())
    }

    fn create_list(&self, items: Vec<Value>) -> Value {
        Value::Array(items)
    }

    fn get_boolean(&self, value: &Value) -> DataResult<bool> {
        value
            .as_bool()
            .ok_or_else(|| CodecError::type_mismatch("a boolean", value))
    }

    fn get_integer(&self, value: &Value) -> DataResult<i64> {
        match value {
            Value::Number(number) => match number.as_i64() {
                Some(i) => Ok(i),
                // Integral but too large for i64.
                None if number.is_u64() => Err(CodecError::OutOfRange {
                    value: number.to_string(),
                    target: "i64",
                }),
                None => Err(CodecError::type_mismatch("an integer", value)),
            },
            other => Err(CodecError::type_mismatch("an integer", other)),
        }
    }

    fn get_float(&self, value: &Value) -> DataResult<f64> {
        value
            .as_f64()
            .ok_or_else(|| CodecError::type_mismatch("a number", value))
    }

    fn get_string<'a>(&self, value: &'a Value) -> DataResult<&'a str> {
        value
            .as_str()
            .ok_or_else(|| CodecError::type_mismatch("a string", value))
    }

    fn get_list<'a>(&self, value: &'a Value) -> DataResult<Vec<&'a Value>> {
        match value {
            Value::Array(items) => Ok(items.iter().collect()),
            other => Err(CodecError::type_mismatch("a list", other)),
        }
    }
}

//! Scalar coercion for loosely-typed log values.
//!
//! Experiment-tracking backends hand values back with no type
//! guarantees: numbers arrive as strings, booleans as `"yes"`, floats
//! where ints are meant. The functions here coerce a raw JSON value to
//! one concrete target type, failing loudly rather than guessing.

use serde_json::Value;

use crate::error::ParamgateError;

/// Renders a raw value for error messages (strings keep their quotes).
pub(crate) fn describe(value: &Value) -> String {
    value.to_string()
}

/// Names the JSON kind of a value, for the not-an-object diagnostic.
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// True for JSON `null` and for the null-spelling strings `"none"` /
/// `"null"` (any case). Only consulted on the optional path; a
/// non-optional string parameter keeps the literal text.
pub(crate) fn is_null_like(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("null"),
        _ => false,
    }
}

/// Coerces to bool. Accepts literal booleans, the integers 1/0, and the
/// strings `1/true/yes` / `0/false/no` in any case.
pub(crate) fn coerce_bool(key: &str, raw: &Value) -> Result<bool, ParamgateError> {
    match raw {
        Value::Bool(b) => Ok(*b),
        Value::Number(n) => match n.as_i64() {
            Some(1) => Ok(true),
            Some(0) => Ok(false),
            _ => Err(coerce_error(key, raw, "bool")),
        },
        Value::String(s) => {
            let lowered = s.to_ascii_lowercase();
            match lowered.as_str() {
                "1" | "true" | "yes" => Ok(true),
                "0" | "false" | "no" => Ok(false),
                _ => Err(coerce_error(key, raw, "bool")),
            }
        }
        _ => Err(coerce_error(key, raw, "bool")),
    }
}

/// Coerces to float. Numbers convert directly; strings go through
/// `str::parse::<f64>`.
pub(crate) fn coerce_float(key: &str, raw: &Value) -> Result<f64, ParamgateError> {
    match raw {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| coerce_error(key, raw, "float")),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| coerce_error(key, raw, "float")),
        _ => Err(coerce_error(key, raw, "float")),
    }
}

/// Coerces to int. JSON integers convert directly; floats and numeric
/// strings are accepted only when they carry no fractional part, so
/// `100.0` narrows to `100` but `100.5` is refused.
pub(crate) fn coerce_int(key: &str, raw: &Value) -> Result<i64, ParamgateError> {
    match raw {
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                return Ok(i);
            }
            let f = n.as_f64().ok_or_else(|| coerce_error(key, raw, "int"))?;
            narrow_to_int(key, raw, f)
        }
        Value::String(s) => {
            let s = s.trim();
            if let Ok(i) = s.parse::<i64>() {
                return Ok(i);
            }
            // Fall back through float to handle spellings like "100.0".
            let f = s
                .parse::<f64>()
                .map_err(|_| coerce_error(key, raw, "int"))?;
            narrow_to_int(key, raw, f)
        }
        _ => Err(coerce_error(key, raw, "int")),
    }
}

/// Coerces to string. Only JSON strings are accepted; no
/// stringification of other kinds is performed.
pub(crate) fn coerce_string(key: &str, raw: &Value) -> Result<String, ParamgateError> {
    match raw {
        Value::String(s) => Ok(s.clone()),
        _ => Err(coerce_error(key, raw, "string")),
    }
}

/// Coerces to a nested object, returned as a clone of the raw map.
pub(crate) fn coerce_object(
    key: &str,
    raw: &Value,
) -> Result<serde_json::Map<String, Value>, ParamgateError> {
    match raw {
        Value::Object(map) => Ok(map.clone()),
        _ => Err(coerce_error(key, raw, "object")),
    }
}

fn narrow_to_int(key: &str, raw: &Value, f: f64) -> Result<i64, ParamgateError> {
    if f.fract() != 0.0 {
        return Err(ParamgateError::PrecisionLoss {
            key: key.to_string(),
            value: describe(raw),
        });
    }
    // i64::MAX as f64 rounds up to 2^63, which is already out of range.
    if f < i64::MIN as f64 || f >= i64::MAX as f64 {
        return Err(coerce_error(key, raw, "int"));
    }
    Ok(f as i64)
}

fn coerce_error(key: &str, raw: &Value, expected: &'static str) -> ParamgateError {
    ParamgateError::Coerce {
        key: key.to_string(),
        value: describe(raw),
        expected,
    }
}

//! Typed parameter resolution over raw experiment-log data.
//!
//! The tracking backend hands back a flat JSON object with no type
//! guarantees. This module turns that into typed configuration values:
//!
//! - [`Resolver`] borrows the raw map and resolves one declared field
//!   per call, tracking which fields fell back to their defaults.
//! - [`Fallback`] makes the required-vs-default policy explicit at the
//!   call site; there is no sentinel value.
//! - Optionality is chosen by method ([`Resolver::extract`] vs.
//!   [`Resolver::extract_optional`]), not by runtime type inspection.
//!
//! Candidate keys are tried in order and the first present key wins;
//! later aliases are never consulted for the value, though a later
//! alias holding a *different* value is flagged with a warning.

mod coerce;
mod enums;

pub use enums::{EnumParam, EnumVariant};

pub(crate) use coerce::json_kind;

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::ParamgateError;

/// Fallback policy for a declared parameter.
///
/// `Required` makes absence an error; `Default` supplies the value to
/// use when none of the candidate keys is present. Because the default
/// is typed, a default that does not match the target type cannot be
/// expressed.
#[derive(Clone, Debug)]
pub enum Fallback<T> {
    /// Absence of every candidate key is an error.
    Required,
    /// Value returned, unchanged and unchecked, when every candidate
    /// key is absent.
    Default(T),
}

/// A target type a raw log value can be coerced into.
pub trait ParamValue: Sized {
    /// Human-readable type name used in diagnostics.
    const TYPE_NAME: &'static str;

    /// Coerces a raw value found under `key` into the target type.
    fn coerce(key: &str, raw: &Value) -> Result<Self, ParamgateError>;
}

impl ParamValue for bool {
    const TYPE_NAME: &'static str = "bool";

    fn coerce(key: &str, raw: &Value) -> Result<Self, ParamgateError> {
        coerce::coerce_bool(key, raw)
    }
}

impl ParamValue for i64 {
    const TYPE_NAME: &'static str = "int";

    fn coerce(key: &str, raw: &Value) -> Result<Self, ParamgateError> {
        coerce::coerce_int(key, raw)
    }
}

impl ParamValue for f64 {
    const TYPE_NAME: &'static str = "float";

    fn coerce(key: &str, raw: &Value) -> Result<Self, ParamgateError> {
        coerce::coerce_float(key, raw)
    }
}

impl ParamValue for String {
    const TYPE_NAME: &'static str = "string";

    fn coerce(key: &str, raw: &Value) -> Result<Self, ParamgateError> {
        coerce::coerce_string(key, raw)
    }
}

impl ParamValue for Map<String, Value> {
    const TYPE_NAME: &'static str = "object";

    fn coerce(key: &str, raw: &Value) -> Result<Self, ParamgateError> {
        coerce::coerce_object(key, raw)
    }
}

/// Passthrough target: the raw value is kept as-is. Used for template
/// fields whose example value carries no coercible scalar type.
impl ParamValue for Value {
    const TYPE_NAME: &'static str = "value";

    fn coerce(_key: &str, raw: &Value) -> Result<Self, ParamgateError> {
        Ok(raw.clone())
    }
}

/// Target types that support range validation. Bounds are inclusive and
/// infinite float bounds are legal.
pub trait RangedParam: ParamValue + PartialOrd + Copy + fmt::Display {}

impl RangedParam for i64 {}
impl RangedParam for f64 {}

/// Resolves declared parameters against a borrowed raw log map.
///
/// The resolver owns only its bookkeeping: the set of keys that fell
/// back to defaults, which the report layer reads after all fields of a
/// parameter set have been resolved.
#[derive(Debug)]
pub struct Resolver<'a> {
    store: &'a Map<String, Value>,
    defaulted: BTreeSet<String>,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver over raw log data, which must be a JSON
    /// object.
    pub fn new(log_data: &'a Value) -> Result<Self, ParamgateError> {
        match log_data {
            Value::Object(map) => Ok(Self::from_map(map)),
            other => Err(ParamgateError::LogDataNotObject {
                found: coerce::json_kind(other),
            }),
        }
    }

    /// Creates a resolver over an already-borrowed map.
    pub fn from_map(store: &'a Map<String, Value>) -> Self {
        Self {
            store,
            defaulted: BTreeSet::new(),
        }
    }

    /// Resolves a non-optional parameter.
    ///
    /// Candidate keys are tried in order; the first present key wins.
    /// A found `null` is an error here; use [`Self::extract_optional`]
    /// for fields that may legitimately be absent-but-present.
    pub fn extract<T>(&mut self, keys: &[&str], fallback: Fallback<T>) -> Result<T, ParamgateError>
    where
        T: ParamValue + fmt::Debug,
    {
        match self.locate(keys)? {
            Some((idx, raw)) => {
                let key = keys[idx];
                if raw.is_null() {
                    return Err(ParamgateError::UnexpectedNull {
                        key: key.to_string(),
                    });
                }
                T::coerce(key, raw)
            }
            None => match fallback {
                Fallback::Required => {
                    Err(ParamgateError::missing_required(keys, T::TYPE_NAME, None))
                }
                Fallback::Default(value) => Ok(self.fall_back(keys, value)),
            },
        }
    }

    /// Resolves an optional parameter.
    ///
    /// A found `null`, or a string spelled `"none"` / `"null"` in any
    /// case, resolves to `None` before any coercion.
    pub fn extract_optional<T>(
        &mut self,
        keys: &[&str],
        fallback: Fallback<Option<T>>,
    ) -> Result<Option<T>, ParamgateError>
    where
        T: ParamValue + fmt::Debug,
    {
        match self.locate(keys)? {
            Some((idx, raw)) => {
                if coerce::is_null_like(raw) {
                    return Ok(None);
                }
                T::coerce(keys[idx], raw).map(Some)
            }
            None => match fallback {
                Fallback::Required => {
                    Err(ParamgateError::missing_required(keys, T::TYPE_NAME, None))
                }
                Fallback::Default(value) => Ok(self.fall_back(keys, value)),
            },
        }
    }

    /// Resolves a non-optional numeric parameter and validates it
    /// against an inclusive `[min, max]` range.
    ///
    /// The range itself is validated lazily, at the point where a found
    /// value is checked; defaults are returned unchanged and are never
    /// range-checked.
    pub fn extract_in_range<T>(
        &mut self,
        keys: &[&str],
        fallback: Fallback<T>,
        range: (T, T),
    ) -> Result<T, ParamgateError>
    where
        T: RangedParam + fmt::Debug,
    {
        let (min, max) = range;
        match self.locate(keys)? {
            Some((idx, raw)) => {
                let key = keys[idx];
                if raw.is_null() {
                    return Err(ParamgateError::UnexpectedNull {
                        key: key.to_string(),
                    });
                }
                let value = T::coerce(key, raw)?;
                validate_range(min, max)?;
                if !(value >= min && value <= max) {
                    return Err(ParamgateError::OutOfRange {
                        key: key.to_string(),
                        value: value.to_string(),
                        min: min.to_string(),
                        max: max.to_string(),
                    });
                }
                Ok(value)
            }
            None => match fallback {
                Fallback::Required => Err(ParamgateError::missing_required(
                    keys,
                    T::TYPE_NAME,
                    Some((min.to_string(), max.to_string())),
                )),
                Fallback::Default(value) => Ok(self.fall_back(keys, value)),
            },
        }
    }

    /// Resolves a non-optional enum parameter.
    pub fn extract_enum<T>(
        &mut self,
        keys: &[&str],
        fallback: Fallback<T>,
    ) -> Result<T, ParamgateError>
    where
        T: EnumParam + fmt::Debug,
    {
        match self.locate(keys)? {
            Some((idx, raw)) => {
                let key = keys[idx];
                if raw.is_null() {
                    return Err(ParamgateError::UnexpectedNull {
                        key: key.to_string(),
                    });
                }
                enums::resolve_enum(key, raw)
            }
            None => match fallback {
                Fallback::Required => Err(ParamgateError::missing_required(keys, T::NAME, None)),
                Fallback::Default(value) => Ok(self.fall_back(keys, value)),
            },
        }
    }

    /// Resolves an optional enum parameter; `null` and null-spelling
    /// strings resolve to `None`.
    pub fn extract_optional_enum<T>(
        &mut self,
        keys: &[&str],
        fallback: Fallback<Option<T>>,
    ) -> Result<Option<T>, ParamgateError>
    where
        T: EnumParam + fmt::Debug,
    {
        match self.locate(keys)? {
            Some((idx, raw)) => {
                if coerce::is_null_like(raw) {
                    return Ok(None);
                }
                enums::resolve_enum(keys[idx], raw).map(Some)
            }
            None => match fallback {
                Fallback::Required => Err(ParamgateError::missing_required(keys, T::NAME, None)),
                Fallback::Default(value) => Ok(self.fall_back(keys, value)),
            },
        }
    }

    /// Keys that fell back to their declared defaults so far.
    pub fn defaulted_keys(&self) -> &BTreeSet<String> {
        &self.defaulted
    }

    /// Consumes the resolver, yielding the defaulted-key set for the
    /// finished parameter set to own.
    pub fn into_defaulted_keys(self) -> BTreeSet<String> {
        self.defaulted
    }

    /// Finds the first candidate key present in the store.
    ///
    /// Returns the index of the winning key so callers can name it in
    /// diagnostics. A later candidate holding a different raw value is
    /// reported but never wins.
    fn locate(&self, keys: &[&str]) -> Result<Option<(usize, &'a Value)>, ParamgateError> {
        if keys.is_empty() {
            return Err(ParamgateError::InvalidSpec {
                message: "cannot extract a parameter without any keys; \
                          one or more keys must be provided"
                    .to_string(),
            });
        }

        let found = keys
            .iter()
            .enumerate()
            .find_map(|(idx, key)| self.store.get(*key).map(|value| (idx, value)));

        if let Some((idx, value)) = found {
            for later in &keys[idx + 1..] {
                if let Some(other) = self.store.get(*later) {
                    if other != value {
                        warn!(
                            winner = keys[idx],
                            conflicting = *later,
                            "candidate keys hold different values; keeping the first match"
                        );
                    }
                }
            }
        }

        Ok(found)
    }

    /// Records every candidate key as defaulted and hands the default
    /// back unchanged.
    fn fall_back<T: fmt::Debug>(&mut self, keys: &[&str], default: T) -> T {
        warn!(
            keys = ?keys,
            default = ?default,
            "none of the keys were found in the log data; using default"
        );
        for key in keys {
            self.defaulted.insert((*key).to_string());
        }
        default
    }
}

fn validate_range<T: RangedParam>(min: T, max: T) -> Result<(), ParamgateError> {
    match min.partial_cmp(&max) {
        Some(Ordering::Less) => Ok(()),
        _ => Err(ParamgateError::InvalidSpec {
            message: format!(
                "range [{min}, {max}] is invalid: \
                 the lower bound must be strictly less than the upper bound"
            ),
        }),
    }
}

//! Template-driven parameter sets.
//!
//! Processing jobs declare their parameter surface as a template object
//! whose values are examples: `{"threshold": 0.5, "tile": 256}`. Each
//! template key is resolved from the log data as a required field, with
//! the expected type inferred from the example value's JSON kind.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{Map, Value};

use super::ParamSet;
use crate::error::ParamgateError;
use crate::resolve::{Fallback, Resolver};

/// A parameter set whose field list comes from a template object
/// instead of a statically-declared struct.
#[derive(Clone, Debug, Serialize)]
pub struct TemplateParams {
    values: BTreeMap<String, Value>,

    #[serde(skip)]
    defaulted: BTreeSet<String>,
}

impl TemplateParams {
    /// Resolves every template key against the raw log data.
    ///
    /// Type inference per example value: booleans, integers, floats,
    /// strings and objects coerce as usual; a `null` example marks an
    /// optional string; anything else passes through unchanged.
    pub fn from_log_data(template: &Value, log_data: &Value) -> Result<Self, ParamgateError> {
        let template = match template {
            Value::Object(map) => map,
            other => {
                return Err(ParamgateError::LogDataNotObject {
                    found: crate::resolve::json_kind(other),
                })
            }
        };

        let mut resolver = Resolver::new(log_data)?;
        let mut values = BTreeMap::new();

        for (key, example) in template {
            let keys = [key.as_str()];
            let resolved = match example {
                Value::Bool(_) => Value::from(resolver.extract::<bool>(&keys, Fallback::Required)?),
                Value::Number(n) if n.as_i64().is_some() || n.as_u64().is_some() => {
                    Value::from(resolver.extract::<i64>(&keys, Fallback::Required)?)
                }
                Value::Number(_) => {
                    Value::from(resolver.extract::<f64>(&keys, Fallback::Required)?)
                }
                Value::String(_) => {
                    Value::from(resolver.extract::<String>(&keys, Fallback::Required)?)
                }
                Value::Object(_) => Value::Object(
                    resolver.extract::<Map<String, Value>>(&keys, Fallback::Required)?,
                ),
                Value::Null => match resolver
                    .extract_optional::<String>(&keys, Fallback::Default(None))?
                {
                    Some(s) => Value::String(s),
                    None => Value::Null,
                },
                Value::Array(_) => resolver.extract::<Value>(&keys, Fallback::Required)?,
            };
            values.insert(key.clone(), resolved);
        }

        Ok(Self {
            values,
            defaulted: resolver.into_defaulted_keys(),
        })
    }

    /// A resolved value by field name.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Number of resolved fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the template declared no fields.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ParamSet for TemplateParams {
    fn name(&self) -> &'static str {
        "template"
    }

    fn to_map(&self) -> BTreeMap<String, Value> {
        self.values.clone()
    }

    fn defaulted_keys(&self) -> &BTreeSet<String> {
        &self.defaulted
    }
}

//! Resolution reports for display and serialization.
//!
//! A report is the read-only view of a resolved parameter set: every
//! field with its final value, plus the record of which fields fell
//! back to their declared defaults. It is what the CLI prints and what
//! job metadata serializes.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use serde_json::Value;

use crate::params::ParamSet;

/// The result of resolving one parameter set.
#[derive(Clone, Debug, Serialize)]
pub struct ResolutionReport {
    /// Short name of the resolved set.
    pub set_name: String,

    /// Every resolved field, sorted by name.
    pub values: BTreeMap<String, Value>,

    /// Keys that fell back to defaults (candidate aliases included).
    pub defaulted_keys: BTreeSet<String>,
}

impl ResolutionReport {
    /// Builds a report from any resolved parameter set.
    pub fn from_set(set: &dyn ParamSet) -> Self {
        Self {
            set_name: set.name().to_string(),
            values: set.to_map(),
            defaulted_keys: set.defaulted_keys().clone(),
        }
    }

    /// True when the field fell back to its declared default.
    pub fn is_defaulted(&self, field: &str) -> bool {
        self.defaulted_keys.contains(field)
    }

    /// Number of fields that fell back to defaults.
    pub fn defaulted_count(&self) -> usize {
        self.values
            .keys()
            .filter(|field| self.is_defaulted(field))
            .count()
    }

    /// Number of fields explicitly present in the log data.
    pub fn explicit_count(&self) -> usize {
        self.values.len() - self.defaulted_count()
    }
}

impl fmt::Display for ResolutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Resolved {} parameters ({} explicit, {} defaulted):",
            self.set_name,
            self.explicit_count(),
            self.defaulted_count()
        )?;
        writeln!(f)?;

        for (field, value) in &self.values {
            let rendered = render_value(value);
            if self.is_defaulted(field) {
                writeln!(f, "  {field} = {rendered} (default)")?;
            } else {
                writeln!(f, "  {field} = {rendered}")?;
            }
        }

        Ok(())
    }
}

/// Renders a value for the text report; strings lose their JSON quotes.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

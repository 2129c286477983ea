//! Concrete parameter sets resolved from experiment logs.
//!
//! Each set is an explicit, statically-declared struct with a
//! `from_log_data` builder: every field is resolved once, during
//! construction, and the finished struct is immutable. The builder also
//! takes ownership of the resolver's defaulted-key record so the report
//! layer can annotate which values were user-overridden.

mod augment;
mod export;
mod hyper;
mod template;

pub use augment::AugmentationParameters;
pub use export::{ExportFormat, ExportParameters};
pub use hyper::{HyperParameters, Optimizer};
pub use template::TemplateParams;

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;

/// A fully-resolved, immutable parameter set.
///
/// `to_map` is the explicit field list consumed by the report layer —
/// sorted by key, excluding the raw store and the bookkeeping fields.
pub trait ParamSet {
    /// Short name of the set, used in report headers.
    fn name(&self) -> &'static str;

    /// Every resolved field as `field name → JSON value`, sorted by key.
    fn to_map(&self) -> BTreeMap<String, Value>;

    /// Keys that fell back to their declared defaults during
    /// resolution (candidate aliases included).
    fn defaulted_keys(&self) -> &BTreeSet<String>;
}

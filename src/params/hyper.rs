//! Training hyperparameters.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

use super::ParamSet;
use crate::error::ParamgateError;
use crate::resolve::{EnumParam, EnumVariant, Fallback, Resolver};

/// Optimizer selection for a training run.
///
/// `Auto` defers the choice to the training framework.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Optimizer {
    Auto,
    Sgd,
    Adam,
    AdamW,
}

impl EnumParam for Optimizer {
    const NAME: &'static str = "Optimizer";
    const VARIANTS: &'static [EnumVariant<Self>] = &[
        EnumVariant {
            name: "auto",
            value: 0,
            member: Optimizer::Auto,
        },
        EnumVariant {
            name: "SGD",
            value: 1,
            member: Optimizer::Sgd,
        },
        EnumVariant {
            name: "Adam",
            value: 2,
            member: Optimizer::Adam,
        },
        EnumVariant {
            name: "AdamW",
            value: 3,
            member: Optimizer::AdamW,
        },
    ];
}

impl fmt::Display for Optimizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Optimizer::Auto => "auto",
            Optimizer::Sgd => "SGD",
            Optimizer::Adam => "Adam",
            Optimizer::AdamW => "AdamW",
        };
        write!(f, "{name}")
    }
}

/// Core training knobs shared by every framework integration.
///
/// `epochs` is the only required field; everything else carries the
/// conventional default. `learning_rate` also answers to the legacy
/// `lr` key.
#[derive(Clone, Debug, Serialize)]
pub struct HyperParameters {
    pub epochs: i64,
    pub batch_size: i64,
    pub image_size: i64,
    pub learning_rate: f64,
    pub momentum: f64,
    pub weight_decay: f64,
    pub patience: i64,
    pub optimizer: Optimizer,
    pub device: Option<String>,
    pub seed: Option<i64>,
    pub validate: bool,

    #[serde(skip)]
    defaulted: BTreeSet<String>,
}

impl HyperParameters {
    /// Resolves the full set against raw log data.
    pub fn from_log_data(log_data: &Value) -> Result<Self, ParamgateError> {
        let mut resolver = Resolver::new(log_data)?;

        let epochs = resolver.extract_in_range(&["epochs"], Fallback::Required, (1, 10_000))?;
        let batch_size =
            resolver.extract_in_range(&["batch_size"], Fallback::Default(8), (1, 1024))?;
        let image_size =
            resolver.extract_in_range(&["image_size"], Fallback::Default(640), (32, 4096))?;
        let learning_rate = resolver.extract_in_range(
            &["learning_rate", "lr"],
            Fallback::Default(0.01),
            (0.0, 1.0),
        )?;
        let momentum =
            resolver.extract_in_range(&["momentum"], Fallback::Default(0.9), (0.0, 1.0))?;
        let weight_decay =
            resolver.extract_in_range(&["weight_decay"], Fallback::Default(0.0005), (0.0, 1.0))?;
        let patience =
            resolver.extract_in_range(&["patience"], Fallback::Default(100), (0, 10_000))?;
        let optimizer =
            resolver.extract_enum(&["optimizer"], Fallback::Default(Optimizer::Auto))?;
        let device = resolver.extract_optional(&["device"], Fallback::Default(None))?;
        let seed = resolver.extract_optional(&["seed"], Fallback::Default(None))?;
        let validate = resolver.extract(&["validate"], Fallback::Default(true))?;

        Ok(Self {
            epochs,
            batch_size,
            image_size,
            learning_rate,
            momentum,
            weight_decay,
            patience,
            optimizer,
            device,
            seed,
            validate,
            defaulted: resolver.into_defaulted_keys(),
        })
    }
}

impl ParamSet for HyperParameters {
    fn name(&self) -> &'static str {
        "hyper"
    }

    fn to_map(&self) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        map.insert("batch_size".to_string(), json!(self.batch_size));
        map.insert("device".to_string(), json!(self.device));
        map.insert("epochs".to_string(), json!(self.epochs));
        map.insert("image_size".to_string(), json!(self.image_size));
        map.insert("learning_rate".to_string(), json!(self.learning_rate));
        map.insert("momentum".to_string(), json!(self.momentum));
        map.insert(
            "optimizer".to_string(),
            Value::String(self.optimizer.to_string()),
        );
        map.insert("patience".to_string(), json!(self.patience));
        map.insert("seed".to_string(), json!(self.seed));
        map.insert("validate".to_string(), json!(self.validate));
        map.insert("weight_decay".to_string(), json!(self.weight_decay));
        map
    }

    fn defaulted_keys(&self) -> &BTreeSet<String> {
        &self.defaulted
    }
}

//! Model-export parameters.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;
use serde_json::{json, Value};

use super::ParamSet;
use crate::error::ParamgateError;
use crate::resolve::{EnumParam, EnumVariant, Fallback, Resolver};

/// Target format for exported model weights.
///
/// Logs spell this as a lowercase name (`"onnx"`) or an integer code;
/// both resolve here.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ExportFormat {
    Onnx,
    Torchscript,
    Openvino,
    Tflite,
}

impl EnumParam for ExportFormat {
    const NAME: &'static str = "ExportFormat";
    const VARIANTS: &'static [EnumVariant<Self>] = &[
        EnumVariant {
            name: "onnx",
            value: 0,
            member: ExportFormat::Onnx,
        },
        EnumVariant {
            name: "torchscript",
            value: 1,
            member: ExportFormat::Torchscript,
        },
        EnumVariant {
            name: "openvino",
            value: 2,
            member: ExportFormat::Openvino,
        },
        EnumVariant {
            name: "tflite",
            value: 3,
            member: ExportFormat::Tflite,
        },
    ];
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ExportFormat::Onnx => "onnx",
            ExportFormat::Torchscript => "torchscript",
            ExportFormat::Openvino => "openvino",
            ExportFormat::Tflite => "tflite",
        };
        write!(f, "{name}")
    }
}

/// Options controlling how trained weights are exported.
#[derive(Clone, Debug, Serialize)]
pub struct ExportParameters {
    pub export_format: ExportFormat,
    /// Export with half-precision weights.
    pub half: bool,
    /// Allow a dynamic batch dimension.
    pub dynamic_batch: bool,
    /// Run the graph simplifier on the exported model.
    pub simplify: bool,
    /// ONNX opset override; the exporter picks one when absent.
    pub opset: Option<i64>,

    #[serde(skip)]
    defaulted: BTreeSet<String>,
}

impl ExportParameters {
    /// Resolves the full set against raw log data.
    pub fn from_log_data(log_data: &Value) -> Result<Self, ParamgateError> {
        let mut resolver = Resolver::new(log_data)?;

        let export_format = resolver.extract_enum(
            &["export_format", "format"],
            Fallback::Default(ExportFormat::Onnx),
        )?;
        let half = resolver.extract(&["half"], Fallback::Default(false))?;
        let dynamic_batch = resolver.extract(&["dynamic_batch"], Fallback::Default(false))?;
        let simplify = resolver.extract(&["simplify"], Fallback::Default(true))?;
        let opset = resolver.extract_optional(&["opset"], Fallback::Default(None))?;

        Ok(Self {
            export_format,
            half,
            dynamic_batch,
            simplify,
            opset,
            defaulted: resolver.into_defaulted_keys(),
        })
    }
}

impl ParamSet for ExportParameters {
    fn name(&self) -> &'static str {
        "export"
    }

    fn to_map(&self) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        map.insert("dynamic_batch".to_string(), json!(self.dynamic_batch));
        map.insert(
            "export_format".to_string(),
            Value::String(self.export_format.to_string()),
        );
        map.insert("half".to_string(), json!(self.half));
        map.insert("opset".to_string(), json!(self.opset));
        map.insert("simplify".to_string(), json!(self.simplify));
        map
    }

    fn defaulted_keys(&self) -> &BTreeSet<String> {
        &self.defaulted
    }
}

//! Data-augmentation parameters.
//!
//! Every knob is a defaulted float with a validated range, matching the
//! conventional augmentation surface of detection trainers. `scale` is
//! an unbounded multiplier, so its upper bound is infinite.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use serde_json::{json, Value};

use super::ParamSet;
use crate::error::ParamgateError;
use crate::resolve::{Fallback, Resolver};

#[derive(Clone, Debug, Serialize)]
pub struct AugmentationParameters {
    /// Hue jitter, as a fraction of the color wheel.
    pub hsv_h: f64,
    /// Saturation jitter.
    pub hsv_s: f64,
    /// Value (brightness) jitter.
    pub hsv_v: f64,
    /// Rotation range in degrees.
    pub degrees: f64,
    /// Translation, as a fraction of image size.
    pub translate: f64,
    /// Scale gain.
    pub scale: f64,
    /// Shear range in degrees.
    pub shear: f64,
    /// Perspective distortion.
    pub perspective: f64,
    /// Probability of a vertical flip.
    pub flipud: f64,
    /// Probability of a horizontal flip.
    pub fliplr: f64,
    /// Probability of mosaic composition.
    pub mosaic: f64,
    /// Probability of mixup blending.
    pub mixup: f64,

    #[serde(skip)]
    defaulted: BTreeSet<String>,
}

impl AugmentationParameters {
    /// Resolves the full set against raw log data.
    pub fn from_log_data(log_data: &Value) -> Result<Self, ParamgateError> {
        let mut resolver = Resolver::new(log_data)?;

        let hsv_h = resolver.extract_in_range(&["hsv_h"], Fallback::Default(0.015), (0.0, 1.0))?;
        let hsv_s = resolver.extract_in_range(&["hsv_s"], Fallback::Default(0.7), (0.0, 1.0))?;
        let hsv_v = resolver.extract_in_range(&["hsv_v"], Fallback::Default(0.4), (0.0, 1.0))?;
        let degrees =
            resolver.extract_in_range(&["degrees"], Fallback::Default(0.0), (-180.0, 180.0))?;
        let translate =
            resolver.extract_in_range(&["translate"], Fallback::Default(0.1), (0.0, 1.0))?;
        let scale =
            resolver.extract_in_range(&["scale"], Fallback::Default(0.5), (0.0, f64::INFINITY))?;
        let shear =
            resolver.extract_in_range(&["shear"], Fallback::Default(0.0), (-180.0, 180.0))?;
        let perspective =
            resolver.extract_in_range(&["perspective"], Fallback::Default(0.0), (0.0, 0.001))?;
        let flipud = resolver.extract_in_range(&["flipud"], Fallback::Default(0.0), (0.0, 1.0))?;
        let fliplr = resolver.extract_in_range(&["fliplr"], Fallback::Default(0.5), (0.0, 1.0))?;
        let mosaic = resolver.extract_in_range(&["mosaic"], Fallback::Default(1.0), (0.0, 1.0))?;
        let mixup = resolver.extract_in_range(&["mixup"], Fallback::Default(0.0), (0.0, 1.0))?;

        Ok(Self {
            hsv_h,
            hsv_s,
            hsv_v,
            degrees,
            translate,
            scale,
            shear,
            perspective,
            flipud,
            fliplr,
            mosaic,
            mixup,
            defaulted: resolver.into_defaulted_keys(),
        })
    }
}

impl ParamSet for AugmentationParameters {
    fn name(&self) -> &'static str {
        "augmentation"
    }

    fn to_map(&self) -> BTreeMap<String, Value> {
        let mut map = BTreeMap::new();
        map.insert("degrees".to_string(), json!(self.degrees));
        map.insert("fliplr".to_string(), json!(self.fliplr));
        map.insert("flipud".to_string(), json!(self.flipud));
        map.insert("hsv_h".to_string(), json!(self.hsv_h));
        map.insert("hsv_s".to_string(), json!(self.hsv_s));
        map.insert("hsv_v".to_string(), json!(self.hsv_v));
        map.insert("mixup".to_string(), json!(self.mixup));
        map.insert("mosaic".to_string(), json!(self.mosaic));
        map.insert("perspective".to_string(), json!(self.perspective));
        map.insert("scale".to_string(), json!(self.scale));
        map.insert("shear".to_string(), json!(self.shear));
        map.insert("translate".to_string(), json!(self.translate));
        map
    }

    fn defaulted_keys(&self) -> &BTreeSet<String> {
        &self.defaulted
    }
}

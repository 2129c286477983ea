//! End-to-end resolution scenarios against the library API.

use serde_json::json;

use paramgate::params::{ExportFormat, ExportParameters, HyperParameters, ParamSet};
use paramgate::resolve::{Fallback, Resolver};

#[test]
fn training_run_with_stringified_epochs_and_defaulted_momentum() {
    let log_data = json!({"epochs": "50", "lr": 0.01});
    let mut resolver = Resolver::new(&log_data).unwrap();

    let epochs: i64 = resolver.extract(&["epochs"], Fallback::Required).unwrap();
    let momentum = resolver
        .extract_in_range(&["momentum"], Fallback::Default(0.9), (0.0, 1.0))
        .unwrap();

    assert_eq!(epochs, 50);
    assert_eq!(momentum, 0.9);
    assert!(resolver.defaulted_keys().contains("momentum"));
    assert!(!resolver.defaulted_keys().contains("epochs"));
}

#[test]
fn aliased_keys_prefer_the_canonical_name() {
    // Both spellings present and disagreeing: the first candidate wins.
    let log_data = json!({
        "epochs": 5,
        "learning_rate": 0.1,
        "lr": 0.2,
    });

    let params = HyperParameters::from_log_data(&log_data).unwrap();
    assert_eq!(params.learning_rate, 0.1);
}

#[test]
fn one_flat_log_serves_every_parameter_set() {
    // Tracking backends log one flat mapping; each set picks out its
    // own fields and ignores the rest.
    let log_data = json!({
        "epochs": 20,
        "optimizer": 1,
        "export_format": 2,
        "mosaic": "0.8",
        "unrelated_metric": "0.993",
    });

    let hyper = HyperParameters::from_log_data(&log_data).unwrap();
    assert_eq!(hyper.epochs, 20);
    assert_eq!(hyper.optimizer.to_string(), "SGD");

    let export = ExportParameters::from_log_data(&log_data).unwrap();
    assert_eq!(export.export_format, ExportFormat::Openvino);

    let augment =
        paramgate::params::AugmentationParameters::from_log_data(&log_data).unwrap();
    assert_eq!(augment.mosaic, 0.8);
}

#[test]
fn resolved_sets_expose_a_sorted_field_map() {
    let log_data = json!({"epochs": 3});
    let params = HyperParameters::from_log_data(&log_data).unwrap();

    let map = params.to_map();
    let keys: Vec<_> = map.keys().cloned().collect();
    let mut sorted = keys.clone();
    sorted.sort();
    assert_eq!(keys, sorted);
    assert_eq!(map.len(), 11);
}

#[test]
fn failures_carry_actionable_messages() {
    let err = HyperParameters::from_log_data(&json!({"epochs": 0})).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("epochs"));
    assert!(message.contains("[1, 10000]"));

    let err = HyperParameters::from_log_data(&json!({
        "epochs": 1,
        "optimizer": "rmsprop",
    }))
    .unwrap_err();
    assert!(err.to_string().contains("auto(0)"));
}

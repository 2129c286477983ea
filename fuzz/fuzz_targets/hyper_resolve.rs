//! Fuzz target for hyperparameter resolution.
//!
//! This fuzzer parses arbitrary byte sequences as JSON and runs the
//! full hyperparameter resolution over the result, checking for
//! panics, overflows, or other undefined behavior.
//!
//! Run with:
//!   cargo +nightly fuzz run hyper_resolve

#![no_main]

use libfuzzer_sys::fuzz_target;
use paramgate::params::HyperParameters;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid OOM on very large inputs.
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(log_data) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    // Try to resolve. We don't care about errors—
    // we only care about panics, crashes, or hangs.
    let _ = HyperParameters::from_log_data(&log_data);
});

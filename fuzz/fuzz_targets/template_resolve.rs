//! Fuzz target for template-driven resolution.
//!
//! Expects a two-element JSON array `[template, log_data]` so the
//! fuzzer can mutate both sides of the resolution at once.
//!
//! Run with:
//!   cargo +nightly fuzz run template_resolve

#![no_main]

use libfuzzer_sys::fuzz_target;
use paramgate::params::TemplateParams;

fuzz_target!(|data: &[u8]| {
    // Cap input size to avoid OOM on very large inputs.
    if data.len() > 1024 * 1024 {
        return;
    }

    let Ok(value) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };

    let (template, log_data) = match value.as_array() {
        Some(pair) if pair.len() == 2 => (&pair[0], &pair[1]),
        _ => return,
    };

    let _ = TemplateParams::from_log_data(template, log_data);
});

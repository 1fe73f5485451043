#![no_main]

//! Fuzz target for tidy report JSON parsing.

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    if let Ok(report) = serde_json::from_str::<modfix_types::TidyReport>(s) {
        let _ = serde_json::to_string(&report);
        let _ = report.into_run();
    }
    let _ = serde_json::from_str::<Vec<modfix_types::Diagnostic>>(s);
});

#![no_main]

//! Fuzz target for go.mod parsing and position mapping.
//!
//! Every span the parser reports must map to a position.

use libfuzzer_sys::fuzz_target;
use modfix_manifest::parse_manifest;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    let Ok(parsed) = parse_manifest("go.mod", s) else {
        return;
    };

    let spans = parsed
        .file
        .require
        .iter()
        .map(|r| r.syntax)
        .chain(parsed.file.exclude.iter().map(|e| e.syntax))
        .chain(parsed.file.replace.iter().map(|r| r.syntax));
    for span in spans {
        assert!(span.start <= span.end && span.end <= s.len());
        parsed.mapper.position(span.start).unwrap();
        parsed.mapper.position(span.end).unwrap();
    }
});

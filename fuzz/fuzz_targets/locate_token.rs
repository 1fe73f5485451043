#![no_main]

//! Fuzz target for pulling a module@version token out of go command errors.

use libfuzzer_sys::fuzz_target;
use modfix_domain::extract_module_version;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };

    // Either nothing was found, or the token passed the module path check.
    let mv = extract_module_version(s);
    if !mv.is_zero() {
        assert!(modfix_module::check(&mv.path, &mv.version).is_ok());
    }
});

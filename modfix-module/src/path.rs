use crate::error::{InvalidPathError, InvalidVersionError};
use crate::semver;

const BAD_WINDOWS_NAMES: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Check that `path` is a valid module path.
pub fn check_path(path: &str) -> Result<(), InvalidPathError> {
    check_elements(path)?;

    let first = path.split('/').next().unwrap_or("");
    if first.is_empty() {
        return Err(InvalidPathError::new("leading slash"));
    }
    if !first.contains('.') {
        return Err(InvalidPathError::new("missing dot in first path element"));
    }
    if first.starts_with('-') {
        return Err(InvalidPathError::new("leading dash in first path element"));
    }
    if let Some(c) = first.chars().find(|&c| !first_path_ok(c)) {
        return Err(InvalidPathError::new(format!(
            "invalid char {c:?} in first path element"
        )));
    }
    if split_path_version(path).is_none() {
        return Err(InvalidPathError::new("invalid version"));
    }
    Ok(())
}

fn check_elements(path: &str) -> Result<(), InvalidPathError> {
    if path.is_empty() {
        return Err(InvalidPathError::new("empty string"));
    }
    if path.starts_with('-') {
        return Err(InvalidPathError::new("leading dash"));
    }
    if path.contains("//") {
        return Err(InvalidPathError::new("double slash"));
    }
    if path.ends_with('/') {
        return Err(InvalidPathError::new("trailing slash"));
    }
    for elem in path.split('/') {
        check_elem(elem)?;
    }
    Ok(())
}

fn check_elem(elem: &str) -> Result<(), InvalidPathError> {
    if elem.is_empty() {
        return Err(InvalidPathError::new("empty path element"));
    }
    if elem.chars().all(|c| c == '.') {
        return Err(InvalidPathError::new(format!(
            "invalid path element {elem:?}"
        )));
    }
    if elem.starts_with('.') {
        return Err(InvalidPathError::new("leading dot in path element"));
    }
    if elem.ends_with('.') {
        return Err(InvalidPathError::new("trailing dot in path element"));
    }
    if let Some(c) = elem.chars().find(|&c| !mod_path_ok(c)) {
        return Err(InvalidPathError::new(format!("invalid char {c:?}")));
    }

    // Windows disallows a set of device names as the part before the first dot.
    let short = elem.split('.').next().unwrap_or(elem);
    if BAD_WINDOWS_NAMES
        .iter()
        .any(|bad| bad.eq_ignore_ascii_case(short))
    {
        return Err(InvalidPathError::new(format!(
            "{short:?} disallowed as path element component on Windows"
        )));
    }

    // Short-name aliases like PROGRA~1.
    if let Some(i) = short.rfind('~') {
        let suffix = &short[i + 1..];
        if !suffix.is_empty() && suffix.bytes().all(|c| c.is_ascii_digit()) {
            return Err(InvalidPathError::new(
                "trailing tilde and digits in path element",
            ));
        }
    }
    Ok(())
}

fn first_path_ok(c: char) -> bool {
    c == '-' || c == '.' || c.is_ascii_digit() || c.is_ascii_lowercase()
}

fn mod_path_ok(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '.' | '_' | '~')
}

/// Split `path` into `(prefix, path_major)`.
///
/// `path_major` is the trailing `/vN` (or `.vN` for gopkg.in) element, or empty.
/// Returns `None` when the trailing version element is malformed (`/v1`, `/v0`, `/v2.1`).
pub fn split_path_version(path: &str) -> Option<(&str, &str)> {
    if path.starts_with("gopkg.in/") {
        return split_gopkg_in(path);
    }

    let bytes = path.as_bytes();
    let mut i = bytes.len();
    let mut dot = false;
    while i > 0 && (bytes[i - 1].is_ascii_digit() || bytes[i - 1] == b'.') {
        if bytes[i - 1] == b'.' {
            dot = true;
        }
        i -= 1;
    }
    if i <= 1 || i == bytes.len() || bytes[i - 1] != b'v' || bytes[i - 2] != b'/' {
        return Some((path, ""));
    }

    let (prefix, path_major) = path.split_at(i - 2);
    if dot || path_major.len() <= 2 || path_major.as_bytes()[2] == b'0' || path_major == "/v1" {
        return None;
    }
    Some((prefix, path_major))
}

fn split_gopkg_in(path: &str) -> Option<(&str, &str)> {
    let bytes = path.as_bytes();
    let mut i = bytes.len();
    if path.ends_with("-unstable") {
        i -= "-unstable".len();
    }
    while i > 0 && bytes[i - 1].is_ascii_digit() {
        i -= 1;
    }
    if i <= 1 || bytes[i - 1] != b'v' || bytes[i - 2] != b'.' {
        return None;
    }

    let (prefix, path_major) = path.split_at(i - 2);
    if path_major.len() <= 2 || (path_major.as_bytes()[2] == b'0' && path_major != ".v0") {
        return None;
    }
    Some((prefix, path_major))
}

/// Check that version `v` is allowed for a module whose path ends in `path_major`.
pub fn check_path_major(v: &str, path_major: &str) -> Result<(), InvalidVersionError> {
    let mut path_major = path_major;
    if path_major.starts_with(".v") {
        path_major = path_major.strip_suffix("-unstable").unwrap_or(path_major);
    }
    if v.starts_with("v0.0.0-") && path_major == ".v1" {
        // gopkg.in pseudo-versions predate the v1 suffix.
        return Ok(());
    }

    let m = semver::major(v);
    let want = if path_major.is_empty() {
        if m == "v0" || m == "v1" || semver::build(v) == "+incompatible" {
            return Ok(());
        }
        "v0 or v1"
    } else {
        let suffix = &path_major[1..];
        if m == suffix {
            return Ok(());
        }
        suffix
    };

    Err(InvalidVersionError::new(
        v,
        format!("should be {want}, not {m}"),
    ))
}

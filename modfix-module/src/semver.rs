//! Semantic versions as module versions spell them: a leading `v`, with the
//! `vMAJOR` and `vMAJOR.MINOR` shorthands accepted.

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct Parsed<'a> {
    major: &'a str,
    build: &'a str,
}

/// Reports whether `v` is a valid semantic version string.
pub fn is_valid(v: &str) -> bool {
    parse(v).is_some()
}

/// The major version prefix (`"v2"` for `"v2.1.0"`), or `""` if `v` is invalid.
pub fn major(v: &str) -> String {
    parse(v)
        .map(|p| format!("v{}", p.major))
        .unwrap_or_default()
}

/// The build suffix (`"+incompatible"`), or `""` if absent or `v` is invalid.
pub fn build(v: &str) -> &str {
    parse(v).map(|p| p.build).unwrap_or("")
}

fn parse(v: &str) -> Option<Parsed<'_>> {
    let rest = v.strip_prefix('v')?;
    let mut p = Parsed::default();

    let (major, rest) = parse_int(rest)?;
    p.major = major;
    if rest.is_empty() {
        return Some(p);
    }

    // vMAJOR.MINOR shorthand
    let (_, rest) = parse_int(rest.strip_prefix('.')?)?;
    if rest.is_empty() {
        return Some(p);
    }

    let (_, mut rest) = parse_int(rest.strip_prefix('.')?)?;
    if rest.starts_with('-') {
        let (_, r) = parse_prerelease(rest)?;
        rest = r;
    }
    if rest.starts_with('+') {
        let (build, r) = parse_build(rest)?;
        p.build = build;
        rest = r;
    }

    rest.is_empty().then_some(p)
}

fn parse_int(v: &str) -> Option<(&str, &str)> {
    let digits = v.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    if v.starts_with('0') && digits != 1 {
        return None;
    }
    Some(v.split_at(digits))
}

fn is_ident_char(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-'
}

fn is_bad_num(ident: &str) -> bool {
    ident.len() > 1 && ident.starts_with('0') && ident.bytes().all(|c| c.is_ascii_digit())
}

fn parse_prerelease(v: &str) -> Option<(&str, &str)> {
    let end = v[1..].find('+').map(|i| i + 1).unwrap_or(v.len());
    let body = &v[1..end];
    for ident in body.split('.') {
        if ident.is_empty() || !ident.bytes().all(is_ident_char) || is_bad_num(ident) {
            return None;
        }
    }
    Some(v.split_at(end))
}

fn parse_build(v: &str) -> Option<(&str, &str)> {
    let body = &v[1..];
    for ident in body.split('.') {
        if ident.is_empty() || !ident.bytes().all(is_ident_char) {
            return None;
        }
    }
    Some((v, ""))
}

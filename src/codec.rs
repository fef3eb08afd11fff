//! Fragment codec: `position:length` pairs joined by commas.
//!
//! Values are written as integers. Fractional lengths produced by the taper
//! are truncated on the way out, so decoding an encoded configuration gives
//! back `Configuration::truncated`.

use crate::error::{Error, Result};
use crate::model::{Branch, Configuration};

pub fn encode(config: &Configuration) -> String {
    config
        .branches
        .iter()
        .map(|b| format!("{}:{}", b.position.trunc() as u64, b.length.trunc() as u64))
        .collect::<Vec<_>>()
        .join(",")
}

/// Parse a fragment, with or without its leading `#`.
///
/// Anything of length one or less carries no state. A single bad token
/// rejects the whole fragment.
pub fn decode(fragment: &str) -> Result<Configuration> {
    let body = fragment.strip_prefix('#').unwrap_or(fragment);
    if body.len() <= 1 {
        return Err(Error::NoPersistedState);
    }

    body.split(',')
        .map(decode_branch)
        .collect::<Result<Vec<_>>>()
        .map(Configuration::new)
}

fn decode_branch(token: &str) -> Result<Branch> {
    let (position, length) = token
        .split_once(':')
        .ok_or_else(|| malformed(token, "expected position:length"))?;
    Ok(Branch::new(
        parse_field(token, position)?,
        parse_field(token, length)?,
    ))
}

/// Non-negative integer, optionally followed by a fraction that is dropped
fn parse_field(token: &str, field: &str) -> Result<f64> {
    let (whole, fraction) = field.split_once('.').unwrap_or((field, ""));
    let digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
    if whole.is_empty() || !digits(whole) || !digits(fraction) {
        return Err(malformed(token, &format!("`{field}` is not a number")));
    }
    whole
        .parse::<u32>()
        .map(f64::from)
        .map_err(|e| malformed(token, &e.to_string()))
}

fn malformed(token: &str, reason: &str) -> Error {
    Error::MalformedFragment {
        token: token.to_string(),
        reason: reason.to_string(),
    }
}

/// Percent-decoded text after the first `#` of a URL
pub fn fragment_of_url(url: &str) -> Option<String> {
    let (_, fragment) = url.split_once('#')?;
    Some(match urlencoding::decode(fragment) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => fragment.to_string(),
    })
}

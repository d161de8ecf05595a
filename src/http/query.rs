//! Query string parsing module
//!
//! Decodes `application/x-www-form-urlencoded` query strings into
//! key-value pairs, plus the loose integer conversion used by the query
//! API.

use std::collections::HashMap;

/// Parse a query string into decoded key-value pairs.
///
/// Pairs are split on `&`, keys and values on the first `=`. A key with
/// no `=` maps to the empty string, so `?debug` arrives as a present but
/// empty `debug`. When a key repeats, the first occurrence wins.
pub fn parse_query(query: &str) -> HashMap<String, String> {
    let mut params = HashMap::new();
    for pair in query.split('&') {
        if pair.is_empty() {
            continue;
        }
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        params
            .entry(decode_component(key))
            .or_insert_with(|| decode_component(value));
    }
    params
}

/// Percent-decode a single query component.
///
/// `+` decodes to a space. Decoding works on raw bytes so multi-byte
/// UTF-8 sequences survive; invalid UTF-8 is replaced lossily and a
/// malformed `%XX` escape is kept literally.
fn decode_component(component: &str) -> String {
    let raw = component.as_bytes();
    let mut out = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        if raw[i] == b'%' && i + 2 < raw.len() {
            if let (Some(high), Some(low)) = (hex_value(raw[i + 1]), hex_value(raw[i + 2])) {
                out.push((high << 4) | low);
                i += 3;
                continue;
            }
        }
        out.push(if raw[i] == b'+' { b' ' } else { raw[i] });
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

const fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Parse the leading base-10 integer of a string.
///
/// Skips leading ASCII whitespace, accepts an optional sign, then takes
/// the longest run of ASCII digits and ignores whatever follows, so
/// `"5abc"` parses to 5. Returns `None` when there is no digit prefix or
/// the value does not fit in an `i64`.
pub fn parse_int_prefix(input: &str) -> Option<i64> {
    let rest = input.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (sign, rest) = match rest.as_bytes().first() {
        Some(b'+') => ("", &rest[1..]),
        Some(b'-') => ("-", &rest[1..]),
        _ => ("", rest),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    format!("{sign}{digits}").parse().ok()
}

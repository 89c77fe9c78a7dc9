// Copyright 2015-2024 Swim Inc.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Text forms of the scalar types. These are the rules behind the total conversions on
//! [`crate::Value`] and are shared with the text codecs.

use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use uuid::Uuid;


const LENIENT_BASE64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Shortest decimal text that reads back to the same double. Non-finite values are written
/// as `nan`, `inf` and `-inf`.
pub fn real_to_text(n: f64) -> String {
    if n.is_nan() {
        "nan".to_owned()
    } else if n.is_infinite() {
        if n.is_sign_positive() {
            "inf".to_owned()
        } else {
            "-inf".to_owned()
        }
    } else {
        let mut buffer = ryu::Buffer::new();
        buffer.format_finite(n).to_owned()
    }
}

/// Truncate toward zero, saturating at the bounds of `i32`. NaN becomes zero.
pub fn real_to_integer(n: f64) -> i32 {
    n as i32
}

/// Scans a decimal floating point number at the start of `bytes`, after any leading ASCII
/// whitespace. Returns the value and the index one past its last byte.
///
/// The accepted form is `[+-]? digits? ('.' digits?)? ([eE] [+-]? digits)?` with at least one
/// digit in the mantissa. An exponent marker that is not followed by digits is not consumed.
pub fn scan_real(bytes: &[u8]) -> Option<(f64, usize)> {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let mut end = start;
    if matches!(bytes.get(end), Some(b'+' | b'-')) {
        end += 1;
    }
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits + frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }
    let literal = std::str::from_utf8(&bytes[start..end]).ok()?;
    literal.parse::<f64>().ok().map(|n| (n, end))
}

/// Scans a decimal integer (with optional sign) at the start of `bytes`, after any leading
/// ASCII whitespace. Out of range values saturate.
pub fn scan_integer(bytes: &[u8]) -> Option<(i32, usize)> {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let mut end = start;
    let negative = match bytes.get(end) {
        Some(b'-') => {
            end += 1;
            true
        }
        Some(b'+') => {
            end += 1;
            false
        }
        _ => false,
    };
    let digits = count_digits(&bytes[end..]);
    if digits == 0 {
        return None;
    }
    let magnitude = bytes[end..end + digits].iter().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    let value = if negative { -magnitude } else { magnitude };
    let clamped = value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    Some((clamped, end + digits))
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Reads a string as a double: the whole string (after leading whitespace) must be a number,
/// otherwise the result is zero.
pub fn text_to_real(text: &str) -> f64 {
    match scan_real(text.as_bytes()) {
        Some((n, end)) if end == text.len() => n,
        _ => 0.0,
    }
}

/// As [`text_to_real`] but also accepting `nan`, `inf` and `infinity` (in any case and with an
/// optional sign).
pub fn text_to_real_or_special(text: &str) -> f64 {
    let trimmed = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    let (negative, word) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let special = if word.eq_ignore_ascii_case("nan") {
        Some(f64::NAN)
    } else if word.eq_ignore_ascii_case("inf") || word.eq_ignore_ascii_case("infinity") {
        Some(f64::INFINITY)
    } else {
        None
    };
    match special {
        Some(n) if negative => -n,
        Some(n) => n,
        None => text_to_real(text),
    }
}

/// Reads a string as an integer: the whole string (after leading whitespace) must be an
/// integer, otherwise the result is zero.
pub fn text_to_integer(text: &str) -> i32 {
    match scan_integer(text.as_bytes()) {
        Some((n, end)) if end == text.len() => n,
        _ => 0,
    }
}

/// Reads up to 32 hex digits into a UUID. Hyphens are skipped, scanning stops at the first
/// other non-hex character and any digits not supplied are zero.
pub fn text_to_uuid(text: &str) -> Uuid {
    let mut bytes = [0u8; 16];
    let mut digits = text
        .bytes()
        .filter(|b| *b != b'-')
        .map_while(|b| (b as char).to_digit(16))
        .take(32);
    for byte in bytes.iter_mut() {
        match (digits.next(), digits.next()) {
            (Some(hi), Some(lo)) => *byte = ((hi << 4) | lo) as u8,
            _ => break,
        }
    }
    Uuid::from_bytes(bytes)
}

pub fn binary_to_base64(data: &[u8]) -> String {
    STANDARD.encode(data)
}

/// Decodes base64, ignoring embedded whitespace and tolerating missing padding. Anything
/// that still fails to decode yields no bytes.
pub fn base64_to_binary(text: &str) -> Vec<u8> {
    let stripped: Vec<u8> = text
        .bytes()
        .filter(|b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .collect();
    LENIENT_BASE64.decode(stripped).unwrap_or_default()
}

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

//! Quoted and length-prefixed strings, as used by the notation format (and by binary input
//! written by older producers).

use crate::ByteStream;


/// The longest length prefix accepted in `s(<len>)"…"` and `b(<len>)"…"`.
pub const MAX_LENGTH_PREFIX: usize = 18;

/// Reads a string introduced by `'`, `"` or `s`. The introducing byte is consumed here.
pub fn read_string(stream: &mut ByteStream<'_>) -> Option<Vec<u8>> {
    match stream.get()? {
        delim @ (b'\'' | b'"') => read_delimited(stream, delim),
        b's' => read_sized(stream),
        _ => None,
    }
}

/// Reads an escaped string up to the closing `delim` (the opening delimiter has already been
/// consumed). Recognizes `\a \b \f \n \r \t \v` and `\xNN`; any other escaped byte stands for
/// itself. Fails if the input ends before the closing delimiter.
pub fn read_delimited(stream: &mut ByteStream<'_>, delim: u8) -> Option<Vec<u8>> {
    let mut out = Vec::new();
    loop {
        match stream.get()? {
            b'\\' => {
                let escaped = match stream.get()? {
                    b'x' => {
                        let hi = hex_value(stream.get()?);
                        let lo = hex_value(stream.get()?);
                        (hi << 4) | lo
                    }
                    b'a' => 0x07,
                    b'b' => 0x08,
                    b'f' => 0x0c,
                    b'n' => b'\n',
                    b'r' => b'\r',
                    b't' => b'\t',
                    b'v' => 0x0b,
                    other => other,
                };
                out.push(escaped);
            }
            b if b == delim => return Some(out),
            b => out.push(b),
        }
    }
}

/// Reads the remainder of `s(<len>)"…"` after the `s`: the decimal length in parentheses and
/// then exactly that many raw bytes between quotes. The length is checked against the budget
/// before anything is read.
pub fn read_sized(stream: &mut ByteStream<'_>) -> Option<Vec<u8>> {
    let len = read_length_prefix(stream)?;
    if !matches!(stream.get()?, b'"' | b'\'') {
        return None;
    }
    if !stream.budget().can_read(len) {
        return None;
    }
    let bytes = stream.read(len)?.to_vec();
    match stream.get()? {
        b'"' | b'\'' => Some(bytes),
        _ => None,
    }
}

/// Reads `(<len>)`.
pub fn read_length_prefix(stream: &mut ByteStream<'_>) -> Option<usize> {
    let prefix = stream.get_until(b')', MAX_LENGTH_PREFIX);
    if stream.get()? != b')' {
        return None;
    }
    let digits = prefix.strip_prefix(b"(")?;
    std::str::from_utf8(digits).ok()?.trim().parse().ok()
}

/// The value of a hex digit; anything else counts as zero.
pub fn hex_value(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        b'A'..=b'F' => b - b'A' + 10,
        _ => 0,
    }
}

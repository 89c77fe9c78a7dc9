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

use bytes::BufMut;
use llsd_model::{text, Value, ValueRef};


const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Encode a value in the notation format. The result is ASCII text unless the value contains
/// binary data, which is written raw.
pub fn format_notation(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_notation(value, &mut buf);
    buf
}

/// Write the notation encoding of a value into a buffer.
pub fn write_notation<B: BufMut>(value: &Value, buf: &mut B) {
    match value.view() {
        ValueRef::Undefined => buf.put_u8(b'!'),
        ValueRef::Boolean(true) => buf.put_slice(b"true"),
        ValueRef::Boolean(false) => buf.put_slice(b"false"),
        ValueRef::Integer(n) => {
            buf.put_u8(b'i');
            buf.put_slice(n.to_string().as_bytes());
        }
        ValueRef::Real(n) => {
            buf.put_u8(b'r');
            buf.put_slice(text::real_to_text(n).as_bytes());
        }
        ValueRef::Uuid(uuid) => {
            buf.put_u8(b'u');
            buf.put_slice(uuid.hyphenated().to_string().as_bytes());
        }
        ValueRef::String(s) => {
            buf.put_u8(b'\'');
            write_escaped(s.as_bytes(), buf);
            buf.put_u8(b'\'');
        }
        ValueRef::Date(date) => {
            buf.put_slice(b"d\"");
            buf.put_slice(date.to_string().as_bytes());
            buf.put_u8(b'"');
        }
        ValueRef::Uri(uri) => {
            buf.put_slice(b"l\"");
            write_escaped(uri.as_str().as_bytes(), buf);
            buf.put_u8(b'"');
        }
        ValueRef::Binary(data) => {
            buf.put_slice(format!("b({})\"", data.len()).as_bytes());
            buf.put_slice(data);
            buf.put_u8(b'"');
        }
        ValueRef::Map(map) => {
            buf.put_u8(b'{');
            for (i, (key, child)) in map.iter().enumerate() {
                if i > 0 {
                    buf.put_u8(b',');
                }
                buf.put_u8(b'\'');
                write_escaped(key.as_bytes(), buf);
                buf.put_slice(b"':");
                write_notation(child, buf);
            }
            buf.put_u8(b'}');
        }
        ValueRef::Array(array) => {
            buf.put_u8(b'[');
            for (i, child) in array.iter().enumerate() {
                if i > 0 {
                    buf.put_u8(b',');
                }
                write_notation(child, buf);
            }
            buf.put_u8(b']');
        }
    }
}

/// Escape a string for inclusion between quotes in the notation format.
pub fn escape_string(s: &str) -> String {
    let mut buf = Vec::with_capacity(s.len());
    write_escaped(s.as_bytes(), &mut buf);
    // Every escaped byte is printable ASCII.
    String::from_utf8_lossy(&buf).into_owned()
}

fn write_escaped<B: BufMut>(bytes: &[u8], buf: &mut B) {
    for &b in bytes {
        match b {
            0x07 => buf.put_slice(b"\\a"),
            0x08 => buf.put_slice(b"\\b"),
            b'\t' => buf.put_slice(b"\\t"),
            b'\n' => buf.put_slice(b"\\n"),
            0x0b => buf.put_slice(b"\\v"),
            0x0c => buf.put_slice(b"\\f"),
            b'\r' => buf.put_slice(b"\\r"),
            b'\'' => buf.put_slice(b"\\'"),
            b'\\' => buf.put_slice(b"\\\\"),
            b' '..=b'~' => buf.put_u8(b),
            _ => {
                buf.put_slice(b"\\x");
                buf.put_u8(HEX_DIGITS[usize::from(b >> 4)]);
                buf.put_u8(HEX_DIGITS[usize::from(b & 0x0f)]);
            }
        }
    }
}

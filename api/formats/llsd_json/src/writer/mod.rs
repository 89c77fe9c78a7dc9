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

use std::fmt::{Display, Formatter, Write};

use llsd_model::{Value, ValueRef};


/// Encode a value as JSON text.
pub fn format_json(value: &Value) -> String {
    print_json(value).to_string()
}

/// Print the JSON representation of a value.
pub fn print_json(value: &Value) -> impl Display + '_ {
    JsonPrint(value)
}

struct JsonPrint<'a>(&'a Value);

impl<'a> Display for JsonPrint<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write_json(self.0, f)
    }
}

/// Write the JSON representation of a value.
pub fn write_json<W: Write>(value: &Value, out: &mut W) -> std::fmt::Result {
    match value.view() {
        ValueRef::Undefined => out.write_str("null"),
        ValueRef::Boolean(b) => out.write_str(if b { "true" } else { "false" }),
        ValueRef::Integer(n) => write!(out, "{}", n),
        ValueRef::Real(n) => write_real(n, out),
        ValueRef::String(s) => write_string(s, out),
        ValueRef::Map(map) => {
            out.write_char('{')?;
            for (i, (key, child)) in map.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_string(key, out)?;
                out.write_char(':')?;
                write_json(child, out)?;
            }
            out.write_char('}')
        }
        ValueRef::Array(array) => {
            out.write_char('[')?;
            for (i, child) in array.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                write_json(child, out)?;
            }
            out.write_char(']')
        }
        _ => write_string(&value.as_string(), out),
    }
}

fn write_real<W: Write>(n: f64, out: &mut W) -> std::fmt::Result {
    if n.is_nan() {
        out.write_str("NaN")
    } else if n.is_infinite() {
        out.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else {
        let mut buffer = ryu::Buffer::new();
        out.write_str(buffer.format_finite(n))
    }
}

/// Writes a quoted string. Only printable ASCII is written as is; everything else is escaped
/// as UTF-16 code units.
fn write_string<W: Write>(s: &str, out: &mut W) -> std::fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        match c {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\u{08}' => out.write_str("\\b")?,
            '\u{0c}' => out.write_str("\\f")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            ' '..='\u{7f}' => out.write_char(c)?,
            _ => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(out, "\\u{:04x}", unit)?;
                }
            }
        }
    }
    out.write_char('"')
}

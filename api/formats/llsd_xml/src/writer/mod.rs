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

use std::fmt::{Arguments, Display, Formatter, Write};

use llsd_model::{text, Value, ValueRef};

#[cfg(test)]
mod tests;

const INDENT: &str = "    ";

/// Encode a value as a compact XML document.
pub fn format_xml(value: &Value) -> String {
    XmlFormatter::new().format(value)
}

/// Encode a value as an indented XML document.
pub fn format_xml_pretty(value: &Value) -> String {
    XmlFormatter::pretty().format(value)
}

/// Print the compact XML representation of a value.
pub fn print_xml(value: &Value) -> impl Display + '_ {
    XmlPrint(value, XmlFormatter::new())
}

struct XmlPrint<'a>(&'a Value, XmlFormatter);

impl<'a> Display for XmlPrint<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let XmlPrint(value, formatter) = self;
        formatter.write(value, f)
    }
}

/// XML formatter options.
///
/// In pretty mode, every element is written on its own line, indented by four spaces per
/// level of nesting. `<key>` elements are indented to the level of the map that contains
/// them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct XmlFormatter {
    pub pretty: bool,
}

impl XmlFormatter {
    pub fn new() -> Self {
        XmlFormatter { pretty: false }
    }

    pub fn pretty() -> Self {
        XmlFormatter { pretty: true }
    }

    pub fn format(&self, value: &Value) -> String {
        XmlPrint(value, *self).to_string()
    }

    /// Write a complete document, including the `<llsd>` wrapper and a final line break.
    pub fn write<W: Write>(&self, value: &Value, out: &mut W) -> std::fmt::Result {
        out.write_str("<llsd>")?;
        if self.pretty {
            out.write_char('\n')?;
        }
        self.write_element(value, 1, out)?;
        out.write_str("</llsd>\n")
    }

    fn write_element<W: Write>(
        &self,
        value: &Value,
        level: usize,
        out: &mut W,
    ) -> std::fmt::Result {
        let line = Line {
            pretty: self.pretty,
            level,
        };
        match value.view() {
            ValueRef::Map(map) if map.is_empty() => line.write(out, format_args!("<map />")),
            ValueRef::Map(map) => {
                line.write(out, format_args!("<map>"))?;
                for (key, child) in map {
                    line.write(out, format_args!("<key>{}</key>", Escaped(key)))?;
                    self.write_element(child, level + 1, out)?;
                }
                line.write(out, format_args!("</map>"))
            }
            ValueRef::Array(array) if array.is_empty() => {
                line.write(out, format_args!("<array />"))
            }
            ValueRef::Array(array) => {
                line.write(out, format_args!("<array>"))?;
                for child in array {
                    self.write_element(child, level + 1, out)?;
                }
                line.write(out, format_args!("</array>"))
            }
            ValueRef::Undefined => line.write(out, format_args!("<undef />")),
            ValueRef::Boolean(b) => line.write(out, format_args!("<boolean>{}</boolean>", b)),
            ValueRef::Integer(n) => line.write(out, format_args!("<integer>{}</integer>", n)),
            ValueRef::Real(n) => line.write(
                out,
                format_args!("<real>{}</real>", text::real_to_text(n)),
            ),
            ValueRef::Uuid(uuid) if uuid.is_nil() => line.write(out, format_args!("<uuid />")),
            ValueRef::Uuid(uuid) => {
                line.write(out, format_args!("<uuid>{}</uuid>", uuid.hyphenated()))
            }
            ValueRef::String("") => line.write(out, format_args!("<string />")),
            ValueRef::String(s) => {
                line.write(out, format_args!("<string>{}</string>", Escaped(s)))
            }
            ValueRef::Date(date) => line.write(out, format_args!("<date>{}</date>", date)),
            ValueRef::Uri(uri) => line.write(
                out,
                format_args!("<uri>{}</uri>", Escaped(uri.as_str())),
            ),
            ValueRef::Binary([]) => line.write(out, format_args!("<binary />")),
            ValueRef::Binary(data) => line.write(
                out,
                format_args!(
                    "<binary encoding=\"base64\">{}</binary>",
                    text::binary_to_base64(data)
                ),
            ),
        }
    }
}

/// A single element line; only indented and terminated in pretty mode.
struct Line {
    pretty: bool,
    level: usize,
}

impl Line {
    fn write<W: Write>(&self, out: &mut W, content: Arguments<'_>) -> std::fmt::Result {
        if self.pretty {
            for _ in 0..self.level {
                out.write_str(INDENT)?;
            }
            out.write_fmt(content)?;
            out.write_char('\n')
        } else {
            out.write_fmt(content)
        }
    }
}

/// Text with the XML special characters replaced by entities.
struct Escaped<'a>(&'a str);

impl<'a> Display for Escaped<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut rest = self.0;
        while let Some(i) = rest.find(&['<', '>', '&', '\'', '"'][..]) {
            f.write_str(&rest[..i])?;
            let entity = match rest.as_bytes()[i] {
                b'<' => "&lt;",
                b'>' => "&gt;",
                b'&' => "&amp;",
                b'\'' => "&apos;",
                _ => "&quot;",
            };
            f.write_str(entity)?;
            rest = &rest[i + 1..];
        }
        f.write_str(rest)
    }
}

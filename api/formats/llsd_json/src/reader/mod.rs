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

use llsd_model::{Array, Map, Value};
use llsd_parse::{ByteLimit, ByteStream, FailureSink, Nesting, ParseError, Step, NESTING_FAILURE};

#[cfg(test)]
mod tests;

/// Parse a JSON document. The document must consist of exactly one value, optionally
/// surrounded by whitespace.
///
/// # Arguments
/// * `input` - The JSON text.
/// * `limit` - Limit on the number of bytes that may be consumed.
pub fn parse_json(input: &[u8], limit: ByteLimit) -> Result<Value, ParseError> {
    let mut reader = Reader {
        stream: ByteStream::new(input, limit),
        sink: FailureSink::new(),
        nesting: Nesting::new(),
    };
    let result = reader.parse_document();
    reader.sink.finish(result.unwrap_or_default())
}

struct Reader<'a> {
    stream: ByteStream<'a>,
    sink: FailureSink,
    nesting: Nesting,
}

fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}

impl<'a> Reader<'a> {
    fn parse_document(&mut self) -> Step<Value> {
        let value = self.parse_value()?;
        self.ws();
        self.check_budget()?;
        if !self.stream.is_empty() {
            return self.sink.fail("unrecognized data");
        }
        Ok(value)
    }

    fn ws(&mut self) {
        self.stream.skip_while(is_json_whitespace);
    }

    fn check_budget(&mut self) -> Step<()> {
        if self.stream.budget().exhausted() {
            self.sink.fail("exceeded maximum byte count")
        } else {
            Ok(())
        }
    }

    fn require(&mut self, token: &str) -> Step<()> {
        if self.stream.test(token.as_bytes()) {
            Ok(())
        } else {
            self.sink.fail(format!("expected {}", token))
        }
    }

    fn digit(&mut self) -> Option<u8> {
        match self.stream.peek() {
            Some(d) if d.is_ascii_digit() => self.stream.get(),
            _ => None,
        }
    }

    /// Each of the sub-parsers yields `None` if the input does not start with the kind of value
    /// it reads, so that the next may be tried.
    fn parse_value(&mut self) -> Step<Value> {
        self.ws();
        self.check_budget()?;
        if self.stream.test(b"false") {
            return Ok(Value::from(false));
        }
        if self.stream.test(b"null") {
            return Ok(Value::default());
        }
        if self.stream.test(b"true") {
            return Ok(Value::from(true));
        }
        if let Some(object) = self
            .parse_object()
            .or_else(|_| self.sink.fail("unparsable object"))?
        {
            return Ok(object);
        }
        if let Some(array) = self
            .parse_array()
            .or_else(|_| self.sink.fail("unparsable array"))?
        {
            return Ok(array);
        }
        if let Some(number) = self
            .parse_number()
            .or_else(|_| self.sink.fail("unparsable number"))?
        {
            return Ok(number);
        }
        if let Some(string) = self
            .parse_string()
            .or_else(|_| self.sink.fail("unparsable string"))?
        {
            return Ok(Value::from(string));
        }
        self.sink.fail("expected value")
    }

    /// Reads the contents of a map or array, one level deeper.
    fn nested<F>(&mut self, read_contents: F) -> Step<Value>
    where
        F: FnOnce(&mut Self) -> Step<Value>,
    {
        if !self.nesting.enter() {
            return self.sink.fail(NESTING_FAILURE);
        }
        let result = read_contents(self);
        self.nesting.leave();
        result
    }

    fn parse_object(&mut self) -> Step<Option<Value>> {
        if !self.stream.test(b"{") {
            return Ok(None);
        }
        self.nested(Self::object_contents).map(Some)
    }

    fn object_contents(&mut self) -> Step<Value> {
        self.ws();
        let mut map = Map::new();
        if !self.stream.test(b"}") {
            loop {
                let Some(key) = self.parse_string().ok().flatten() else {
                    return self.sink.fail("expected key");
                };
                self.ws();
                self.require(":")
                    .or_else(|_| self.sink.fail("expected colon"))?;
                self.ws();
                let child = self
                    .parse_value()
                    .or_else(|_| self.sink.fail("expected value"))?;
                map.entry(key).or_insert(child);
                self.ws();
                if !self.stream.test(b",") {
                    break;
                }
                self.ws();
            }
            self.require("}")
                .or_else(|_| self.sink.fail("expected close brace"))?;
        }
        Ok(Value::from(map))
    }

    fn parse_array(&mut self) -> Step<Option<Value>> {
        if !self.stream.test(b"[") {
            return Ok(None);
        }
        self.nested(Self::array_contents).map(Some)
    }

    fn array_contents(&mut self) -> Step<Value> {
        self.ws();
        let mut array = Array::new();
        if !self.stream.test(b"]") {
            loop {
                let child = self
                    .parse_value()
                    .or_else(|_| self.sink.fail("expected value"))?;
                array.push(child);
                self.ws();
                if !self.stream.test(b",") {
                    break;
                }
                self.ws();
            }
            self.require("]")
                .or_else(|_| self.sink.fail("expected close bracket"))?;
        }
        Ok(Value::from(array))
    }

    /// `-? (0 | [1-9][0-9]*) (. [0-9]+)? ([eE] [+-]? [0-9]+)?`, or one of the non-finite
    /// literals. Anything with a fraction or exponent is a real.
    fn parse_number(&mut self) -> Step<Option<Value>> {
        if self.stream.test(b"Infinity") {
            return Ok(Some(Value::from(f64::INFINITY)));
        }
        if self.stream.test(b"-Infinity") {
            return Ok(Some(Value::from(f64::NEG_INFINITY)));
        }
        if self.stream.test(b"NaN") {
            return Ok(Some(Value::from(f64::NAN)));
        }

        let mut literal = String::new();
        let mut is_integer = true;
        let negative = self.stream.test(b"-");
        if negative {
            literal.push('-');
        }
        let Some(first) = self.digit() else {
            return if negative {
                self.sink.fail("expected digit")
            } else {
                Ok(None)
            };
        };
        literal.push(char::from(first));
        if first != b'0' {
            while let Some(d) = self.digit() {
                literal.push(char::from(d));
            }
        }

        if self.stream.test(b".") {
            is_integer = false;
            literal.push('.');
            self.digits_into(&mut literal)?;
        }

        if self.stream.test(b"e") || self.stream.test(b"E") {
            is_integer = false;
            literal.push('e');
            if self.stream.test(b"-") {
                literal.push('-');
            } else if self.stream.test(b"+") {
                literal.push('+');
            }
            self.digits_into(&mut literal)?;
        }

        let number = if is_integer {
            Value::from(llsd_model::text::text_to_integer(&literal))
        } else {
            Value::from(literal.parse::<f64>().unwrap_or_default())
        };
        Ok(Some(number))
    }

    /// At least one digit.
    fn digits_into(&mut self, literal: &mut String) -> Step<()> {
        let Some(first) = self.digit() else {
            return self.sink.fail("expected digit");
        };
        literal.push(char::from(first));
        while let Some(d) = self.digit() {
            literal.push(char::from(d));
        }
        Ok(())
    }

    /// Strings are gathered as UTF-16 code units before being converted. Bytes outside
    /// escapes are taken as code units individually, so non-ASCII text must be escaped.
    fn parse_string(&mut self) -> Step<Option<String>> {
        if !self.stream.test(b"\"") {
            return Ok(None);
        }
        let mut units: Vec<u16> = Vec::new();
        loop {
            let Some(b) = self.stream.get() else {
                return self.sink.fail("unterminated string");
            };
            match b {
                b'"' => break,
                b'\\' => {
                    let Some(escaped) = self.stream.get() else {
                        return self.sink.fail("truncated escape sequence");
                    };
                    let unit = match escaped {
                        b'"' => u16::from(b'"'),
                        b'\\' => u16::from(b'\\'),
                        b'/' => u16::from(b'/'),
                        b'b' => 0x08,
                        b'f' => 0x0c,
                        b'n' => u16::from(b'\n'),
                        b'r' => u16::from(b'\r'),
                        b't' => u16::from(b'\t'),
                        b'u' => self.code_unit()?,
                        _ => return self.sink.fail("unexpected escape sequence"),
                    };
                    units.push(unit);
                }
                other => units.push(u16::from(other)),
            }
        }
        Ok(Some(decode_code_units(&units)))
    }

    /// The four hex digits of a `\u` escape.
    fn code_unit(&mut self) -> Step<u16> {
        let mut unit = 0u16;
        for _ in 0..4 {
            let Some(b) = self.stream.get() else {
                return self.sink.fail("truncated escape sequence");
            };
            let Some(hex) = char::from(b).to_digit(16) else {
                return self.sink.fail("invalid escape sequence");
            };
            unit = (unit << 4) | hex as u16;
        }
        Ok(unit)
    }
}

/// Combines surrogate pairs into code points and encodes the result as UTF-8. A low
/// surrogate is combined with the most recent high surrogate (or with zero if there was none)
/// and a high surrogate that is not followed by a low surrogate is dropped. Anything that is
/// not a valid scalar value becomes U+FFFD.
fn decode_code_units(units: &[u16]) -> String {
    let mut out = String::with_capacity(units.len());
    let mut high: u32 = 0;
    for &unit in units {
        let unit = u32::from(unit);
        match unit {
            0xd800..=0xdbff => high = unit,
            0xdc00..=0xdfff => {
                let cp = ((high & 0x3ff) << 10) + (unit & 0x3ff) + 0x10000;
                out.push(char::from_u32(cp).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            _ => {
                high = 0;
                out.push(char::from_u32(unit).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
        }
    }
    out
}

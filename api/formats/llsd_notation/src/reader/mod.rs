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

use llsd_model::{text, Array, Date, Map, Uri, Value};
use llsd_parse::{
    quoted, ByteLimit, ByteStream, FailureSink, Nesting, ParseError, Step, NESTING_FAILURE,
};


/// The longest prefix (`b(<len>)`, `b64` or `b16`) of a binary value.
const MAX_BINARY_PREFIX: usize = 255;
const UUID_TEXT_LEN: usize = 36;

/// Parse a single notation encoded value from the start of the input. Any bytes following the
/// value are ignored.
///
/// # Arguments
/// * `input` - The encoded value.
/// * `limit` - Limit on the number of bytes that may be consumed.
pub fn parse_notation(input: &[u8], limit: ByteLimit) -> Result<Value, ParseError> {
    NotationParser::new(limit).parse(input)
}

/// Configurable notation parser.
#[derive(Debug, Clone, Copy, Default)]
pub struct NotationParser {
    limit: ByteLimit,
}

impl NotationParser {
    pub fn new(limit: ByteLimit) -> Self {
        NotationParser { limit }
    }

    pub fn parse(&self, input: &[u8]) -> Result<Value, ParseError> {
        self.parse_prefix(input).map(|(value, _)| value)
    }

    /// Parse a single value from the start of the input, also returning the number of bytes
    /// consumed.
    pub fn parse_prefix(&self, input: &[u8]) -> Result<(Value, usize), ParseError> {
        let mut reader = Reader {
            stream: ByteStream::new(input, self.limit),
            sink: FailureSink::new(),
            nesting: Nesting::new(),
        };
        let result = reader.parse_value().and_then(|value| {
            reader.check_budget()?;
            Ok(value)
        });
        let Reader { stream, sink, .. } = reader;
        sink.finish((result.unwrap_or_default(), stream.consumed()))
    }
}

/// Whitespace as understood by C's `isspace`.
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | 0x0b | 0x0c | b'\r')
}

struct Reader<'a> {
    stream: ByteStream<'a>,
    sink: FailureSink,
    nesting: Nesting,
}

impl<'a> Reader<'a> {
    fn check_budget(&mut self) -> Step<()> {
        if self.stream.budget().exhausted() {
            self.sink.fail("exceeded maximum byte count")
        } else {
            Ok(())
        }
    }

    fn parse_value(&mut self) -> Step<Value> {
        self.stream.skip_while(is_space);
        self.check_budget()?;
        let Some(c) = self.stream.peek() else {
            return self.sink.fail("input failure");
        };
        match c {
            b'{' => self
                .nested(Self::parse_map)
                .or_else(|_| self.sink.fail("invalid map")),
            b'[' => self
                .nested(Self::parse_array)
                .or_else(|_| self.sink.fail("invalid array")),
            b'!' => {
                self.stream.ignore(1);
                Ok(Value::default())
            }
            b'0' => {
                self.stream.ignore(1);
                Ok(Value::from(false))
            }
            b'1' => {
                self.stream.ignore(1);
                Ok(Value::from(true))
            }
            b'f' | b'F' => {
                self.stream.ignore(1);
                if self.read_boolean_word(b"false") {
                    Ok(Value::from(false))
                } else {
                    self.sink.fail("invalid boolean false")
                }
            }
            b't' | b'T' => {
                self.stream.ignore(1);
                if self.read_boolean_word(b"true") {
                    Ok(Value::from(true))
                } else {
                    self.sink.fail("invalid boolean true")
                }
            }
            b'i' => {
                self.stream.ignore(1);
                match text::scan_integer(self.stream.rest()) {
                    Some((n, len)) => {
                        self.stream.ignore(len);
                        Ok(Value::from(n))
                    }
                    None => self.sink.fail("input failure reading integer"),
                }
            }
            b'r' => {
                self.stream.ignore(1);
                match self.read_real() {
                    Some(n) => Ok(Value::from(n)),
                    None => self.sink.fail("input failure reading real"),
                }
            }
            b'u' => {
                self.stream.ignore(1);
                match self.stream.read(UUID_TEXT_LEN) {
                    Some(bytes) => Ok(Value::from(text::text_to_uuid(
                        &String::from_utf8_lossy(bytes),
                    ))),
                    None => self.sink.fail("input failure reading uuid"),
                }
            }
            b'"' | b'\'' | b's' => match quoted::read_string(&mut self.stream) {
                Some(bytes) => Ok(Value::from(String::from_utf8_lossy(&bytes).into_owned())),
                None => self.sink.fail("invalid string"),
            },
            b'l' => {
                self.stream.ignore(1);
                match self.read_delimited() {
                    Some(text) => Ok(Value::from(Uri::new(text))),
                    None => self.sink.fail("invalid uri"),
                }
            }
            b'd' => {
                self.stream.ignore(1);
                match self.read_delimited() {
                    Some(text) => Ok(Value::from(Date::parse_lenient(&text))),
                    None => self.sink.fail("invalid date"),
                }
            }
            b'b' => self
                .parse_binary()
                .or_else(|_| self.sink.fail("invalid binary")),
            other => self
                .sink
                .fail(format!("unrecognized character '{}'", other as char)),
        }
    }

    /// Matches the remainder of `word` (whose first letter has been consumed), ignoring case.
    /// A lone first letter is also accepted.
    fn read_boolean_word(&mut self, word: &[u8]) -> bool {
        if !self.stream.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            return true;
        }
        for expected in &word[1..] {
            match self.stream.peek() {
                Some(c) if c.to_ascii_lowercase() == *expected => self.stream.ignore(1),
                _ => return false,
            }
        }
        true
    }

    /// A decimal real or one of the non-finite forms written by the formatter.
    fn read_real(&mut self) -> Option<f64> {
        if self.stream.test(b"nan") {
            return Some(f64::NAN);
        }
        if self.stream.test(b"-inf") {
            self.stream.test(b"inity");
            return Some(f64::NEG_INFINITY);
        }
        if self.stream.test(b"inf") {
            self.stream.test(b"inity");
            return Some(f64::INFINITY);
        }
        let (n, len) = text::scan_real(self.stream.rest())?;
        self.stream.ignore(len);
        Some(n)
    }

    /// An escaped string, where the first byte read is the delimiter.
    fn read_delimited(&mut self) -> Option<String> {
        let delim = self.stream.get()?;
        let bytes = quoted::read_delimited(&mut self.stream, delim)?;
        Some(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Reads a map or array, one level deeper.
    fn nested<F>(&mut self, parse: F) -> Step<Value>
    where
        F: FnOnce(&mut Self) -> Step<Value>,
    {
        if !self.nesting.enter() {
            return self.sink.fail(NESTING_FAILURE);
        }
        let result = parse(self);
        self.nesting.leave();
        result
    }

    fn parse_map(&mut self) -> Step<Value> {
        self.stream.ignore(1);
        let mut map = Map::new();
        let mut name: Option<String> = None;
        let mut next = self.stream.get();
        while let Some(c) = next {
            if c == b'}' {
                break;
            }
            match name.take() {
                None => {
                    // Anything before the key is ignored.
                    if matches!(c, b'"' | b'\'' | b's') {
                        self.stream.putback();
                        match quoted::read_string(&mut self.stream) {
                            Some(key) => name = Some(String::from_utf8_lossy(&key).into_owned()),
                            None => return self.sink.fail("invalid map key"),
                        }
                    }
                }
                Some(key) if is_space(c) || c == b':' => name = Some(key),
                Some(key) => {
                    self.stream.putback();
                    let child = self
                        .parse_value()
                        .or_else(|_| self.sink.fail("invalid map value"))?;
                    map.entry(key).or_insert(child);
                }
            }
            next = self.stream.get();
        }
        if next != Some(b'}') {
            return self
                .sink
                .fail("incorrectly sized map, missing terminator");
        }
        Ok(Value::from(map))
    }

    fn parse_array(&mut self) -> Step<Value> {
        self.stream.ignore(1);
        let mut array = Array::new();
        let mut next = self.stream.get();
        while let Some(c) = next {
            if c == b']' {
                break;
            }
            if !is_space(c) && c != b',' {
                self.stream.putback();
                let child = self
                    .parse_value()
                    .or_else(|_| self.sink.fail("invalid array value"))?;
                array.push(child);
            }
            next = self.stream.get();
        }
        if next != Some(b']') {
            return self
                .sink
                .fail("incorrectly sized array, missing terminator");
        }
        Ok(Value::from(array))
    }

    /// `b(<len>)"raw"`, `b64"base64"` or `b16"hex"`.
    fn parse_binary(&mut self) -> Step<Value> {
        let prefix = self.stream.get_until(b'"', MAX_BINARY_PREFIX);
        if self.stream.get() != Some(b'"') {
            return self.sink.fail("invalid binary");
        }
        if let Some(len) = prefix.strip_prefix(b"b(") {
            let Some(len) = raw_length(len) else {
                return self.sink.fail("invalid binary");
            };
            if !self.stream.budget().can_read(len) {
                return self.sink.fail("invalid binary");
            }
            let Some(bytes) = self.stream.read(len) else {
                return self.sink.fail("input failure reading binary");
            };
            if !matches!(self.stream.get(), Some(b'"' | b'\'')) {
                return self.sink.fail("input failure reading binary");
            }
            Ok(Value::from(bytes))
        } else if prefix.starts_with(b"b64") {
            let encoded = self.read_encoded()?;
            Ok(Value::from(text::base64_to_binary(&String::from_utf8_lossy(
                encoded,
            ))))
        } else if prefix.starts_with(b"b16") {
            let encoded = self.read_encoded()?;
            let bytes = encoded
                .chunks(2)
                .map(|pair| {
                    let hi = quoted::hex_value(pair[0]);
                    let lo = pair.get(1).copied().map(quoted::hex_value).unwrap_or(0);
                    (hi << 4) | lo
                })
                .collect::<Vec<u8>>();
            Ok(Value::from(bytes))
        } else {
            self.sink.fail("invalid binary")
        }
    }

    /// The encoded text of a `b64` or `b16` value, up to the closing quote.
    fn read_encoded(&mut self) -> Step<&'a [u8]> {
        let encoded = self.stream.get_until(b'"', usize::MAX);
        if self.stream.get() != Some(b'"') {
            return self.sink.fail("input failure reading binary");
        }
        Ok(encoded)
    }
}

/// The length in `b(<len>)`: digits up to the closing parenthesis.
fn raw_length(bytes: &[u8]) -> Option<usize> {
    let digits = bytes.strip_suffix(b")")?;
    std::str::from_utf8(digits).ok()?.trim().parse().ok()
}

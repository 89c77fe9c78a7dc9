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

use bytes::Buf;
use llsd_model::{Array, Date, Map, Uri, Uuid, Value};
use llsd_parse::{
    quoted, ByteLimit, ByteStream, FailureSink, Nesting, ParseError, Step, NESTING_FAILURE,
};

use crate::{
    swap_real_words, ARRAY_END, ARRAY_START, BINARY_TAG, DATE_TAG, FALSE_TAG, INTEGER_TAG,
    MAP_END, MAP_KEY_TAG, MAP_START, REAL_TAG, STRING_TAG, TRUE_TAG, UNDEFINED_TAG, URI_TAG,
    UUID_TAG,
};

#[cfg(test)]
mod tests;

const LEGACY_HEADER: &[u8] = b"LLSD/Binary";
const MAX_HEADER_LEN: usize = 19;

/// Parse a single binary encoded value from the start of the input. Any bytes following the
/// value are ignored.
///
/// # Arguments
/// * `input` - The encoded value.
/// * `limit` - Limit on the number of bytes that may be consumed.
pub fn parse_binary(input: &[u8], limit: ByteLimit) -> Result<Value, ParseError> {
    BinaryParser::new(limit).parse(input)
}

/// Configurable binary parser.
///
/// In legacy mode, input may start with an `<?LLSD/Binary?>` header line and strings and map
/// keys may also be written in the quoted notation form (`'…'` or `"…"`).
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryParser {
    limit: ByteLimit,
    legacy: bool,
}

impl BinaryParser {
    pub fn new(limit: ByteLimit) -> Self {
        BinaryParser {
            limit,
            legacy: false,
        }
    }

    pub fn legacy(self) -> Self {
        BinaryParser {
            legacy: true,
            ..self
        }
    }

    pub fn parse(&self, input: &[u8]) -> Result<Value, ParseError> {
        self.parse_prefix(input).map(|(value, _)| value)
    }

    /// Parse a single value from the start of the input, also returning the number of bytes
    /// consumed so that reading can continue after it.
    pub fn parse_prefix(&self, input: &[u8]) -> Result<(Value, usize), ParseError> {
        let mut reader = Reader {
            stream: ByteStream::new(input, self.limit),
            sink: FailureSink::new(),
            nesting: Nesting::new(),
            legacy: self.legacy,
        };
        let result = reader.parse_one(true);
        let Reader { stream, sink, .. } = reader;
        let value = result.unwrap_or_default();
        sink.finish((value, stream.consumed()))
    }
}

struct Reader<'a> {
    stream: ByteStream<'a>,
    sink: FailureSink,
    nesting: Nesting,
    legacy: bool,
}

impl<'a> Reader<'a> {
    fn parse_one(&mut self, top_level: bool) -> Step<Value> {
        let Some(tag) = self.stream.get() else {
            return self.sink.fail("unexpected end of input");
        };
        if top_level && self.legacy && tag == b'<' {
            self.skip_legacy_header()?;
            return self.parse_one(false);
        }
        match tag {
            MAP_START => self
                .nested(Self::parse_map)
                .or_else(|_| self.sink.fail("unparseable map")),
            ARRAY_START => self
                .nested(Self::parse_array)
                .or_else(|_| self.sink.fail("unparseable array")),
            UNDEFINED_TAG => Ok(Value::default()),
            FALSE_TAG => Ok(Value::from(false)),
            TRUE_TAG => Ok(Value::from(true)),
            INTEGER_TAG => match self.stream.read(4) {
                Some(mut bytes) => Ok(Value::from(bytes.get_i32())),
                None => self.sink.fail("input failure reading integer"),
            },
            REAL_TAG => match self.stream.read_array::<8>() {
                Some(bytes) => Ok(Value::from(f64::from_ne_bytes(swap_real_words(bytes)))),
                None => self.sink.fail("input failure reading real"),
            },
            UUID_TAG => match self.stream.read_array::<16>() {
                Some(bytes) => Ok(Value::from(Uuid::from_bytes(bytes))),
                None => self.sink.fail("input failure reading uuid"),
            },
            DATE_TAG => match self.stream.read(8) {
                Some(mut bytes) => Ok(Value::from(Date::from_seconds(bytes.get_f64_ne()))),
                None => self.sink.fail("input failure reading date"),
            },
            STRING_TAG => {
                let bytes = self.read_sized("invalid string", "input failure reading string")?;
                Ok(Value::from(String::from_utf8_lossy(bytes).into_owned()))
            }
            URI_TAG => {
                let bytes = self.read_sized("invalid uri", "input failure reading uri")?;
                Ok(Value::from(Uri::new(String::from_utf8_lossy(bytes))))
            }
            BINARY_TAG => {
                let bytes = self.read_sized(
                    "ran out of bytes reading binary",
                    "input failure reading binary",
                )?;
                Ok(Value::from(bytes))
            }
            delim @ (b'\'' | b'"') => {
                if !self.legacy {
                    return self.sink.fail("found legacy string");
                }
                match quoted::read_delimited(&mut self.stream, delim) {
                    Some(bytes) => Ok(Value::from(String::from_utf8_lossy(&bytes).into_owned())),
                    None => self.sink.fail("invalid legacy string"),
                }
            }
            other => self
                .sink
                .fail(format!("unrecognized tag '{}'", other as char)),
        }
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
        let Some(size) = self.read_size() else {
            return self.sink.fail("input failure reading map");
        };
        let mut map = Map::new();
        let mut count = 0;
        let mut next = self.stream.get();
        while let Some(tag) = next {
            if tag == MAP_END || count >= size {
                break;
            }
            let key = match tag {
                MAP_KEY_TAG => {
                    let bytes = self.read_sized("invalid map key", "invalid map key")?;
                    String::from_utf8_lossy(bytes).into_owned()
                }
                b'\'' | b'"' if self.legacy => {
                    match quoted::read_delimited(&mut self.stream, tag) {
                        Some(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                        None => return self.sink.fail("invalid legacy map key"),
                    }
                }
                b'\'' | b'"' => return self.sink.fail("found legacy map key"),
                // Any other byte starts an entry with an empty key.
                _ => String::new(),
            };
            let child = self
                .parse_one(false)
                .or_else(|_| self.sink.fail("invalid map value"))?;
            map.entry(key).or_insert(child);
            count += 1;
            next = self.stream.get();
        }
        if next != Some(MAP_END) || count < size {
            return self.sink.fail("incorrectly sized map");
        }
        Ok(Value::from(map))
    }

    fn parse_array(&mut self) -> Step<Value> {
        let Some(size) = self.read_size() else {
            return self.sink.fail("input failure reading array");
        };
        let mut array = Array::new();
        let mut count = 0;
        while self.stream.peek().is_some_and(|c| c != ARRAY_END) && count < size {
            let child = self
                .parse_one(false)
                .or_else(|_| self.sink.fail("invalid array value"))?;
            array.push(child);
            count += 1;
        }
        if self.stream.get() != Some(ARRAY_END) || count < size {
            return self.sink.fail("incorrectly sized array");
        }
        Ok(Value::from(array))
    }

    fn read_size(&mut self) -> Option<i32> {
        self.stream.read(4).map(|mut bytes| bytes.get_i32())
    }

    /// Reads a length prefixed block of bytes. A length that is negative or exceeds the
    /// remaining byte budget fails with `invalid`, running out of input with `truncated`.
    fn read_sized(&mut self, invalid: &str, truncated: &str) -> Step<&'a [u8]> {
        let Some(size) = self.read_size() else {
            return self.sink.fail(truncated);
        };
        let Ok(size) = usize::try_from(size) else {
            return self.sink.fail(invalid);
        };
        if !self.stream.budget().can_read(size) {
            return self.sink.fail(invalid);
        }
        match self.stream.read(size) {
            Some(bytes) => Ok(bytes),
            None => self.sink.fail(truncated),
        }
    }

    /// Consumes the remainder of a `<?LLSD/Binary?>` header line (the `<` has been read) and
    /// any whitespace following it.
    fn skip_legacy_header(&mut self) -> Step<()> {
        let header = self.stream.get_until(b'\n', MAX_HEADER_LEN);
        let start = header.iter().position(|b| !matches!(b, b'?' | b' '));
        let end = start.and_then(|start| {
            header[start..]
                .iter()
                .position(|b| matches!(b, b'?' | b' '))
                .map(|len| start + len)
        });
        match (start, end) {
            (Some(start), Some(end)) if &header[start..end] == LEGACY_HEADER => {
                self.stream.skip_whitespace();
                Ok(())
            }
            (Some(_), Some(_)) => self.sink.fail("unrecognized legacy header"),
            _ => self.sink.fail("invalid binary tag '<'"),
        }
    }
}

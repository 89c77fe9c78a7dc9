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

use llsd_model::{text, Date, Uri, Value, ValueType};
use llsd_parse::{FailureSink, ParseError, MAX_NESTING_DEPTH, NESTING_FAILURE};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use tracing::trace;


const LEGACY_HEADER: &str = "LLSD/XML";
const MAX_HEADER_LEN: usize = 1024;

/// Parse an XML document containing a single `<llsd>` element. Anything after the end of the
/// `<llsd>` element is ignored.
pub fn parse_xml(input: &[u8]) -> Result<Value, ParseError> {
    XmlParser::new().parse(input)
}

/// The elements of the format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    Llsd,
    Undef,
    Boolean,
    Integer,
    Real,
    String,
    Uuid,
    Date,
    Uri,
    Binary,
    Map,
    Array,
    Key,
    Unknown,
}

impl Element {
    fn from_name(name: &[u8]) -> Element {
        match name {
            b"key" => Element::Key,
            b"real" => Element::Real,
            b"integer" => Element::Integer,
            b"array" => Element::Array,
            b"map" => Element::Map,
            b"uuid" => Element::Uuid,
            b"undef" => Element::Undef,
            b"uri" => Element::Uri,
            b"binary" => Element::Binary,
            b"boolean" => Element::Boolean,
            b"string" => Element::String,
            b"llsd" => Element::Llsd,
            b"date" => Element::Date,
            _ => Element::Unknown,
        }
    }
}

/// Where a completed value is stored.
#[derive(Debug)]
enum Slot {
    Root,
    Entry(String),
    Element,
}

/// A value under construction.
#[derive(Debug)]
struct Frame {
    slot: Slot,
    element: Element,
    value: Value,
}

/// Parser for XML documents.
///
/// The parser consumes the stream of XML events and maintains a stack of the values currently
/// under construction. The top of the stack is the parent of the next value to be read. An
/// element that cannot be placed (an unknown element, a value element with no preceding
/// `<key>` inside a map, an element inside a scalar and so on) is skipped, along with its
/// descendants, and a failure is noted.
///
/// In legacy mode, unknown elements are read as undefined values without failing, `1` is
/// accepted as a true boolean, and the document may be preceded by line breaks and an
/// `<?LLSD/XML?>` header line.
#[derive(Debug, Default)]
pub struct XmlParser {
    legacy: bool,
    recovered: Value,
}

impl XmlParser {
    pub fn new() -> Self {
        XmlParser::default()
    }

    pub fn legacy() -> Self {
        XmlParser {
            legacy: true,
            ..Default::default()
        }
    }

    pub fn is_legacy(&self) -> bool {
        self.legacy
    }

    /// Parse a document. If the parse fails, the values that were read successfully (with any
    /// skipped elements omitted) are still available from [`XmlParser::recovered`].
    pub fn parse(&mut self, input: &[u8]) -> Result<Value, ParseError> {
        let input = if self.legacy {
            strip_legacy_preamble(input)
        } else {
            input
        };
        let mut builder = Builder::new(self.legacy);
        builder.run(input);
        let Builder { result, sink, .. } = builder;
        self.recovered = result.clone();
        sink.finish(result)
    }

    /// The value read by the most recent call to [`XmlParser::parse`].
    pub fn recovered(&self) -> &Value {
        &self.recovered
    }
}

/// Skips any leading line breaks and, if the first line is an `<?LLSD/XML?>` header, that line.
fn strip_legacy_preamble(input: &[u8]) -> &[u8] {
    let start = input
        .iter()
        .position(|b| !matches!(b, b'\r' | b'\n'))
        .unwrap_or(input.len());
    let input = &input[start..];
    let line_len = input
        .iter()
        .take(MAX_HEADER_LEN)
        .position(|b| *b == b'\n')
        .map(|i| i + 1)
        .unwrap_or_else(|| input.len().min(MAX_HEADER_LEN));
    if is_legacy_header(&input[..line_len]) {
        &input[line_len..]
    } else {
        input
    }
}

fn is_legacy_header(line: &[u8]) -> bool {
    let Some(start) = line.iter().position(|b| !matches!(b, b'<' | b'?' | b' ')) else {
        return false;
    };
    let Some(len) = line[start..].iter().position(|b| matches!(b, b' ' | b'?')) else {
        return false;
    };
    &line[start..start + len] == LEGACY_HEADER.as_bytes()
}

/// The state of a single parse.
struct Builder {
    legacy: bool,
    sink: FailureSink,
    result: Value,
    stack: Vec<Frame>,
    depth: usize,
    skip_through: Option<usize>,
    in_llsd: bool,
    llsd_parsed: bool,
    key: Option<String>,
    content: String,
}

impl Builder {
    fn new(legacy: bool) -> Self {
        Builder {
            legacy,
            sink: FailureSink::new(),
            result: Value::default(),
            stack: vec![],
            depth: 0,
            skip_through: None,
            in_llsd: false,
            llsd_parsed: false,
            key: None,
            content: String::new(),
        }
    }

    fn run(&mut self, input: &[u8]) {
        let mut reader = Reader::from_reader(input);
        reader.config_mut().expand_empty_elements = true;
        while !self.llsd_parsed {
            match reader.read_event() {
                Ok(Event::Start(start)) => {
                    let encoding = match binary_encoding(&start) {
                        Ok(encoding) => encoding,
                        Err(err) => {
                            self.xml_error(err);
                            break;
                        }
                    };
                    self.start_element(start.name().as_ref(), encoding.as_deref());
                }
                Ok(Event::End(end)) => self.end_element(end.name().as_ref()),
                Ok(Event::Text(text)) => match text.unescape() {
                    Ok(text) => self.content.push_str(&text),
                    Err(err) => {
                        self.xml_error(err);
                        break;
                    }
                },
                Ok(Event::CData(data)) => {
                    let data = data.into_inner();
                    self.content.push_str(&String::from_utf8_lossy(&data));
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    self.xml_error(err);
                    break;
                }
            }
        }
        if !self.llsd_parsed {
            self.sink.note_failure("no llsd element found");
        }
        self.unwind();
    }

    fn xml_error<E: std::fmt::Display>(&mut self, err: E) {
        self.sink.note_failure(format!("XML parse error: \"{}\"", err));
    }

    fn start_skipping(&mut self, message: &str, name: Option<&[u8]>) {
        trace!(depth = self.depth, reason = message, "Skipping LLSD XML element.");
        self.skip_through = Some(self.depth);
        if self.legacy {
            return;
        }
        match name {
            Some(name) => {
                let name = String::from_utf8_lossy(name);
                self.sink.note_failure(format!("{}: \"{}\"", message, name));
            }
            None => {
                self.sink.note_failure(message);
            }
        }
    }

    fn start_element(&mut self, name: &[u8], encoding: Option<&str>) {
        self.depth += 1;
        if self.skip_through.is_some() {
            return;
        }
        let element = Element::from_name(name);
        self.content.clear();

        if !self.in_llsd && element != Element::Llsd {
            return self.start_skipping("element outside of llsd element", Some(name));
        }

        match element {
            Element::Llsd => {
                if self.in_llsd {
                    self.start_skipping("nested llsd element found", None);
                } else {
                    self.in_llsd = true;
                }
                return;
            }
            Element::Key => {
                if !self.stack.last().is_some_and(|frame| frame.value.is_map()) {
                    self.start_skipping("unexpected key element", None);
                }
                return;
            }
            Element::Binary => {
                if let Some(encoding) = encoding.filter(|encoding| *encoding != "base64") {
                    return self.start_skipping(
                        "unrecognized binary encoding",
                        Some(encoding.as_bytes()),
                    );
                }
            }
            Element::Unknown if !self.legacy => {
                return self.start_skipping("invalid element", Some(name));
            }
            _ => {}
        }

        if self.stack.len() >= MAX_NESTING_DEPTH {
            self.sink.note_failure(NESTING_FAILURE);
            return self.start_skipping(NESTING_FAILURE, None);
        }

        let slot = match self.stack.last().map(|parent| parent.value.value_type()) {
            None => Slot::Root,
            Some(ValueType::Map) => match self.key.take() {
                Some(key) => Slot::Entry(key),
                None => return self.start_skipping("missing map key", None),
            },
            Some(ValueType::Array) => Slot::Element,
            Some(_) => {
                return self.start_skipping("element nested in simple value", Some(name));
            }
        };

        let value = match element {
            Element::Map => Value::empty_map(),
            Element::Array => Value::empty_array(),
            _ => Value::default(),
        };
        self.stack.push(Frame {
            slot,
            element,
            value,
        });
    }

    fn end_element(&mut self, name: &[u8]) {
        self.depth = self.depth.saturating_sub(1);
        if let Some(skip_through) = self.skip_through {
            if self.depth < skip_through {
                trace!(depth = self.depth, "Finished skipping LLSD XML element.");
                self.skip_through = None;
            }
            return;
        }

        match Element::from_name(name) {
            Element::Llsd => {
                if self.in_llsd {
                    self.in_llsd = false;
                    self.llsd_parsed = true;
                }
                return;
            }
            Element::Key => {
                self.key = Some(std::mem::take(&mut self.content));
                return;
            }
            _ => {}
        }

        if !self.in_llsd {
            return;
        }
        let Some(mut frame) = self.stack.pop() else {
            return;
        };
        let content = std::mem::take(&mut self.content);
        match frame.element {
            Element::Undef | Element::Unknown => frame.value = Value::default(),
            Element::Boolean => {
                let b = content == "true" || (self.legacy && content == "1");
                frame.value = Value::from(b);
            }
            Element::Integer => frame.value = Value::from(text::text_to_integer(&content)),
            Element::Real => frame.value = Value::from(text::text_to_real_or_special(&content)),
            Element::String => frame.value = Value::from(content),
            Element::Uuid => frame.value = Value::from(text::text_to_uuid(&content)),
            Element::Date => frame.value = Value::from(Date::parse_lenient(&content)),
            Element::Uri => frame.value = Value::from(Uri::new(content)),
            Element::Binary => frame.value = Value::from(text::base64_to_binary(&content)),
            Element::Map | Element::Array | Element::Llsd | Element::Key => {}
        }
        self.attach(frame);
    }

    /// Stores a completed value in its parent (or as the result).
    fn attach(&mut self, frame: Frame) {
        let Frame { slot, value, .. } = frame;
        match (slot, self.stack.last_mut()) {
            (Slot::Entry(key), Some(parent)) => *parent.value.entry_mut(key) = value,
            (Slot::Element, Some(parent)) => parent.value.append(value),
            _ => self.result = value,
        }
    }

    /// Completes any values still under construction, so that the result holds everything
    /// that was read.
    fn unwind(&mut self) {
        while let Some(frame) = self.stack.pop() {
            self.attach(frame);
        }
    }
}

/// The `encoding` attribute of a `<binary>` element.
fn binary_encoding(start: &BytesStart<'_>) -> Result<Option<String>, quick_xml::Error> {
    if start.name().as_ref() != b"binary" {
        return Ok(None);
    }
    match start.try_get_attribute("encoding")? {
        Some(attr) => Ok(Some(attr.unescape_value()?.into_owned())),
        None => Ok(None),
    }
}

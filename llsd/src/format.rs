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

use std::fmt::{Display, Formatter};

use llsd_model::Value;
use llsd_parse::{ByteLimit, ParseError};

/// The supported encodings of [`Value`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Binary,
    Json,
    Xml,
    /// XML with each element on its own, indented, line.
    PrettyXml,
    #[cfg(feature = "notation")]
    Notation,
}

impl Format {
    /// Encode a value.
    pub fn format(&self, value: &Value) -> Vec<u8> {
        match self {
            Format::Binary => llsd_binary::format_binary(value),
            Format::Json => llsd_json::format_json(value).into_bytes(),
            Format::Xml => llsd_xml::format_xml(value).into_bytes(),
            Format::PrettyXml => llsd_xml::format_xml_pretty(value).into_bytes(),
            #[cfg(feature = "notation")]
            Format::Notation => llsd_notation::format_notation(value),
        }
    }

    /// Decode a value. The XML parser reads the whole document and ignores the limit.
    ///
    /// # Arguments
    /// * `input` - The encoded value.
    /// * `limit` - Limit on the number of bytes that may be consumed.
    pub fn parse(&self, input: &[u8], limit: ByteLimit) -> Result<Value, ParseError> {
        match self {
            Format::Binary => llsd_binary::parse_binary(input, limit),
            Format::Json => llsd_json::parse_json(input, limit),
            Format::Xml | Format::PrettyXml => llsd_xml::parse_xml(input),
            #[cfg(feature = "notation")]
            Format::Notation => llsd_notation::parse_notation(input, limit),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Format::Binary => write!(f, "binary"),
            Format::Json => write!(f, "JSON"),
            Format::Xml => write!(f, "XML"),
            Format::PrettyXml => write!(f, "pretty XML"),
            #[cfg(feature = "notation")]
            Format::Notation => write!(f, "notation"),
        }
    }
}

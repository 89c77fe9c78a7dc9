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

//! # LLSD
//!
//! Dynamically typed structured data ([`Value`]) together with its encodings. Each encoding
//! lives in its own module and [`Format`] selects between them at runtime.
//!
//! ```
//! use llsd::{llsd_map, ByteLimit, Format, Value};
//!
//! let value = llsd_map! { "name" => "tree", "size" => 3 };
//! let bytes = Format::Binary.format(&value);
//! let restored = Format::Binary.parse(&bytes, ByteLimit::Unlimited).unwrap();
//! assert_eq!(restored, value);
//! ```

#[doc(inline)]
pub use llsd_model::{
    llsd_array, llsd_map, text, Array, Date, Map, Uri, Uuid, Value, ValueRef, ValueType,
};

#[cfg(feature = "alloc-counters")]
pub use llsd_model::{created_count, live_count};

pub use llsd_parse::{ByteLimit, ParseError};

pub mod log;

mod format;

pub use format::Format;

/// The binary encoding.
pub mod binary {
    pub use llsd_binary::{format_binary, parse_binary, write_binary, BinaryParser};
}

/// The JSON encoding.
pub mod json {
    pub use llsd_json::{format_json, parse_json, print_json, write_json};
}

/// The XML encoding.
pub mod xml {
    pub use llsd_xml::{
        format_xml, format_xml_pretty, parse_xml, print_xml, XmlFormatter, XmlParser,
    };
}

/// The notation encoding.
#[cfg(feature = "notation")]
pub mod notation {
    pub use llsd_notation::{
        escape_string, format_notation, parse_notation, write_notation, NotationParser,
    };
}

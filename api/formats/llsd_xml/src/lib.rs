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

//! # XML LLSD
//!
//! Each value is an element named for its type, and the document is wrapped in a single
//! `<llsd>` element:
//!
//! ```xml
//! <llsd>
//!     <map>
//!     <key>name</key>
//!         <string>tree</string>
//!     <key>size</key>
//!         <array>
//!             <integer>3</integer>
//!             <real>4.5</real>
//!         </array>
//!     </map>
//! </llsd>
//! ```
//!
//! Parsing is tolerant of unexpected content: an unknown or misplaced element is skipped
//! along with everything inside it. Unless the parser is in legacy mode this still causes the
//! parse to fail, but the rest of the document is read and is available from
//! [`XmlParser::recovered`].

mod reader;
mod writer;

pub use reader::{parse_xml, XmlParser};
pub use writer::{format_xml, format_xml_pretty, print_xml, XmlFormatter};

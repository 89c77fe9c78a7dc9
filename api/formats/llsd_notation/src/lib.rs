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

//! # Notation LLSD
//!
//! A compact, human readable encoding used by older producers and for logging.
//!
//! | Type | Written as | Also accepted |
//! |------|------------|---------------|
//! | Undefined | `!` | |
//! | Boolean | `true`, `false` | `1`, `0`, `t`, `f`, `T`, `F`, `TRUE`, `FALSE` |
//! | Integer | `i42` | |
//! | Real | `r1.5`, `rnan`, `rinf`, `r-inf` | |
//! | UUID | `u` + 36 characters | |
//! | String | `'escaped'` | `"escaped"`, `s(<len>)"raw"` |
//! | URI | `l"escaped"` | |
//! | Date | `d"2009-02-13T23:31:30Z"` | |
//! | Binary | `b(<len>)"raw"` | `b64"base64"`, `b16"hex"` |
//! | Array | `[v,v]` | |
//! | Map | `{'key':v,'key':v}` | keys in any string form |
//!
//! Within escaped strings, bytes outside printable ASCII (and `'` and `\`) are written as
//! backslash escapes: `\a \b \t \n \v \f \r` for the control characters that have them and
//! `\xNN` for everything else.

mod reader;
mod writer;

pub use reader::{parse_notation, NotationParser};
pub use writer::{escape_string, format_notation, write_notation};

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

//! # JSON LLSD
//!
//! Maps, arrays, booleans, integers and `null` (for undefined) have their natural JSON forms.
//! Every other type is written as a JSON string of its string conversion, so UUIDs, dates,
//! URIs and binary data do not survive a round trip with their types intact.
//!
//! As an extension to JSON, non-finite reals are written (and read) as the bare literals
//! `NaN`, `Infinity` and `-Infinity`.

mod reader;
mod writer;

pub use reader::parse_json;
pub use writer::{format_json, print_json, write_json};

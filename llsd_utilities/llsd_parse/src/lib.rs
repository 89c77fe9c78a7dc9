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

//! # Parser Support
//!
//! Every LLSD parser is built from the same three pieces:
//!
//! - A byte budget ([`ByteLimit`], [`Budget`]) that is charged for every byte consumed, so that
//! a caller can bound how much of an untrusted input a parser will read.
//! - A one-shot failure sink ([`FailureSink`]). Only the first failure noted during a parse is
//! reported; anything noted afterwards is a consequence of the first and is discarded.
//! - A byte cursor ([`ByteStream`]) with the small set of read operations the parsers need, all
//! of which charge the budget.
//!
//! The recursive parsers also track how deeply maps and arrays are nested ([`Nesting`]) and
//! fail once an input goes deeper than [`MAX_NESTING_DEPTH`].

mod failure;
mod limit;
mod nesting;
pub mod quoted;
mod stream;

pub use failure::{FailureSink, Noted, ParseError, Step};
pub use limit::{Budget, ByteLimit};
pub use nesting::{Nesting, MAX_NESTING_DEPTH, NESTING_FAILURE};
pub use stream::ByteStream;

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

//! The LLSD structured data model: a dynamically typed [`Value`] with total scalar
//! conversions and copy-on-write maps and arrays.

pub use uuid::Uuid;

mod counters;
mod date;
#[macro_use]
pub mod macros;
#[cfg(test)]
mod tests;
pub mod text;
mod uri;
mod value;

#[cfg(feature = "alloc-counters")]
pub use counters::{created_count, live_count};
pub use date::Date;
pub use uri::Uri;
pub use value::{Array, Map, Value, ValueRef, ValueType};

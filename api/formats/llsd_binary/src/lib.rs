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

//! # Binary LLSD
//!
//! A compact encoding of [`llsd_model::Value`]s. Each value starts with a one byte tag,
//! followed by a payload depending on the type. All lengths and integers are big endian.
//!
//! | Type | Encoding |
//! |------|----------|
//! | Undefined | `!` |
//! | Boolean | `1` for true, `0` for false |
//! | Integer | `i` + 4 bytes |
//! | Real | `r` + 8 bytes, IEEE-754 (see [below](#reals)) |
//! | UUID | `u` + 16 bytes |
//! | String | `s` + 4 byte length + UTF-8 |
//! | URI | `l` + 4 byte length + UTF-8 |
//! | Date | `d` + 8 bytes, IEEE-754 seconds since the epoch in host order |
//! | Binary | `b` + 4 byte length + bytes |
//! | Array | `[` + 4 byte element count + elements + `]` |
//! | Map | `{` + 4 byte entry count + (`k` + 4 byte length + key + value)* + `}` |
//!
//! ## Reals
//!
//! Reals are converted between host and network order one 32-bit word at a time: the two
//! words are exchanged and each is put into network order, unless the first word (in host
//! order) reads the same in network order. Such values, which include `0.0`, `1.0`, `0.5` and
//! every other double whose low word is zero, are copied in host order. On a big endian host
//! every real is written big endian; on a little endian host the exempt values are written
//! little endian. The conversion is its own inverse, so values written by either kind of host
//! are read back correctly.

mod reader;
mod writer;

pub use reader::{parse_binary, BinaryParser};
pub use writer::{format_binary, write_binary};

const UNDEFINED_TAG: u8 = b'!';
const TRUE_TAG: u8 = b'1';
const FALSE_TAG: u8 = b'0';
const INTEGER_TAG: u8 = b'i';
const REAL_TAG: u8 = b'r';
const UUID_TAG: u8 = b'u';
const STRING_TAG: u8 = b's';
const URI_TAG: u8 = b'l';
const DATE_TAG: u8 = b'd';
const BINARY_TAG: u8 = b'b';
const MAP_START: u8 = b'{';
const MAP_END: u8 = b'}';
const MAP_KEY_TAG: u8 = b'k';
const ARRAY_START: u8 = b'[';
const ARRAY_END: u8 = b']';

/// Converts the bytes of a real between host and network order. Applying it twice is the
/// identity.
pub(crate) fn swap_real_words(host: [u8; 8]) -> [u8; 8] {
    let one = u32::from_ne_bytes([host[0], host[1], host[2], host[3]]);
    if one.to_be() == one {
        return host;
    }
    let two = u32::from_ne_bytes([host[4], host[5], host[6], host[7]]);
    let mut swapped = [0u8; 8];
    swapped[..4].copy_from_slice(&two.to_be_bytes());
    swapped[4..].copy_from_slice(&one.to_be_bytes());
    swapped
}

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

use bytes::BufMut;
use llsd_model::{Value, ValueRef};

use crate::{
    swap_real_words, ARRAY_END, ARRAY_START, BINARY_TAG, DATE_TAG, FALSE_TAG, INTEGER_TAG,
    MAP_END, MAP_KEY_TAG, MAP_START, REAL_TAG, STRING_TAG, TRUE_TAG, UNDEFINED_TAG, URI_TAG,
    UUID_TAG,
};

#[cfg(test)]
mod tests;

/// Encode a value in the binary format.
pub fn format_binary(value: &Value) -> Vec<u8> {
    let mut buf = Vec::new();
    write_binary(value, &mut buf);
    buf
}

/// Write the binary encoding of a value into a buffer.
pub fn write_binary<B: BufMut>(value: &Value, buf: &mut B) {
    match value.view() {
        ValueRef::Undefined => buf.put_u8(UNDEFINED_TAG),
        ValueRef::Boolean(true) => buf.put_u8(TRUE_TAG),
        ValueRef::Boolean(false) => buf.put_u8(FALSE_TAG),
        ValueRef::Integer(n) => {
            buf.put_u8(INTEGER_TAG);
            buf.put_i32(n);
        }
        ValueRef::Real(n) => {
            buf.put_u8(REAL_TAG);
            buf.put_slice(&swap_real_words(n.to_ne_bytes()));
        }
        ValueRef::Uuid(uuid) => {
            buf.put_u8(UUID_TAG);
            buf.put_slice(uuid.as_bytes());
        }
        ValueRef::String(s) => {
            buf.put_u8(STRING_TAG);
            write_sized(buf, s.as_bytes());
        }
        ValueRef::Date(date) => {
            buf.put_u8(DATE_TAG);
            buf.put_f64_ne(date.seconds_since_epoch());
        }
        ValueRef::Uri(uri) => {
            buf.put_u8(URI_TAG);
            write_sized(buf, uri.as_str().as_bytes());
        }
        ValueRef::Binary(data) => {
            buf.put_u8(BINARY_TAG);
            write_sized(buf, data);
        }
        ValueRef::Map(map) => {
            buf.put_u8(MAP_START);
            buf.put_u32(map.len() as u32);
            for (key, child) in map {
                buf.put_u8(MAP_KEY_TAG);
                write_sized(buf, key.as_bytes());
                write_binary(child, buf);
            }
            buf.put_u8(MAP_END);
        }
        ValueRef::Array(array) => {
            buf.put_u8(ARRAY_START);
            buf.put_u32(array.len() as u32);
            for child in array {
                write_binary(child, buf);
            }
            buf.put_u8(ARRAY_END);
        }
    }
}

fn write_sized<B: BufMut>(buf: &mut B, bytes: &[u8]) {
    buf.put_u32(bytes.len() as u32);
    buf.put_slice(bytes);
}

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

use bytes::BytesMut;
use llsd_model::{llsd_array, llsd_map, Date, Uri, Uuid, Value};

use super::{format_binary, write_binary};

#[test]
fn write_scalars() {
    assert_eq!(format_binary(&Value::default()), b"!");
    assert_eq!(format_binary(&Value::from(true)), b"1");
    assert_eq!(format_binary(&Value::from(false)), b"0");
    assert_eq!(format_binary(&Value::from(1)), b"i\x00\x00\x00\x01");
    assert_eq!(format_binary(&Value::from(-2)), b"i\xff\xff\xff\xfe");
}

#[test]
fn write_real_network_order() {
    let mut expected = vec![b'r'];
    expected.extend_from_slice(&0.1f64.to_be_bytes());
    assert_eq!(format_binary(&Value::from(0.1)), expected);
    assert_eq!(
        format_binary(&Value::from(0.1)),
        b"r\x3f\xb9\x99\x99\x99\x99\x99\x9a"
    );
}

#[cfg(target_endian = "little")]
#[test]
fn write_real_with_symmetric_low_word() {
    // The low word of these reals reads the same in either byte order, so they keep host order.
    assert_eq!(
        format_binary(&Value::from(1.0)),
        b"r\x00\x00\x00\x00\x00\x00\xf0\x3f"
    );
    assert_eq!(
        format_binary(&Value::from(1.5)),
        b"r\x00\x00\x00\x00\x00\x00\xf8\x3f"
    );
    assert_eq!(format_binary(&Value::from(0.0)), b"r\x00\x00\x00\x00\x00\x00\x00\x00");
}

#[cfg(target_endian = "big")]
#[test]
fn write_real_with_symmetric_low_word() {
    let mut expected = vec![b'r'];
    expected.extend_from_slice(&1.0f64.to_be_bytes());
    assert_eq!(format_binary(&Value::from(1.0)), expected);
}

#[test]
fn write_date_host_order() {
    let seconds: f64 = 1234567890.5;
    let mut expected = vec![b'd'];
    expected.extend_from_slice(&seconds.to_ne_bytes());
    assert_eq!(
        format_binary(&Value::from(Date::from_seconds(seconds))),
        expected
    );
}

#[test]
fn write_sized_values() {
    assert_eq!(format_binary(&Value::from("abc")), b"s\x00\x00\x00\x03abc");
    assert_eq!(format_binary(&Value::from("")), b"s\x00\x00\x00\x00");
    assert_eq!(
        format_binary(&Value::from(Uri::new("http://a"))),
        b"l\x00\x00\x00\x08http://a"
    );
    assert_eq!(
        format_binary(&Value::from(vec![0u8, 255])),
        b"b\x00\x00\x00\x02\x00\xff"
    );
}

#[test]
fn write_uuid() {
    let uuid = Uuid::from_bytes([
        0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15,
    ]);
    let mut expected = vec![b'u'];
    expected.extend(0u8..16);
    assert_eq!(format_binary(&Value::from(uuid)), expected);
}

#[test]
fn write_collections() {
    assert_eq!(format_binary(&Value::empty_map()), b"{\x00\x00\x00\x00}");
    assert_eq!(format_binary(&Value::empty_array()), b"[\x00\x00\x00\x00]");

    let map = llsd_map! { "b" => 2, "a" => true };
    assert_eq!(
        format_binary(&map),
        b"{\x00\x00\x00\x02k\x00\x00\x00\x01a1k\x00\x00\x00\x01bi\x00\x00\x00\x02}"
    );

    let array = llsd_array![Value::default(), false];
    assert_eq!(format_binary(&array), b"[\x00\x00\x00\x02!0]");
}

#[test]
fn write_into_bytes_mut() {
    let mut buf = BytesMut::new();
    write_binary(&Value::from(7), &mut buf);
    write_binary(&Value::from(true), &mut buf);
    assert_eq!(buf.as_ref(), b"i\x00\x00\x00\x071");
}

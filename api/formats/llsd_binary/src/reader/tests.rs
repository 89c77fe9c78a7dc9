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

use llsd_model::{llsd_array, llsd_map, Date, Uri, Uuid, Value};
use llsd_parse::{ByteLimit, MAX_NESTING_DEPTH};

use super::{parse_binary, BinaryParser};
use crate::format_binary;

fn parse(input: &[u8]) -> Result<Value, String> {
    parse_binary(input, ByteLimit::Unlimited).map_err(|e| e.to_string())
}

#[test]
fn read_scalars() {
    assert_eq!(parse(b"!"), Ok(Value::default()));
    assert_eq!(parse(b"1"), Ok(Value::from(true)));
    assert_eq!(parse(b"0"), Ok(Value::from(false)));
    assert_eq!(parse(b"i\x00\x00\x00\x01"), Ok(Value::from(1)));
    assert_eq!(parse(b"i\xff\xff\xff\xfe"), Ok(Value::from(-2)));
}

#[test]
fn read_real() {
    let mut input = vec![b'r'];
    input.extend_from_slice(&(-0.1f64).to_be_bytes());
    assert_eq!(parse(&input), Ok(Value::from(-0.1)));
}

#[test]
fn read_real_from_either_host() {
    assert_eq!(
        parse(b"r\x3f\xb9\x99\x99\x99\x99\x99\x9a"),
        Ok(Value::from(0.1))
    );
    assert_eq!(
        parse(b"r\x3f\xf0\x00\x00\x00\x00\x00\x00"),
        Ok(Value::from(1.0))
    );
}

#[cfg(target_endian = "little")]
#[test]
fn read_real_in_little_endian_host_order() {
    assert_eq!(
        parse(b"r\x00\x00\x00\x00\x00\x00\xf0\x3f"),
        Ok(Value::from(1.0))
    );
    assert_eq!(
        parse(b"r\x00\x00\x00\x00\x00\x00\x59\x40"),
        Ok(Value::from(100.0))
    );
}

#[test]
fn real_word_swap_is_an_involution() {
    for n in [0.0, 1.0, -0.1, 0.5, 100.0, 1.0e300, f64::MIN_POSITIVE, f64::INFINITY] {
        let bytes = n.to_ne_bytes();
        assert_eq!(crate::swap_real_words(crate::swap_real_words(bytes)), bytes);
        assert_eq!(
            parse(&format_binary(&Value::from(n))),
            Ok(Value::from(n)),
            "{}",
            n
        );
    }
}

#[test]
fn read_date() {
    let mut input = vec![b'd'];
    input.extend_from_slice(&1234567890.25f64.to_ne_bytes());
    assert_eq!(
        parse(&input),
        Ok(Value::from(Date::from_seconds(1234567890.25)))
    );
}

#[test]
fn read_uuid() {
    let mut input = vec![b'u'];
    input.extend(0u8..16);
    let expected = Uuid::from_bytes([0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15]);
    assert_eq!(parse(&input), Ok(Value::from(expected)));
}

#[test]
fn read_sized_values() {
    assert_eq!(parse(b"s\x00\x00\x00\x03abc"), Ok(Value::from("abc")));
    assert_eq!(parse(b"s\x00\x00\x00\x00"), Ok(Value::from("")));
    assert_eq!(
        parse(b"l\x00\x00\x00\x08http://a"),
        Ok(Value::from(Uri::new("http://a")))
    );
    assert_eq!(
        parse(b"b\x00\x00\x00\x02\x00\xff"),
        Ok(Value::from(vec![0u8, 255]))
    );
}

#[test]
fn invalid_utf8_is_replaced() {
    assert_eq!(parse(b"s\x00\x00\x00\x02a\xff"), Ok(Value::from("a\u{fffd}")));
}

#[test]
fn read_collections() {
    let input = b"{\x00\x00\x00\x02k\x00\x00\x00\x01a1k\x00\x00\x00\x01b[\x00\x00\x00\x02!i\x00\x00\x00\x05]}";
    let expected = llsd_map! {
        "a" => true,
        "b" => llsd_array![Value::default(), 5],
    };
    assert_eq!(parse(input), Ok(expected));
    assert_eq!(parse(b"{\x00\x00\x00\x00}"), Ok(Value::empty_map()));
    assert_eq!(parse(b"[\x00\x00\x00\x00]"), Ok(Value::empty_array()));
}

#[test]
fn duplicate_keys_keep_first() {
    let input = b"{\x00\x00\x00\x02k\x00\x00\x00\x01ai\x00\x00\x00\x01k\x00\x00\x00\x01ai\x00\x00\x00\x02}";
    assert_eq!(parse(input), Ok(llsd_map! { "a" => 1 }));
}

#[test]
fn untagged_map_key() {
    let input = b"{\x00\x00\x00\x01xi\x00\x00\x00\x01}";
    assert_eq!(parse(input), Ok(llsd_map! { "" => 1 }));
}

#[test]
fn map_terminated_early() {
    let input = b"{\x00\x00\x00\x05k\x00\x00\x00\x01a1k\x00\x00\x00\x01b1k\x00\x00\x00\x01c1}";
    assert_eq!(parse(input), Err("incorrectly sized map".to_owned()));
}

#[test]
fn map_missing_terminator() {
    let input = b"{\x00\x00\x00\x01k\x00\x00\x00\x01a1k";
    assert_eq!(parse(input), Err("incorrectly sized map".to_owned()));
}

#[test]
fn array_terminated_early() {
    assert_eq!(
        parse(b"[\x00\x00\x00\x03!!]"),
        Err("incorrectly sized array".to_owned())
    );
}

#[test]
fn array_missing_terminator() {
    assert_eq!(
        parse(b"[\x00\x00\x00\x01!!]"),
        Err("incorrectly sized array".to_owned())
    );
    assert_eq!(
        parse(b"[\x00\x00\x00\x01!"),
        Err("incorrectly sized array".to_owned())
    );
}

#[test]
fn unrecognized_tag() {
    assert_eq!(parse(b"x"), Err("unrecognized tag 'x'".to_owned()));
    assert_eq!(
        parse(b"[\x00\x00\x00\x01q]"),
        Err("unrecognized tag 'q'".to_owned())
    );
}

#[test]
fn truncated_input() {
    assert_eq!(parse(b""), Err("unexpected end of input".to_owned()));
    assert_eq!(
        parse(b"i\x00\x01"),
        Err("input failure reading integer".to_owned())
    );
    assert_eq!(parse(b"r\x00"), Err("input failure reading real".to_owned()));
    assert_eq!(parse(b"u\x00"), Err("input failure reading uuid".to_owned()));
    assert_eq!(parse(b"d\x00"), Err("input failure reading date".to_owned()));
    assert_eq!(
        parse(b"s\x00\x00\x00\x05ab"),
        Err("input failure reading string".to_owned())
    );
    assert_eq!(
        parse(b"b\x00\x00\x00\x05ab"),
        Err("input failure reading binary".to_owned())
    );
}

#[test]
fn first_failure_reported() {
    let input = b"{\x00\x00\x00\x01k\x00\x00\x00\x01a[\x00\x00\x00\x01i\x00]}";
    assert_eq!(parse(input), Err("input failure reading integer".to_owned()));
}

#[test]
fn blob_exceeding_budget() {
    let input = b"s\x00\x00\x00\x05hello";
    assert_eq!(
        parse_binary(input, ByteLimit::Bytes(8)).map_err(|e| e.to_string()),
        Err("invalid string".to_owned())
    );
    assert_eq!(
        parse_binary(input, ByteLimit::Bytes(10)),
        Ok(Value::from("hello"))
    );

    let input = b"b\x00\x00\x00\x05hello";
    assert_eq!(
        parse_binary(input, ByteLimit::Bytes(6)).map_err(|e| e.to_string()),
        Err("ran out of bytes reading binary".to_owned())
    );
}

#[test]
fn negative_length() {
    assert_eq!(
        parse(b"l\xff\xff\xff\xffabc"),
        Err("invalid uri".to_owned())
    );
}

#[test]
fn trailing_bytes() {
    let parser = BinaryParser::new(ByteLimit::Unlimited);
    assert_eq!(
        parser.parse_prefix(b"i\x00\x00\x00\x0212"),
        Ok((Value::from(2), 5))
    );
    assert_eq!(parser.parse(b"1junk"), Ok(Value::from(true)));
}

#[test]
fn legacy_strings() {
    assert_eq!(parse(b"'abc'"), Err("found legacy string".to_owned()));

    let parser = BinaryParser::new(ByteLimit::Unlimited).legacy();
    assert_eq!(parser.parse(b"'a\\nb'"), Ok(Value::from("a\nb")));
    assert_eq!(
        parser.parse(b"{\x00\x00\x00\x01'key'\"value\"}"),
        Ok(llsd_map! { "key" => "value" })
    );
    assert_eq!(
        parser.parse(b"'abc").map_err(|e| e.to_string()),
        Err("invalid legacy string".to_owned())
    );
}

#[test]
fn legacy_header() {
    let parser = BinaryParser::new(ByteLimit::Unlimited).legacy();
    assert_eq!(
        parser.parse(b"<?LLSD/Binary?>\ni\x00\x00\x00\x03"),
        Ok(Value::from(3))
    );
    assert_eq!(
        parser
            .parse(b"<?LLSD/XML?>\ni\x00\x00\x00\x03")
            .map_err(|e| e.to_string()),
        Err("unrecognized legacy header".to_owned())
    );
    assert_eq!(
        parser.parse(b"<??\n").map_err(|e| e.to_string()),
        Err("invalid binary tag '<'".to_owned())
    );
    assert_eq!(
        parse(b"<?LLSD/Binary?>\n!"),
        Err("unrecognized tag '<'".to_owned())
    );
}

#[test]
fn nesting_depth_is_bounded() {
    let arrays = b"[\x00\x00\x00\x01".repeat(100_000);
    assert_eq!(
        parse(&arrays),
        Err("exceeded maximum nesting depth".to_owned())
    );

    let maps = b"{\x00\x00\x00\x01k\x00\x00\x00\x01a".repeat(300);
    assert_eq!(parse(&maps), Err("exceeded maximum nesting depth".to_owned()));

    let mut deepest = b"[\x00\x00\x00\x01".repeat(MAX_NESTING_DEPTH - 1);
    deepest.extend_from_slice(b"[\x00\x00\x00\x00");
    deepest.extend(std::iter::repeat(b']').take(MAX_NESTING_DEPTH));
    assert!(parse(&deepest).is_ok_and(|value| value.is_array()));
}

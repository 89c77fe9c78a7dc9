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

use llsd_model::{llsd_array, llsd_map, Value, ValueType};
use llsd_parse::{ByteLimit, MAX_NESTING_DEPTH};

use super::{decode_code_units, parse_json};

fn parse(input: &str) -> Result<Value, String> {
    parse_json(input.as_bytes(), ByteLimit::Unlimited).map_err(|e| e.to_string())
}

#[test]
fn read_literals() {
    assert_eq!(parse("null"), Ok(Value::default()));
    assert_eq!(parse("true"), Ok(Value::from(true)));
    assert_eq!(parse(" \t\r\nfalse \n"), Ok(Value::from(false)));
}

#[test]
fn read_integers() {
    assert_eq!(parse("0"), Ok(Value::from(0)));
    assert_eq!(parse("42"), Ok(Value::from(42)));
    assert_eq!(parse("-7"), Ok(Value::from(-7)));
    assert_eq!(parse("99999999999"), Ok(Value::from(i32::MAX)));
    assert_eq!(parse("-99999999999"), Ok(Value::from(i32::MIN)));
}

#[test]
fn read_reals() {
    assert_eq!(parse("0.5"), Ok(Value::from(0.5)));
    assert_eq!(parse("-2.25"), Ok(Value::from(-2.25)));
    assert_eq!(parse("1e3"), Ok(Value::from(1000.0)));
    assert_eq!(parse("1E-2"), Ok(Value::from(0.01)));
    assert_eq!(parse("2.5e+1"), Ok(Value::from(25.0)));
}

#[test]
fn read_non_finite_reals() {
    assert_eq!(parse("Infinity"), Ok(Value::from(f64::INFINITY)));
    assert_eq!(parse("-Infinity"), Ok(Value::from(f64::NEG_INFINITY)));
    let nan = parse("NaN").expect("NaN should parse");
    assert_eq!(nan.value_type(), ValueType::Real);
    assert!(nan.as_real().is_nan());
}

#[test]
fn leading_zero_ends_integer() {
    assert_eq!(parse("01"), Err("unrecognized data".to_string()));
}

#[test]
fn bad_numbers() {
    assert_eq!(parse("-"), Err("expected digit".to_string()));
    assert_eq!(parse("1."), Err("expected digit".to_string()));
    assert_eq!(parse("1e"), Err("expected digit".to_string()));
    assert_eq!(parse("[1.x]"), Err("expected digit".to_string()));
}

#[test]
fn read_strings() {
    assert_eq!(parse(r#""""#), Ok(Value::from("")));
    assert_eq!(parse(r#""hello""#), Ok(Value::from("hello")));
    assert_eq!(
        parse(r#""\"\\\/\b\f\n\r\t""#),
        Ok(Value::from("\"\\/\u{8}\u{c}\n\r\t"))
    );
    assert_eq!(parse(r#""\u00e9\u20ac""#), Ok(Value::from("é€")));
}

#[test]
fn read_surrogate_pairs() {
    assert_eq!(parse(r#""\ud83d\ude00""#), Ok(Value::from("😀")));
}

#[test]
fn raw_bytes_are_code_units() {
    let result = parse_json("\"é\"".as_bytes(), ByteLimit::Unlimited);
    assert_eq!(result, Ok(Value::from("\u{c3}\u{a9}")));
}

#[test]
fn decode_unpaired_surrogates() {
    assert_eq!(decode_code_units(&[0x61, 0xd800, 0x62]), "ab");
    assert_eq!(decode_code_units(&[0xdc00]), "\u{10000}");
    assert_eq!(decode_code_units(&[0xd800, 0xdc00, 0xdc01]), "\u{10000}\u{10001}");
}

#[test]
fn bad_strings() {
    assert_eq!(parse(r#""abc"#), Err("unterminated string".to_string()));
    assert_eq!(parse(r#""\"#), Err("truncated escape sequence".to_string()));
    assert_eq!(parse(r#""\u12"#), Err("truncated escape sequence".to_string()));
    assert_eq!(parse(r#""\u12g4""#), Err("invalid escape sequence".to_string()));
    assert_eq!(parse(r#""\q""#), Err("unexpected escape sequence".to_string()));
}

#[test]
fn read_objects() {
    assert_eq!(parse("{}"), Ok(Value::empty_map()));
    assert_eq!(parse("{ }"), Ok(Value::empty_map()));
    let expected = llsd_map! {
        "a" => 1,
        "b" => llsd_array![true, Value::default()],
    };
    assert_eq!(
        parse(r#"{ "b" : [ true , null ] , "a" : 1 }"#),
        Ok(expected)
    );
}

#[test]
fn first_key_wins() {
    assert_eq!(parse(r#"{"a":1,"a":2}"#), Ok(llsd_map! { "a" => 1 }));
}

#[test]
fn read_arrays() {
    assert_eq!(parse("[]"), Ok(Value::empty_array()));
    assert_eq!(parse("[ ]"), Ok(Value::empty_array()));
    assert_eq!(
        parse(r#"[1, "two", [3.5], {}]"#),
        Ok(llsd_array![1, "two", llsd_array![3.5], Value::empty_map()])
    );
}

#[test]
fn bad_objects() {
    assert_eq!(parse("{1:2}"), Err("expected key".to_string()));
    assert_eq!(parse(r#"{"a" 2}"#), Err("expected :".to_string()));
    assert_eq!(parse(r#"{"a":}"#), Err("expected value".to_string()));
    assert_eq!(parse(r#"{"a":1"#), Err("expected }".to_string()));
    assert_eq!(parse(r#"{"a":1,}"#), Err("expected key".to_string()));
}

#[test]
fn bad_arrays() {
    assert_eq!(parse("[1,]"), Err("expected value".to_string()));
    assert_eq!(parse("[1 2]"), Err("expected ]".to_string()));
    assert_eq!(parse("["), Err("expected value".to_string()));
}

#[test]
fn document_is_one_value() {
    assert_eq!(parse(""), Err("expected value".to_string()));
    assert_eq!(parse("   "), Err("expected value".to_string()));
    assert_eq!(parse("1 2"), Err("unrecognized data".to_string()));
    assert_eq!(parse("{} x"), Err("unrecognized data".to_string()));
    assert_eq!(parse("nul"), Err("expected value".to_string()));
}

#[test]
fn byte_limit() {
    let input = br#"{"key":"value"}"#;
    assert!(parse_json(input, ByteLimit::Bytes(input.len())).is_ok());
    assert_eq!(
        parse_json(input, ByteLimit::Bytes(4)).map_err(|e| e.to_string()),
        Err("exceeded maximum byte count".to_string())
    );
}

#[test]
fn nesting_depth_is_bounded() {
    let too_deep = "[".repeat(100_000);
    assert_eq!(
        parse(&too_deep),
        Err("exceeded maximum nesting depth".to_string())
    );

    let objects = format!("{}1{}", r#"{"a":"#.repeat(300), "}".repeat(300));
    assert_eq!(
        parse(&objects),
        Err("exceeded maximum nesting depth".to_string())
    );

    let deepest = format!(
        "{}{}",
        "[".repeat(MAX_NESTING_DEPTH),
        "]".repeat(MAX_NESTING_DEPTH)
    );
    assert!(parse(&deepest).is_ok_and(|value| value.is_array()));
}

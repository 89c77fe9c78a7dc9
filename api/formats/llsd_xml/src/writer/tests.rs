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

use llsd_model::{llsd_array, llsd_map, Date, Uri, Value};
use uuid::Uuid;

use super::{format_xml, format_xml_pretty, print_xml, XmlFormatter};

fn body(value: &Value) -> String {
    let doc = format_xml(value);
    doc.strip_prefix("<llsd>")
        .and_then(|rest| rest.strip_suffix("</llsd>\n"))
        .expect("document wrapper")
        .to_owned()
}

#[test]
fn wrapper() {
    assert_eq!(format_xml(&Value::default()), "<llsd><undef /></llsd>\n");
}

#[test]
fn write_scalars() {
    assert_eq!(body(&Value::from(true)), "<boolean>true</boolean>");
    assert_eq!(body(&Value::from(false)), "<boolean>false</boolean>");
    assert_eq!(body(&Value::from(-3)), "<integer>-3</integer>");
    assert_eq!(body(&Value::from(1.5)), "<real>1.5</real>");
    assert_eq!(body(&Value::from(f64::NAN)), "<real>nan</real>");
    assert_eq!(body(&Value::from(f64::NEG_INFINITY)), "<real>-inf</real>");
    assert_eq!(
        body(&Value::from(Date::from_seconds(1234567890.5))),
        "<date>2009-02-13T23:31:30.500Z</date>"
    );
    assert_eq!(
        body(&Value::from(Uri::new("http://a/?x=1&y=2"))),
        "<uri>http://a/?x=1&amp;y=2</uri>"
    );
    assert_eq!(
        body(&Value::from(vec![0u8, 1, 2, 3])),
        "<binary encoding=\"base64\">AAECAw==</binary>"
    );
}

#[test]
fn write_uuid() {
    let uuid = Uuid::from_bytes([
        0xd7, 0xf4, 0xae, 0xca, 0x88, 0xf1, 0x42, 0xa1, 0xb3, 0x85, 0xb9, 0xdb, 0x18, 0xab, 0xb2,
        0x55,
    ]);
    assert_eq!(
        body(&Value::from(uuid)),
        "<uuid>d7f4aeca-88f1-42a1-b385-b9db18abb255</uuid>"
    );
    assert_eq!(body(&Value::from(Uuid::nil())), "<uuid />");
}

#[test]
fn empty_elements() {
    assert_eq!(body(&Value::from("")), "<string />");
    assert_eq!(body(&Value::from(Vec::<u8>::new())), "<binary />");
    assert_eq!(body(&Value::empty_map()), "<map />");
    assert_eq!(body(&Value::empty_array()), "<array />");
}

#[test]
fn escape_text() {
    assert_eq!(
        body(&Value::from("<a href='x'>&\"</a>")),
        "<string>&lt;a href=&apos;x&apos;&gt;&amp;&quot;&lt;/a&gt;</string>"
    );
    let value = llsd_map! { "a<b" => 1 };
    assert_eq!(
        body(&value),
        "<map><key>a&lt;b</key><integer>1</integer></map>"
    );
}

#[test]
fn write_collections() {
    let value = llsd_map! {
        "list" => llsd_array![1, "x"],
        "flag" => true,
    };
    assert_eq!(
        body(&value),
        "<map><key>flag</key><boolean>true</boolean><key>list</key>\
         <array><integer>1</integer><string>x</string></array></map>"
    );
}

#[test]
fn pretty() {
    let value = llsd_map! {
        "a" => 1,
        "b" => llsd_array![Value::empty_map()],
    };
    let expected = "<llsd>\n\
    \x20   <map>\n\
    \x20   <key>a</key>\n\
    \x20       <integer>1</integer>\n\
    \x20   <key>b</key>\n\
    \x20       <array>\n\
    \x20           <map />\n\
    \x20       </array>\n\
    \x20   </map>\n\
    </llsd>\n";
    assert_eq!(format_xml_pretty(&value), expected);
    assert_eq!(XmlFormatter::pretty().format(&value), expected);
}

#[test]
fn display_wrapper() {
    let value = Value::from(7);
    assert_eq!(
        print_xml(&value).to_string(),
        "<llsd><integer>7</integer></llsd>\n"
    );
}

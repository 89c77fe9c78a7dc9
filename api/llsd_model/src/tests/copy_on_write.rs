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

use crate::Value;

fn sample() -> Value {
    llsd_map! {
        "name" => "sample",
        "items" => llsd_array![1, 2, 3],
    }
}

#[test]
fn clone_isolation() {
    let mut a = sample();
    let mut b = a.clone();
    b.insert("x", 1);
    assert!(!a.has("x"));
    assert_eq!(a, sample());

    a.insert("y", 2);
    assert!(!b.has("y"));
    assert!(b.has("x"));
}

#[test]
fn nested_clone_isolation() {
    let a = sample();
    let mut b = a.clone();
    b["items"].append(4);
    b["items"][0] = Value::from(0);
    assert_eq!(a["items"], llsd_array![1, 2, 3]);
    assert_eq!(b["items"], llsd_array![0, 2, 3, 4]);
}

#[test]
fn mutable_iteration_isolation() {
    let a = llsd_array![1, 2, 3];
    let mut b = a.clone();
    for v in b.array_iter_mut() {
        v.clear();
    }
    assert_eq!(a, llsd_array![1, 2, 3]);
    assert!(b.array_iter().all(Value::is_undefined));
}

#[test]
fn erase_isolation() {
    let a = sample();
    let mut b = a.clone();
    b.erase("name");
    assert!(a.has("name"));
    assert!(!b.has("name"));
}

#[test]
fn reassignment_isolation() {
    let a = sample();
    let mut b = a.clone();
    b.assign(5);
    assert!(a.is_map());
    assert_eq!(b, Value::from(5));
}

#[test]
fn shared_representation_written_through_promotion() {
    let a = sample();
    let mut b = a.clone();
    b.map_iter_mut().for_each(|(_, v)| v.clear());
    b.entry_mut("extra").append("x");
    assert_eq!(a, sample());
    assert_eq!(b["name"], Value::default());
    assert_eq!(b["extra"], llsd_array!["x"]);
}

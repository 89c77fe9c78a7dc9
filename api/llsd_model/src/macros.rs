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

/// Creates a map value from key/value pairs. Values are converted with `Value::from`.
///
/// ```
/// use llsd_model::{llsd_map, Value};
///
/// let value = llsd_map! {
///     "name" => "tree",
///     "height" => 12,
/// };
/// assert_eq!(value.get("height"), &Value::from(12));
/// ```
///
/// ## An empty map:
/// ```
/// use llsd_model::{llsd_map, Value};
///
/// assert_eq!(llsd_map!(), Value::empty_map());
/// ```
#[macro_export]
macro_rules! llsd_map {
    () => {
        $crate::Value::empty_map()
    };
    ($($key:expr => $value:expr),+ $(,)?) => {{
        let mut map = $crate::Value::empty_map();
        $(map.insert($key, $crate::Value::from($value));)+
        map
    }};
}

/// Creates an array value from its elements. Elements are converted with `Value::from`.
///
/// ```
/// use llsd_model::{llsd_array, Value};
///
/// let value = llsd_array![1, "two", 3.0];
/// assert_eq!(value.size(), 3);
/// assert_eq!(value[1], Value::from("two"));
/// ```
#[macro_export]
macro_rules! llsd_array {
    () => {
        $crate::Value::empty_array()
    };
    ($($item:expr),+ $(,)?) => {{
        let mut array = $crate::Value::empty_array();
        $(array.append($crate::Value::from($item));)+
        array
    }};
}

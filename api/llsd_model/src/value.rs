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

use std::collections::BTreeMap;
use std::fmt::{Debug, Display, Formatter};
use std::ops::{Index, IndexMut};
use std::rc::Rc;

use uuid::Uuid;

use crate::counters::Tracked;
use crate::{text, Date, Uri};

/// The entries of a map value, in key order.
pub type Map = BTreeMap<String, Value>;
/// The elements of an array value.
pub type Array = Vec<Value>;

const UNDEFINED: &Value = &Value::undefined();

/// The type tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ValueType {
    Undefined,
    Boolean,
    Integer,
    Real,
    String,
    Uuid,
    Date,
    Uri,
    Binary,
    Map,
    Array,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ValueType::Undefined => "undefined",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Real => "real",
            ValueType::String => "string",
            ValueType::Uuid => "uuid",
            ValueType::Date => "date",
            ValueType::Uri => "uri",
            ValueType::Binary => "binary",
            ValueType::Map => "map",
            ValueType::Array => "array",
        };
        f.write_str(name)
    }
}

/// A self-describing structured data value.
///
/// Every value holds exactly one of eleven kinds of data (see [`ValueType`]). Reading a value
/// as any scalar type always succeeds, converting (or defaulting) as required. Maps and
/// arrays are shared between clones and copied lazily, the first time a shared
/// representation is modified, so cloning is cheap and a clone can never observe mutations
/// of the original (or the reverse).
///
/// Values use non-atomic reference counts and so cannot be sent between threads.
#[derive(Clone, Default, PartialEq)]
pub struct Value(Repr);

#[derive(Clone, Default, PartialEq)]
enum Repr {
    #[default]
    Undefined,
    Boolean(bool),
    Integer(i32),
    Real(f64),
    String(String),
    Uuid(Uuid),
    Date(Date),
    Uri(Uri),
    Binary(Vec<u8>),
    Map(Rc<Tracked<Map>>),
    Array(Rc<Tracked<Array>>),
}

/// A borrowed view of the contents of a [`Value`], for code that needs to walk a value
/// without converting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueRef<'a> {
    Undefined,
    Boolean(bool),
    Integer(i32),
    Real(f64),
    String(&'a str),
    Uuid(&'a Uuid),
    Date(Date),
    Uri(&'a Uri),
    Binary(&'a [u8]),
    Map(&'a Map),
    Array(&'a [Value]),
}

impl Value {
    pub const fn undefined() -> Self {
        Value(Repr::Undefined)
    }

    pub fn empty_map() -> Self {
        Value(Repr::Map(Rc::new(Tracked::new(Map::new()))))
    }

    pub fn empty_array() -> Self {
        Value(Repr::Array(Rc::new(Tracked::new(Array::new()))))
    }

    pub fn value_type(&self) -> ValueType {
        match &self.0 {
            Repr::Undefined => ValueType::Undefined,
            Repr::Boolean(_) => ValueType::Boolean,
            Repr::Integer(_) => ValueType::Integer,
            Repr::Real(_) => ValueType::Real,
            Repr::String(_) => ValueType::String,
            Repr::Uuid(_) => ValueType::Uuid,
            Repr::Date(_) => ValueType::Date,
            Repr::Uri(_) => ValueType::Uri,
            Repr::Binary(_) => ValueType::Binary,
            Repr::Map(_) => ValueType::Map,
            Repr::Array(_) => ValueType::Array,
        }
    }

    pub fn view(&self) -> ValueRef<'_> {
        match &self.0 {
            Repr::Undefined => ValueRef::Undefined,
            Repr::Boolean(b) => ValueRef::Boolean(*b),
            Repr::Integer(n) => ValueRef::Integer(*n),
            Repr::Real(n) => ValueRef::Real(*n),
            Repr::String(s) => ValueRef::String(s),
            Repr::Uuid(u) => ValueRef::Uuid(u),
            Repr::Date(d) => ValueRef::Date(*d),
            Repr::Uri(u) => ValueRef::Uri(u),
            Repr::Binary(b) => ValueRef::Binary(b),
            Repr::Map(m) => ValueRef::Map(m),
            Repr::Array(a) => ValueRef::Array(a),
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self.0, Repr::Undefined)
    }

    pub fn is_defined(&self) -> bool {
        !self.is_undefined()
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self.0, Repr::Boolean(_))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self.0, Repr::Integer(_))
    }

    pub fn is_real(&self) -> bool {
        matches!(self.0, Repr::Real(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self.0, Repr::String(_))
    }

    pub fn is_uuid(&self) -> bool {
        matches!(self.0, Repr::Uuid(_))
    }

    pub fn is_date(&self) -> bool {
        matches!(self.0, Repr::Date(_))
    }

    pub fn is_uri(&self) -> bool {
        matches!(self.0, Repr::Uri(_))
    }

    pub fn is_binary(&self) -> bool {
        matches!(self.0, Repr::Binary(_))
    }

    pub fn is_map(&self) -> bool {
        matches!(self.0, Repr::Map(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self.0, Repr::Array(_))
    }

    /// Note that `false` reads as the empty string and any non-empty string (including
    /// `"false"`) reads as `true`.
    pub fn as_boolean(&self) -> bool {
        match &self.0 {
            Repr::Boolean(b) => *b,
            Repr::Integer(n) => *n != 0,
            Repr::Real(n) => !n.is_nan() && *n != 0.0,
            Repr::String(s) => !s.is_empty(),
            Repr::Map(m) => !m.is_empty(),
            Repr::Array(a) => !a.is_empty(),
            _ => false,
        }
    }

    /// Strings are read as a real and then truncated, so `"1.9"` is 1.
    pub fn as_integer(&self) -> i32 {
        match &self.0 {
            Repr::Boolean(b) => i32::from(*b),
            Repr::Integer(n) => *n,
            Repr::Real(n) => text::real_to_integer(*n),
            Repr::String(s) => text::real_to_integer(text::text_to_real(s)),
            Repr::Date(d) => text::real_to_integer(d.seconds_since_epoch()),
            _ => 0,
        }
    }

    pub fn as_real(&self) -> f64 {
        match &self.0 {
            Repr::Boolean(b) => f64::from(u8::from(*b)),
            Repr::Integer(n) => f64::from(*n),
            Repr::Real(n) => *n,
            Repr::String(s) => text::text_to_real(s),
            Repr::Date(d) => d.seconds_since_epoch(),
            _ => 0.0,
        }
    }

    pub fn as_string(&self) -> String {
        match &self.0 {
            Repr::Boolean(true) => "true".to_owned(),
            Repr::Integer(n) => n.to_string(),
            Repr::Real(n) => text::real_to_text(*n),
            Repr::String(s) => s.clone(),
            Repr::Uuid(u) => u.hyphenated().to_string(),
            Repr::Date(d) => d.to_string(),
            Repr::Uri(u) => u.to_string(),
            Repr::Binary(b) => text::binary_to_base64(b),
            _ => String::new(),
        }
    }

    pub fn as_uuid(&self) -> Uuid {
        match &self.0 {
            Repr::Uuid(u) => *u,
            Repr::String(s) => text::text_to_uuid(s),
            _ => Uuid::nil(),
        }
    }

    pub fn as_date(&self) -> Date {
        match &self.0 {
            Repr::Date(d) => *d,
            Repr::String(s) => Date::parse_lenient(s),
            _ => Date::EPOCH,
        }
    }

    pub fn as_uri(&self) -> Uri {
        match &self.0 {
            Repr::Uri(u) => u.clone(),
            Repr::String(s) => Uri::new(s.as_str()),
            _ => Uri::default(),
        }
    }

    pub fn as_binary(&self) -> Vec<u8> {
        match &self.0 {
            Repr::Binary(b) => b.clone(),
            Repr::String(s) => text::base64_to_binary(s),
            _ => vec![],
        }
    }

    /// Replace the contents of this value.
    pub fn assign<T: Into<Value>>(&mut self, value: T) {
        *self = value.into();
    }

    /// Reset this value to undefined.
    pub fn clear(&mut self) {
        self.0 = Repr::Undefined;
    }

    /// The number of entries of a map or elements of an array; zero for anything else.
    pub fn size(&self) -> usize {
        match &self.0 {
            Repr::Map(m) => m.len(),
            Repr::Array(a) => a.len(),
            _ => 0,
        }
    }

    fn map_ref(&self) -> Option<&Map> {
        match self.view() {
            ValueRef::Map(m) => Some(m),
            _ => None,
        }
    }

    fn array_ref(&self) -> Option<&[Value]> {
        match self.view() {
            ValueRef::Array(a) => Some(a),
            _ => None,
        }
    }

    /// Mutable access to the entries of this value, replacing it with an empty map if it is
    /// not already a map and taking a private copy if the representation is shared.
    fn map_mut(&mut self) -> &mut Map {
        if !self.is_map() {
            *self = Value::empty_map();
        }
        match &mut self.0 {
            Repr::Map(rep) => &mut **Rc::make_mut(rep),
            _ => unreachable!("value was promoted to a map"),
        }
    }

    fn array_mut(&mut self) -> &mut Array {
        if !self.is_array() {
            *self = Value::empty_array();
        }
        match &mut self.0 {
            Repr::Array(rep) => &mut **Rc::make_mut(rep),
            _ => unreachable!("value was promoted to an array"),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.map_ref().is_some_and(|m| m.contains_key(key))
    }

    /// The entry for `key`, or undefined if there is none (or this is not a map).
    pub fn get(&self, key: &str) -> &Value {
        self.map_ref().and_then(|m| m.get(key)).unwrap_or(UNDEFINED)
    }

    /// Add an entry, if there is not already an entry for the key. A value that is not a map
    /// is first replaced with an empty map.
    pub fn insert<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.map_mut().entry(key.into()).or_insert_with(|| value.into());
    }

    pub fn with<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.insert(key, value);
        self
    }

    /// Remove an entry. A value that is not a map is first replaced with an empty map.
    pub fn erase(&mut self, key: &str) {
        self.map_mut().remove(key);
    }

    /// Write access to the entry for `key`, creating it (as undefined) if necessary. A value
    /// that is not a map is first replaced with an empty map.
    pub fn entry_mut<K: Into<String>>(&mut self, key: K) -> &mut Value {
        self.map_mut().entry(key.into()).or_default()
    }

    /// The element at `index`, or undefined if it is out of range (or this is not an array).
    pub fn get_index(&self, index: i32) -> &Value {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.array_ref().and_then(|a| a.get(i)))
            .unwrap_or(UNDEFINED)
    }

    /// Set the element at `index`, extending the array with undefined values if it is too
    /// short. A value that is not an array is first replaced with an empty array. Negative
    /// indices are ignored.
    pub fn set<V: Into<Value>>(&mut self, index: i32, value: V) {
        let array = self.array_mut();
        if let Ok(i) = usize::try_from(index) {
            if i >= array.len() {
                array.resize_with(i + 1, Value::default);
            }
            array[i] = value.into();
        }
    }

    /// Insert an element at `index`, shifting the following elements along. If `index` is
    /// past the end, the array is first extended to a length of `index + 1`, so the new
    /// element is followed by an undefined value.
    pub fn insert_at<V: Into<Value>>(&mut self, index: i32, value: V) {
        let array = self.array_mut();
        if let Ok(i) = usize::try_from(index) {
            if i >= array.len() {
                array.resize_with(i + 1, Value::default);
            }
            array.insert(i, value.into());
        }
    }

    pub fn with_at<V: Into<Value>>(mut self, index: i32, value: V) -> Self {
        self.insert_at(index, value);
        self
    }

    /// Add an element to the end of the array. A value that is not an array is first replaced
    /// with an empty array.
    pub fn append<V: Into<Value>>(&mut self, value: V) {
        self.array_mut().push(value.into());
    }

    /// Remove the element at `index`, if there is one. A value that is not an array is first
    /// replaced with an empty array.
    pub fn erase_at(&mut self, index: i32) {
        let array = self.array_mut();
        if let Ok(i) = usize::try_from(index) {
            if i < array.len() {
                array.remove(i);
            }
        }
    }

    /// Iterate over the entries of a map in key order. Anything other than a map has no
    /// entries.
    pub fn map_iter(&self) -> impl Iterator<Item = (&String, &Value)> + '_ {
        self.map_ref().into_iter().flat_map(|m| m.iter())
    }

    /// Iterate mutably over the entries of a map, first replacing a non-map with an empty map.
    pub fn map_iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut Value)> + '_ {
        self.map_mut().iter_mut()
    }

    /// Iterate over the elements of an array. Anything other than an array has no elements.
    pub fn array_iter(&self) -> impl Iterator<Item = &Value> + '_ {
        self.array_ref().into_iter().flat_map(|a| a.iter())
    }

    /// Iterate mutably over the elements of an array, first replacing a non-array with an
    /// empty array.
    pub fn array_iter_mut(&mut self) -> impl Iterator<Item = &mut Value> + '_ {
        self.array_mut().iter_mut()
    }
}

impl Index<&str> for Value {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        self.get(key)
    }
}

impl IndexMut<&str> for Value {
    fn index_mut(&mut self, key: &str) -> &mut Self::Output {
        self.entry_mut(key)
    }
}

impl Index<i32> for Value {
    type Output = Value;

    fn index(&self, index: i32) -> &Self::Output {
        self.get_index(index)
    }
}

/// Write access to an element, extending the array as required (and replacing a non-array
/// with an empty array). Negative indices address the first element.
impl IndexMut<i32> for Value {
    fn index_mut(&mut self, index: i32) -> &mut Self::Output {
        let array = self.array_mut();
        let i = usize::try_from(index).unwrap_or(0);
        if i >= array.len() {
            array.resize_with(i + 1, Value::default);
        }
        &mut array[i]
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.0 {
            Repr::Undefined => f.write_str("Undefined"),
            Repr::Boolean(b) => f.debug_tuple("Boolean").field(b).finish(),
            Repr::Integer(n) => f.debug_tuple("Integer").field(n).finish(),
            Repr::Real(n) => f.debug_tuple("Real").field(n).finish(),
            Repr::String(s) => f.debug_tuple("String").field(s).finish(),
            Repr::Uuid(u) => f.debug_tuple("Uuid").field(u).finish(),
            Repr::Date(d) => f.debug_tuple("Date").field(&format_args!("{}", d)).finish(),
            Repr::Uri(u) => f.debug_tuple("Uri").field(&u.as_str()).finish(),
            Repr::Binary(b) => f.debug_tuple("Binary").field(b).finish(),
            Repr::Map(m) => f.debug_map().entries(m.iter()).finish(),
            Repr::Array(a) => f.debug_list().entries(a.iter()).finish(),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value(Repr::Boolean(b))
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value(Repr::Integer(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value(Repr::Real(n))
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value(Repr::Real(f64::from(n)))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value(Repr::String(s.to_owned()))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value(Repr::String(s))
    }
}

impl From<Uuid> for Value {
    fn from(u: Uuid) -> Self {
        Value(Repr::Uuid(u))
    }
}

impl From<Date> for Value {
    fn from(d: Date) -> Self {
        Value(Repr::Date(d))
    }
}

impl From<Uri> for Value {
    fn from(u: Uri) -> Self {
        Value(Repr::Uri(u))
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value(Repr::Binary(b))
    }
}

impl From<&[u8]> for Value {
    fn from(b: &[u8]) -> Self {
        Value(Repr::Binary(b.to_vec()))
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value(Repr::Map(Rc::new(Tracked::new(m))))
    }
}

impl From<Array> for Value {
    fn from(a: Array) -> Self {
        Value(Repr::Array(Rc::new(Tracked::new(a))))
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(maybe: Option<T>) -> Self {
        maybe.map(Into::into).unwrap_or_default()
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::from(iter.into_iter().collect::<Array>())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        let mut map = Map::new();
        for (key, value) in iter {
            map.entry(key.into()).or_insert(value);
        }
        Value::from(map)
    }
}

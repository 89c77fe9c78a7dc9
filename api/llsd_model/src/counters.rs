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

//! Per-thread counters of map and array representations. With the `alloc-counters` feature
//! disabled the bookkeeping compiles away entirely.

use std::ops::{Deref, DerefMut};

#[cfg(feature = "alloc-counters")]
use std::cell::Cell;

#[cfg(feature = "alloc-counters")]
thread_local! {
    static CREATED: Cell<usize> = const { Cell::new(0) };
    static LIVE: Cell<usize> = const { Cell::new(0) };
}

/// The number of container representations created on this thread, including the private
/// copies made when a shared representation is mutated.
#[cfg(feature = "alloc-counters")]
pub fn created_count() -> usize {
    CREATED.with(Cell::get)
}

/// The number of container representations on this thread that have not yet been dropped.
#[cfg(feature = "alloc-counters")]
pub fn live_count() -> usize {
    LIVE.with(Cell::get)
}

pub(crate) struct Token(());

impl Token {
    fn new() -> Self {
        #[cfg(feature = "alloc-counters")]
        {
            CREATED.with(|c| c.set(c.get() + 1));
            LIVE.with(|c| c.set(c.get() + 1));
        }
        Token(())
    }
}

#[cfg(feature = "alloc-counters")]
impl Drop for Token {
    fn drop(&mut self) {
        LIVE.with(|c| c.set(c.get().saturating_sub(1)));
    }
}

impl Clone for Token {
    fn clone(&self) -> Self {
        Token::new()
    }
}

impl Default for Token {
    fn default() -> Self {
        Token::new()
    }
}

/// A container representation, counted for its whole lifetime.
#[derive(Clone, Default)]
pub(crate) struct Tracked<T> {
    data: T,
    _token: Token,
}

impl<T> Tracked<T> {
    pub(crate) fn new(data: T) -> Self {
        Tracked {
            data,
            _token: Token::new(),
        }
    }
}

impl<T> Deref for Tracked<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.data
    }
}

impl<T> DerefMut for Tracked<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.data
    }
}

impl<T: PartialEq> PartialEq for Tracked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.data == other.data
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Tracked<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.data.fmt(f)
    }
}

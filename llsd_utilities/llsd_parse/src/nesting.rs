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


/// The deepest nesting of maps and arrays that the parsers will read.
pub const MAX_NESTING_DEPTH: usize = 256;

/// The failure noted when an input nests more deeply than [`MAX_NESTING_DEPTH`].
pub const NESTING_FAILURE: &str = "exceeded maximum nesting depth";

/// The number of maps and arrays currently open in a recursive parse.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Nesting {
    depth: usize,
}

impl Nesting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Open a collection. Returns false, leaving the depth unchanged, if the collection would
    /// exceed [`MAX_NESTING_DEPTH`].
    pub fn enter(&mut self) -> bool {
        if self.depth >= MAX_NESTING_DEPTH {
            false
        } else {
            self.depth += 1;
            true
        }
    }

    /// Close the innermost collection.
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }
}

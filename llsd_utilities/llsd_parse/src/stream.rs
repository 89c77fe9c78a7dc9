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

use crate::{Budget, ByteLimit};


/// A cursor over an input buffer. Every byte consumed is charged to the stream's [`Budget`]
/// and every byte put back is refunded.
#[derive(Debug, Clone)]
pub struct ByteStream<'a> {
    input: &'a [u8],
    offset: usize,
    budget: Budget,
}

impl<'a> ByteStream<'a> {
    pub fn new(input: &'a [u8], limit: ByteLimit) -> Self {
        ByteStream {
            input,
            offset: 0,
            budget: Budget::new(limit),
        }
    }

    pub fn budget(&self) -> &Budget {
        &self.budget
    }

    /// The number of bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.offset
    }

    /// The unconsumed input.
    pub fn rest(&self) -> &'a [u8] {
        &self.input[self.offset..]
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }

    pub fn peek(&self) -> Option<u8> {
        self.input.get(self.offset).copied()
    }

    pub fn get(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.advance(1);
        Some(b)
    }

    /// Return the most recently consumed byte to the stream.
    pub fn putback(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.budget.refund(1);
        }
    }

    /// Consume up to `n` bytes, without inspecting them.
    pub fn ignore(&mut self, n: usize) {
        let n = n.min(self.input.len() - self.offset);
        self.advance(n);
    }

    /// Consume exactly `n` bytes. If fewer remain, nothing is consumed.
    pub fn read(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.offset.checked_add(n)?;
        let bytes = self.input.get(self.offset..end)?;
        self.advance(n);
        Some(bytes)
    }

    /// Consume exactly `N` bytes into an array.
    pub fn read_array<const N: usize>(&mut self) -> Option<[u8; N]> {
        let bytes = self.read(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Some(array)
    }

    /// Consume bytes up to (but not including) `delim`, or at most `max` bytes if the delimiter
    /// is not found first.
    pub fn get_until(&mut self, delim: u8, max: usize) -> &'a [u8] {
        let rest = self.rest();
        let len = rest
            .iter()
            .take(max)
            .position(|b| *b == delim)
            .unwrap_or_else(|| rest.len().min(max));
        self.advance(len);
        &rest[..len]
    }

    /// Consume `token` if the input continues with it.
    pub fn test(&mut self, token: &[u8]) -> bool {
        if self.rest().starts_with(token) {
            self.advance(token.len());
            true
        } else {
            false
        }
    }

    /// Consume bytes while they satisfy the predicate.
    pub fn skip_while<F>(&mut self, mut pred: F) -> usize
    where
        F: FnMut(u8) -> bool,
    {
        let n = self.rest().iter().take_while(|b| pred(**b)).count();
        self.advance(n);
        n
    }

    pub fn skip_whitespace(&mut self) -> usize {
        self.skip_while(|b| b.is_ascii_whitespace())
    }

    fn advance(&mut self, n: usize) {
        self.offset += n;
        self.budget.account(n);
    }
}

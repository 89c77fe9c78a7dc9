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


/// The maximum number of bytes a parser may consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ByteLimit {
    #[default]
    Unlimited,
    Bytes(usize),
}

impl From<usize> for ByteLimit {
    fn from(n: usize) -> Self {
        ByteLimit::Bytes(n)
    }
}

impl From<Option<usize>> for ByteLimit {
    fn from(maybe: Option<usize>) -> Self {
        maybe.map(ByteLimit::Bytes).unwrap_or_default()
    }
}

/// The bytes remaining from a [`ByteLimit`]. When the limit is [`ByteLimit::Unlimited`] the
/// count is still maintained but never enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Budget {
    enforced: bool,
    remaining: i64,
}

impl Budget {
    pub fn new(limit: ByteLimit) -> Self {
        match limit {
            ByteLimit::Unlimited => Budget {
                enforced: false,
                remaining: 0,
            },
            ByteLimit::Bytes(n) => Budget {
                enforced: true,
                remaining: i64::try_from(n).unwrap_or(i64::MAX),
            },
        }
    }

    pub fn is_enforced(&self) -> bool {
        self.enforced
    }

    /// Charge the budget for `n` bytes.
    pub fn account(&mut self, n: usize) {
        self.remaining = self
            .remaining
            .saturating_sub(i64::try_from(n).unwrap_or(i64::MAX));
    }

    /// Return `n` bytes to the budget (when a byte is put back).
    pub fn refund(&mut self, n: usize) {
        self.remaining = self
            .remaining
            .saturating_add(i64::try_from(n).unwrap_or(i64::MAX));
    }

    /// Whether a further `n` bytes may be read.
    pub fn can_read(&self, n: usize) -> bool {
        !self.enforced || i64::try_from(n).is_ok_and(|n| n <= self.remaining)
    }

    /// Whether more bytes have been consumed than the limit allowed.
    pub fn exhausted(&self) -> bool {
        self.enforced && self.remaining < 0
    }

    /// The remaining bytes, if the budget is enforced.
    pub fn remaining(&self) -> Option<usize> {
        if self.enforced {
            Some(usize::try_from(self.remaining).unwrap_or(0))
        } else {
            None
        }
    }
}

impl Default for Budget {
    fn default() -> Self {
        Budget::new(ByteLimit::Unlimited)
    }
}

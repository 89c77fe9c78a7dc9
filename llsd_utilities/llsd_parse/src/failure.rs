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

use thiserror::Error;
use tracing::debug;


/// The reason a parse failed: the first failure noted while reading the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ParseError {
    message: String,
}

impl ParseError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        ParseError {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Marker indicating that a failure has already been recorded in a [`FailureSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Noted;

/// The result of a parser step. On failure, the reason is held by the parser's
/// [`FailureSink`].
pub type Step<T> = Result<T, Noted>;

/// Records the first failure of a parse.
///
/// Parsers report failures at each level of the input as the error propagates outwards
/// (an invalid string, then the invalid map value that contained it, and so on). Only the
/// innermost, first, message is kept.
#[derive(Debug, Default)]
pub struct FailureSink {
    first: Option<String>,
}

impl FailureSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a failure, if none has been recorded already.
    pub fn note_failure<S: Into<String>>(&mut self, message: S) -> Noted {
        if self.first.is_none() {
            let message = message.into();
            debug!(message = %message, "LLSD parse failure noted.");
            self.first = Some(message);
        }
        Noted
    }

    /// As [`FailureSink::note_failure`], for use as the result of a parser step.
    pub fn fail<T, S: Into<String>>(&mut self, message: S) -> Step<T> {
        Err(self.note_failure(message))
    }

    pub fn succeeded(&self) -> bool {
        self.first.is_none()
    }

    pub fn message(&self) -> Option<&str> {
        self.first.as_deref()
    }

    /// The recorded failure, if there was one.
    pub fn into_error(self) -> Option<ParseError> {
        self.first.map(ParseError::new)
    }

    /// Combine the value produced by a parse with the failure state.
    pub fn finish<T>(self, value: T) -> Result<T, ParseError> {
        match self.into_error() {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }
}

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

//! Rendering of values for log messages. Values are written as notation when the `notation`
//! feature is enabled and as compact XML (without the final line break) otherwise.

use std::fmt::{Display, Formatter};

use llsd_model::Value;

/// Render a value for a log message.
pub fn to_log(value: &Value) -> String {
    LogDisplay(value).to_string()
}

/// Wraps a value so that it is displayed in its log rendering.
///
/// ```
/// use llsd::{log::LogDisplay, Value};
///
/// let value = Value::from(5);
/// let message = format!("received {}", LogDisplay(&value));
/// assert!(message.starts_with("received "));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct LogDisplay<'a>(pub &'a Value);

impl<'a> Display for LogDisplay<'a> {
    #[cfg(feature = "notation")]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let bytes = llsd_notation::format_notation(self.0);
        f.write_str(&String::from_utf8_lossy(&bytes))
    }

    #[cfg(not(feature = "notation"))]
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(llsd_xml::format_xml(self.0).trim_end())
    }
}

#[cfg(test)]
mod tests {
    use llsd_model::{llsd_map, Value};

    use super::{to_log, LogDisplay};

    #[cfg(not(feature = "notation"))]
    #[test]
    fn log_as_xml() {
        let value = llsd_map! { "a" => 1 };
        assert_eq!(
            to_log(&value),
            "<llsd><map><key>a</key><integer>1</integer></map></llsd>"
        );
    }

    #[cfg(feature = "notation")]
    #[test]
    fn log_as_notation() {
        let value = llsd_map! { "a" => 1 };
        assert_eq!(to_log(&value), "{'a':i1}");
    }

    #[test]
    fn display_matches_to_log() {
        let value = Value::from("text");
        assert_eq!(format!("{}", LogDisplay(&value)), to_log(&value));
    }
}

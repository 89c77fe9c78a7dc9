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

use std::fmt::{Display, Formatter};

use chrono::{DateTime, NaiveDateTime, Utc};

const ISO_8601_IN: &str = "%Y-%m-%dT%H:%M:%S%.fZ";
const ISO_8601_OUT: &str = "%Y-%m-%dT%H:%M:%S";

/// A point in time, held as (possibly fractional) seconds since the Unix epoch, UTC.
///
/// The textual form is ISO-8601, `YYYY-MM-DDTHH:MM:SS[.mmm]Z`, where the milliseconds are
/// only present if the timestamp has a fractional part.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Date(f64);

impl Date {
    pub const EPOCH: Date = Date(0.0);

    pub const fn from_seconds(seconds: f64) -> Self {
        Date(seconds)
    }

    pub fn now() -> Self {
        let now = Utc::now();
        Date(now.timestamp() as f64 + f64::from(now.timestamp_subsec_micros()) / 1e6)
    }

    pub fn seconds_since_epoch(&self) -> f64 {
        self.0
    }

    /// Attempt to parse an ISO-8601 date. Only the UTC form ending in `Z` is accepted.
    pub fn from_iso8601(text: &str) -> Option<Date> {
        let parsed = NaiveDateTime::parse_from_str(text, ISO_8601_IN).ok()?;
        let utc = parsed.and_utc();
        Some(Date(
            utc.timestamp() as f64 + f64::from(utc.timestamp_subsec_nanos()) / 1e9,
        ))
    }

    /// Parse an ISO-8601 date, falling back to the epoch for anything unrecognized.
    pub fn parse_lenient(text: &str) -> Date {
        Date::from_iso8601(text).unwrap_or(Date::EPOCH)
    }

    pub fn to_iso8601(&self) -> String {
        self.to_string()
    }
}

impl From<f64> for Date {
    fn from(seconds: f64) -> Self {
        Date(seconds)
    }
}

impl Display for Date {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let integral = self.0.floor();
        let micros = ((self.0 - integral) * 1e6) as i64;
        let when = DateTime::from_timestamp(integral as i64, 0).unwrap_or_default();
        write!(f, "{}", when.format(ISO_8601_OUT))?;
        if micros != 0 {
            let millis = ((micros as f64 / 1000.0 + 0.5) as i64).min(999);
            write!(f, ".{:03}", millis)?;
        }
        f.write_str("Z")
    }
}

// Copyright 2026 The edgeway Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The status registry.
//!
//! `http::StatusCode` already is the IANA status registry: it stores the
//! code as a validated `100..=599` integer, exposes
//! `is_informational`/`is_success`/`is_redirection`/`is_client_error`/
//! `is_server_error` as a mutually-exclusive partition by decade, and
//! `canonical_reason()` for the reason phrase. We reuse it directly rather
//! than re-deriving the same table, and add the one thing it doesn't
//! already provide: a *total* reason phrase function.

pub use http::StatusCode as Status;

/// Extension methods completing [`Status`].
pub trait StatusExt {
    /// The canonical IANA reason phrase, or `"Unknown"` for a code with no
    /// registered phrase.
    fn reason_phrase(&self) -> &'static str;
}

impl StatusExt for Status {
    fn reason_phrase(&self) -> &'static str {
        self.canonical_reason().unwrap_or("Unknown")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_phrase_is_unknown_for_unregistered_code() {
        let status = Status::from_u16(599).unwrap();
        assert_eq!(status.reason_phrase(), "Unknown");
    }

    #[test]
    fn reason_phrase_is_canonical_for_known_code() {
        assert_eq!(Status::NOT_FOUND.reason_phrase(), "Not Found");
        assert_eq!(Status::OK.reason_phrase(), "OK");
    }

    #[test]
    fn status_predicates_partition_by_decade() {
        let codes = [100u16, 200, 201, 301, 404, 405, 500, 503];
        for code in codes {
            let status = Status::from_u16(code).unwrap();
            let flags = [
                status.is_informational(),
                status.is_success(),
                status.is_redirection(),
                status.is_client_error(),
                status.is_server_error(),
            ];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "code {code}");
        }
    }

    #[test]
    fn status_to_int_and_back_round_trips() {
        for code in [100u16, 200, 204, 301, 400, 404, 405, 500, 503] {
            let status = Status::from_u16(code).unwrap();
            assert_eq!(status.as_u16(), code);
        }
    }
}

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

//! The error taxonomy for the routing and dispatch core.
//!
//! Every fallible operation in `edgeway-http` returns one of these variants.
//! Only the dispatcher catches them (see `edgeway_http::dispatch`); elsewhere
//! they propagate with `?`.

use serde::Serialize;

/// A failure surfaced while inserting a pattern, matching a path, converting
/// a path variable, invoking a handler, or talking to a transport.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No trie match, or a pattern matched but no handler serves the
    /// request's method.
    #[error("No pattern matched for URL: {path}")]
    NotFound {
        /// The request path that failed to match.
        path: String,
    },

    /// A path-variable string could not be converted to the handler's
    /// declared parameter type.
    #[error("invalid value: {detail}")]
    InvalidValue {
        /// What conversion was attempted and why it failed.
        detail: String,
    },

    /// A pattern passed to `EndpointTrie::insert` was malformed: unbalanced
    /// braces, or a variable name repeated within the same pattern.
    #[error("invalid pattern {pattern:?}: {detail}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// What was wrong with it.
        detail: String,
    },

    /// A handler adapter returned an error or panicked.
    #[error("{detail}")]
    HandlerFailure {
        /// Detail message; `"Unknown exception occurred"` when the failure
        /// was opaque (e.g. a caught panic with no string payload).
        detail: String,
    },

    /// A transport's `Send` or `Receive` call failed.
    #[error("transport failure: {detail}")]
    TransportFailure {
        /// The transport's identifier, as returned by `Server::id`.
        transport_id: String,
        /// What went wrong.
        detail: String,
    },
}

impl Error {
    /// Construct a [`Error::NotFound`] for the given request path.
    pub fn not_found(path: impl Into<String>) -> Self {
        Error::NotFound { path: path.into() }
    }

    /// Construct a [`Error::InvalidValue`].
    pub fn invalid_value(detail: impl Into<String>) -> Self {
        Error::InvalidValue {
            detail: detail.into(),
        }
    }

    /// Construct a [`Error::InvalidPattern`].
    pub fn invalid_pattern(pattern: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::InvalidPattern {
            pattern: pattern.into(),
            detail: detail.into(),
        }
    }

    /// Construct a [`Error::HandlerFailure`] with an opaque cause.
    pub fn opaque_handler_failure() -> Self {
        Error::HandlerFailure {
            detail: "Unknown exception occurred".to_string(),
        }
    }

    /// Construct a [`Error::HandlerFailure`] from a concrete cause.
    pub fn handler_failure(detail: impl Into<String>) -> Self {
        Error::HandlerFailure {
            detail: detail.into(),
        }
    }

    /// Construct a [`Error::TransportFailure`].
    pub fn transport_failure(transport_id: impl Into<String>, detail: impl Into<String>) -> Self {
        Error::TransportFailure {
            transport_id: transport_id.into(),
            detail: detail.into(),
        }
    }

    /// The `"error"` field of the client-visible JSON error document.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "Not Found",
            Error::InvalidValue { .. } => "Invalid Value",
            Error::InvalidPattern { .. } => "Invalid Pattern",
            Error::HandlerFailure { .. } => "Internal Server Error",
            Error::TransportFailure { .. } => "Transport Failure",
        }
    }

    /// Render this error as the `{"error": ..., "message": ...}` document
    /// used for client-visible error responses.
    pub fn to_error_document(&self) -> ErrorDocument {
        ErrorDocument {
            error: self.kind().to_string(),
            message: self.to_string(),
        }
    }
}

/// The JSON shape of a client-visible error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDocument {
    pub error: String,
    pub message: String,
}

impl ErrorDocument {
    /// Serialize to the wire text carried in a response body.
    pub fn to_json_string(&self) -> String {
        serde_json::to_string(self).expect("ErrorDocument fields are always valid JSON")
    }
}

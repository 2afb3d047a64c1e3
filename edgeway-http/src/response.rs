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

//! The response envelope and its wire forms.

use crate::body::WireBody;
use crate::dispatch::Source;
use crate::status::{Status, StatusExt};
use edgeway_error::Error;
use std::collections::BTreeMap;

/// `Response<T>`: the typed triple `(status, headers, body)` a handler
/// adapter hands back to the dispatcher. Headers are a plain map, case-
/// sensitive as stored, duplicate names not permitted, rather than
/// `http::HeaderMap`, which normalizes case and allows repeats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response<T> {
    status: Status,
    headers: BTreeMap<String, String>,
    body: T,
}

impl<T> Response<T> {
    /// Construct an envelope directly from its parts.
    pub fn new(status: Status, body: T) -> Self {
        Response {
            status,
            headers: BTreeMap::new(),
            body,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    pub fn body(&self) -> &T {
        &self.body
    }

    pub fn into_parts(self) -> (Status, BTreeMap<String, String>, T) {
        (self.status, self.headers, self.body)
    }

    /// Sets the status, returning `self` for chaining.
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    /// Sets a single header, returning `self` for chaining.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Merges in several headers at once, returning `self` for chaining.
    pub fn with_headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (name, value) in headers {
            self.headers.insert(name.into(), value.into());
        }
        self
    }

    /// Replaces the body, returning a new envelope (the body type may
    /// change, the way `conjure_http`'s response builders let the body
    /// type vary independently of status/headers).
    pub fn with_body<U>(self, body: U) -> Response<U> {
        Response {
            status: self.status,
            headers: self.headers,
            body,
        }
    }
}

macro_rules! unit_factory {
    ($name:ident, $status:expr) => {
        /// Constructs an envelope with no body and status
        #[doc = stringify!($status)]
        pub fn $name() -> Response<()> {
            Response::new($status, ())
        }
    };
}

impl Response<()> {
    unit_factory!(no_content, Status::NO_CONTENT);
}

/// Status-named factories for envelopes carrying a body (`ok`, `created`,
/// `accepted`, `bad_request`, ...).
impl<T> Response<T> {
    pub fn ok(body: T) -> Self {
        Response::new(Status::OK, body)
    }

    pub fn created(body: T) -> Self {
        Response::new(Status::CREATED, body)
    }

    pub fn accepted(body: T) -> Self {
        Response::new(Status::ACCEPTED, body)
    }

    pub fn bad_request(body: T) -> Self {
        Response::new(Status::BAD_REQUEST, body)
    }

    pub fn unauthorized(body: T) -> Self {
        Response::new(Status::UNAUTHORIZED, body)
    }

    pub fn forbidden(body: T) -> Self {
        Response::new(Status::FORBIDDEN, body)
    }

    pub fn not_found(body: T) -> Self {
        Response::new(Status::NOT_FOUND, body)
    }

    pub fn method_not_allowed(body: T) -> Self {
        Response::new(Status::METHOD_NOT_ALLOWED, body)
    }

    pub fn conflict(body: T) -> Self {
        Response::new(Status::CONFLICT, body)
    }

    pub fn internal_server_error(body: T) -> Self {
        Response::new(Status::INTERNAL_SERVER_ERROR, body)
    }

    pub fn service_unavailable(body: T) -> Self {
        Response::new(Status::SERVICE_UNAVAILABLE, body)
    }

    /// The generic escape hatch: any status, any body.
    pub fn status(status: Status, body: T) -> Self {
        Response::new(status, body)
    }
}

/// A 200-OK envelope for `value`, with a default `Content-Type:
/// application/json` header.
pub fn create_ok_response<T>(value: T) -> Response<T> {
    Response::ok(value).with_header("Content-Type", "application/json")
}

impl<T> Response<T>
where
    T: WireBody,
{
    /// Serializes this envelope's body, producing the `(status, headers,
    /// body_text)` triple a [`WireResponse`] is stamped from.
    pub fn into_rendered(self) -> Result<RenderedResponse, Error> {
        let body_text = self.body.to_wire_text()?;
        Ok(RenderedResponse {
            status: self.status,
            headers: self.headers,
            body_text,
        })
    }
}

/// An envelope after body serialization but before the dispatcher has
/// stamped a `request_id`/`source` onto it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedResponse {
    pub status: Status,
    pub headers: BTreeMap<String, String>,
    pub body_text: String,
}

/// The serialized artifact delivered to a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub request_id: String,
    pub source: Source,
    pub status_code: u16,
    pub status_message: String,
    pub headers: BTreeMap<String, String>,
    pub body_text: String,
}

impl WireResponse {
    /// Stamps a rendered envelope with the transport-level fields the
    /// dispatcher alone knows about.
    pub fn from_rendered(rendered: RenderedResponse, request_id: String, source: Source) -> Self {
        WireResponse {
            request_id,
            source,
            status_code: rendered.status.as_u16(),
            status_message: rendered.status.reason_phrase().to_string(),
            headers: rendered.headers,
            body_text: rendered.body_text,
        }
    }

    /// `HTTP/1.1 <code> <reason>\r\n` + headers + blank line + body.
    pub fn to_http_string(&self) -> String {
        let mut out = format!(
            "HTTP/1.1 {} {}\r\n",
            self.status_code, self.status_message
        );
        for (name, value) in &self.headers {
            out.push_str(name);
            out.push_str(": ");
            out.push_str(value);
            out.push_str("\r\n");
        }
        out.push_str("\r\n");
        out.push_str(&self.body_text);
        out
    }

    /// `{statusCode, statusMessage, headers, body}` where `body` is the
    /// parsed JSON value if `body_text` is valid JSON, else the raw text;
    /// unit bodies (empty `body_text`) render as `{}`.
    pub fn to_json_string(&self) -> String {
        let body_value: serde_json::Value = if self.body_text.is_empty() {
            serde_json::json!({})
        } else {
            serde_json::from_str(&self.body_text)
                .unwrap_or_else(|_| serde_json::Value::String(self.body_text.clone()))
        };

        let document = serde_json::json!({
            "statusCode": self.status_code,
            "statusMessage": self.status_message,
            "headers": self.headers,
            "body": body_value,
        });
        document.to_string()
    }
}

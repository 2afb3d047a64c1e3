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

//! Request and method dispatch.
//!
//! A [`Dispatcher`] binds `(method, URL template)` pairs to handler
//! adapters and, given a concrete [`Request`], finds the best match in its
//! [`EndpointTrie`], converts captured path variables, invokes the adapter,
//! and turns whatever it returns (or whatever error it raises) into a
//! [`WireResponse`].

use crate::body::WireBody;
use crate::response::{Response, WireResponse};
use crate::status::Status;
use crate::trie::EndpointTrie;
use edgeway_error::Error;
use http::Method;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

/// Which transport a request arrived on, and the lane its response owes
/// its reply on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    LocalServer,
    CloudServer,
}

/// A request as delivered by a transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub raw_body: String,
    pub request_id: String,
    pub source: Source,
}

/// A type-erased handler: closes over its own body type `T` at
/// registration time, so the dispatcher never needs to know it.
type HandlerAdapter =
    Box<dyn Fn(&HashMap<String, String>, &str) -> Result<Response<EnvelopeText>, Error> + Send + Sync>;

/// A body that has already been rendered to its wire text; lets
/// [`Dispatcher::register`] erase the handler's body type down to a single
/// concrete one the dispatcher can store uniformly.
struct EnvelopeText(String);

impl WireBody for EnvelopeText {
    fn to_wire_text(&self) -> Result<String, Error> {
        Ok(self.0.clone())
    }
}

/// Binds `(method, URL template)` pairs to handlers and resolves concrete
/// requests against them.
#[derive(Default)]
pub struct Dispatcher {
    trie: EndpointTrie,
    handlers: HashMap<(Method, String), HandlerAdapter>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Dispatcher::default()
    }

    /// Registers `handler` for `(method, pattern)`. `handler` receives the
    /// captured path variables and the raw request body, and returns the
    /// envelope to send back.
    pub fn register<T, F>(&mut self, method: Method, pattern: &str, handler: F) -> Result<(), Error>
    where
        T: WireBody,
        F: Fn(&HashMap<String, String>, &str) -> Result<Response<T>, Error> + Send + Sync + 'static,
    {
        self.trie.insert(pattern)?;
        let adapter: HandlerAdapter = Box::new(move |variables, raw_body| {
            let response = handler(variables, raw_body)?;
            let (status, headers, body) = response.into_parts();
            let body_text = body.to_wire_text()?;
            Ok(Response::new(status, EnvelopeText(body_text)).with_headers(headers))
        });
        self.handlers.insert((method, pattern.to_string()), adapter);
        Ok(())
    }

    /// Resolves `request` to a [`WireResponse`]: trie search, then method
    /// lookup, then invoke.
    pub fn dispatch(&self, request: Request) -> WireResponse {
        let span = tracing::info_span!(
            "dispatch",
            request_id = %request.request_id,
            method = %request.method,
            path = %request.path,
        );
        let _guard = span.enter();

        let outcome = self.trie.search(&request.path);
        if !outcome.found {
            let error = Error::not_found(request.path.clone());
            return self.error_response(&request, &error);
        }

        let key = (request.method.clone(), outcome.pattern.clone());
        let adapter = match self.handlers.get(&key) {
            Some(adapter) => adapter,
            None => {
                let allowed = self.allowed_methods(&outcome.pattern);
                tracing::warn!(pattern = %outcome.pattern, "method not allowed");
                return self.method_not_allowed_response(&request, allowed);
            }
        };

        let invocation = panic::catch_unwind(AssertUnwindSafe(|| {
            adapter(&outcome.variables, &request.raw_body)
        }));

        let rendered = match invocation {
            Ok(Ok(response)) => response.into_rendered(),
            Ok(Err(error)) => {
                tracing::error!(detail = %error, "handler returned an error");
                Err(error)
            }
            Err(_) => {
                tracing::error!("handler panicked");
                Err(Error::opaque_handler_failure())
            }
        };

        match rendered {
            Ok(rendered) => WireResponse::from_rendered(
                rendered,
                request.request_id.clone(),
                request.source,
            ),
            Err(error) => self.error_response(&request, &error),
        }
    }

    /// All methods registered for `pattern`, sorted for a deterministic
    /// `Allow` header.
    fn allowed_methods(&self, pattern: &str) -> Vec<Method> {
        let mut methods: Vec<Method> = self
            .handlers
            .keys()
            .filter(|(_, p)| p == pattern)
            .map(|(m, _)| m.clone())
            .collect();
        methods.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        methods
    }

    fn error_response(&self, request: &Request, error: &Error) -> WireResponse {
        let status = status_for(error);
        let body_text = error.to_error_document().to_json_string();
        self.json_error(request, status, body_text)
    }

    /// 405 with an `Allow` header listing the methods that would have
    /// matched: an unregistered method on a known pattern gets
    /// `MethodNotAllowed`, not a bare `NotFound`.
    fn method_not_allowed_response(&self, request: &Request, allowed: Vec<Method>) -> WireResponse {
        let allow = allowed
            .iter()
            .map(Method::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let message = format!(
            "method {} not allowed for {}",
            request.method, request.path
        );
        let document = edgeway_error::ErrorDocument {
            error: "Method Not Allowed".to_string(),
            message,
        };
        let mut response = self.json_error(
            request,
            Status::METHOD_NOT_ALLOWED,
            document.to_json_string(),
        );
        response.headers.insert("Allow".to_string(), allow);
        response
    }

    fn json_error(&self, request: &Request, status: Status, body_text: String) -> WireResponse {
        let mut headers = std::collections::BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        WireResponse {
            request_id: request.request_id.clone(),
            source: request.source,
            status_code: status.as_u16(),
            status_message: crate::status::StatusExt::reason_phrase(&status).to_string(),
            headers,
            body_text,
        }
    }
}

fn status_for(error: &Error) -> Status {
    match error {
        Error::NotFound { .. } => Status::NOT_FOUND,
        Error::InvalidValue { .. } => Status::BAD_REQUEST,
        Error::InvalidPattern { .. } => Status::INTERNAL_SERVER_ERROR,
        Error::HandlerFailure { .. } => Status::INTERNAL_SERVER_ERROR,
        Error::TransportFailure { .. } => Status::SERVICE_UNAVAILABLE,
    }
}

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

//! Transport and thread-pool collaborator interfaces.
//!
//! This crate owns routing and dispatch, not wire I/O: a concrete local
//! socket server, a cloud MQTT/websocket bridge, and a real thread pool are
//! all external collaborators. Only their shape is fixed here, the way
//! `conjure_http::server::AsyncWriteBody` fixes the shape of a streaming
//! body writer without saying anything about the transport that drives it.

use crate::dispatch::Request;

/// A transport that can receive inbound requests and deliver outbound wire
/// text, identified by a stable id.
pub trait Transport: Send + Sync {
    /// A stable identifier, used in `TransportFailure` diagnostics.
    fn id(&self) -> &str;

    /// Start listening on `port`. Returns `false` if the transport could
    /// not be started.
    fn start(&self, port: u16) -> bool;

    /// Stop listening and release any held resources.
    fn stop(&self);

    /// Non-blocking poll for the next inbound request, if any.
    fn receive_message(&self) -> Option<Request>;

    /// Deliver `wire_text` for the request identified by `request_id`.
    /// Returns `false` on failure; a failed send is logged, not retried.
    fn send_message(&self, request_id: &str, wire_text: &str) -> bool;
}

/// A thread-pool collaborator that runs a unit of work without blocking
/// the caller. `rayon::ThreadPool` implements this directly via `spawn`.
pub trait TaskExecutor: Send + Sync {
    fn submit(&self, task: Box<dyn FnOnce() + Send + 'static>);
}

impl TaskExecutor for rayon::ThreadPool {
    fn submit(&self, task: Box<dyn FnOnce() + Send + 'static>) {
        self.spawn(task);
    }
}

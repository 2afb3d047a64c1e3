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

//! Request routing and dispatch core for a dual-transport (local + cloud)
//! embedded HTTP server framework.
//!
//! This crate owns everything between a transport handing over a raw
//! request and the same transport being handed back a wire response:
//! trie-based URL routing, a method/pattern dispatcher, path-variable type
//! conversion, response envelopes, and the two queues and request manager
//! that tie a tick of the event loop together. It does not speak any wire
//! protocol itself, does not implement TLS/HTTP2/chunked transfer, and does
//! not provide the transports or thread pool it orchestrates; those are
//! external collaborators behind the [`transport`] traits.

pub mod body;
pub mod dispatch;
pub mod manager;
pub mod path_param;
pub mod queue;
pub mod response;
pub mod status;
pub mod transport;
pub mod trie;

pub use body::{Json, WireBody};
pub use dispatch::{Dispatcher, Request, Source};
pub use edgeway_error::Error;
pub use manager::RequestManager;
pub use path_param::{decode_url_component, deserialize_json_param, FromPathParam};
pub use queue::{RequestQueue, ResponseQueue};
pub use response::{create_ok_response, RenderedResponse, Response, WireResponse};
pub use status::{Status, StatusExt};
pub use transport::{TaskExecutor, Transport};
pub use trie::{EndpointTrie, MatchResult};

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

//! Test doubles for the transport and thread-pool collaborators, in the
//! style of `conjure-test`'s fake clients: a hand-authored fixture crate
//! the integration tests import rather than business logic of its own.

use edgeway_http::{Request, TaskExecutor, Transport};

mockall::mock! {
    pub Transport {}

    impl Transport for Transport {
        fn id(&self) -> &str;
        fn start(&self, port: u16) -> bool;
        fn stop(&self);
        fn receive_message(&self) -> Option<Request>;
        fn send_message(&self, request_id: &str, wire_text: &str) -> bool;
    }
}

/// A thread-pool stand-in that runs every submitted task in-line, so tests
/// built on it are deterministic rather than racing a real pool.
pub struct ImmediateExecutor;

impl TaskExecutor for ImmediateExecutor {
    fn submit(&self, task: Box<dyn FnOnce() + Send + 'static>) {
        task();
    }
}

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

//! Request and response queues.
//!
//! Both queues are thread-safe FIFOs guarded by short critical sections, a
//! single `parking_lot::Mutex` per lane, never held across anything that
//! could block. The response queue is two independent lanes keyed by
//! `Source` so responses are never misdelivered to the wrong transport.

use crate::dispatch::{Request, Source};
use crate::response::WireResponse;
use parking_lot::Mutex;
use std::collections::VecDeque;

/// A single-lane FIFO of inbound requests.
#[derive(Default)]
pub struct RequestQueue {
    items: Mutex<VecDeque<Request>>,
}

impl RequestQueue {
    pub fn new() -> Self {
        RequestQueue::default()
    }

    /// Enqueues `request`. A would-be-null request from the transport
    /// layer is simply never produced, since the transport's receive call
    /// is `Option`-typed; enqueueing nothing is a no-op by construction.
    pub fn enqueue(&self, request: Request) {
        self.items.lock().push_back(request);
    }

    /// Pops the oldest request, or `None` if the queue is empty.
    pub fn dequeue(&self) -> Option<Request> {
        self.items.lock().pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }

    pub fn has_items(&self) -> bool {
        !self.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.lock().len()
    }
}

/// Two independent FIFOs of outbound responses, one per transport lane.
#[derive(Default)]
pub struct ResponseQueue {
    local: Mutex<VecDeque<WireResponse>>,
    cloud: Mutex<VecDeque<WireResponse>>,
}

impl ResponseQueue {
    pub fn new() -> Self {
        ResponseQueue::default()
    }

    /// Routes `response` to its lane by `response.source`.
    pub fn enqueue(&self, response: WireResponse) {
        match response.source {
            Source::LocalServer => self.local.lock().push_back(response),
            Source::CloudServer => self.cloud.lock().push_back(response),
        }
    }

    pub fn dequeue_local(&self) -> Option<WireResponse> {
        self.local.lock().pop_front()
    }

    pub fn dequeue_cloud(&self) -> Option<WireResponse> {
        self.cloud.lock().pop_front()
    }

    /// True iff both lanes are empty.
    pub fn is_empty(&self) -> bool {
        self.local.lock().is_empty() && self.cloud.lock().is_empty()
    }

    pub fn has_items(&self) -> bool {
        !self.is_empty()
    }
}

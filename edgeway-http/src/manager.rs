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

//! The request manager: the per-tick orchestration of receive, enqueue,
//! dispatch, enqueue, send across both transports.

use crate::dispatch::Dispatcher;
use crate::queue::{RequestQueue, ResponseQueue};
use crate::transport::{TaskExecutor, Transport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Orchestrates the local and cloud transports against a shared
/// [`Dispatcher`]. Owns the request queue and the two-lane response queue;
/// every request dispatched keeps its originating transport so its
/// response is sent back on the same lane it arrived on.
pub struct RequestManager {
    local_transport: Arc<dyn Transport>,
    cloud_transport: Arc<dyn Transport>,
    executor: Arc<dyn TaskExecutor>,
    dispatcher: Arc<Dispatcher>,
    request_queue: Arc<RequestQueue>,
    response_queue: Arc<ResponseQueue>,
    running: AtomicBool,
}

impl RequestManager {
    pub fn new(
        local_transport: Arc<dyn Transport>,
        cloud_transport: Arc<dyn Transport>,
        executor: Arc<dyn TaskExecutor>,
        dispatcher: Arc<Dispatcher>,
    ) -> Self {
        RequestManager {
            local_transport,
            cloud_transport,
            executor,
            dispatcher,
            request_queue: Arc::new(RequestQueue::new()),
            response_queue: Arc::new(ResponseQueue::new()),
            running: AtomicBool::new(false),
        }
    }

    /// Starts both transports. `false` if either refuses to start.
    pub fn start_server(&self, local_port: u16, cloud_port: u16) -> bool {
        let local_started = self.local_transport.start(local_port);
        let cloud_started = self.cloud_transport.start(cloud_port);
        if !local_started {
            tracing::error!(transport = self.local_transport.id(), "failed to start");
        }
        if !cloud_started {
            tracing::error!(transport = self.cloud_transport.id(), "failed to start");
        }
        local_started && cloud_started
    }

    pub fn stop_server(&self) {
        self.local_transport.stop();
        self.cloud_transport.stop();
    }

    /// Runs ticks until [`RequestManager::shutdown`] is called, sleeping
    /// `tick_interval` between cycles.
    pub fn run(&self, tick_interval: Duration) {
        self.running.store(true, Ordering::SeqCst);
        while self.running.load(Ordering::SeqCst) {
            self.tick();
            std::thread::sleep(tick_interval);
        }
    }

    pub fn shutdown(&self) {
        self.running.store(false, Ordering::SeqCst);
    }

    /// One cycle: drain both transports into the request queue, dispatch
    /// everything queued, then drain both response lanes back out.
    pub fn tick(&self) {
        self.receive_from(Arc::clone(&self.local_transport));
        self.receive_from(Arc::clone(&self.cloud_transport));
        self.dispatch_queued();
        self.drain_responses();
    }

    /// Drains `transport`'s inbound queue into the shared request queue.
    /// Submitted to the executor but waited on before returning, so a tick
    /// never starts dispatching before every message a transport already
    /// has queued up has actually been enqueued.
    fn receive_from(&self, transport: Arc<dyn Transport>) {
        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let queue = Arc::clone(&self.request_queue);
        self.executor.submit(Box::new(move || {
            while let Some(request) = transport.receive_message() {
                queue.enqueue(request);
            }
            let _ = done_tx.send(());
        }));
        let _ = done_rx.recv();
    }

    /// Dispatches every request currently queued, one at a time, in the
    /// order they were dequeued. Dispatch runs on the calling thread rather
    /// than farmed out to the executor: the request queue interleaves both
    /// transports' arrivals, and dispatching out of order would let a later
    /// request's response reach its lane before an earlier one's.
    fn dispatch_queued(&self) {
        while let Some(request) = self.request_queue.dequeue() {
            let response = self.dispatcher.dispatch(request);
            self.response_queue.enqueue(response);
        }
    }

    fn drain_responses(&self) {
        while let Some(response) = self.response_queue.dequeue_local() {
            self.send_one(&self.local_transport, response);
        }
        while let Some(response) = self.response_queue.dequeue_cloud() {
            self.send_one(&self.cloud_transport, response);
        }
    }

    /// Sends `response` on `transport`, unless it carries no request id:
    /// such a response has no known origin to reply to and is discarded.
    fn send_one(&self, transport: &Arc<dyn Transport>, response: crate::response::WireResponse) {
        if response.request_id.is_empty() {
            tracing::debug!(transport = transport.id(), "discarding response with no request id");
            return;
        }
        let sent = transport.send_message(&response.request_id, &response.to_http_string());
        if !sent {
            tracing::warn!(
                transport = transport.id(),
                request_id = %response.request_id,
                "failed to send response"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{Request, Source};
    use crate::response::Response;
    use parking_lot::Mutex;
    use std::collections::VecDeque;

    /// An in-process stand-in transport: requests are fed in by the test,
    /// sent responses are recorded for inspection.
    struct FakeTransport {
        id: String,
        inbound: Mutex<VecDeque<Request>>,
        sent: Mutex<Vec<(String, String)>>,
    }

    impl FakeTransport {
        fn new(id: &str) -> Self {
            FakeTransport {
                id: id.to_string(),
                inbound: Mutex::new(VecDeque::new()),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn push(&self, request: Request) {
            self.inbound.lock().push_back(request);
        }
    }

    impl Transport for FakeTransport {
        fn id(&self) -> &str {
            &self.id
        }

        fn start(&self, _port: u16) -> bool {
            true
        }

        fn stop(&self) {}

        fn receive_message(&self) -> Option<Request> {
            self.inbound.lock().pop_front()
        }

        fn send_message(&self, request_id: &str, wire_text: &str) -> bool {
            self.sent
                .lock()
                .push((request_id.to_string(), wire_text.to_string()));
            true
        }
    }

    /// A thread pool stand-in that runs submitted work immediately,
    /// in-line, so tests are deterministic.
    struct ImmediateExecutor;

    impl TaskExecutor for ImmediateExecutor {
        fn submit(&self, task: Box<dyn FnOnce() + Send + 'static>) {
            task();
        }
    }

    #[test]
    fn tick_round_trips_a_request_through_its_own_transport() {
        let local = Arc::new(FakeTransport::new("local"));
        let cloud = Arc::new(FakeTransport::new("cloud"));

        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(http::Method::GET, "/ping", |_vars, _body| {
                Ok(Response::ok("pong".to_string()))
            })
            .unwrap();

        local.push(Request {
            method: http::Method::GET,
            path: "/ping".to_string(),
            raw_body: String::new(),
            request_id: "r1".to_string(),
            source: Source::LocalServer,
        });

        let manager = RequestManager::new(
            Arc::clone(&local) as Arc<dyn Transport>,
            Arc::clone(&cloud) as Arc<dyn Transport>,
            Arc::new(ImmediateExecutor),
            Arc::new(dispatcher),
        );

        manager.tick();

        assert_eq!(local.sent.lock().len(), 1);
        assert!(cloud.sent.lock().is_empty());
        let (request_id, wire_text) = &local.sent.lock()[0];
        assert_eq!(request_id, "r1");
        assert!(wire_text.contains("pong"));
    }

    #[test]
    fn responses_never_cross_transports() {
        let local = Arc::new(FakeTransport::new("local"));
        let cloud = Arc::new(FakeTransport::new("cloud"));
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(http::Method::GET, "/x", |_vars, _body| Ok(Response::ok(())))
            .unwrap();

        cloud.push(Request {
            method: http::Method::GET,
            path: "/x".to_string(),
            raw_body: String::new(),
            request_id: "c1".to_string(),
            source: Source::CloudServer,
        });

        let manager = RequestManager::new(
            Arc::clone(&local) as Arc<dyn Transport>,
            Arc::clone(&cloud) as Arc<dyn Transport>,
            Arc::new(ImmediateExecutor),
            Arc::new(dispatcher),
        );
        manager.tick();

        assert!(local.sent.lock().is_empty());
        assert_eq!(cloud.sent.lock().len(), 1);
    }

    #[test]
    fn same_lane_requests_are_sent_back_in_arrival_order() {
        let local = Arc::new(FakeTransport::new("local"));
        let cloud = Arc::new(FakeTransport::new("cloud"));
        let mut dispatcher = Dispatcher::new();
        dispatcher
            .register(http::Method::GET, "/echo/{n}", |vars, _body| {
                Ok(Response::ok(vars["n"].clone()))
            })
            .unwrap();

        for n in ["1", "2", "3"] {
            local.push(Request {
                method: http::Method::GET,
                path: format!("/echo/{n}"),
                raw_body: String::new(),
                request_id: format!("r{n}"),
                source: Source::LocalServer,
            });
        }

        let manager = RequestManager::new(
            Arc::clone(&local) as Arc<dyn Transport>,
            Arc::clone(&cloud) as Arc<dyn Transport>,
            Arc::new(ImmediateExecutor),
            Arc::new(dispatcher),
        );
        manager.tick();

        let sent = local.sent.lock();
        assert_eq!(sent.len(), 3);
        let ids: Vec<&str> = sent.iter().map(|(id, _)| id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r2", "r3"]);
    }

    #[test]
    fn response_with_no_request_id_is_discarded() {
        let local = Arc::new(FakeTransport::new("local"));
        let manager_transport = Arc::clone(&local) as Arc<dyn Transport>;

        let manager = RequestManager::new(
            Arc::clone(&manager_transport),
            Arc::new(FakeTransport::new("cloud")) as Arc<dyn Transport>,
            Arc::new(ImmediateExecutor),
            Arc::new(Dispatcher::new()),
        );

        let response = crate::response::WireResponse {
            request_id: String::new(),
            source: Source::LocalServer,
            status_code: 200,
            status_message: "OK".to_string(),
            headers: Default::default(),
            body_text: String::new(),
        };
        manager.send_one(&manager_transport, response);

        assert!(local.sent.lock().is_empty());
    }
}

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::time::{Instant, sleep};

use super::{Request, RequestError, RequestResult, ResponseError, Transport};

/**
    A scripted reply for [`FakeTransport`].
*/
#[derive(Debug, Clone)]
pub enum Reply {
    Body(String),
    Status(u16),
    Network,
    Hang,
    Delayed(Duration, String),
    DelayedStatus(Duration, u16),
}

impl Reply {
    pub fn body(body: impl Into<String>) -> Self {
        Self::Body(body.into())
    }

    pub fn delayed(delay: Duration, body: impl Into<String>) -> Self {
        Self::Delayed(delay, body.into())
    }
}

#[derive(Debug)]
struct FakeState {
    replies: VecDeque<Reply>,
    default: Reply,
    dispatched: Vec<(Instant, Request)>,
    aborted: usize,
}

/**
    An in-memory transport that replays scripted replies
    and records every request that was dispatched through it.
*/
#[derive(Debug, Clone)]
pub struct FakeTransport {
    state: Arc<Mutex<FakeState>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                replies: VecDeque::new(),
                default: Reply::body("[]"),
                dispatched: Vec::new(),
                aborted: 0,
            })),
        }
    }

    pub fn push(&self, reply: Reply) {
        self.state.lock().replies.push_back(reply);
    }

    pub fn set_default(&self, reply: Reply) {
        self.state.lock().default = reply;
    }

    pub fn calls(&self) -> usize {
        self.state.lock().dispatched.len()
    }

    pub fn dispatched(&self) -> Vec<Instant> {
        self.state.lock().dispatched.iter().map(|(at, _)| *at).collect()
    }

    pub fn requests(&self) -> Vec<Request> {
        let state = self.state.lock();
        state.dispatched.iter().map(|(_, r)| r.clone()).collect()
    }

    /// Number of sends that were dropped before they completed.
    pub fn aborted(&self) -> usize {
        self.state.lock().aborted
    }
}

impl Default for FakeTransport {
    fn default() -> Self {
        Self::new()
    }
}

struct AbortWatch {
    state: Arc<Mutex<FakeState>>,
    completed: bool,
}

impl Drop for AbortWatch {
    fn drop(&mut self) {
        if !self.completed {
            self.state.lock().aborted += 1;
        }
    }
}

impl Transport for FakeTransport {
    async fn send(&self, request: &Request) -> RequestResult<Vec<u8>> {
        let reply = {
            let mut state = self.state.lock();
            state.dispatched.push((Instant::now(), request.clone()));
            let default = state.default.clone();
            state.replies.pop_front().unwrap_or(default)
        };

        let mut watch = AbortWatch {
            state: Arc::clone(&self.state),
            completed: false,
        };

        let result = match reply {
            Reply::Body(body) => Ok(body.into_bytes()),
            Reply::Status(status) => Err(ResponseError::new(status, "").into()),
            Reply::Network => Err(RequestError::Network("connection refused".into())),
            Reply::Hang => std::future::pending().await,
            Reply::Delayed(delay, body) => {
                sleep(delay).await;
                Ok(body.into_bytes())
            }
            Reply::DelayedStatus(delay, status) => {
                sleep(delay).await;
                Err(ResponseError::new(status, "").into())
            }
        };

        watch.completed = true;
        result
    }
}

//! In-process stand-in for the accounting service.
//!
//! The fake runs on its own thread and runtime so both `#[tokio::test]` and
//! plain `#[test]` (blocking client) suites can use it.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::Value;

pub const JOB_ID: &str = "9a1e7c4b-2f3d-4e5a-8b6c-0d1e2f3a4b5c";
pub const PROJ_ID: &str = "00000000-0000-0000-0000-000000000001";

#[derive(Debug, Clone)]
struct Reply {
    status: StatusCode,
    body: String,
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (
            self.status,
            [(header::CONTENT_TYPE, "application/json")],
            self.body,
        )
            .into_response()
    }
}

#[derive(Debug)]
struct Recorded {
    reservation_reply: Reply,
    usage_reply: Reply,
    reservation_delay: Option<Duration>,
    reservations: Vec<Value>,
    usages: Vec<Value>,
}

#[derive(Debug, Clone)]
pub struct FakeAccounting {
    inner: Arc<Mutex<Recorded>>,
}

impl FakeAccounting {
    /// A fake that accepts every reservation with [`JOB_ID`] and every usage report.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Recorded {
                reservation_reply: Reply {
                    status: StatusCode::OK,
                    body: format!("{{\"job_id\": \"{JOB_ID}\"}}"),
                },
                usage_reply: Reply {
                    status: StatusCode::CREATED,
                    body: "{}".to_string(),
                },
                reservation_delay: None,
                reservations: Vec::new(),
                usages: Vec::new(),
            })),
        }
    }

    pub fn reply_to_reservation(&self, status: u16, body: &str) {
        self.inner.lock().unwrap().reservation_reply = Reply {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        };
    }

    /// Holds every reservation reply back for `delay`.
    pub fn delay_reservation(&self, delay: Duration) {
        self.inner.lock().unwrap().reservation_delay = Some(delay);
    }

    pub fn reply_to_usage(&self, status: u16, body: &str) {
        self.inner.lock().unwrap().usage_reply = Reply {
            status: StatusCode::from_u16(status).unwrap(),
            body: body.to_string(),
        };
    }

    pub fn reservations(&self) -> Vec<Value> {
        self.inner.lock().unwrap().reservations.clone()
    }

    pub fn usages(&self) -> Vec<Value> {
        self.inner.lock().unwrap().usages.clone()
    }

    /// Serves the fake on a random local port and returns its base URL.
    pub fn spawn(&self) -> String {
        let router = Router::new()
            .route("/reservation/oneshot", post(reserve))
            .route("/usage/oneshot", post(usage))
            .with_state(self.clone());

        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
        listener.set_nonblocking(true).expect("non-blocking listener");
        let address = listener.local_addr().expect("local address");

        std::thread::spawn(move || {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("fake accounting runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::from_std(listener).unwrap();
                axum::serve(listener, router).await.unwrap();
            });
        });

        format!("http://{address}")
    }
}

async fn reserve(State(fake): State<FakeAccounting>, Json(body): Json<Value>) -> Reply {
    let delay = fake.inner.lock().unwrap().reservation_delay;
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    let mut recorded = fake.inner.lock().unwrap();
    recorded.reservations.push(body);
    recorded.reservation_reply.clone()
}

async fn usage(State(fake): State<FakeAccounting>, Json(body): Json<Value>) -> Reply {
    let mut recorded = fake.inner.lock().unwrap();
    recorded.usages.push(body);
    recorded.usage_reply.clone()
}

/// A base URL nothing listens on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let address = listener.local_addr().expect("local address");
    drop(listener);
    format!("http://{address}")
}

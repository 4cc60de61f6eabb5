//! In-memory [`Transport`] for client tests.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};

use grc_client::error::ClientError;
use grc_client::transport::Transport;

/// One recorded request.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub body: Option<Value>,
}

type Reply = Result<Value, (u16, String)>;

/// Replays queued replies per `(method, path)` and records every call.
/// Unscripted requests fail with a 404.
#[derive(Default)]
pub struct MockTransport {
    replies: Mutex<HashMap<(&'static str, String), VecDeque<Reply>>>,
    calls: Mutex<Vec<Call>>,
}

impl MockTransport {
    pub fn respond(&self, method: &'static str, path: &str, value: Value) -> &Self {
        self.queue(method, path, Ok(value))
    }

    pub fn fail(&self, method: &'static str, path: &str, status: u16, body: &str) -> &Self {
        self.queue(method, path, Err((status, body.to_string())))
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn queue(&self, method: &'static str, path: &str, reply: Reply) -> &Self {
        self.replies
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(reply);
        self
    }

    fn reply(
        &self,
        method: &'static str,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ClientError> {
        self.calls.lock().unwrap().push(Call {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        let next = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&(method, path.to_string()))
            .and_then(VecDeque::pop_front);
        match next {
            Some(Ok(value)) => Ok(value),
            Some(Err((status, body))) => Err(ClientError::Api { status, body }),
            None => Err(ClientError::Api {
                status: 404,
                body: format!("no reply scripted for {method} {path}"),
            }),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str) -> Result<Value, ClientError> {
        self.reply("GET", path, None)
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.reply("POST", path, Some(body))
    }

    async fn put(&self, path: &str, body: &Value) -> Result<Value, ClientError> {
        self.reply("PUT", path, Some(body))
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        self.reply("DELETE", path, None).map(|_| ())
    }
}

/// API representation of a vendor.
pub fn vendor_json(id: i64, name: &str, risk: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "contact_email": format!("security@{}.test", name.to_lowercase().replace(' ', "-")),
        "risk": risk,
        "description": null,
        "created_at": "2026-03-01T09:00:00Z",
        "updated_at": "2026-03-01T09:00:00Z"
    })
}

/// API representation of an audit.
pub fn audit_json(id: i64, title: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "framework": "SOC 2",
        "status": status,
        "owner": "Dana",
        "due_date": null,
        "created_at": "2026-03-01T09:00:00Z",
        "updated_at": "2026-03-01T09:00:00Z"
    })
}

/// Transport whose requests never complete.
pub struct StalledTransport;

#[async_trait]
impl Transport for StalledTransport {
    async fn get(&self, _path: &str) -> Result<Value, ClientError> {
        std::future::pending().await
    }

    async fn post(&self, _path: &str, _body: &Value) -> Result<Value, ClientError> {
        std::future::pending().await
    }

    async fn put(&self, _path: &str, _body: &Value) -> Result<Value, ClientError> {
        std::future::pending().await
    }

    async fn delete(&self, _path: &str) -> Result<(), ClientError> {
        std::future::pending().await
    }
}

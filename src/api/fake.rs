//! In-memory [`DesignApi`] serving canned JSON per endpoint.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::Value;

use super::{ApiError, DesignApi};

enum Canned {
    Body(Value),
    Status(u16),
}

#[derive(Default)]
pub(crate) struct FakeApi {
    responses: Mutex<HashMap<String, Canned>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, endpoint: &str, body: Value) -> Self {
        self.set(endpoint, body);
        self
    }

    pub fn failing(self, endpoint: &str, status: u16) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Canned::Status(status));
        self
    }

    /// Replace the canned body for `endpoint` on a live fake.
    pub fn set(&self, endpoint: &str, body: Value) {
        self.responses
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), Canned::Body(body));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, endpoint: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == endpoint).count()
    }
}

#[async_trait]
impl DesignApi for FakeApi {
    async fn call_api(&self, endpoint: &str) -> Result<Value, ApiError> {
        self.calls.lock().unwrap().push(endpoint.to_string());
        match self.responses.lock().unwrap().get(endpoint) {
            Some(Canned::Body(body)) => Ok(body.clone()),
            Some(Canned::Status(status)) => Err(ApiError::Http {
                status: *status,
                status_text: String::new(),
                body: String::new(),
            }),
            None => Err(ApiError::Http {
                status: 404,
                status_text: "Not Found".into(),
                body: format!("no canned response for {endpoint}"),
            }),
        }
    }
}

//! Scriptable gateway for engine tests.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use lifelines_core::gateway::{Gateway, GatewayError, GatewayRequest, Result, Snapshot};
use serde_json::{json, Value};
use tokio::sync::Notify;

/// Gateway double with canned answers.
///
/// When gated, the first call that arrives parks until [`release`] is
/// called; later calls pass straight through.
///
/// [`release`]: MockGateway::release
#[derive(Default)]
pub(crate) struct MockGateway {
    snapshot: Mutex<Option<Snapshot>>,
    fetch_error: Mutex<Option<GatewayError>>,
    write_error: Mutex<Option<GatewayError>>,
    requests: Mutex<Vec<GatewayRequest>>,
    fetch_calls: AtomicUsize,
    gated: AtomicBool,
    entered: Notify,
    released: Notify,
}

impl MockGateway {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_snapshot(self, snapshot: Snapshot) -> Self {
        *self.snapshot.lock().unwrap() = Some(snapshot);
        self
    }

    pub(crate) fn with_fetch_error(self, error: GatewayError) -> Self {
        *self.fetch_error.lock().unwrap() = Some(error);
        self
    }

    pub(crate) fn with_write_error(self, error: GatewayError) -> Self {
        *self.write_error.lock().unwrap() = Some(error);
        self
    }

    pub(crate) fn gated(self) -> Self {
        self.gated.store(true, Ordering::SeqCst);
        self
    }

    /// Waits until a gated call has arrived.
    pub(crate) async fn entered(&self) {
        self.entered.notified().await;
    }

    /// Lets the parked call continue and opens the gate for good.
    pub(crate) fn release(&self) {
        self.gated.store(false, Ordering::SeqCst);
        self.released.notify_one();
    }

    pub(crate) fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn requests(&self) -> Vec<GatewayRequest> {
        self.requests.lock().unwrap().clone()
    }

    async fn pass_gate(&self) {
        if self.gated.load(Ordering::SeqCst) {
            self.entered.notify_one();
            self.released.notified().await;
        }
    }
}

#[async_trait]
impl Gateway for MockGateway {
    async fn fetch_all(&self) -> Result<Snapshot> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.pass_gate().await;
        if let Some(error) = self.fetch_error.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(self.snapshot.lock().unwrap().clone().unwrap_or_default())
    }

    async fn add_record(&self, request: GatewayRequest) -> Result<Value> {
        self.requests.lock().unwrap().push(request.clone());
        self.pass_gate().await;
        if let Some(error) = self.write_error.lock().unwrap().clone() {
            return Err(error);
        }
        let mut record = Value::Object(request.payload);
        record["id"] = json!(format!("srv-{}", self.requests.lock().unwrap().len()));
        Ok(record)
    }
}

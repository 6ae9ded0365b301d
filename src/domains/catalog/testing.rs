//! In-memory [`ProductApi`] used by the controller tests.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Notify, watch};

use super::api::ProductApi;
use super::error::{CatalogError, CatalogResult};
use super::model::{Product, ProductId, ProductPayload};

/// A request received by the fake, in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Get(ProductId),
    Create(ProductPayload),
    Update(ProductId, ProductPayload),
    Delete(ProductId),
}

pub struct FakeProductApi {
    calls: Mutex<Vec<ApiCall>>,
    list: CatalogResult<Value>,
    records: HashMap<ProductId, CatalogResult<Value>>,
    write: CatalogResult<Option<Product>>,
    delete: CatalogResult<()>,
    gates: HashMap<ProductId, Arc<Notify>>,
    write_gate: Option<Arc<Notify>>,
    probe: Mutex<Option<watch::Receiver<bool>>>,
    observed: Mutex<Vec<bool>>,
}

impl FakeProductApi {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            list: Ok(Value::Array(Vec::new())),
            records: HashMap::new(),
            write: Ok(None),
            delete: Ok(()),
            gates: HashMap::new(),
            write_gate: None,
            probe: Mutex::new(None),
            observed: Mutex::new(Vec::new()),
        }
    }

    pub fn with_list(mut self, value: Value) -> Self {
        self.list = Ok(value);
        self
    }

    pub fn with_list_error(mut self, err: CatalogError) -> Self {
        self.list = Err(err);
        self
    }

    pub fn with_record(mut self, id: ProductId, value: Value) -> Self {
        self.records.insert(id, Ok(value));
        self
    }

    pub fn with_record_error(mut self, id: ProductId, err: CatalogError) -> Self {
        self.records.insert(id, Err(err));
        self
    }

    pub fn with_write_error(mut self, err: CatalogError) -> Self {
        self.write = Err(err);
        self
    }

    pub fn with_delete_error(mut self, err: CatalogError) -> Self {
        self.delete = Err(err);
        self
    }

    /// Hold `get_product(id)` until `gate` is notified.
    pub fn with_gate(mut self, id: ProductId, gate: Arc<Notify>) -> Self {
        self.gates.insert(id, gate);
        self
    }

    /// Hold `create_product` and `update_product` until `gate` is notified.
    pub fn with_write_gate(mut self, gate: Arc<Notify>) -> Self {
        self.write_gate = Some(gate);
        self
    }

    /// Record the submitting flag each time a write request arrives.
    pub fn probe_submitting(&self, rx: watch::Receiver<bool>) {
        *self.probe.lock().unwrap() = Some(rx);
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn observed_submitting(&self) -> Vec<bool> {
        self.observed.lock().unwrap().clone()
    }

    fn record(&self, call: ApiCall) {
        self.calls.lock().unwrap().push(call);
    }

    async fn hold_write(&self) {
        if let Some(gate) = &self.write_gate {
            gate.notified().await;
        }
    }

    fn observe(&self) {
        if let Some(rx) = self.probe.lock().unwrap().as_ref() {
            self.observed.lock().unwrap().push(*rx.borrow());
        }
    }
}

#[async_trait]
impl ProductApi for FakeProductApi {
    async fn list_products(&self) -> CatalogResult<Value> {
        self.record(ApiCall::List);
        self.list.clone()
    }

    async fn get_product(&self, id: ProductId) -> CatalogResult<Value> {
        self.record(ApiCall::Get(id));
        if let Some(gate) = self.gates.get(&id) {
            gate.notified().await;
        }
        self.records
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Err(CatalogError::server(404, "Not Found")))
    }

    async fn create_product(&self, payload: &ProductPayload) -> CatalogResult<Option<Product>> {
        self.record(ApiCall::Create(payload.clone()));
        self.observe();
        self.hold_write().await;
        self.write.clone()
    }

    async fn update_product(
        &self,
        id: ProductId,
        payload: &ProductPayload,
    ) -> CatalogResult<Option<Product>> {
        self.record(ApiCall::Update(id, payload.clone()));
        self.observe();
        self.hold_write().await;
        self.write.clone()
    }

    async fn delete_product(&self, id: ProductId) -> CatalogResult<()> {
        self.record(ApiCall::Delete(id));
        self.delete.clone()
    }
}

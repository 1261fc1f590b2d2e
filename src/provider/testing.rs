// Tue Aug 18 2026 - Alex

//! In-memory fakes for exercising collectors and the engine without a
//! provider. Responses are scripted per operation and consumed in order.

use crate::error::ScanError;
use crate::provider::client::{ApiRequest, ClientFactory, ProviderClient};
use ahash::AHashMap;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Default)]
pub struct FakeClient {
    scripts: Mutex<AHashMap<String, VecDeque<Result<Value, ScanError>>>>,
    calls: Mutex<Vec<ApiRequest>>,
}

impl FakeClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, operation: &str, response: Value) {
        self.scripts
            .lock()
            .entry(operation.to_string())
            .or_default()
            .push_back(Ok(response));
    }

    pub fn enqueue_error(&self, operation: &str, error: ScanError) {
        self.scripts
            .lock()
            .entry(operation.to_string())
            .or_default()
            .push_back(Err(error));
    }

    pub fn calls(&self) -> Vec<ApiRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .iter()
            .filter(|r| r.operation == operation)
            .count()
    }
}

impl ProviderClient for FakeClient {
    fn call(&self, request: &ApiRequest) -> Result<Value, ScanError> {
        self.calls.lock().push(request.clone());

        let mut scripts = self.scripts.lock();
        match scripts.get_mut(&request.operation).and_then(VecDeque::pop_front) {
            Some(response) => response,
            None => Err(ScanError::InvalidResponse(format!(
                "no scripted response for operation: {}",
                request.operation
            ))),
        }
    }
}

#[derive(Default)]
pub struct FakeFactory {
    clients: Mutex<AHashMap<String, Arc<FakeClient>>>,
    permissive: bool,
}

impl FakeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hands out a blank client for any (service, region) the factory has no
    /// script for, instead of failing. Collectors that never touch their
    /// client run fine against it.
    pub fn permissive() -> Self {
        Self {
            clients: Mutex::new(AHashMap::new()),
            permissive: true,
        }
    }

    pub fn insert(&self, service: &str, region: &str, client: Arc<FakeClient>) {
        self.clients
            .lock()
            .insert(Self::key(service, region), client);
    }

    fn key(service: &str, region: &str) -> String {
        format!("{}/{}", service, region)
    }
}

impl ClientFactory for FakeFactory {
    fn client_for(
        &self,
        service: &str,
        region: &str,
    ) -> Result<Arc<dyn ProviderClient>, ScanError> {
        if let Some(client) = self.clients.lock().get(&Self::key(service, region)) {
            return Ok(client.clone());
        }
        if self.permissive {
            return Ok(Arc::new(FakeClient::new()));
        }
        Err(ScanError::ClientUnavailable(format!(
            "no fake client for {} in {}",
            service, region
        )))
    }
}

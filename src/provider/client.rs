// Mon Aug 17 2026 - Alex

use crate::error::ScanError;
use serde_json::Value;
use std::sync::Arc;

/// One list/describe call against a provider API. Pagination state travels in
/// `page_token`; everything else is positional arguments for the operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub operation: String,
    pub args: Vec<(String, String)>,
    pub page_token: Option<String>,
}

impl ApiRequest {
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            args: Vec::new(),
            page_token: None,
        }
    }

    pub fn with_arg(mut self, key: &str, value: &str) -> Self {
        self.args.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_page_token(mut self, token: Option<String>) -> Self {
        self.page_token = token;
        self
    }
}

/// A client handle bound to one (service, region) pair. Credentials and
/// signing live behind this trait; collectors only see JSON documents.
pub trait ProviderClient: Send + Sync {
    fn call(&self, request: &ApiRequest) -> Result<Value, ScanError>;
}

pub trait ClientFactory: Send + Sync {
    fn client_for(&self, service: &str, region: &str)
        -> Result<Arc<dyn ProviderClient>, ScanError>;
}

const PAGE_TOKEN_KEYS: [&str; 4] = ["NextToken", "nextToken", "position", "NextMarker"];

/// Extracts the continuation token from a response page, if any. Provider
/// APIs disagree on the key name.
pub fn next_page_token(response: &Value) -> Option<String> {
    for key in PAGE_TOKEN_KEYS {
        if let Some(token) = response.get(key).and_then(Value::as_str) {
            if !token.is_empty() {
                return Some(token.to_string());
            }
        }
    }
    None
}

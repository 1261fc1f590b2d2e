// Mon Aug 17 2026 - Alex

use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Request throttled: {0}")]
    Throttled(String),
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("Region not enabled: {0}")]
    RegionNotEnabled(String),
    #[error("Authentication failed: {0}")]
    AuthFailure(String),
    #[error("No collector registered for service: {0}")]
    UnknownService(String),
    #[error("Unexpected response shape: {0}")]
    InvalidResponse(String),
    #[error("API error: {code} - {message}")]
    Api { code: String, message: String },
    #[error("Client unavailable: {0}")]
    ClientUnavailable(String),
    #[error("Collector panicked: {0}")]
    CollectorPanic(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Retryable,
    Terminal,
}

impl ScanError {
    pub fn class(&self) -> ErrorClass {
        match self {
            ScanError::Throttled(_) | ScanError::ServiceUnavailable(_) => ErrorClass::Retryable,
            _ => ErrorClass::Terminal,
        }
    }

    pub fn is_retryable(&self) -> bool {
        self.class() == ErrorClass::Retryable
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::Throttled(_) => "throttled",
            ScanError::ServiceUnavailable(_) => "service_unavailable",
            ScanError::AccessDenied(_) => "access_denied",
            ScanError::RegionNotEnabled(_) => "region_not_enabled",
            ScanError::AuthFailure(_) => "auth_failure",
            ScanError::UnknownService(_) => "unknown_service",
            ScanError::InvalidResponse(_) => "invalid_response",
            ScanError::Api { .. } => "api_error",
            ScanError::ClientUnavailable(_) => "client_unavailable",
            ScanError::CollectorPanic(_) => "collector_panic",
            ScanError::Io(_) => "io_error",
            ScanError::Json(_) => "json_error",
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ErrorRecord {
    pub service: String,
    pub region: String,
    pub kind: String,
    pub message: String,
}

impl ErrorRecord {
    pub fn new(service: &str, region: &str, error: &ScanError) -> Self {
        Self {
            service: service.to_string(),
            region: region.to_string(),
            kind: error.kind().to_string(),
            message: error.to_string(),
        }
    }

    pub fn summary(&self) -> String {
        format!("{} in {}: {}", self.service, self.region, self.message)
    }
}

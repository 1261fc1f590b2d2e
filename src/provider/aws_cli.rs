// Tue Aug 18 2026 - Alex

use crate::error::ScanError;
use crate::provider::client::{ApiRequest, ClientFactory, ProviderClient};
use serde_json::Value;
use std::process::Command;
use std::sync::Arc;

const THROTTLING_CODES: [&str; 4] = [
    "Throttling",
    "RequestLimitExceeded",
    "TooManyRequestsException",
    "ThrottlingException",
];
const ACCESS_CODES: [&str; 3] = [
    "AccessDenied",
    "UnauthorizedOperation",
    "AccessDeniedException",
];
const REGION_CODES: [&str; 2] = ["OptInRequired", "NotSignedUp"];
const AUTH_CODES: [&str; 4] = [
    "InvalidClientTokenId",
    "AuthFailure",
    "ExpiredToken",
    "InvalidAccessKeyId",
];
const TRANSIENT_MARKERS: [&str; 5] = [
    "ServiceUnavailable",
    "ServiceUnavailableException",
    "Could not connect",
    "Connect timeout",
    "Read timeout",
];

/// Transport that delegates signing and credential handling to the locally
/// configured `aws` CLI. One client per (service, region) pair.
pub struct AwsCliClient {
    service: String,
    region: String,
    profile: Option<String>,
}

impl AwsCliClient {
    pub fn new(service: &str, region: &str, profile: Option<String>) -> Self {
        Self {
            service: service.to_string(),
            region: region.to_string(),
            profile,
        }
    }

    fn command(&self, request: &ApiRequest) -> Command {
        let mut cmd = Command::new("aws");
        if let Some(profile) = &self.profile {
            cmd.arg("--profile").arg(profile);
        }
        cmd.arg(&self.service)
            .arg(&request.operation)
            .arg("--region")
            .arg(&self.region)
            .arg("--output")
            .arg("json");

        for (key, value) in &request.args {
            cmd.arg(key).arg(value);
        }
        if let Some(token) = &request.page_token {
            cmd.arg("--starting-token").arg(token);
        }
        cmd
    }
}

impl ProviderClient for AwsCliClient {
    fn call(&self, request: &ApiRequest) -> Result<Value, ScanError> {
        log::debug!(
            "Calling {} {} in {}",
            self.service,
            request.operation,
            self.region
        );

        let output = self.command(request).output().map_err(|e| {
            ScanError::ClientUnavailable(format!("failed to run aws cli: {}", e))
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_cli_error(stderr.trim()));
        }

        if output.stdout.iter().all(u8::is_ascii_whitespace) {
            // Some operations return nothing on an empty result set.
            return Ok(Value::Object(serde_json::Map::new()));
        }

        let value: Value = serde_json::from_slice(&output.stdout)?;
        Ok(value)
    }
}

/// Maps the CLI's stderr text onto the error taxonomy using the provider's
/// documented error codes.
pub fn classify_cli_error(stderr: &str) -> ScanError {
    if THROTTLING_CODES.iter().any(|code| stderr.contains(code)) {
        return ScanError::Throttled(stderr.to_string());
    }
    if ACCESS_CODES.iter().any(|code| stderr.contains(code)) {
        return ScanError::AccessDenied(stderr.to_string());
    }
    if REGION_CODES.iter().any(|code| stderr.contains(code)) {
        return ScanError::RegionNotEnabled(stderr.to_string());
    }
    if AUTH_CODES.iter().any(|code| stderr.contains(code)) {
        return ScanError::AuthFailure(stderr.to_string());
    }
    if TRANSIENT_MARKERS.iter().any(|marker| stderr.contains(marker)) {
        return ScanError::ServiceUnavailable(stderr.to_string());
    }

    ScanError::Api {
        code: extract_error_code(stderr).unwrap_or_else(|| "Unknown".to_string()),
        message: stderr.to_string(),
    }
}

// The CLI prints "An error occurred (SomeCode) when calling ..." on failure.
fn extract_error_code(stderr: &str) -> Option<String> {
    let start = stderr.find('(')? + 1;
    let end = stderr[start..].find(')')? + start;
    if start < end {
        Some(stderr[start..end].to_string())
    } else {
        None
    }
}

pub struct AwsCliFactory {
    profile: Option<String>,
}

impl AwsCliFactory {
    pub fn new(profile: Option<String>) -> Self {
        Self { profile }
    }
}

impl ClientFactory for AwsCliFactory {
    fn client_for(
        &self,
        service: &str,
        region: &str,
    ) -> Result<Arc<dyn ProviderClient>, ScanError> {
        Ok(Arc::new(AwsCliClient::new(
            service,
            region,
            self.profile.clone(),
        )))
    }
}

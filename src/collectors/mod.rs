// Tue Aug 18 2026 - Alex

pub mod apigateway;
pub mod cloudwatch;
pub mod ec2;
pub mod generic;
pub mod iam;
pub mod kms;
pub mod logs;
pub mod route53;
pub mod s3;
pub mod secretsmanager;

use crate::error::ScanError;
use crate::provider::client::{next_page_token, ApiRequest, ProviderClient};
use crate::retry::Invoker;
use serde_json::Value;

/// Per-service resource listing. Implementations paginate internally and run
/// every remote call through the invoker so mid-pagination throttles are
/// retried without losing already-collected pages.
pub trait Collector: Send + Sync {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError>;
}

pub struct CollectContext<'a> {
    pub client: &'a dyn ProviderClient,
    pub region: &'a str,
    pub account_id: &'a str,
    pub invoker: &'a Invoker,
    pub options: &'a ScanOptions,
}

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub include_objects: bool,
    pub max_objects_per_bucket: usize,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_objects: true,
            max_objects_per_bucket: 100,
        }
    }
}

impl ScanOptions {
    pub fn from_config(config: &crate::config::ScanConfig) -> Self {
        Self {
            include_objects: config.include_objects,
            max_objects_per_bucket: config.max_objects_per_bucket,
        }
    }
}

pub(crate) fn fetch_page(
    ctx: &CollectContext<'_>,
    request: &ApiRequest,
) -> Result<Value, ScanError> {
    ctx.invoker.invoke(|| ctx.client.call(request)).into_result()
}

pub(crate) fn paginate<F>(
    ctx: &CollectContext<'_>,
    operation: &str,
    args: &[(&str, &str)],
    mut each_page: F,
) -> Result<(), ScanError>
where
    F: FnMut(&Value),
{
    let mut token: Option<String> = None;

    loop {
        let mut request = ApiRequest::new(operation).with_page_token(token.clone());
        for (key, value) in args {
            request = request.with_arg(key, value);
        }

        let page = fetch_page(ctx, &request)?;
        each_page(&page);

        token = next_page_token(&page);
        if token.is_none() {
            return Ok(());
        }
    }
}

pub(crate) fn array_of<'v>(value: &'v Value, key: &str) -> &'v [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

pub(crate) fn str_attr<'v>(item: &'v Value, key: &str) -> Option<&'v str> {
    item.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::testing::FakeClient;
    use crate::retry::RetryPolicy;
    use serde_json::json;
    use std::time::Duration;

    fn fast_invoker() -> Invoker {
        Invoker::new(RetryPolicy::new(
            3,
            Duration::from_millis(1),
            Duration::from_millis(2),
        ))
    }

    #[test]
    fn test_paginate_follows_tokens() {
        let client = FakeClient::new();
        client.enqueue("list-widgets", json!({"Widgets": [1], "NextToken": "t"}));
        client.enqueue("list-widgets", json!({"Widgets": [2]}));

        let invoker = fast_invoker();
        let options = ScanOptions::default();
        let ctx = CollectContext {
            client: &client,
            region: "us-east-1",
            account_id: "123456789012",
            invoker: &invoker,
            options: &options,
        };

        let mut pages = 0;
        paginate(&ctx, "list-widgets", &[], |_| pages += 1).unwrap();

        assert_eq!(pages, 2);
        let calls = client.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].page_token.as_deref(), Some("t"));
    }

    #[test]
    fn test_paginate_retries_throttled_page() {
        let client = FakeClient::new();
        client.enqueue("list-widgets", json!({"Widgets": [1], "NextToken": "t"}));
        client.enqueue_error(
            "list-widgets",
            crate::error::ScanError::Throttled("Throttling".to_string()),
        );
        client.enqueue("list-widgets", json!({"Widgets": [2]}));

        let invoker = fast_invoker();
        let options = ScanOptions::default();
        let ctx = CollectContext {
            client: &client,
            region: "us-east-1",
            account_id: "123456789012",
            invoker: &invoker,
            options: &options,
        };

        let mut pages = 0;
        paginate(&ctx, "list-widgets", &[], |_| pages += 1).unwrap();

        // Both pages delivered; the throttled fetch was retried in place.
        assert_eq!(pages, 2);
        assert_eq!(client.call_count("list-widgets"), 3);
    }

    #[test]
    fn test_array_of_missing_key_is_empty() {
        let value = json!({"Present": [1, 2]});
        assert_eq!(array_of(&value, "Present").len(), 2);
        assert!(array_of(&value, "Absent").is_empty());
    }
}

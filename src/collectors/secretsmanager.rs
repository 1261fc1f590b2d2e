// Tue Aug 18 2026 - Alex

use crate::collectors::{array_of, paginate, str_attr, CollectContext, Collector};
use crate::error::ScanError;

pub struct SecretsManagerCollector;

impl Collector for SecretsManagerCollector {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
        let mut arns = Vec::new();

        paginate(ctx, "list-secrets", &[], |page| {
            for secret in array_of(page, "SecretList") {
                if let Some(arn) = str_attr(secret, "ARN") {
                    arns.push(arn.to_string());
                }
            }
        })?;

        Ok(arns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::ScanOptions;
    use crate::provider::testing::FakeClient;
    use crate::retry::{Invoker, RetryPolicy};
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_collects_secret_arns_across_pages() {
        let client = FakeClient::new();
        client.enqueue(
            "list-secrets",
            json!({
                "SecretList": [{"ARN": "arn:aws:secretsmanager:us-east-1:123456789012:secret:db-1"}],
                "NextToken": "t1"
            }),
        );
        client.enqueue(
            "list-secrets",
            json!({
                "SecretList": [{"ARN": "arn:aws:secretsmanager:us-east-1:123456789012:secret:api-2"}]
            }),
        );

        let invoker = Invoker::new(RetryPolicy::new(
            2,
            Duration::from_millis(1),
            Duration::from_millis(2),
        ));
        let options = ScanOptions::default();
        let ctx = CollectContext {
            client: &client,
            region: "us-east-1",
            account_id: "123456789012",
            invoker: &invoker,
            options: &options,
        };

        let arns = SecretsManagerCollector.collect(&ctx).unwrap();
        assert_eq!(arns.len(), 2);
        assert_eq!(client.call_count("list-secrets"), 2);
    }
}

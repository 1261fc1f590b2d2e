// Tue Aug 18 2026 - Alex

use crate::collectors::{array_of, paginate, str_attr, CollectContext, Collector};
use crate::error::ScanError;

pub struct KmsCollector;

impl Collector for KmsCollector {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
        let mut arns = Vec::new();
        let mut key_ids = Vec::new();

        paginate(ctx, "list-keys", &[], |page| {
            for key in array_of(page, "Keys") {
                if let Some(arn) = str_attr(key, "KeyArn") {
                    arns.push(arn.to_string());
                }
                if let Some(id) = str_attr(key, "KeyId") {
                    key_ids.push(id.to_string());
                }
            }
        })?;

        for key_id in &key_ids {
            // Alias lookups fail independently per key.
            if let Err(e) = self.collect_aliases(ctx, key_id, &mut arns) {
                log::warn!("Error getting aliases for key {}: {}", key_id, e);
            }
        }

        Ok(arns)
    }
}

impl KmsCollector {
    fn collect_aliases(
        &self,
        ctx: &CollectContext<'_>,
        key_id: &str,
        arns: &mut Vec<String>,
    ) -> Result<(), ScanError> {
        paginate(ctx, "list-aliases", &[("--key-id", key_id)], |page| {
            for alias in array_of(page, "Aliases") {
                if let Some(arn) = str_attr(alias, "AliasArn") {
                    arns.push(arn.to_string());
                }
            }
        })
    }
}

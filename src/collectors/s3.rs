// Tue Aug 18 2026 - Alex

use crate::collectors::{array_of, fetch_page, str_attr, CollectContext, Collector};
use crate::error::ScanError;
use crate::provider::client::{next_page_token, ApiRequest};

pub struct S3Collector;

impl Collector for S3Collector {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
        let mut arns = Vec::new();

        let response = fetch_page(ctx, &ApiRequest::new("list-buckets"))?;
        for bucket in array_of(&response, "Buckets") {
            let Some(name) = str_attr(bucket, "Name") else {
                continue;
            };
            arns.push(format!("arn:aws:s3:::{}", name));

            if ctx.options.include_objects {
                // Object listing failures are local to the bucket.
                if let Err(e) = self.collect_objects(ctx, name, &mut arns) {
                    log::warn!("Error listing objects in bucket {}: {}", name, e);
                }
            }
        }

        Ok(arns)
    }
}

impl S3Collector {
    fn collect_objects(
        &self,
        ctx: &CollectContext<'_>,
        bucket: &str,
        arns: &mut Vec<String>,
    ) -> Result<(), ScanError> {
        if !self.bucket_in_region(ctx, bucket)? {
            return Ok(());
        }

        // Top-level objects only, capped per bucket.
        let max_keys = ctx.options.max_objects_per_bucket.to_string();
        let mut collected = 0usize;
        let mut token: Option<String> = None;

        loop {
            let request = ApiRequest::new("list-objects-v2")
                .with_arg("--bucket", bucket)
                .with_arg("--max-keys", &max_keys)
                .with_arg("--delimiter", "/")
                .with_page_token(token.clone());

            let page = fetch_page(ctx, &request)?;
            for object in array_of(&page, "Contents") {
                if collected >= ctx.options.max_objects_per_bucket {
                    return Ok(());
                }
                if let Some(key) = str_attr(object, "Key") {
                    arns.push(format!("arn:aws:s3:::{}/{}", bucket, key));
                    collected += 1;
                }
            }

            token = next_page_token(&page);
            if token.is_none() {
                return Ok(());
            }
        }
    }

    fn bucket_in_region(&self, ctx: &CollectContext<'_>, bucket: &str) -> Result<bool, ScanError> {
        let request = ApiRequest::new("get-bucket-location").with_arg("--bucket", bucket);
        let response = fetch_page(ctx, &request)?;

        // A null or empty constraint means us-east-1.
        let constraint = str_attr(&response, "LocationConstraint").unwrap_or("");
        Ok(constraint.is_empty() || constraint == ctx.region)
    }
}

// Tue Aug 18 2026 - Alex

use crate::collectors::{array_of, paginate, str_attr, CollectContext, Collector};
use crate::error::ScanError;
use crate::provider::arn::format_arn;

pub struct LogsCollector;

impl Collector for LogsCollector {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
        let mut arns = Vec::new();

        paginate(ctx, "describe-log-groups", &[], |page| {
            for group in array_of(page, "logGroups") {
                if let Some(arn) = str_attr(group, "arn") {
                    arns.push(arn.to_string());
                } else if let Some(name) = str_attr(group, "logGroupName") {
                    // Older responses omit the arn attribute.
                    arns.push(format_arn(
                        "logs",
                        ctx.region,
                        ctx.account_id,
                        &format!("log-group:{}", name),
                    ));
                }
            }
        })?;

        Ok(arns)
    }
}

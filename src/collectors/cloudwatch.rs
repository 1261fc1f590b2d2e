// Tue Aug 18 2026 - Alex

use crate::collectors::{array_of, paginate, str_attr, CollectContext, Collector};
use crate::error::ScanError;
use crate::provider::arn::format_arn;

pub struct CloudWatchCollector;

impl Collector for CloudWatchCollector {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
        let mut arns = Vec::new();

        paginate(ctx, "describe-alarms", &[], |page| {
            for key in ["MetricAlarms", "CompositeAlarms"] {
                for alarm in array_of(page, key) {
                    if let Some(name) = str_attr(alarm, "AlarmName") {
                        arns.push(format_arn(
                            "cloudwatch",
                            ctx.region,
                            ctx.account_id,
                            &format!("alarm:{}", name),
                        ));
                    }
                }
            }
        })?;

        paginate(ctx, "list-dashboards", &[], |page| {
            for dashboard in array_of(page, "DashboardEntries") {
                if let Some(arn) = str_attr(dashboard, "DashboardArn") {
                    arns.push(arn.to_string());
                }
            }
        })?;

        Ok(arns)
    }
}

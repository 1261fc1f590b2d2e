// Tue Aug 18 2026 - Alex

use crate::collectors::{array_of, paginate, str_attr, CollectContext, Collector};
use crate::error::ScanError;

pub struct Route53Collector;

impl Collector for Route53Collector {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
        let mut arns = Vec::new();
        let mut zone_ids = Vec::new();

        paginate(ctx, "list-hosted-zones", &[], |page| {
            for zone in array_of(page, "HostedZones") {
                if let Some(id) = str_attr(zone, "Id") {
                    arns.push(format!("arn:aws:route53:::{}", id));
                    zone_ids.push(id.to_string());
                }
            }
        })?;

        for zone_id in &zone_ids {
            // Record-set failures stay local to the zone.
            if let Err(e) = self.collect_record_sets(ctx, zone_id, &mut arns) {
                log::warn!("Error getting record sets for zone {}: {}", zone_id, e);
            }
        }

        paginate(ctx, "list-health-checks", &[], |page| {
            for check in array_of(page, "HealthChecks") {
                if let Some(id) = str_attr(check, "Id") {
                    arns.push(format!("arn:aws:route53:::healthcheck/{}", id));
                }
            }
        })?;

        Ok(arns)
    }
}

impl Route53Collector {
    fn collect_record_sets(
        &self,
        ctx: &CollectContext<'_>,
        zone_id: &str,
        arns: &mut Vec<String>,
    ) -> Result<(), ScanError> {
        // Zone ids arrive as "/hostedzone/Z123"; the API wants the bare id.
        let clean_id = zone_id.rsplit('/').next().unwrap_or(zone_id);

        paginate(
            ctx,
            "list-resource-record-sets",
            &[("--hosted-zone-id", clean_id)],
            |page| {
                for record in array_of(page, "ResourceRecordSets") {
                    if let (Some(name), Some(record_type)) =
                        (str_attr(record, "Name"), str_attr(record, "Type"))
                    {
                        // Record ARNs do not officially exist; this is a
                        // stable pseudo-ARN.
                        arns.push(format!(
                            "arn:aws:route53:::{}/record/{}/{}",
                            zone_id, name, record_type
                        ));
                    }
                }
            },
        )
    }
}

// Tue Aug 18 2026 - Alex

use crate::collectors::{array_of, paginate, str_attr, CollectContext, Collector};
use crate::error::ScanError;
use crate::provider::arn::format_arn;

pub struct Ec2Collector;

// (operation, response key, id attribute, resource prefix)
const SIMPLE_LISTINGS: [(&str, &str, &str, &str); 7] = [
    ("describe-volumes", "Volumes", "VolumeId", "volume"),
    (
        "describe-security-groups",
        "SecurityGroups",
        "GroupId",
        "security-group",
    ),
    ("describe-vpcs", "Vpcs", "VpcId", "vpc"),
    ("describe-subnets", "Subnets", "SubnetId", "subnet"),
    (
        "describe-route-tables",
        "RouteTables",
        "RouteTableId",
        "route-table",
    ),
    (
        "describe-internet-gateways",
        "InternetGateways",
        "InternetGatewayId",
        "internet-gateway",
    ),
    (
        "describe-nat-gateways",
        "NatGateways",
        "NatGatewayId",
        "natgateway",
    ),
];

impl Collector for Ec2Collector {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
        let mut arns = Vec::new();

        self.collect_instances(ctx, &mut arns)?;

        for (operation, key, id_attr, prefix) in SIMPLE_LISTINGS {
            paginate(ctx, operation, &[], |page| {
                for item in array_of(page, key) {
                    if let Some(id) = str_attr(item, id_attr) {
                        arns.push(format_arn(
                            "ec2",
                            ctx.region,
                            ctx.account_id,
                            &format!("{}/{}", prefix, id),
                        ));
                    }
                }
            })?;
        }

        self.collect_snapshots(ctx, &mut arns)?;
        self.collect_addresses(ctx, &mut arns)?;

        Ok(arns)
    }
}

impl Ec2Collector {
    fn collect_instances(
        &self,
        ctx: &CollectContext<'_>,
        arns: &mut Vec<String>,
    ) -> Result<(), ScanError> {
        paginate(ctx, "describe-instances", &[], |page| {
            for reservation in array_of(page, "Reservations") {
                for instance in array_of(reservation, "Instances") {
                    if let Some(id) = str_attr(instance, "InstanceId") {
                        arns.push(format_arn(
                            "ec2",
                            ctx.region,
                            ctx.account_id,
                            &format!("instance/{}", id),
                        ));
                    }
                }
            }
        })
    }

    // Only self-owned snapshots; the public snapshot set is enormous.
    fn collect_snapshots(
        &self,
        ctx: &CollectContext<'_>,
        arns: &mut Vec<String>,
    ) -> Result<(), ScanError> {
        paginate(
            ctx,
            "describe-snapshots",
            &[("--owner-ids", "self")],
            |page| {
                for snapshot in array_of(page, "Snapshots") {
                    if let Some(id) = str_attr(snapshot, "SnapshotId") {
                        arns.push(format_arn(
                            "ec2",
                            ctx.region,
                            ctx.account_id,
                            &format!("snapshot/{}", id),
                        ));
                    }
                }
            },
        )
    }

    // Addresses are not paginated and only allocated ones carry an id.
    fn collect_addresses(
        &self,
        ctx: &CollectContext<'_>,
        arns: &mut Vec<String>,
    ) -> Result<(), ScanError> {
        paginate(ctx, "describe-addresses", &[], |page| {
            for address in array_of(page, "Addresses") {
                if let Some(id) = str_attr(address, "AllocationId") {
                    arns.push(format_arn(
                        "ec2",
                        ctx.region,
                        ctx.account_id,
                        &format!("elastic-ip/{}", id),
                    ));
                }
            }
        })
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

    fn invoker() -> Invoker {
        Invoker::new(RetryPolicy::new(
            2,
            Duration::from_millis(1),
            Duration::from_millis(2),
        ))
    }

    fn empty_listings(client: &FakeClient) {
        for (operation, _, _, _) in SIMPLE_LISTINGS {
            client.enqueue(operation, json!({}));
        }
        client.enqueue("describe-snapshots", json!({}));
        client.enqueue("describe-addresses", json!({}));
    }

    #[test]
    fn test_collects_instances_across_reservations() {
        let client = FakeClient::new();
        client.enqueue(
            "describe-instances",
            json!({
                "Reservations": [
                    {"Instances": [{"InstanceId": "i-001"}, {"InstanceId": "i-002"}]},
                    {"Instances": [{"InstanceId": "i-003"}]}
                ]
            }),
        );
        empty_listings(&client);

        let invoker = invoker();
        let options = ScanOptions::default();
        let ctx = CollectContext {
            client: &client,
            region: "us-west-2",
            account_id: "123456789012",
            invoker: &invoker,
            options: &options,
        };

        let arns = Ec2Collector.collect(&ctx).unwrap();
        assert!(arns.contains(&"arn:aws:ec2:us-west-2:123456789012:instance/i-001".to_string()));
        assert!(arns.contains(&"arn:aws:ec2:us-west-2:123456789012:instance/i-003".to_string()));
        assert_eq!(arns.len(), 3);
    }

    #[test]
    fn test_collects_paginated_volumes() {
        let client = FakeClient::new();
        client.enqueue("describe-instances", json!({}));
        client.enqueue(
            "describe-volumes",
            json!({"Volumes": [{"VolumeId": "vol-1"}], "NextToken": "t1"}),
        );
        client.enqueue(
            "describe-volumes",
            json!({"Volumes": [{"VolumeId": "vol-2"}]}),
        );
        for (operation, _, _, _) in &SIMPLE_LISTINGS[1..] {
            client.enqueue(operation, json!({}));
        }
        client.enqueue("describe-snapshots", json!({}));
        client.enqueue("describe-addresses", json!({}));

        let invoker = invoker();
        let options = ScanOptions::default();
        let ctx = CollectContext {
            client: &client,
            region: "us-east-1",
            account_id: "123456789012",
            invoker: &invoker,
            options: &options,
        };

        let arns = Ec2Collector.collect(&ctx).unwrap();
        assert_eq!(client.call_count("describe-volumes"), 2);
        assert!(arns.contains(&"arn:aws:ec2:us-east-1:123456789012:volume/vol-1".to_string()));
        assert!(arns.contains(&"arn:aws:ec2:us-east-1:123456789012:volume/vol-2".to_string()));
    }

    #[test]
    fn test_addresses_without_allocation_id_are_ignored() {
        let client = FakeClient::new();
        client.enqueue("describe-instances", json!({}));
        for (operation, _, _, _) in SIMPLE_LISTINGS {
            client.enqueue(operation, json!({}));
        }
        client.enqueue("describe-snapshots", json!({}));
        client.enqueue(
            "describe-addresses",
            json!({"Addresses": [{"PublicIp": "1.2.3.4"}, {"AllocationId": "eipalloc-1"}]}),
        );

        let invoker = invoker();
        let options = ScanOptions::default();
        let ctx = CollectContext {
            client: &client,
            region: "us-east-1",
            account_id: "123456789012",
            invoker: &invoker,
            options: &options,
        };

        let arns = Ec2Collector.collect(&ctx).unwrap();
        assert_eq!(
            arns,
            vec!["arn:aws:ec2:us-east-1:123456789012:elastic-ip/eipalloc-1".to_string()]
        );
    }

    #[test]
    fn test_access_denied_propagates() {
        let client = FakeClient::new();
        client.enqueue_error(
            "describe-instances",
            ScanError::AccessDenied("UnauthorizedOperation".to_string()),
        );

        let invoker = invoker();
        let options = ScanOptions::default();
        let ctx = CollectContext {
            client: &client,
            region: "us-east-1",
            account_id: "123456789012",
            invoker: &invoker,
            options: &options,
        };

        let result = Ec2Collector.collect(&ctx);
        assert!(matches!(result, Err(ScanError::AccessDenied(_))));
        assert_eq!(client.call_count("describe-instances"), 1);
    }
}

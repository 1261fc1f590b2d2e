// Tue Aug 18 2026 - Alex

use crate::collectors::{array_of, paginate, str_attr, CollectContext, Collector};
use crate::error::ScanError;

pub struct IamCollector;

// (operation, response key, extra args); every listing returns full ARNs.
const LISTINGS: [(&str, &str, &[(&str, &str)]); 7] = [
    ("list-roles", "Roles", &[]),
    ("list-users", "Users", &[]),
    ("list-policies", "Policies", &[("--scope", "Local")]),
    ("list-groups", "Groups", &[]),
    ("list-instance-profiles", "InstanceProfiles", &[]),
    ("list-saml-providers", "SAMLProviderList", &[]),
    (
        "list-server-certificates",
        "ServerCertificateMetadataList",
        &[],
    ),
];

impl Collector for IamCollector {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
        let mut arns = Vec::new();

        for (operation, key, args) in LISTINGS {
            paginate(ctx, operation, args, |page| {
                for item in array_of(page, key) {
                    if let Some(arn) = str_attr(item, "Arn") {
                        arns.push(arn.to_string());
                    }
                }
            })?;
        }

        Ok(arns)
    }
}

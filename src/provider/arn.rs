// Mon Aug 17 2026 - Alex

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArnParts {
    pub partition: String,
    pub service: String,
    pub region: String,
    pub account: String,
    pub resource: String,
}

pub fn format_arn(service: &str, region: &str, account_id: &str, resource: &str) -> String {
    format!("arn:aws:{}:{}:{}:{}", service, region, account_id, resource)
}

pub fn parse_arn(arn: &str) -> Option<ArnParts> {
    let mut parts = arn.splitn(6, ':');
    if parts.next()? != "arn" {
        return None;
    }

    Some(ArnParts {
        partition: parts.next()?.to_string(),
        service: parts.next()?.to_string(),
        region: parts.next()?.to_string(),
        account: parts.next()?.to_string(),
        resource: parts.next()?.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_arn() {
        assert_eq!(
            format_arn("ec2", "us-east-1", "123456789012", "instance/i-abc"),
            "arn:aws:ec2:us-east-1:123456789012:instance/i-abc"
        );
    }

    #[test]
    fn test_parse_arn() {
        let parts = parse_arn("arn:aws:s3:::my-bucket/key:with:colons").unwrap();
        assert_eq!(parts.partition, "aws");
        assert_eq!(parts.service, "s3");
        assert_eq!(parts.region, "");
        assert_eq!(parts.account, "");
        assert_eq!(parts.resource, "my-bucket/key:with:colons");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(parse_arn("not-an-arn").is_none());
        assert!(parse_arn("arn:aws:s3").is_none());
    }
}

// Tue Aug 18 2026 - Alex

use crate::collectors::{paginate, str_attr, CollectContext, Collector};
use crate::error::ScanError;
use once_cell::sync::Lazy;
use serde_json::Value;

/// How to pull an identifier out of each listed item.
#[derive(Debug, Clone, Copy)]
pub enum Extraction {
    /// The item carries a full ARN under this attribute.
    ArnAttr(&'static str),
    /// The item carries an id under this attribute; the ARN is templated.
    IdAttr {
        attr: &'static str,
        format: &'static str,
    },
    /// Items are plain id strings; the ARN is templated.
    IdList { format: &'static str },
    /// Items are plain ARN strings.
    ArnList,
}

#[derive(Debug, Clone, Copy)]
pub struct ServiceMapping {
    pub service: &'static str,
    pub operation: &'static str,
    /// Dotted path to the item array within the response.
    pub key: &'static str,
    pub extraction: Extraction,
}

pub static SERVICE_MAPPINGS: Lazy<Vec<ServiceMapping>> = Lazy::new(|| {
    vec![
        ServiceMapping {
            service: "lambda",
            operation: "list-functions",
            key: "Functions",
            extraction: Extraction::ArnAttr("FunctionArn"),
        },
        ServiceMapping {
            service: "dynamodb",
            operation: "list-tables",
            key: "TableNames",
            extraction: Extraction::IdList {
                format: "arn:aws:dynamodb:{region}:{account_id}:table/{id}",
            },
        },
        ServiceMapping {
            service: "rds",
            operation: "describe-db-instances",
            key: "DBInstances",
            extraction: Extraction::ArnAttr("DBInstanceArn"),
        },
        ServiceMapping {
            service: "cloudformation",
            operation: "describe-stacks",
            key: "Stacks",
            extraction: Extraction::ArnAttr("StackId"),
        },
        ServiceMapping {
            service: "sqs",
            operation: "list-queues",
            key: "QueueUrls",
            extraction: Extraction::IdList {
                format: "arn:aws:sqs:{region}:{account_id}:{id}",
            },
        },
        ServiceMapping {
            service: "sns",
            operation: "list-topics",
            key: "Topics",
            extraction: Extraction::ArnAttr("TopicArn"),
        },
        ServiceMapping {
            service: "ecs",
            operation: "list-clusters",
            key: "clusterArns",
            extraction: Extraction::ArnList,
        },
        ServiceMapping {
            service: "kinesisanalytics",
            operation: "list-applications",
            key: "ApplicationSummaries",
            extraction: Extraction::ArnAttr("ApplicationARN"),
        },
        ServiceMapping {
            service: "kinesisanalyticsv2",
            operation: "list-applications",
            key: "ApplicationSummaries",
            extraction: Extraction::ArnAttr("ApplicationARN"),
        },
        ServiceMapping {
            service: "apigatewayv2",
            operation: "get-apis",
            key: "Items",
            extraction: Extraction::IdAttr {
                attr: "ApiId",
                format: "arn:aws:apigateway:{region}::/apis/{id}",
            },
        },
    ]
});

pub fn mapping_for(service: &str) -> Option<&'static ServiceMapping> {
    SERVICE_MAPPINGS.iter().find(|m| m.service == service)
}

/// Table-driven collector for services that need nothing beyond a single
/// paginated listing.
pub struct MappedCollector {
    mapping: &'static ServiceMapping,
}

impl MappedCollector {
    pub fn new(mapping: &'static ServiceMapping) -> Self {
        Self { mapping }
    }
}

impl Collector for MappedCollector {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
        let mut arns = Vec::new();

        paginate(ctx, self.mapping.operation, &[], |page| {
            for item in items_at_path(page, self.mapping.key) {
                match self.mapping.extraction {
                    Extraction::ArnAttr(attr) => {
                        if let Some(arn) = str_attr(item, attr) {
                            arns.push(arn.to_string());
                        }
                    }
                    Extraction::IdAttr { attr, format } => {
                        if let Some(id) = str_attr(item, attr) {
                            arns.push(render_arn(format, ctx, id));
                        }
                    }
                    Extraction::IdList { format } => {
                        if let Some(raw) = item.as_str() {
                            // Queue URLs and similar ids carry path prefixes;
                            // the trailing segment is the resource id.
                            let id = raw.rsplit('/').next().unwrap_or(raw);
                            arns.push(render_arn(format, ctx, id));
                        }
                    }
                    Extraction::ArnList => {
                        if let Some(arn) = item.as_str() {
                            arns.push(arn.to_string());
                        }
                    }
                }
            }
        })?;

        Ok(arns)
    }
}

fn render_arn(format: &str, ctx: &CollectContext<'_>, id: &str) -> String {
    format
        .replace("{region}", ctx.region)
        .replace("{account_id}", ctx.account_id)
        .replace("{id}", id)
}

// Walks a dotted key path; missing segments yield no items.
fn items_at_path<'v>(value: &'v Value, path: &str) -> impl Iterator<Item = &'v Value> {
    let mut current = Some(value);
    for part in path.split('.') {
        current = current.and_then(|v| v.get(part));
    }

    current
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
        .iter()
}

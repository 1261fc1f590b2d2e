// Tue Aug 18 2026 - Alex

use crate::collectors::{array_of, paginate, str_attr, CollectContext, Collector};
use crate::error::ScanError;

pub struct ApiGatewayCollector;

impl Collector for ApiGatewayCollector {
    fn collect(&self, ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
        let mut arns = Vec::new();
        let mut api_ids = Vec::new();

        paginate(ctx, "get-rest-apis", &[], |page| {
            for api in array_of(page, "items") {
                if let Some(id) = str_attr(api, "id") {
                    arns.push(format!("arn:aws:apigateway:{}::/restapis/{}", ctx.region, id));
                    api_ids.push(id.to_string());
                }
            }
        })?;

        for api_id in &api_ids {
            // Per-API lookups fail independently.
            if let Err(e) = self.collect_api_children(ctx, api_id, &mut arns) {
                log::warn!("Error collecting children for REST API {}: {}", api_id, e);
            }
        }

        Ok(arns)
    }
}

impl ApiGatewayCollector {
    fn collect_api_children(
        &self,
        ctx: &CollectContext<'_>,
        api_id: &str,
        arns: &mut Vec<String>,
    ) -> Result<(), ScanError> {
        paginate(ctx, "get-resources", &[("--rest-api-id", api_id)], |page| {
            for resource in array_of(page, "items") {
                if let Some(id) = str_attr(resource, "id") {
                    arns.push(format!(
                        "arn:aws:apigateway:{}::/restapis/{}/resources/{}",
                        ctx.region, api_id, id
                    ));
                }
            }
        })?;

        paginate(ctx, "get-stages", &[("--rest-api-id", api_id)], |page| {
            // get-stages returns its list under "item".
            for stage in array_of(page, "item") {
                if let Some(name) = str_attr(stage, "stageName") {
                    arns.push(format!(
                        "arn:aws:apigateway:{}::/restapis/{}/stages/{}",
                        ctx.region, api_id, name
                    ));
                }
            }
        })
    }
}

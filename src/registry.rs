// Tue Aug 18 2026 - Alex

use crate::collectors::generic::{MappedCollector, SERVICE_MAPPINGS};
use crate::collectors::{
    apigateway::ApiGatewayCollector, cloudwatch::CloudWatchCollector, ec2::Ec2Collector,
    iam::IamCollector, kms::KmsCollector, logs::LogsCollector, route53::Route53Collector,
    s3::S3Collector, secretsmanager::SecretsManagerCollector, Collector,
};
use crate::config::ScanConfig;
use ahash::AHashMap;
use std::sync::Arc;

pub struct ServiceDescriptor {
    pub id: String,
    pub global: bool,
    pub collector: Arc<dyn Collector>,
}

/// Static lookup table from service id to collector. Built once at startup;
/// read-only for the lifetime of a scan.
#[derive(Default)]
pub struct CollectorRegistry {
    services: AHashMap<String, ServiceDescriptor>,
}

impl CollectorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, id: &str, global: bool, collector: Arc<dyn Collector>) {
        self.services.insert(
            id.to_string(),
            ServiceDescriptor {
                id: id.to_string(),
                global,
                collector,
            },
        );
    }

    pub fn get(&self, id: &str) -> Option<&ServiceDescriptor> {
        self.services.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.services.contains_key(id)
    }

    pub fn is_global(&self, id: &str) -> Option<bool> {
        self.services.get(id).map(|d| d.global)
    }

    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.services.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Builds the registry of shipped collectors: one dedicated module per
/// service that needs multi-call logic, and the mapping table for the rest.
pub fn default_registry(config: &ScanConfig) -> CollectorRegistry {
    let mut registry = CollectorRegistry::new();

    let dedicated: Vec<(&str, Arc<dyn Collector>)> = vec![
        ("ec2", Arc::new(Ec2Collector)),
        ("s3", Arc::new(S3Collector)),
        ("iam", Arc::new(IamCollector)),
        ("route53", Arc::new(Route53Collector)),
        ("kms", Arc::new(KmsCollector)),
        ("logs", Arc::new(LogsCollector)),
        ("cloudwatch", Arc::new(CloudWatchCollector)),
        ("apigateway", Arc::new(ApiGatewayCollector)),
        ("secretsmanager", Arc::new(SecretsManagerCollector)),
    ];

    for (id, collector) in dedicated {
        registry.register(id, config.is_global_service(id), collector);
    }

    for mapping in SERVICE_MAPPINGS.iter() {
        if !registry.contains(mapping.service) {
            registry.register(
                mapping.service,
                config.is_global_service(mapping.service),
                Arc::new(MappedCollector::new(mapping)),
            );
        }
    }

    registry
}

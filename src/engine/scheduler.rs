// Tue Aug 18 2026 - Alex

use crate::engine::work::WorkItem;
use crate::registry::CollectorRegistry;
use itertools::Itertools;

/// Expands the requested services and regions into the flat work queue.
///
/// Regional services produce one item per (service, region) pair. Global
/// services produce exactly one item regardless of the region list. Services
/// the registry does not know are scheduled once as global so the failure
/// surfaces in the report instead of being silently dropped.
pub fn build_work_items(
    registry: &CollectorRegistry,
    services: &[String],
    regions: &[String],
) -> Vec<WorkItem> {
    let mut items = Vec::new();

    for (service, region) in services
        .iter()
        .filter(|s| registry.is_global(s) == Some(false))
        .cartesian_product(regions.iter())
    {
        items.push(WorkItem::regional(service, region));
    }

    for service in services {
        if registry.is_global(service.as_str()) != Some(false) {
            items.push(WorkItem::global(service));
        }
    }

    items
}

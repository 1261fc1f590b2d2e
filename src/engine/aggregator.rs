// Tue Aug 18 2026 - Alex

use crate::engine::work::WorkItem;
use crate::error::{ErrorRecord, ScanError};
use indexmap::IndexSet;
use parking_lot::Mutex;
use serde::Serialize;
use std::time::Duration;

/// Outcome of one work item, as produced by a worker.
#[derive(Debug)]
pub struct CollectionResult {
    pub item: WorkItem,
    pub identifiers: Vec<String>,
    pub error: Option<ScanError>,
    pub duration: Duration,
}

impl CollectionResult {
    pub fn success(item: WorkItem, identifiers: Vec<String>, duration: Duration) -> Self {
        Self {
            item,
            identifiers,
            error: None,
            duration,
        }
    }

    pub fn failure(item: WorkItem, error: ScanError, duration: Duration) -> Self {
        Self {
            item,
            identifiers: Vec::new(),
            error: Some(error),
            duration,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Final scan output. Identifiers keep first-seen order; duplicates reported
/// by overlapping listings collapse to one entry.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ScanReport {
    pub identifiers: IndexSet<String>,
    pub errors: Vec<ErrorRecord>,
    pub items_scanned: usize,
    pub items_skipped: usize,
}

impl ScanReport {
    pub fn items_total(&self) -> usize {
        self.items_scanned + self.items_skipped
    }

    pub fn resource_count(&self) -> usize {
        self.identifiers.len()
    }
}

/// Thread-safe sink the workers push into. A work item counts as scanned
/// when it produced at least one identifier; empty successes and failures
/// count as skipped.
pub struct Aggregator {
    report: Mutex<ScanReport>,
    skip_unavailable: bool,
}

impl Aggregator {
    pub fn new(skip_unavailable: bool) -> Self {
        Self {
            report: Mutex::new(ScanReport::default()),
            skip_unavailable,
        }
    }

    pub fn submit(&self, result: CollectionResult) {
        let mut report = self.report.lock();

        match &result.error {
            None => {
                if result.identifiers.is_empty() {
                    report.items_skipped += 1;
                } else {
                    report.items_scanned += 1;
                }
                for id in result.identifiers {
                    report.identifiers.insert(id);
                }
            }
            Some(error) => {
                report.items_skipped += 1;

                let region = result.item.display_region();
                if self.skip_unavailable
                    && matches!(error, ScanError::RegionNotEnabled(_))
                {
                    log::debug!(
                        "Skipping {} in {}: region not enabled",
                        result.item.service(),
                        region
                    );
                } else {
                    report
                        .errors
                        .push(ErrorRecord::new(result.item.service(), &region, error));
                }
            }
        }
    }

    pub fn snapshot(&self) -> ScanReport {
        self.report.lock().clone()
    }

    pub fn finalize(self) -> ScanReport {
        self.report.into_inner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn success(service: &str, region: &str, ids: &[&str]) -> CollectionResult {
        CollectionResult::success(
            WorkItem::regional(service, region),
            ids.iter().map(|s| s.to_string()).collect(),
            Duration::from_millis(5),
        )
    }

    #[test]
    fn test_duplicate_identifiers_collapse() {
        let aggregator = Aggregator::new(true);
        aggregator.submit(success("ec2", "us-east-1", &["arn:a", "arn:b"]));
        aggregator.submit(success("ec2", "us-west-2", &["arn:b", "arn:c"]));

        let report = aggregator.finalize();
        assert_eq!(report.resource_count(), 3);
        assert_eq!(
            report.identifiers.iter().collect::<Vec<_>>(),
            vec!["arn:a", "arn:b", "arn:c"]
        );
    }

    #[test]
    fn test_counter_semantics() {
        let aggregator = Aggregator::new(true);
        aggregator.submit(success("ec2", "us-east-1", &["arn:a"]));
        aggregator.submit(success("ec2", "us-west-2", &[]));
        aggregator.submit(CollectionResult::failure(
            WorkItem::regional("rds", "us-east-1"),
            ScanError::AccessDenied("denied".to_string()),
            Duration::from_millis(1),
        ));

        let report = aggregator.finalize();
        assert_eq!(report.items_scanned, 1);
        assert_eq!(report.items_skipped, 2);
        assert_eq!(report.items_total(), 3);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, "access_denied");
    }

    #[test]
    fn test_region_not_enabled_is_silent_when_skipping() {
        let aggregator = Aggregator::new(true);
        aggregator.submit(CollectionResult::failure(
            WorkItem::regional("ec2", "ap-east-1"),
            ScanError::RegionNotEnabled("OptInRequired".to_string()),
            Duration::from_millis(1),
        ));

        let report = aggregator.finalize();
        assert_eq!(report.items_skipped, 1);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_region_not_enabled_recorded_when_not_skipping() {
        let aggregator = Aggregator::new(false);
        aggregator.submit(CollectionResult::failure(
            WorkItem::regional("ec2", "ap-east-1"),
            ScanError::RegionNotEnabled("OptInRequired".to_string()),
            Duration::from_millis(1),
        ));

        let report = aggregator.finalize();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, "region_not_enabled");
    }

    #[test]
    fn test_concurrent_submits() {
        let aggregator = Arc::new(Aggregator::new(true));
        let mut handles = Vec::new();

        for t in 0..8 {
            let aggregator = Arc::clone(&aggregator);
            handles.push(thread::spawn(move || {
                for i in 0..50 {
                    aggregator.submit(CollectionResult::success(
                        WorkItem::regional("ec2", "us-east-1"),
                        vec![format!("arn:{}:{}", t, i)],
                        Duration::from_millis(0),
                    ));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let report = Arc::try_unwrap(aggregator).ok().unwrap().finalize();
        assert_eq!(report.items_scanned, 400);
        assert_eq!(report.resource_count(), 400);
    }
}

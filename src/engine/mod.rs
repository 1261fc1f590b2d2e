// Tue Aug 18 2026 - Alex

pub mod aggregator;
pub mod scheduler;
pub mod work;
pub mod worker;

pub use aggregator::{Aggregator, CollectionResult, ScanReport};
pub use scheduler::build_work_items;
pub use work::{RegionTarget, WorkItem};
pub use worker::{Completion, ScanContext, WorkerPool};

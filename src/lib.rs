// Thu Aug 20 2026 - Alex

pub mod collectors;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod orchestrator;
pub mod output;
pub mod provider;
pub mod registry;
pub mod retry;

pub use config::ScanConfig;
pub use engine::{Aggregator, ScanReport, WorkItem, WorkerPool};
pub use error::{ErrorClass, ErrorRecord, ScanError};
pub use orchestrator::{ScanOrchestrator, ScanRequest, ScanState};
pub use output::OutputFormat;
pub use registry::{default_registry, CollectorRegistry};
pub use retry::{Invoker, RetryPolicy};

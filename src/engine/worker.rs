// Tue Aug 18 2026 - Alex

use crate::collectors::{CollectContext, ScanOptions};
use crate::engine::aggregator::{Aggregator, CollectionResult};
use crate::engine::work::WorkItem;
use crate::error::ScanError;
use crate::provider::client::ClientFactory;
use crate::registry::CollectorRegistry;
use crate::retry::Invoker;
use parking_lot::{Mutex, RwLock};
use std::any::Any;
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Everything a worker needs to execute work items. Shared read-only across
/// the pool.
pub struct ScanContext {
    pub registry: CollectorRegistry,
    pub factory: Arc<dyn ClientFactory>,
    pub invoker: Invoker,
    pub account_id: String,
    pub default_region: String,
    pub options: ScanOptions,
}

impl ScanContext {
    fn execute(&self, item: &WorkItem) -> CollectionResult {
        let started = Instant::now();

        match self.run_collector(item) {
            Ok(identifiers) => {
                log::debug!("{}: {} identifiers", item, identifiers.len());
                CollectionResult::success(item.clone(), identifiers, started.elapsed())
            }
            Err(error) => {
                log::debug!("{}: {}", item, error);
                CollectionResult::failure(item.clone(), error, started.elapsed())
            }
        }
    }

    fn run_collector(&self, item: &WorkItem) -> Result<Vec<String>, ScanError> {
        let descriptor = self
            .registry
            .get(item.service())
            .ok_or_else(|| ScanError::UnknownService(item.service().to_string()))?;

        let region = item.effective_region(&self.default_region);
        let client = self.factory.client_for(item.service(), region)?;

        let ctx = CollectContext {
            client: client.as_ref(),
            region,
            account_id: &self.account_id,
            invoker: &self.invoker,
            options: &self.options,
        };

        descriptor.collector.collect(&ctx)
    }
}

/// One work item finished; the orchestrator counts these to know when the
/// scan is done.
#[derive(Debug, Clone)]
pub struct Completion {
    pub service: String,
    pub region: String,
    pub ok: bool,
}

struct Worker {
    id: usize,
    handle: Option<JoinHandle<()>>,
}

impl Worker {
    fn spawn(
        id: usize,
        queue: Arc<Mutex<VecDeque<WorkItem>>>,
        context: Arc<ScanContext>,
        aggregator: Arc<Aggregator>,
        completions: Sender<Completion>,
        running: Arc<RwLock<bool>>,
    ) -> Self {
        let handle = thread::spawn(move || {
            log::trace!("Worker {} started", id);

            loop {
                if !*running.read() {
                    break;
                }

                // The queue is fully loaded before the pool starts, so an
                // empty queue means the scan has no work left.
                let item = match queue.lock().pop_front() {
                    Some(item) => item,
                    None => break,
                };

                // A panicking collector must not starve the completion
                // barrier; it becomes a terminal failure for its item.
                let result = panic::catch_unwind(AssertUnwindSafe(|| context.execute(&item)))
                    .unwrap_or_else(|payload| {
                        let message = panic_message(payload.as_ref());
                        log::error!("Worker {} panicked on {}: {}", id, item, message);
                        CollectionResult::failure(
                            item.clone(),
                            ScanError::CollectorPanic(message),
                            Duration::ZERO,
                        )
                    });
                let completion = Completion {
                    service: item.service().to_string(),
                    region: item.display_region(),
                    ok: result.is_ok(),
                };
                aggregator.submit(result);

                // The receiver hanging up means the orchestrator bailed;
                // stop pulling work.
                if completions.send(completion).is_err() {
                    break;
                }
            }

            log::trace!("Worker {} finished", id);
        });

        Self {
            id,
            handle: Some(handle),
        }
    }
}

/// Fixed-size pool draining a pre-loaded work queue. Results flow straight
/// into the shared aggregator; completions flow back to the caller.
pub struct WorkerPool {
    workers: Vec<Worker>,
    queue: Arc<Mutex<VecDeque<WorkItem>>>,
    running: Arc<RwLock<bool>>,
    size: usize,
}

impl WorkerPool {
    pub fn new(size: usize) -> Self {
        Self {
            workers: Vec::new(),
            queue: Arc::new(Mutex::new(VecDeque::new())),
            running: Arc::new(RwLock::new(false)),
            size: size.max(1),
        }
    }

    pub fn load(&self, items: Vec<WorkItem>) {
        let mut queue = self.queue.lock();
        for item in items {
            queue.push_back(item);
        }
    }

    pub fn queued(&self) -> usize {
        self.queue.lock().len()
    }

    pub fn start(
        &mut self,
        context: Arc<ScanContext>,
        aggregator: Arc<Aggregator>,
        completions: Sender<Completion>,
    ) {
        *self.running.write() = true;

        for id in 0..self.size {
            self.workers.push(Worker::spawn(
                id,
                Arc::clone(&self.queue),
                Arc::clone(&context),
                Arc::clone(&aggregator),
                completions.clone(),
                Arc::clone(&self.running),
            ));
        }
    }

    /// Joins every worker and releases their shared handles.
    pub fn stop(&mut self) {
        *self.running.write() = false;

        for worker in &mut self.workers {
            if let Some(handle) = worker.handle.take() {
                if handle.join().is_err() {
                    log::error!("Worker {} panicked", worker.id);
                }
            }
        }
        self.workers.clear();
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.stop();
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collectors::Collector;
    use crate::config::ScanConfig;
    use crate::provider::testing::FakeFactory;
    use crate::registry::CollectorRegistry;
    use crate::retry::RetryPolicy;
    use std::sync::mpsc;
    use std::time::Duration;

    struct StaticCollector(Vec<String>);

    impl Collector for StaticCollector {
        fn collect(&self, _ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
            Ok(self.0.clone())
        }
    }

    struct FailingCollector;

    impl Collector for FailingCollector {
        fn collect(&self, _ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
            Err(ScanError::AccessDenied("denied".to_string()))
        }
    }

    fn test_context(registry: CollectorRegistry) -> Arc<ScanContext> {
        Arc::new(ScanContext {
            registry,
            factory: Arc::new(FakeFactory::permissive()),
            invoker: Invoker::new(RetryPolicy::new(
                1,
                Duration::from_millis(1),
                Duration::from_millis(2),
            )),
            account_id: "123456789012".to_string(),
            default_region: ScanConfig::default().default_region,
            options: ScanOptions::default(),
        })
    }

    #[test]
    fn test_pool_drains_queue_and_reports_completions() {
        let mut registry = CollectorRegistry::new();
        registry.register(
            "widgets",
            false,
            Arc::new(StaticCollector(vec!["arn:w".to_string()])),
        );

        let items = vec![
            WorkItem::regional("widgets", "us-east-1"),
            WorkItem::regional("widgets", "us-west-2"),
            WorkItem::regional("widgets", "eu-west-1"),
        ];
        let total = items.len();

        let context = test_context(registry);
        let aggregator = Arc::new(Aggregator::new(true));
        let (tx, rx) = mpsc::channel();

        let mut pool = WorkerPool::new(2);
        pool.load(items);
        pool.start(context, Arc::clone(&aggregator), tx);

        let completions: Vec<Completion> = rx.iter().take(total).collect();
        pool.stop();

        assert_eq!(completions.len(), total);
        assert!(completions.iter().all(|c| c.ok));
        assert_eq!(pool.queued(), 0);

        let report = Arc::try_unwrap(aggregator).ok().unwrap().finalize();
        assert_eq!(report.items_total(), total);
    }

    #[test]
    fn test_failed_item_still_completes() {
        let mut registry = CollectorRegistry::new();
        registry.register("broken", false, Arc::new(FailingCollector));

        let context = test_context(registry);
        let aggregator = Arc::new(Aggregator::new(true));
        let (tx, rx) = mpsc::channel();

        let mut pool = WorkerPool::new(1);
        pool.load(vec![WorkItem::regional("broken", "us-east-1")]);
        pool.start(context, Arc::clone(&aggregator), tx);

        let completion = rx.recv().unwrap();
        pool.stop();

        assert!(!completion.ok);
        let report = Arc::try_unwrap(aggregator).ok().unwrap().finalize();
        assert_eq!(report.items_skipped, 1);
        assert_eq!(report.errors.len(), 1);
    }

    struct PanickingCollector;

    impl Collector for PanickingCollector {
        fn collect(&self, _ctx: &CollectContext<'_>) -> Result<Vec<String>, ScanError> {
            panic!("collector bug");
        }
    }

    #[test]
    fn test_panicking_collector_does_not_starve_the_barrier() {
        let mut registry = CollectorRegistry::new();
        registry.register("boom", false, Arc::new(PanickingCollector));
        registry.register(
            "widgets",
            false,
            Arc::new(StaticCollector(vec!["arn:w".to_string()])),
        );

        let context = test_context(registry);
        let aggregator = Arc::new(Aggregator::new(true));
        let (tx, rx) = mpsc::channel();

        let mut pool = WorkerPool::new(1);
        pool.load(vec![
            WorkItem::regional("boom", "us-east-1"),
            WorkItem::regional("widgets", "us-east-1"),
        ]);
        pool.start(context, Arc::clone(&aggregator), tx);

        // Both items complete even though the first one panicked.
        let completions: Vec<Completion> = rx.iter().take(2).collect();
        pool.stop();

        assert_eq!(completions.len(), 2);
        assert!(!completions[0].ok);
        assert!(completions[1].ok);

        let report = Arc::try_unwrap(aggregator).ok().unwrap().finalize();
        assert_eq!(report.items_total(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, "collector_panic");
        assert_eq!(report.resource_count(), 1);
    }

    #[test]
    fn test_unknown_service_produces_error_record() {
        let context = test_context(CollectorRegistry::new());
        let aggregator = Arc::new(Aggregator::new(true));
        let (tx, rx) = mpsc::channel();

        let mut pool = WorkerPool::new(1);
        pool.load(vec![WorkItem::global("notaservice")]);
        pool.start(context, Arc::clone(&aggregator), tx);

        let completion = rx.recv().unwrap();
        pool.stop();

        assert!(!completion.ok);
        assert_eq!(completion.region, "global");

        let report = Arc::try_unwrap(aggregator).ok().unwrap().finalize();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, "unknown_service");
    }
}

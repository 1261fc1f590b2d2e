// Wed Aug 19 2026 - Alex

use crate::collectors::{array_of, str_attr, ScanOptions};
use crate::config::ScanConfig;
use crate::engine::aggregator::{Aggregator, ScanReport};
use crate::engine::scheduler::build_work_items;
use crate::engine::worker::{ScanContext, WorkerPool};
use crate::error::ScanError;
use crate::provider::aws_cli::AwsCliFactory;
use crate::provider::client::{ApiRequest, ClientFactory};
use crate::registry::{default_registry, CollectorRegistry};
use crate::retry::Invoker;
use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanState {
    Idle,
    Resolving,
    Running,
    Draining,
    Done,
    Failed,
}

/// What to scan. Empty fields fall back to configuration defaults or to
/// discovery against the provider.
#[derive(Debug, Clone, Default)]
pub struct ScanRequest {
    pub services: Vec<String>,
    pub regions: Vec<String>,
    pub account_id: Option<String>,
}

impl ScanRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_services(mut self, services: Vec<String>) -> Self {
        self.services = services;
        self
    }

    pub fn with_regions(mut self, regions: Vec<String>) -> Self {
        self.regions = regions;
        self
    }

    pub fn with_account_id(mut self, account_id: &str) -> Self {
        self.account_id = Some(account_id.to_string());
        self
    }
}

/// Drives a full scan: resolves targets, expands the work queue, runs the
/// worker pool to completion, and hands back the aggregated report.
pub struct ScanOrchestrator {
    config: ScanConfig,
    registry: Option<CollectorRegistry>,
    factory: Arc<dyn ClientFactory>,
    state: ScanState,
    show_progress: bool,
}

impl ScanOrchestrator {
    pub fn new(
        config: ScanConfig,
        registry: CollectorRegistry,
        factory: Arc<dyn ClientFactory>,
    ) -> Self {
        Self {
            config,
            registry: Some(registry),
            factory,
            state: ScanState::Idle,
            show_progress: true,
        }
    }

    /// Production wiring: shipped collectors over the CLI transport.
    pub fn from_config(config: ScanConfig, profile: Option<String>) -> Self {
        let registry = default_registry(&config);
        let factory = Arc::new(AwsCliFactory::new(profile));
        Self::new(config, registry, factory)
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn state(&self) -> ScanState {
        self.state
    }

    pub fn run_scan(&mut self, request: &ScanRequest) -> Result<ScanReport> {
        match self.run_scan_inner(request) {
            Ok(report) => {
                self.state = ScanState::Done;
                Ok(report)
            }
            Err(e) => {
                self.state = ScanState::Failed;
                Err(e)
            }
        }
    }

    fn run_scan_inner(&mut self, request: &ScanRequest) -> Result<ScanReport> {
        let started = Instant::now();
        self.state = ScanState::Resolving;

        let invoker = Invoker::new(self.config.retry_policy());

        let services = if request.services.is_empty() {
            self.config.services.clone()
        } else {
            request.services.clone()
        };
        if services.is_empty() {
            bail!("no services to scan");
        }

        let regions = if request.regions.is_empty() {
            self.discover_regions(&invoker)
                .context("failed to discover enabled regions")?
        } else {
            request.regions.clone()
        };
        if regions.is_empty() {
            bail!("no regions to scan");
        }

        let account_id = match &request.account_id {
            Some(id) => id.clone(),
            None => self
                .discover_account(&invoker)
                .context("failed to resolve account id")?,
        };

        log::info!(
            "Scanning {} services across {} regions in account {}",
            services.len(),
            regions.len(),
            account_id
        );

        let registry = self
            .registry
            .take()
            .context("orchestrator already consumed by a previous scan")?;
        let items = build_work_items(&registry, &services, &regions);
        let total = items.len();

        self.state = ScanState::Running;

        let context = Arc::new(ScanContext {
            registry,
            factory: Arc::clone(&self.factory),
            invoker,
            account_id,
            default_region: self.config.default_region.clone(),
            options: ScanOptions::from_config(&self.config),
        });
        let aggregator = Arc::new(Aggregator::new(self.config.skip_unavailable));
        let (tx, rx) = mpsc::channel();

        let mut pool = WorkerPool::new(self.config.max_threads);
        pool.load(items);
        pool.start(Arc::clone(&context), Arc::clone(&aggregator), tx);

        // Every worker sends one completion per item; receiving all of them
        // is the join barrier.
        self.state = ScanState::Draining;
        let progress = self.progress_bar(total as u64);
        for completion in rx.iter().take(total) {
            if let Some(pb) = &progress {
                pb.set_message(format!("{}/{}", completion.service, completion.region));
                pb.inc(1);
            }
        }
        if let Some(pb) = &progress {
            pb.finish_with_message("scan complete");
        }
        pool.stop();

        drop(context);
        let report = match Arc::try_unwrap(aggregator) {
            Ok(aggregator) => aggregator.finalize(),
            Err(shared) => shared.snapshot(),
        };

        log::info!(
            "Scan finished in {:.2}s: {} resources, {} errors",
            started.elapsed().as_secs_f64(),
            report.resource_count(),
            report.errors.len()
        );

        Ok(report)
    }

    fn discover_regions(&self, invoker: &Invoker) -> Result<Vec<String>, ScanError> {
        let client = self
            .factory
            .client_for("ec2", &self.config.default_region)?;
        let request = ApiRequest::new("describe-regions");
        let response = invoker.invoke(|| client.call(&request)).into_result()?;

        let regions: Vec<String> = array_of(&response, "Regions")
            .iter()
            .filter_map(|r| str_attr(r, "RegionName"))
            .map(str::to_string)
            .collect();

        log::debug!("Discovered {} enabled regions", regions.len());
        Ok(regions)
    }

    fn discover_account(&self, invoker: &Invoker) -> Result<String, ScanError> {
        let client = self
            .factory
            .client_for("sts", &self.config.default_region)?;
        let request = ApiRequest::new("get-caller-identity");
        let response = invoker.invoke(|| client.call(&request)).into_result()?;

        str_attr(&response, "Account")
            .map(str::to_string)
            .ok_or_else(|| {
                ScanError::InvalidResponse("get-caller-identity returned no Account".to_string())
            })
    }

    fn progress_bar(&self, total: u64) -> Option<ProgressBar> {
        if !self.show_progress {
            return None;
        }

        let pb = ProgressBar::new(total);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
        );
        Some(pb)
    }
}

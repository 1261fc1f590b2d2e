// Mon Aug 17 2026 - Alex

use crate::error::ScanError;
use crate::output::OutputFormat;
use crate::retry::RetryPolicy;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_REGION: &str = "us-east-1";

pub static DEFAULT_SERVICES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "ec2",
        "s3",
        "lambda",
        "dynamodb",
        "rds",
        "iam",
        "cloudformation",
        "sqs",
        "sns",
        "kinesisanalytics",
        "kinesisanalyticsv2",
        "cloudwatch",
        "logs",
        "route53",
        "ecs",
        "kms",
    ]
});

// Services whose resources are not partitioned by region. Scanned once
// against the default region regardless of how many regions are requested.
pub static GLOBAL_SERVICES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "iam",
        "s3",
        "route53",
        "cloudfront",
        "organizations",
        "waf",
        "shield",
        "budgets",
        "ce",
        "chatbot",
        "health",
    ]
});

// Searched in order; first hit wins.
pub static CONFIG_PATHS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        "./aws_inventory_scan.json",
        "~/.aws_inventory_scan.json",
        "/etc/aws_inventory_scan.json",
    ]
});

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub default_region: String,
    pub services: Vec<String>,
    pub global_services: Vec<String>,
    pub max_threads: usize,
    pub max_retries: u32,
    pub initial_backoff_secs: u64,
    pub max_backoff_secs: u64,
    pub output_file: PathBuf,
    pub output_format: OutputFormat,
    pub pretty_print: bool,
    pub include_objects: bool,
    pub max_objects_per_bucket: usize,
    pub skip_unavailable: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            default_region: DEFAULT_REGION.to_string(),
            services: DEFAULT_SERVICES.iter().map(|s| s.to_string()).collect(),
            global_services: GLOBAL_SERVICES.iter().map(|s| s.to_string()).collect(),
            max_threads: 5,
            max_retries: 5,
            initial_backoff_secs: 1,
            max_backoff_secs: 60,
            output_file: PathBuf::from("aws_resource_arns.json"),
            output_format: OutputFormat::Json,
            pretty_print: true,
            include_objects: true,
            max_objects_per_bucket: 100,
            skip_unavailable: true,
        }
    }
}

impl ScanConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the first existing search path, falling back
    /// to the defaults when none is present or readable.
    pub fn load() -> Self {
        for path_str in CONFIG_PATHS.iter() {
            let path = expand_home(path_str);
            if path.is_file() {
                match Self::load_from(&path) {
                    Ok(config) => {
                        log::info!("Loaded configuration from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        log::warn!("Error loading configuration from {}: {}", path.display(), e);
                    }
                }
            }
        }
        Self::default()
    }

    pub fn load_from(path: &Path) -> Result<Self, ScanError> {
        let contents = fs::read_to_string(path)?;
        let config: ScanConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ScanError> {
        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    pub fn with_max_threads(mut self, threads: usize) -> Self {
        self.max_threads = threads;
        self
    }

    pub fn with_output_file(mut self, output: PathBuf) -> Self {
        self.output_file = output;
        self
    }

    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = format;
        self
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.max_retries,
            Duration::from_secs(self.initial_backoff_secs),
            Duration::from_secs(self.max_backoff_secs),
        )
    }

    pub fn is_global_service(&self, service: &str) -> bool {
        self.global_services.iter().any(|s| s == service)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.default_region.is_empty() {
            return Err("default_region must not be empty".to_string());
        }
        if self.max_threads == 0 {
            return Err("max_threads must be greater than 0".to_string());
        }
        if self.initial_backoff_secs == 0 {
            return Err("initial_backoff_secs must be greater than 0".to_string());
        }
        if self.initial_backoff_secs > self.max_backoff_secs {
            return Err("initial_backoff_secs must not exceed max_backoff_secs".to_string());
        }
        Ok(())
    }
}

fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScanConfig::default();
        assert_eq!(config.default_region, "us-east-1");
        assert_eq!(config.max_threads, 5);
        assert_eq!(config.max_retries, 5);
        assert!(config.services.iter().any(|s| s == "ec2"));
        assert!(config.is_global_service("iam"));
        assert!(!config.is_global_service("ec2"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_retry_policy_from_config() {
        let config = ScanConfig::default();
        let policy = config.retry_policy();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.initial_backoff, Duration::from_secs(1));
        assert_eq!(policy.max_backoff, Duration::from_secs(60));
    }

    #[test]
    fn test_validate_rejects_zero_threads() {
        let config = ScanConfig::default().with_max_threads(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_inverted_backoff() {
        let mut config = ScanConfig::default();
        config.initial_backoff_secs = 120;
        config.max_backoff_secs = 60;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file_overrides_defaults() {
        let path = std::env::temp_dir().join("aws_inventory_scan_config_test.json");
        fs::write(
            &path,
            r#"{"max_threads": 8, "default_region": "eu-west-1"}"#,
        )
        .unwrap();

        let config = ScanConfig::load_from(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.max_threads, 8);
        assert_eq!(config.default_region, "eu-west-1");
        // Unspecified fields keep their defaults.
        assert_eq!(config.max_retries, 5);
        assert!(config.services.iter().any(|s| s == "s3"));
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let path = std::env::temp_dir().join("aws_inventory_scan_config_roundtrip.json");
        let config = ScanConfig::default().with_max_threads(3);
        config.save_to(&path).unwrap();

        let loaded = ScanConfig::load_from(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(loaded.max_threads, 3);
        assert_eq!(loaded.default_region, config.default_region);
    }
}

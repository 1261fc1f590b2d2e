// Mon Aug 17 2026 - Alex

pub mod arn;
pub mod aws_cli;
pub mod client;
pub mod testing;

pub use arn::{format_arn, parse_arn, ArnParts};
pub use aws_cli::{AwsCliClient, AwsCliFactory};
pub use client::{next_page_token, ApiRequest, ClientFactory, ProviderClient};

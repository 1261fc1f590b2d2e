// Thu Aug 20 2026 - Alex

use aws_inventory_scanner::config::ScanConfig;
use aws_inventory_scanner::logging;
use aws_inventory_scanner::orchestrator::{ScanOrchestrator, ScanRequest};
use aws_inventory_scanner::output::{save_report, OutputFormat};
use clap::Parser;
use colored::Colorize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(author = "Alex")]
#[command(version = "0.1.0")]
#[command(about = "Concurrent AWS resource inventory scanner", long_about = None)]
struct Args {
    /// Services to scan instead of the configured default set
    #[arg(short, long, value_delimiter = ',')]
    services: Vec<String>,

    /// Regions to scan; discovered from the account when omitted
    #[arg(short, long, value_delimiter = ',')]
    regions: Vec<String>,

    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Repeat for more detail (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long)]
    no_progress: bool,

    /// Configuration file; the default search paths apply when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// AWS CLI profile to use for credentials
    #[arg(short, long)]
    profile: Option<String>,

    /// Worker threads; 0 means one per CPU
    #[arg(short, long)]
    threads: Option<usize>,

    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    let level = logging::level_from_verbosity(args.verbose as usize);
    match &args.log_file {
        Some(path) => {
            if let Err(e) = logging::init_logger_with_file(level, path) {
                eprintln!("{} Failed to open log file {}: {}", "[!]".red(), path.display(), e);
                std::process::exit(1);
            }
        }
        None => logging::init_logger(level),
    }

    let mut config = match &args.config {
        Some(path) => match ScanConfig::load_from(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("{} Failed to load config {}: {}", "[!]".red(), path.display(), e);
                std::process::exit(1);
            }
        },
        None => ScanConfig::load(),
    };

    if let Some(threads) = args.threads {
        config.max_threads = if threads == 0 { num_cpus::get() } else { threads };
    }
    if let Some(output) = &args.output {
        config.output_file = output.clone();
    }
    if let Some(format) = args.format {
        config.output_format = format;
    }

    if let Err(e) = config.validate() {
        eprintln!("{} Invalid configuration: {}", "[!]".red(), e);
        std::process::exit(1);
    }

    println!("{}", "AWS Resource Inventory Scanner".cyan().bold());
    println!("{}", "=".repeat(50).cyan());
    println!();

    let start_time = Instant::now();

    println!(
        "{} Scanning with {} worker threads",
        "[*]".blue(),
        config.max_threads
    );

    let output_file = config.output_file.clone();
    let output_format = config.output_format;
    let pretty = config.pretty_print;

    let request = ScanRequest::new()
        .with_services(args.services)
        .with_regions(args.regions);

    let mut orchestrator = ScanOrchestrator::from_config(config, args.profile)
        .with_progress(!args.no_progress);

    let report = match orchestrator.run_scan(&request) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{} Scan failed: {:#}", "[!]".red(), e);
            std::process::exit(1);
        }
    };

    print_summary(&report);

    if let Err(e) = save_report(&report, &output_file, output_format, pretty) {
        eprintln!("{} Failed to save report: {}", "[!]".red(), e);
        std::process::exit(1);
    }

    println!(
        "{} Report saved to: {}",
        "[+]".green(),
        output_file.display()
    );

    let elapsed = start_time.elapsed();

    println!();
    println!("{}", "=".repeat(50).cyan());
    println!(
        "{} Scan complete in {:.2}s",
        "[+]".green(),
        elapsed.as_secs_f64()
    );
    println!(
        "{} Total resources found: {}",
        "[+]".green(),
        report.resource_count()
    );

    if !report.errors.is_empty() {
        std::process::exit(2);
    }
}

fn print_summary(report: &aws_inventory_scanner::ScanReport) {
    println!();
    println!("{}", "Scan Summary".cyan().bold());
    println!("{}", "-".repeat(40).cyan());
    println!(
        "  Resources found: {}",
        report.resource_count().to_string().green()
    );
    println!(
        "  Work items: {} scanned, {} skipped",
        report.items_scanned.to_string().green(),
        report.items_skipped.to_string().yellow()
    );

    if !report.errors.is_empty() {
        println!();
        println!("{}", "Errors:".yellow().bold());
        for error in &report.errors {
            println!("  {} {}", "[!]".red(), error.summary());
        }
    }
    println!();
}

//! amazon-locale CLI
//!
//! Resolve addresses, inspect and build range tables from the command line.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use amazon_locale::config::{ReadStrategy, ValidationPolicy, DEFAULT_DATABASE_PATH};
use amazon_locale::table::{self, RangeTableBuilder};
use amazon_locale::{Config, Country, LocaleError, Resolver};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing_subscriber::{fmt, EnvFilter};

/// amazon-locale CLI
#[derive(Parser, Debug)]
#[command(name = "amazon-locale")]
#[command(about = "Map IPv4 addresses to Amazon marketplaces")]
#[command(version)]
struct Args {
    /// Range table path. The default is the sample table shipped in `data/`,
    /// compiled from `data/sample_ranges.csv`; use `build` to make others
    #[arg(short, long, global = true, default_value = DEFAULT_DATABASE_PATH)]
    database: PathBuf,

    /// Load the whole table into memory instead of seeking per probe
    #[arg(long, global = true)]
    in_memory: bool,

    /// Skip the ordering scan when opening the table
    #[arg(long, global = true)]
    trust: bool,

    /// Per-lookup I/O deadline in milliseconds
    #[arg(long, global = true)]
    deadline_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Resolve one or more addresses
    Resolve {
        /// Dotted-quad IPv4 addresses
        #[arg(required = true)]
        ips: Vec<String>,

        /// Print one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// Scan the table and print a report, even for tables that fail validation
    Inspect,

    /// Compile a CSV of `start_ip,country,match_type` lines into a table
    Build {
        /// CSV input
        #[arg(short, long)]
        input: PathBuf,

        /// Table output
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List configured marketplaces
    Countries,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,amazon_locale=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        tracing::error!("{}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> amazon_locale::Result<()> {
    let config = build_config(&args);

    match args.command {
        Commands::Resolve { ips, json } => {
            let resolver = Resolver::open(&config)?;
            for ip in &ips {
                let (resolution, metadata) = resolver.resolve_with_metadata(ip)?;
                if json {
                    let line = json!({
                        "ip": ip,
                        "resolution": resolution,
                        "marketplace": metadata,
                    });
                    println!("{}", line);
                } else {
                    let domain = metadata
                        .map(|m| format!("amazon.{}", m.domain))
                        .unwrap_or_else(|| "-".to_string());
                    println!(
                        "{}\tcountry={}\tmatch={}\t{}",
                        ip, resolution.country, resolution.match_type, domain
                    );
                }
            }
        }
        Commands::Inspect => {
            let report = table::inspect(&config.database_path, &config)?;
            let rendered = serde_json::to_string_pretty(&report)
                .map_err(|e| LocaleError::Serialization(e.to_string()))?;
            println!("{}", rendered);
            if !report.is_valid() {
                tracing::warn!("Range table failed validation");
            }
        }
        Commands::Build { input, output } => {
            let reader = BufReader::new(File::open(&input)?);
            let mut builder = RangeTableBuilder::new(&output)?;
            builder.import_csv(reader)?;
            let summary = builder.finish()?;
            tracing::info!(
                "Wrote {} records ({} bytes, crc32 {:08x}) to {}",
                summary.record_count,
                summary.file_size,
                summary.checksum,
                summary.path.display()
            );
        }
        Commands::Countries => {
            for country in Country::ALL {
                let m = country.metadata();
                println!(
                    "{}\t{}\t{}\t{}\t{}",
                    country.code(),
                    m.marketplace,
                    m.marketplace_url(),
                    m.country_name,
                    m.site
                );
            }
        }
    }

    Ok(())
}

/// Map command-line flags onto a resolver config
fn build_config(args: &Args) -> Config {
    let mut builder = Config::builder()
        .database_path(&args.database)
        .read_strategy(if args.in_memory {
            ReadStrategy::InMemory
        } else {
            ReadStrategy::Seek
        })
        .validation(if args.trust {
            ValidationPolicy::Trust
        } else {
            ValidationPolicy::Strict
        });

    if let Some(ms) = args.deadline_ms {
        builder = builder.io_deadline_ms(ms);
    }

    builder.build()
}

//! LargeVis environment CLI - reports build capabilities and applies thread caps

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use largevis_env_core::application::CapabilityProbe;
use largevis_env_core::constants::{DEFAULT_LOG_FILTER, LOG_FORMAT_ENV_VAR};
use largevis_env_core::domain::{
    BuildConfiguration, CapabilityFlags, DimIdx, EdgeIdx, IterationIdx, KIdx, ThreadRequest,
    VertexIdx,
};
use largevis_env_rayon::{check_bits, check_openmp, effective_worker_count};

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "largevis-env")]
#[command(about = "LargeVis build environment and thread policy", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show index width, parallel support and engine type sizes
    Capabilities {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a worker-thread cap and show the resulting worker count
    Threads {
        /// Requested worker cap; falls back to LARGEVIS_THREADS (non-positive values are ignored)
        #[arg(short, long, allow_negative_numbers = true)]
        threads: Option<i32>,
    },
}

/// Sizes of the engine-wide types, in bytes
#[derive(Serialize)]
struct TypeSizes {
    vertex_idx: usize,
    edge_idx: usize,
    iteration_idx: usize,
    dim_idx: usize,
    k_idx: usize,
}

impl TypeSizes {
    fn of_build() -> Self {
        use std::mem::size_of;

        Self {
            vertex_idx: size_of::<VertexIdx>(),
            edge_idx: size_of::<EdgeIdx>(),
            iteration_idx: size_of::<IterationIdx>(),
            dim_idx: size_of::<DimIdx>(),
            k_idx: size_of::<KIdx>(),
        }
    }
}

#[derive(Serialize)]
struct CapabilityReport {
    version: &'static str,
    flags: CapabilityFlags,
    build: BuildConfiguration,
    type_sizes: TypeSizes,
    worker_count: usize,
}

fn init_logging() -> Result<()> {
    let log_format = std::env::var(LOG_FORMAT_ENV_VAR).unwrap_or_else(|_| "pretty".to_string());

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    match log_format.as_str() {
        "json" => {
            // Structured logging for hosts that collect stderr
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}

fn yes_no(value: bool) -> colored::ColoredString {
    if value {
        "yes".green()
    } else {
        "no".yellow()
    }
}

fn print_capabilities(json: bool) -> Result<()> {
    let probe = CapabilityProbe::new();
    let report = CapabilityReport {
        version: VERSION,
        flags: probe.flags(),
        build: probe.build(),
        type_sizes: TypeSizes::of_build(),
        worker_count: effective_worker_count(),
    };

    if json {
        let out = serde_json::to_string_pretty(&report).context("Failed to encode report")?;
        println!("{}", out);
        return Ok(());
    }

    println!("{}", "Build Capabilities".cyan().bold());
    println!();
    println!("  {} {}", "Wide indices:".bold(), yes_no(check_bits()));
    println!("  {} {}", "Parallel:".bold(), yes_no(check_openmp()));
    println!("  {} {}", "Index width:".bold(), report.build.index_width);
    println!("  {} {}", "Workers:".bold(), report.worker_count);
    println!();
    println!("{}", "Type Sizes (bytes)".cyan().bold());
    println!();
    println!("  {} {}", "vertex:".bold(), report.type_sizes.vertex_idx);
    println!("  {} {}", "edge:".bold(), report.type_sizes.edge_idx);
    println!("  {} {}", "iteration:".bold(), report.type_sizes.iteration_idx);
    println!("  {} {}", "dimension:".bold(), report.type_sizes.dim_idx);
    println!("  {} {}", "neighbors:".bold(), report.type_sizes.k_idx);

    Ok(())
}

fn apply_threads(threads: Option<i32>) {
    let request = threads.map_or_else(ThreadRequest::from_env, ThreadRequest::new);
    let before = effective_worker_count();

    #[cfg(feature = "parallel")]
    {
        let list = request.requested().map(|n| [n]);
        largevis_env_rayon::check_cran(list.as_ref().map(|l| l.as_slice()));
    }

    #[cfg(not(feature = "parallel"))]
    {
        println!(
            "  {} serial build, thread caps are not available",
            "!".yellow().bold()
        );
    }

    let after = effective_worker_count();

    let requested = request
        .requested()
        .map_or_else(|| "none".to_string(), |n| n.to_string());
    println!("  {} {}", "Requested:".bold(), requested);
    println!("  {} {}", "Workers before:".bold(), before);
    println!("  {} {}", "Workers after:".bold(), after);

    if check_openmp() && request.worker_cap().is_some() {
        println!("  {} worker cap applied", "✓".green());
    } else {
        println!("  ○ worker count unchanged");
    }
}

fn main() -> Result<()> {
    init_logging()?;

    let cli = Cli::parse();
    info!("largevis-env v{} starting", VERSION);

    match cli.command {
        Commands::Capabilities { json } => print_capabilities(json)?,
        Commands::Threads { threads } => apply_threads(threads),
    }

    Ok(())
}

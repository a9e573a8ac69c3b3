//! randlab CLI - pseudo-random sequence generation from the command line
//!
//! # Commands
//!
//! - `randlab generate -m <method> -p name=value ...` - Generate a uniform
//!   sequence, optionally transformed into a distribution
//! - `randlab seed` - Suggest four-digit seeds
//! - `randlab methods` - List algorithms, distributions and their fields
//!
//! # Example
//!
//! ```text
//! randlab generate -m lcg -p x0=7 -p a=5 -p c=3 -p m=10007 \
//!     --distribution poisson -d lambda=3 --count 5
//! ```

use std::io::Write;
use std::path::Path;

use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

use commands::generate::GenerateArgs;
use config::{OutputFormat, RandlabConfig};
pub use error::{CliError, Result};

/// Pseudo-random sequence generator CLI
#[derive(Parser)]
#[command(name = "randlab")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = "randlab.toml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a pseudo-random sequence
    Generate {
        /// Generator algorithm (e.g. middle-square, lcg, mt, xorshift)
        #[arg(short, long)]
        method: String,

        /// Generator field as name=value (repeatable)
        #[arg(short, long = "param")]
        param: Vec<String>,

        /// Distribution to transform the uniforms into
        #[arg(short = 't', long)]
        distribution: Option<String>,

        /// Distribution field as name=value (repeatable)
        #[arg(short, long = "dist-param")]
        dist_param: Vec<String>,

        /// Number of uniforms to generate
        #[arg(short = 'n', long)]
        count: Option<usize>,

        /// Binomial sampling method (single-draw, bernoulli-sum)
        #[arg(long, default_value = "single-draw")]
        binomial_method: String,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Decimal places shown in table and CSV output
        #[arg(long)]
        precision: Option<u32>,

        /// Also show the raw uniforms
        #[arg(short, long)]
        uniforms: bool,
    },

    /// Suggest seeds for the seeded algorithms
    Seed {
        /// Number of seeds to suggest
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// List algorithms, distributions and their fields
    Methods,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = RandlabConfig::load_with_env_and_validate(Path::new(&cli.config))?;

    // Initialise tracing; RUST_LOG wins over the configured level
    let level = if cli.verbose {
        "debug"
    } else {
        config.log_level.as_str()
    };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    debug!("Configuration: {:?}", config);

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Generate {
            method,
            param,
            distribution,
            dist_param,
            count,
            binomial_method,
            format,
            precision,
            uniforms,
        } => {
            let args = GenerateArgs {
                method,
                params: param,
                distribution,
                dist_params: dist_param,
                count,
                binomial_method,
                format,
                precision,
                show_uniforms: uniforms,
            };
            commands::generate::run(&args, &config, &mut out)?;
        }
        Commands::Seed { count } => commands::seed::run(count, &mut rand::thread_rng(), &mut out)?,
        Commands::Methods => commands::methods::run(&mut out)?,
    }

    out.flush()?;
    Ok(())
}

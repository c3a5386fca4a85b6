mod inspect;
mod output;
mod run;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "pricematch-cli")]
#[command(about = "Match laptop listings across retailers and compare prices")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Standardize, group and compare scraped listing exports
    Run {
        /// Listing export to read, as PATH or PATH=SOURCE (repeatable)
        #[arg(long = "input", short = 'i', required = true)]
        inputs: Vec<String>,
        /// Directory to write the dataset and report to [default: PRICEMATCH_OUTPUT_DIR]
        #[arg(long)]
        output_dir: Option<std::path::PathBuf>,
        /// Retailer savings are measured against [default: configured baseline]
        #[arg(long)]
        baseline: Option<String>,
        /// Keep only the N highest-savings rows in the report (0 keeps all)
        #[arg(long)]
        top: Option<usize>,
    },
    /// Print the attributes and keys extracted from a single title
    Extract {
        /// Listing title to analyse
        title: String,
    },
    /// List the configured retailers
    Sources,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenvy::dotenv().ok();
    let config = pricematch_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, "loaded config");

    match cli.command {
        Some(Commands::Run {
            inputs,
            output_dir,
            baseline,
            top,
        }) => {
            let options = run::RunOptions {
                inputs,
                output_dir: output_dir.unwrap_or_else(|| config.output_dir.clone()),
                baseline,
                top_n: top.unwrap_or(config.report_top_n),
            };
            run::run_match(&config, &options)?;
        }
        Some(Commands::Extract { title }) => inspect::run_extract(&title)?,
        Some(Commands::Sources) => inspect::run_sources(&config)?,
        None => println!("pricematch-cli: no command given; see --help"),
    }

    Ok(())
}

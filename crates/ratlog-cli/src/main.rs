mod inspect;

use anyhow::Context;
use clap::{Parser, Subcommand};
use inspect::Inspector;
use ratlog::RatlogParser;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "ratlog")]
#[command(about = "Ratlog CLI tools", long_about = None)]
struct Cli {
    /// Log parser progress (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a ratlog stream and print each record
    Parse {
        /// Path to the log file; reads stdin when omitted or `-`
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Only show records carrying this tag (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,

        /// Print the number of matching records instead of the records
        #[arg(long)]
        count: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Parse { path, tags, count } => {
            let stdout = io::stdout();
            let mut inspector = Inspector::new(stdout.lock(), tags, count);
            let parser = RatlogParser::new();

            match path.filter(|p| p.as_os_str() != "-") {
                Some(path) => {
                    let file = File::open(&path)
                        .with_context(|| format!("failed to open {}", path.display()))?;
                    parser
                        .parse(BufReader::new(file), &mut inspector)
                        .with_context(|| format!("failed to parse {}", path.display()))?;
                }
                None => {
                    parser
                        .parse(io::stdin().lock(), &mut inspector)
                        .context("failed to parse stdin")?;
                }
            }

            let matched = inspector.finish()?;
            log::debug!("{} records matched", matched);
        }
    }
    Ok(())
}

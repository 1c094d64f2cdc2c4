//! sensei-tokens: token counting and limit checks for markdown skill files.
//!
//! Reports go to stdout; warnings and errors go to stderr.
//! Exit codes: 0 success, 1 limits exceeded under `--strict` or I/O failure,
//! 2 invalid limits pattern.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use sensei_tokens::commands::count::{CountOptions, SortKey};
use sensei_tokens::commands::suggest::{DEFAULT_MIN_SAVINGS, SuggestOptions};
use sensei_tokens::commands::{OutputFormat, check, count, read_files, suggest, write_report};
use sensei_tokens::scan::collect_targets;
use sensei_tokens::{LimitResolver, LimitsConfig, logging};

#[derive(Parser)]
#[command(name = "sensei-tokens")]
#[command(about = "Count, check, and trim tokens in markdown skill files", long_about = None)]
#[command(version)]
struct Cli {
    /// Project root; relative paths and .token-limits.json are looked up here
    #[arg(long, default_value = ".", global = true)]
    root: String,

    /// Limits file to use instead of <root>/.token-limits.json
    #[arg(long, global = true)]
    config: Option<String>,

    #[arg(long, value_parser = ["off", "error", "warn", "info", "debug", "trace"], default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count tokens in markdown files
    Count {
        paths: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        #[arg(long, value_enum, default_value_t)]
        sort: SortKey,

        /// Hide files with fewer tokens than this
        #[arg(long, default_value_t = 0)]
        min_tokens: usize,

        /// Hide the total row
        #[arg(long)]
        no_total: bool,
    },

    /// Check files against their token limits
    Check {
        paths: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Exit with status 1 if any file exceeds its limit
        #[arg(long)]
        strict: bool,

        /// Suppress table output
        #[arg(long)]
        quiet: bool,
    },

    /// Suggest ways to reduce token counts
    Suggest {
        paths: Vec<PathBuf>,

        #[arg(long, value_enum, default_value_t)]
        format: OutputFormat,

        /// Hide suggestions saving fewer tokens than this
        #[arg(long, default_value_t = DEFAULT_MIN_SAVINGS)]
        min_savings: usize,

        #[arg(long)]
        verbose: bool,
    },
}

fn expand(path: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(path).as_ref())
}

fn load_config(root: &Path, explicit: Option<&str>) -> LimitsConfig {
    match explicit {
        Some(path) => LimitsConfig::load_from(&expand(path)),
        None => LimitsConfig::load(root),
    }
}

fn run(cli: Cli) -> sensei_tokens::Result<ExitCode> {
    let root = expand(&cli.root);
    let mut out = std::io::stdout().lock();

    match cli.command {
        Commands::Count {
            paths,
            format,
            sort,
            min_tokens,
            no_total,
        } => {
            let files = read_files(&root, &collect_targets(&root, &paths));
            let options = CountOptions {
                sort,
                min_tokens,
                show_total: !no_total,
            };
            write_report(&count::count(&files, options), format, &mut out)?;
        }

        Commands::Check {
            paths,
            format,
            strict,
            quiet,
        } => {
            let config = load_config(&root, cli.config.as_deref());
            let resolver = LimitResolver::from_config(&config)?;
            let files = read_files(&root, &collect_targets(&root, &paths));
            let report = check::check(&files, &resolver, quiet);
            write_report(&report, format, &mut out)?;
            if strict && report.has_exceeded() {
                return Ok(ExitCode::FAILURE);
            }
        }

        Commands::Suggest {
            paths,
            format,
            min_savings,
            verbose,
        } => {
            let config = load_config(&root, cli.config.as_deref());
            let resolver = LimitResolver::from_config(&config)?;
            let files = read_files(&root, &collect_targets(&root, &paths));
            let options = SuggestOptions {
                min_savings,
                verbose,
            };
            write_report(&suggest::suggest(&files, &resolver, options), format, &mut out)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(logging::parse_level(&cli.log_level));

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("sensei-tokens: {e}");
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

// SPDX-License-Identifier: PMPL-1.0-or-later

//! tscat: inspect, validate and query Qt Linguist translation catalogs
//!
//! A command-line front end over the `tscat` library: statistics, lookups,
//! placeholder formatting, lint, export, diff and locale resolution.

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use tscat::check::{self, Level};
use tscat::config::{Config, LOG_ENV};
use tscat::locales::LocaleSet;
use tscat::report::{self, diff, output, ExportFormat};

#[derive(Parser)]
#[command(name = "tscat")]
#[command(version)]
#[command(about = "Inspect, validate and query Qt Linguist translation catalogs")]
#[command(long_about = None)]
struct Cli {
    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging (overridden by TSCAT_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show translation progress for a catalog
    Stats {
        /// Catalog file (.ts, or a JSON/YAML export)
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Break counts down per context
        #[arg(short, long)]
        per_context: bool,

        /// Print statistics as JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Translate one source string
    Lookup {
        /// Catalog file
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Context (UI area) the string belongs to
        #[arg(short = 'x', long)]
        context: String,

        /// Source text to translate
        #[arg(value_name = "SOURCE")]
        source: String,

        /// Disambiguation comment
        #[arg(short = 'm', long)]
        comment: Option<String>,

        /// Plural count substituted for %n
        #[arg(short = 'n', long, allow_negative_numbers = true)]
        count: Option<i64>,

        /// Arguments substituted for %1, %2, ...
        #[arg(value_name = "ARGS", trailing_var_arg = true)]
        args: Vec<String>,
    },

    /// Substitute %1, %2, ... in a template
    Format {
        #[arg(value_name = "TEMPLATE")]
        template: String,

        #[arg(value_name = "ARGS", trailing_var_arg = true)]
        args: Vec<String>,
    },

    /// Lint a catalog; exits non-zero when errors are found
    Check {
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Treat warnings as errors
        #[arg(short, long)]
        strict: bool,

        /// Lowest level to print
        #[arg(short, long, value_enum, default_value = "warning")]
        level: LevelArg,
    },

    /// Convert a catalog to JSON, YAML or .ts
    Export {
        #[arg(value_name = "CATALOG")]
        catalog: PathBuf,

        /// Output format (default: from the output extension, else ts)
        #[arg(short, long, value_enum)]
        format: Option<ExportFormat>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare two catalogs
    Diff {
        #[arg(value_name = "BASE")]
        base: PathBuf,

        #[arg(value_name = "COMPARE")]
        compare: PathBuf,
    },

    /// List the catalogs in a locale directory and resolve a locale
    Locales {
        /// Directory to scan (default: locale_dir from config)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Locale to resolve (default: default_locale from config)
        #[arg(short, long)]
        resolve: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum LevelArg {
    Info,
    Warning,
    Error,
}

impl From<LevelArg> for Level {
    fn from(arg: LevelArg) -> Self {
        match arg {
            LevelArg::Info => Level::Info,
            LevelArg::Warning => Level::Warning,
            LevelArg::Error => Level::Error,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Stats {
            catalog,
            per_context,
            json,
        } => {
            let store = output::load_catalog(&catalog)?;
            let stats = report::catalog_stats(&store);
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!("Catalog: {}", catalog.display());
                report::print_stats(&stats, per_context);
            }
        }

        Commands::Lookup {
            catalog,
            context,
            source,
            comment,
            count,
            args,
        } => {
            let store = output::load_catalog(&catalog)?;
            let text = match count {
                Some(n) => {
                    store.translate_plural_disambiguated(&context, &source, comment.as_deref(), n)
                }
                None => store
                    .lookup_disambiguated(&context, &source, comment.as_deref())
                    .to_string(),
            };
            println!("{}", tscat::format::format(&text, &args));
        }

        Commands::Format { template, args } => {
            println!("{}", tscat::format::format(&template, &args));
        }

        Commands::Check {
            catalog,
            strict,
            level,
        } => {
            let store = output::load_catalog(&catalog)?;
            let lint = check::lint(store.document(), strict || config.strict);
            println!("Checking: {}", catalog.display());
            report::print_lint(&lint, level.into());
            if lint.has_errors() {
                bail!("catalog check failed for {}", catalog.display());
            }
        }

        Commands::Export {
            catalog,
            format,
            output: output_path,
        } => {
            let store = output::load_catalog(&catalog)?;
            let format = format
                .or_else(|| output_path.as_deref().map(ExportFormat::for_path))
                .unwrap_or(ExportFormat::Ts);
            match output_path {
                Some(path) => {
                    report::save_export(&store, format, &path)?;
                    println!("Catalog exported to: {}", path.display());
                }
                None => print!("{}", format.serialize(&store)?),
            }
        }

        Commands::Diff { base, compare } => {
            let before = output::load_catalog(&base)?;
            let after = output::load_catalog(&compare)?;
            let changes = diff::diff_catalogs(before.document(), after.document());
            println!(
                "{}",
                diff::format_diff(
                    &changes,
                    &base.display().to_string(),
                    &compare.display().to_string()
                )
            );
        }

        Commands::Locales { dir, resolve } => {
            let Some(dir) = dir.or_else(|| config.locale_dir.clone()) else {
                bail!("no locale directory given and none configured");
            };
            let set = LocaleSet::load_dir(&dir)?;

            println!("Locales in {}: {}", dir.display(), set.len());
            for code in set.codes() {
                let completion = set
                    .get(code)
                    .map(|store| report::catalog_stats(store).completion)
                    .unwrap_or(0.0);
                let path = set
                    .path_of(code)
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                println!("  {:8} {:>6.1}%  {}", code, completion, path);
            }
            for failure in set.failures() {
                println!("  failed: {} ({})", failure.path.display(), failure.error);
            }

            let requested = resolve.unwrap_or_else(|| config.default_locale.clone());
            match set.resolve(&requested, &config.fallback) {
                Some((code, _)) => println!("\nResolved {} -> {}", requested, code),
                None => println!("\nNo catalog for {}; source strings will be shown", requested),
            }
        }
    }

    Ok(())
}

mod commands;
mod reader;

use std::path::{Path, PathBuf};
use std::process;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use fdkeys_core::{parse_fds, parse_source, ParseOptions, ParsedFds};
use reader::{read_fd_files, read_project_config, FdConfig};

#[derive(Parser)]
#[command(
    name = "fdkeys",
    version,
    about = "Functional dependency analyzer — find candidate keys and attribute closures"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Find every candidate key of the relation
    Keys {
        #[command(flatten)]
        input: InputArgs,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Compute the closure of an attribute set
    Closure {
        /// Comma-separated attributes, e.g. "A,D"
        #[arg(short, long)]
        attrs: String,

        #[command(flatten)]
        input: InputArgs,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Parse dependency files and report diagnostics
    Check {
        #[command(flatten)]
        input: InputArgs,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },

    /// Find the candidate keys of the built-in sample A->B, B->C, CD->E
    Demo {
        /// Read every character as its own attribute
        #[arg(long)]
        compact: bool,

        /// Output format: human (default) or json
        #[arg(long, default_value = "human")]
        format: String,
    },
}

#[derive(Args, Clone)]
pub struct InputArgs {
    /// Input path (file or directory, defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Inline dependency such as "A->B" (repeatable, replaces PATH)
    #[arg(long = "fd", value_name = "FD", allow_hyphen_values = true)]
    pub fds: Vec<String>,

    /// Trim whitespace around attribute names (the default)
    #[arg(long, overrides_with = "no_trim")]
    pub trim: bool,

    /// Keep whitespace around attribute names instead of trimming it
    #[arg(long, overrides_with = "trim")]
    pub no_trim: bool,

    /// Read every character as its own attribute ("CD->E" means "C,D->E")
    #[arg(long, overrides_with = "no_compact")]
    pub compact: bool,

    /// Split attributes on commas only, even if the project config enables compact
    #[arg(long, overrides_with = "compact")]
    pub no_compact: bool,
}

/// Parsed dependencies plus the sources they came from.
pub struct LoadedInput {
    pub parsed: ParsedFds,
    pub sources: Vec<String>,
    /// `name` from the project config, when one was read.
    pub project: Option<String>,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Keys { input, format } => commands::keys::run_keys(&input, &format),
        Commands::Closure {
            attrs,
            input,
            format,
        } => commands::closure::run_closure(&input, &attrs, &format),
        Commands::Check { input, format } => match commands::check::run_check(&input, &format) {
            Ok((output, error_count)) => {
                println!("{output}");
                if error_count > 0 {
                    process::exit(1);
                }
                return;
            }
            Err(e) => Err(e),
        },
        Commands::Demo { compact, format } => commands::keys::run_demo(compact, &format),
    };

    match result {
        Ok(output) => println!("{output}"),
        Err(e) => {
            eprintln!("Error: {e:#}");
            process::exit(1);
        }
    }
}

/// Logs go to stderr so stdout stays parseable; `FDKEYS_LOG` sets the filter.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("FDKEYS_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve parse options: command-line flags win over the project config.
fn parse_options(input: &InputArgs, config: Option<&FdConfig>) -> ParseOptions {
    let defaults = ParseOptions::default();
    ParseOptions {
        trim: flag(input.trim, input.no_trim)
            .or(config.and_then(|c| c.trim))
            .unwrap_or(defaults.trim),
        compact: flag(input.compact, input.no_compact)
            .or(config.and_then(|c| c.compact))
            .unwrap_or(defaults.compact),
    }
}

/// A `--x`/`--no-x` pair; `None` when neither was given.
fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

pub fn load_input(input: &InputArgs) -> Result<LoadedInput> {
    if !input.fds.is_empty() {
        let options = parse_options(input, None);
        return Ok(LoadedInput {
            parsed: parse_fds(&input.fds, &options),
            sources: vec![fdkeys_core::catalogs::INLINE_SOURCE.to_string()],
            project: None,
        });
    }

    let config = if input.path.is_dir() {
        read_project_config(&input.path)?
    } else {
        None
    };
    let options = parse_options(input, config.as_ref());
    let mut loaded = load_path(&input.path, &options)?;
    loaded.project = config.and_then(|c| c.name);
    Ok(loaded)
}

fn load_path(input_path: &Path, options: &ParseOptions) -> Result<LoadedInput> {
    let files = read_fd_files(input_path)?;
    if files.is_empty() {
        bail!(
            "No dependency files (*.fd) found at: {}",
            input_path.display()
        );
    }

    let sources: Vec<String> = files.iter().map(|f| f.path.clone()).collect();
    let parsed = ParsedFds::merge(
        files
            .iter()
            .map(|f| parse_source(&f.content, &f.path, options)),
    );
    debug!(
        files = sources.len(),
        dependencies = parsed.dependencies.len(),
        "loaded input"
    );

    Ok(LoadedInput {
        parsed,
        sources,
        project: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(args: &[&str]) -> InputArgs {
        #[derive(Parser)]
        struct Wrapper {
            #[command(flatten)]
            input: InputArgs,
        }
        let argv = std::iter::once("fdkeys").chain(args.iter().copied());
        Wrapper::parse_from(argv).input
    }

    fn config(trim: Option<bool>, compact: Option<bool>) -> FdConfig {
        FdConfig {
            trim,
            compact,
            ..FdConfig::default()
        }
    }

    #[test]
    fn defaults_without_flags_or_config() {
        assert_eq!(parse_options(&input(&[]), None), ParseOptions::default());
    }

    #[test]
    fn config_applies_when_no_flag_given() {
        let options = parse_options(&input(&[]), Some(&config(Some(false), Some(true))));
        assert!(!options.trim);
        assert!(options.compact);
    }

    #[test]
    fn flags_override_config_both_ways() {
        let on = config(Some(true), Some(true));
        let off = config(Some(false), Some(false));

        let options = parse_options(&input(&["--trim", "--no-compact"]), Some(&off));
        assert!(options.trim);
        assert!(!options.compact);
        let options = parse_options(&input(&["--trim", "--no-compact"]), Some(&on));
        assert!(options.trim);
        assert!(!options.compact);

        let options = parse_options(&input(&["--no-trim", "--compact"]), Some(&on));
        assert!(!options.trim);
        assert!(options.compact);
    }

    #[test]
    fn last_of_paired_flags_wins() {
        let options = parse_options(&input(&["--no-trim", "--trim"]), None);
        assert!(options.trim);
        let options = parse_options(&input(&["--compact", "--no-compact"]), None);
        assert!(!options.compact);
    }
}

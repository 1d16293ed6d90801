use anyhow::{Context, Result as AnyhowResult};
use clap::{Parser, Subcommand, ValueEnum};
use pathtree::config::{config_schema, BuilderConfig, DelimiterSetting};
use pathtree::config_io;
use pathtree::normalize_selection;
use pathtree::services::tracing_setup;
use pathtree::tree::{parse_entries, EmptyPathPolicy, OrderingPolicy, PathTreeBuilder};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "pathtree")]
#[command(about = "Build hierarchical select trees from delimited path strings", long_about = None)]
#[command(version)]
struct Args {
    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Path to log file (default: stderr)
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<PathBuf>,

    /// Log debug events (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a tree from a JSON array of paths, labeled values, or row objects
    Build(BuildArgs),
    /// Normalize a selection payload given as JSON
    Normalize {
        /// JSON payload; read from stdin when omitted
        #[arg(value_name = "JSON")]
        payload: Option<String>,
    },
    /// Print the JSON Schema of the config file
    Schema,
    /// Print the effective configuration as JSON
    DumpConfig,
}

#[derive(clap::Args, Debug)]
struct BuildArgs {
    /// Input file. Use "-" or omit for stdin.
    #[arg(value_name = "INPUT")]
    input: Option<PathBuf>,

    /// Treat the input as row objects and take paths from this column
    #[arg(long, value_name = "COLUMN")]
    column: Option<String>,

    /// Column holding the leaf label for each row
    #[arg(long, value_name = "COLUMN", requires = "column")]
    label_column: Option<String>,

    /// Sort children by value instead of keeping insertion order
    #[arg(long)]
    sorted: bool,

    /// Fixed delimiter: auto, slash, dot, or a single character
    #[arg(long, value_name = "DELIMITER")]
    delimiter: Option<String>,

    /// Keep raw paths made only of delimiters as single root nodes
    #[arg(long)]
    degenerate_roots: bool,

    /// Mark every node selectable
    #[arg(long)]
    selectable: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
enum OutputFormat {
    Json,
    Text,
}

fn main() -> AnyhowResult<()> {
    let args = Args::parse();

    let level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_setup::init_global(args.log_file.as_deref(), level)
        .context("Failed to open log file")?;

    let (config, source) = config_io::resolve(args.config.as_deref())?;
    tracing::debug!(?source, "resolved configuration");

    match args.command {
        Command::Build(build_args) => run_build(config, build_args),
        Command::Normalize { payload } => run_normalize(payload),
        Command::Schema => {
            println!("{}", serde_json::to_string_pretty(&config_schema())?);
            Ok(())
        }
        Command::DumpConfig => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn run_build(config: BuilderConfig, args: BuildArgs) -> AnyhowResult<()> {
    let config = apply_overrides(config, &args)?;

    let text = read_input(args.input.as_deref())?;
    let entries = parse_entries(&text, args.column.as_deref(), args.label_column.as_deref())
        .context("Failed to parse input entries")?;

    let tree = PathTreeBuilder::from_config(&config).build_tree(entries);
    tracing::info!(nodes = tree.node_count(), "tree built");

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&tree)?),
        OutputFormat::Text => print!("{}", tree.render_indented()),
    }
    Ok(())
}

/// Layer command line flags over the resolved config file
fn apply_overrides(mut config: BuilderConfig, args: &BuildArgs) -> AnyhowResult<BuilderConfig> {
    if args.sorted {
        config.ordering = OrderingPolicy::Sorted;
    }
    if let Some(delimiter) = &args.delimiter {
        config.delimiter = DelimiterSetting::parse(delimiter)?;
    }
    if args.degenerate_roots {
        config.empty_paths = EmptyPathPolicy::DegenerateRoot;
    }
    if args.selectable {
        config.selectable = true;
    }
    config.validate()?;
    Ok(config)
}

fn run_normalize(payload: Option<String>) -> AnyhowResult<()> {
    let text = match payload {
        Some(payload) => payload,
        None => read_input(None)?,
    };
    println!("{}", render_selection(&text)?);
    Ok(())
}

/// Normalized selection as printed by `normalize`; blank input is undefined
fn render_selection(text: &str) -> AnyhowResult<String> {
    let raw: Option<serde_json::Value> = if text.trim().is_empty() {
        None
    } else {
        Some(serde_json::from_str(text).context("Selection payload is not valid JSON")?)
    };

    Ok(match normalize_selection(raw.as_ref()).to_json() {
        Some(value) => serde_json::to_string(&value)?,
        None => "undefined".to_string(),
    })
}

/// Read a file, or stdin for `None` and "-"
fn read_input(path: Option<&Path>) -> AnyhowResult<String> {
    match path {
        Some(path) if path != Path::new("-") => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build_args(argv: &[&str]) -> BuildArgs {
        let args = Args::try_parse_from(["pathtree", "build"].iter().chain(argv)).unwrap();
        match args.command {
            Command::Build(build_args) => build_args,
            other => panic!("expected build command, got {other:?}"),
        }
    }

    #[test]
    fn test_no_flags_keep_config_file_values() {
        let file_config = BuilderConfig {
            delimiter: DelimiterSetting::Dot,
            ordering: OrderingPolicy::Sorted,
            empty_paths: EmptyPathPolicy::Skip,
            selectable: true,
        };
        let config = apply_overrides(file_config.clone(), &build_args(&[])).unwrap();
        assert_eq!(config, file_config);
    }

    #[test]
    fn test_flags_override_config() {
        let args = build_args(&["--delimiter", "|", "--degenerate-roots", "--sorted", "--selectable"]);
        let config = apply_overrides(BuilderConfig::default(), &args).unwrap();

        assert_eq!(config.delimiter, DelimiterSetting::Custom('|'));
        assert_eq!(config.empty_paths, EmptyPathPolicy::DegenerateRoot);
        assert_eq!(config.ordering, OrderingPolicy::Sorted);
        assert!(config.selectable);

        let config = apply_overrides(BuilderConfig::default(), &build_args(&["--delimiter", "slash"])).unwrap();
        assert_eq!(config.delimiter, DelimiterSetting::Slash);
    }

    #[test]
    fn test_bad_delimiter_flag_is_rejected() {
        let result = apply_overrides(BuilderConfig::default(), &build_args(&["--delimiter", "::"]));
        assert!(result.is_err());

        let result = apply_overrides(BuilderConfig::default(), &build_args(&["--delimiter", " "]));
        assert!(result.is_err());
    }

    #[test]
    fn test_label_column_requires_column() {
        assert!(Args::try_parse_from(["pathtree", "build", "--label-column", "name"]).is_err());
    }

    #[test]
    fn test_render_selection() {
        assert_eq!(render_selection("").unwrap(), "undefined");
        assert_eq!(render_selection("  \n").unwrap(), "undefined");
        assert_eq!(render_selection("null").unwrap(), "null");
        assert_eq!(render_selection("\"a/b\"").unwrap(), "[\"a/b\"]");
        assert_eq!(render_selection("[\"a\", 2, true]").unwrap(), "[\"a\",2]");
        assert_eq!(render_selection("{\"x\": 1}").unwrap(), "null");
        assert!(render_selection("[oops").is_err());
    }
}

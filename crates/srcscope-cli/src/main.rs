//! srcscope-cli: Command-line interface for srcscope.

use anyhow::Context;
use clap::{Parser, Subcommand};
use srcscope_core::SourceGroupSettings;
use srcscope_project::{ManifestLoader, ScopeEvent, SourceGroup, StatusReporter};
use srcscope_watcher::FileWatcher;
use std::collections::BTreeSet;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(name = "srcscope")]
#[command(about = "Resolve which files belong to a project and which to index", long_about = None)]
#[command(disable_version_flag = true)]
struct Cli {
    /// Source group config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Project descriptor, overriding the config
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print version information
    #[arg(short = 'V', long)]
    version: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that the project descriptor is available
    Check,

    /// Print the source files in scope
    Scope {
        /// Output format (plain, json)
        #[arg(short, long, default_value = "plain")]
        format: String,
    },

    /// Print which of the given paths are inside the project
    Contained {
        /// Candidate paths
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },

    /// Print indexing jobs as JSON
    Jobs {
        /// Files to index (default: the whole scope)
        files: Vec<PathBuf>,
    },

    /// Watch the project and print changed paths inside it
    Watch {
        /// Poll interval in milliseconds
        #[arg(long, default_value = "500")]
        interval_ms: u64,
    },
}

/// Prints status events and waits for acknowledgement on a terminal.
struct ConsoleReporter;

impl StatusReporter for ConsoleReporter {
    fn report(&self, event: &ScopeEvent) {
        eprintln!("{}", event.status());
        eprintln!("{}", event.message());

        let stdin = std::io::stdin();
        if stdin.is_terminal() {
            eprint!("[{}] ", event.acknowledgements().join("/"));
            let _ = std::io::stderr().flush();
            let mut answer = String::new();
            let _ = stdin.lock().read_line(&mut answer);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.verbose {
        srcscope_core::logging::init_with_level("debug");
    } else {
        srcscope_core::logging::init();
    }

    if cli.version {
        println!(
            "{}",
            srcscope_core::build_info::BUILD_INFO.version_line("srcscope")
        );
        return Ok(());
    }

    let Some(command) = cli.command else {
        println!("srcscope v{}", env!("CARGO_PKG_VERSION"));
        println!("Use --help for usage information");
        return Ok(());
    };

    let settings = load_settings(cli.config, cli.project)?;
    let group = SourceGroup::new(settings, ManifestLoader)
        .context("invalid exclude filter in configuration")?
        .with_reporter(ConsoleReporter);

    match command {
        Commands::Check => {
            if !group.prepare() {
                std::process::exit(1);
            }
            println!("ok");
        }
        Commands::Scope { format } => {
            if !group.prepare() {
                std::process::exit(1);
            }
            print_paths(&group.all_source_paths(), &format)?;
        }
        Commands::Contained { paths } => {
            let candidates: BTreeSet<PathBuf> = paths.into_iter().collect();
            print_paths(&group.filter_to_contained_paths(&candidates), "plain")?;
        }
        Commands::Jobs { files } => {
            if !group.prepare() {
                std::process::exit(1);
            }
            let files_to_index: BTreeSet<PathBuf> = if files.is_empty() {
                group.all_source_paths()
            } else {
                files
                    .iter()
                    .map(|f| srcscope_core::matcher::canonicalize_lossy(f))
                    .collect()
            };
            let jobs = group.indexer_jobs(&files_to_index);
            println!("{}", serde_json::to_string_pretty(&jobs)?);
        }
        Commands::Watch { interval_ms } => {
            if !group.prepare() {
                std::process::exit(1);
            }
            watch(&group, Duration::from_millis(interval_ms))?;
        }
    }

    Ok(())
}

fn load_settings(
    config: Option<PathBuf>,
    project: Option<PathBuf>,
) -> anyhow::Result<SourceGroupSettings> {
    let config_path = config.unwrap_or_else(srcscope_core::paths::config_path);

    let mut settings = if config_path.exists() {
        SourceGroupSettings::load(&config_path)
            .with_context(|| format!("failed to load {}", config_path.display()))?
    } else {
        SourceGroupSettings::default()
    };

    if let Some(project) = project {
        settings.project_path = srcscope_core::matcher::canonicalize_lossy(&project);
    }

    Ok(settings)
}

fn print_paths(paths: &BTreeSet<PathBuf>, format: &str) -> anyhow::Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(paths)?),
        _ => {
            for path in paths {
                println!("{}", path.display());
            }
        }
    }
    Ok(())
}

fn watch(group: &SourceGroup<ManifestLoader>, interval: Duration) -> anyhow::Result<()> {
    let mut roots: BTreeSet<PathBuf> = group
        .all_source_paths()
        .iter()
        .filter_map(|source| source.parent().map(PathBuf::from))
        .collect();
    roots.extend(
        group
            .settings()
            .indexed_header_paths
            .iter()
            .filter(|root| root.is_dir())
            .cloned(),
    );
    let roots: Vec<PathBuf> = roots.into_iter().collect();

    let watcher = FileWatcher::new(&roots)?;
    info!("Watching {} directories", roots.len());

    loop {
        std::thread::sleep(interval);
        let changed = watcher.poll_changed_paths();
        if changed.is_empty() {
            continue;
        }
        for path in group.filter_to_contained_paths(&changed) {
            println!("{}", path.display());
        }
        let _ = std::io::stdout().flush();
    }
}

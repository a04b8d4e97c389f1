use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use task_rank::scoring::ScoringConfig;
use task_rank::tasks::{JsonFileSource, Task, TaskSource};

const EXIT_SUCCESS: i32 = 0;
const EXIT_SOURCE: i32 = 1;
const EXIT_CONFIG: i32 = 4;

#[derive(ValueEnum, Clone, Copy, Debug)]
enum OutputFormat {
    /// Aligned table (colored on a terminal)
    Table,
    /// Tab-separated values for scripting
    Tsv,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List open tasks sorted by priority (default if no subcommand)
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
        format: OutputFormat,
    },
    /// Show how a task's score was put together
    Explain {
        /// Index number of the task (1-based, as shown in list)
        index: usize,
    },
    /// Dashboard summary of open tasks
    Summary,
    /// Write a config file with the default scoring settings
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "task-rank")]
#[command(about = "Sales task prioritization CLI", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/task-rank/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the JSON task file
    #[arg(short, long, global = true, env = "TASK_RANK_TASKS")]
    tasks: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

fn main() {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::List {
        format: OutputFormat::Table,
    });
    let start_time = Instant::now();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| log_level.to_string()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match command {
        Commands::Init { force } => {
            let path = match cli.config {
                Some(p) => p,
                None => match task_rank::config::get_config_path() {
                    Ok(p) => p,
                    Err(e) => {
                        eprintln!("Config error: {:#}", e);
                        std::process::exit(EXIT_CONFIG);
                    }
                },
            };
            if let Err(e) = task_rank::config::write_default_config(&path, force) {
                eprintln!("Config error: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
            println!("Config written to {}", path.display());
        }
        Commands::Summary => {
            let (scoring, all_tasks) = load_inputs(cli.config, cli.tasks);
            let summary = task_rank::tasks::summarize_tasks(all_tasks, &scoring);
            println!(
                "{}",
                task_rank::output::format_summary(&summary, task_rank::output::should_use_colors())
            );
        }
        Commands::List { format } => {
            let (scoring, all_tasks) = load_inputs(cli.config, cli.tasks);
            let worklist = task_rank::tasks::split_worklist(all_tasks);
            let ranked = task_rank::scoring::rank_tasks(&worklist.prioritized, &scoring);

            match format {
                OutputFormat::Table => {
                    let use_colors = task_rank::output::should_use_colors();
                    println!(
                        "{}",
                        task_rank::output::format_scored_table(&ranked, use_colors)
                    );
                    let quick = task_rank::output::format_quick_tasks(&worklist.quick, use_colors);
                    if !quick.is_empty() {
                        println!("\n{}", quick);
                    }
                }
                OutputFormat::Tsv => {
                    let output = task_rank::output::format_tsv(&ranked, &worklist.quick);
                    if !output.is_empty() {
                        println!("{}", output);
                    }
                }
            }

            tracing::debug!(
                ranked = ranked.len(),
                quick = worklist.quick.len(),
                elapsed = ?start_time.elapsed(),
                "listed tasks"
            );
        }
        Commands::Explain { index } => {
            let (scoring, all_tasks) = load_inputs(cli.config, cli.tasks);
            let prioritized = task_rank::tasks::prioritized_tasks(all_tasks);
            let ranked = task_rank::scoring::rank_tasks(&prioritized, &scoring);

            // Validate index bounds (1-based)
            if index < 1 || index > ranked.len() {
                eprintln!(
                    "Invalid index {}. Must be between 1 and {}.",
                    index,
                    ranked.len()
                );
                std::process::exit(EXIT_CONFIG);
            }

            println!(
                "{}",
                task_rank::output::format_breakdown(
                    &ranked[index - 1],
                    task_rank::output::should_use_colors()
                )
            );
        }
    }

    std::process::exit(EXIT_SUCCESS);
}

/// Load and validate the scoring config, then load tasks.
/// Exits with the matching code on failure.
fn load_inputs(
    config_path: Option<PathBuf>,
    tasks_path: Option<PathBuf>,
) -> (ScoringConfig, Vec<Task>) {
    let config = match task_rank::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate scoring config at startup
    let scoring = config.effective_scoring();
    if let Err(errors) = task_rank::scoring::validate_scoring(&scoring) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    let source = JsonFileSource::new(tasks_path.unwrap_or_else(task_rank::tasks::default_tasks_path));
    match source.load_tasks() {
        Ok(tasks) => (scoring, tasks),
        Err(e) => {
            eprintln!("Task source error: {:#}", e);
            std::process::exit(EXIT_SOURCE);
        }
    }
}

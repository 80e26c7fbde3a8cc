use std::path::PathBuf;
use std::time::Duration;

use aitodo::ai;
use aitodo::config::{AiConfig, Config, DEFAULT_ENDPOINT, DEFAULT_MODEL};
use aitodo::output::Format;
use aitodo::store::TaskStore;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "aitodo",
    version,
    about = "Personal task tracker with optional AI prioritization"
)]
struct Cli {
    /// Output format
    #[arg(long, global = true, value_enum, default_value = "pretty")]
    format: Format,
    /// Shorthand for --format json
    #[arg(long, global = true, hide = true)]
    json: bool,
    /// Task file location (defaults to ~/.ai_todo_db.json)
    #[arg(long, global = true, env = "AITODO_DB")]
    db: Option<PathBuf>,
    /// Never call the AI service
    #[arg(long, global = true, env = "AITODO_NO_AI")]
    no_ai: bool,
    /// Gemini model name
    #[arg(long, global = true, env = "AITODO_MODEL", default_value = DEFAULT_MODEL)]
    model: String,
    /// Gemini API base URL
    #[arg(
        long,
        global = true,
        hide = true,
        env = "AITODO_GEMINI_ENDPOINT",
        default_value = DEFAULT_ENDPOINT
    )]
    endpoint: String,
    /// Seconds to wait for the AI service
    #[arg(long, global = true, hide = true, env = "AITODO_AI_TIMEOUT", default_value_t = 30)]
    ai_timeout: u64,
    /// Enable debug logging
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task, optionally within a project and with a tag
    Add {
        /// Task description
        description: String,
        /// Assign the task to a project
        #[arg(long, short)]
        project: Option<String>,
        /// Tag the task
        #[arg(long, short)]
        tag: Option<String>,
    },
    /// List tasks, optionally filtered by project or tag
    List {
        /// Filter by project
        #[arg(long, short)]
        project: Option<String>,
        /// Filter by tag
        #[arg(long, short)]
        tag: Option<String>,
        /// Ask the AI for an overview of the pending tasks
        #[arg(long)]
        ai: bool,
        /// Order pending tasks by priority score
        #[arg(long)]
        by_priority: bool,
    },
    /// Mark a task as done
    Done {
        /// Task ID
        id: u64,
    },
    /// Delete a task; remaining tasks are renumbered
    Delete {
        /// Task ID
        id: u64,
    },
    /// Show the most pressing pending task
    Next,
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "aitodo=debug,info"
    } else {
        "aitodo=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn config_from(cli: &Cli) -> Config {
    let ai = if cli.no_ai {
        AiConfig::disabled()
    } else {
        AiConfig {
            model: cli.model.clone(),
            endpoint: cli.endpoint.clone(),
            timeout: Duration::from_secs(cli.ai_timeout),
            ..AiConfig::default()
        }
        .with_api_key(std::env::var(ai::gemini::API_KEY_ENV).ok())
    };
    Config::new(cli.db.clone(), ai)
}

fn run(cli: Cli, format: Format) -> aitodo::error::Result<()> {
    let config = config_from(&cli);
    let store = TaskStore::new(&config.store_path);
    let advisor = ai::advisor_from_config(&config.ai);

    match cli.command {
        Commands::Add {
            description,
            project,
            tag,
        } => aitodo::commands::add::run(
            &store,
            advisor.as_ref(),
            description,
            project,
            tag,
            format,
        ),
        Commands::List {
            project,
            tag,
            ai,
            by_priority,
        } => aitodo::commands::list::run(
            &store,
            advisor.as_ref(),
            project,
            tag,
            ai,
            by_priority,
            format,
        ),
        Commands::Done { id } => aitodo::commands::done::run(&store, id, format),
        Commands::Delete { id } => aitodo::commands::delete::run(&store, id, format),
        Commands::Next => aitodo::commands::next::run(&store, advisor.as_ref(), format),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let format = if cli.json { Format::Json } else { cli.format };
    if let Err(e) = run(cli, format) {
        match format {
            Format::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "error": e.code(),
                        "message": e.to_string()
                    })
                );
            }
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}

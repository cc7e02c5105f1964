// Allow unwrap/expect in tests (denied globally via Cargo.toml lints)
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;
use std::path::PathBuf;
use thankful_wall::config::{load_config, StoreBackend, StoreConfig, WallConfig};
use thankful_wall::logging::{init_logging, LogConfig, LOG_FILENAME};
use thankful_wall::utils::{atomic_write, format_display_path};
use thankful_wall::{open_store, AdminGate, BulkOutcome, EntryForm, EntryId, Wall, WallView};
use tracing::{info, warn};

/// The only way besides the config file to set the admin password
const ADMIN_PASSWORD_ENV: &str = "THANKFUL_WALL_ADMIN_PASSWORD";

/// Thankful Wall - share what you are thankful for, moderated by a shared password
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Config file (default: ~/.thankful-wall/config.toml)
    #[arg(long, env = "THANKFUL_WALL_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Entries file used by the json backend
    #[arg(long, env = "THANKFUL_WALL_DATA", global = true)]
    data: Option<PathBuf>,

    /// Storage backend
    #[arg(long, env = "THANKFUL_WALL_BACKEND", value_enum, global = true)]
    backend: Option<StoreBackend>,

    /// Enable JSON log format (for log aggregation)
    #[arg(long, env = "THANKFUL_WALL_LOG_JSON", default_value = "false", global = true)]
    log_json: bool,

    /// Log rotation period: daily, hourly, or never
    #[arg(long, env = "THANKFUL_WALL_LOG_ROTATION", global = true)]
    log_rotation: Option<String>,

    /// Custom log directory (default: ~/.thankful-wall/logs)
    #[arg(long, env = "THANKFUL_WALL_LOG_DIR", global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the wall in display order
    List,
    /// Show entry counts
    Stats,
    /// Add an entry to the wall
    Submit(EntryArgs),
    /// Replace the text of an entry
    Edit {
        id: String,
        #[command(flatten)]
        entry: EntryArgs,
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Feature entries in the given order; no ids unfeatures everything
    Feature {
        ids: Vec<String>,
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Unfeature every featured entry
    ResetOrder {
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Delete one entry
    Delete {
        id: String,
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Delete every entry
    DeleteAll {
        /// Must be exactly "DELETE ALL"
        #[arg(long)]
        confirm: String,
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Append the entries of an exported or legacy entries file
    Import {
        file: PathBuf,
        #[command(flatten)]
        auth: AuthArgs,
    },
    /// Write every entry as JSON to a file, or to stdout
    Export {
        #[arg(long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        auth: AuthArgs,
    },
}

#[derive(clap::Args, Debug)]
struct EntryArgs {
    #[arg(long)]
    english_name: String,
    #[arg(long)]
    chinese_name: String,
    /// Role or class; left blank it becomes "Not specified"
    #[arg(long, default_value = "")]
    role_class: String,
    #[arg(long)]
    thankful_for: String,
}

impl From<EntryArgs> for EntryForm {
    fn from(args: EntryArgs) -> Self {
        Self {
            english_name: args.english_name,
            chinese_name: args.chinese_name,
            role_class: args.role_class,
            thankful_for: args.thankful_for,
        }
    }
}

#[derive(clap::Args, Debug)]
struct AuthArgs {
    /// Admin password
    #[arg(long)]
    password: String,
}

fn apply_overrides(config: &mut WallConfig, args: &Args, admin_password: Option<String>) {
    if let Some(data) = &args.data {
        config.store.path.clone_from(data);
    }
    if let Some(backend) = args.backend {
        config.store.backend = backend;
    }
    if admin_password.is_some() {
        config.admin.password = admin_password;
    }
    if args.log_json {
        config.logging.json = true;
    }
    if let Some(rotation) = &args.log_rotation {
        config.logging.rotation.clone_from(rotation);
    }
    if args.log_dir.is_some() {
        config.logging.dir.clone_from(&args.log_dir);
    }
}

fn backend_warning(config: &StoreConfig) -> Option<&'static str> {
    (config.backend == StoreBackend::Memory)
        .then_some("Memory backend selected: entries are lost when this command exits")
}

fn print_stats(view: &WallView) {
    println!(
        "{} entries: {} from teachers, {} from students",
        view.stats.total, view.stats.teachers, view.stats.students
    );
}

fn print_wall(view: &WallView) {
    if let Some(notice) = &view.notice {
        println!("The wall is temporarily unavailable: {notice}");
    }
    if view.entries.is_empty() {
        println!("No entries yet. Be the first to share what you are thankful for!");
        return;
    }

    for (id, entry) in &view.entries {
        let featured = entry
            .manual_order
            .map_or_else(String::new, |n| format!("  [featured #{n}]"));
        println!("#{id}{featured}");
        println!("  {} ({})", entry.english_name, entry.chinese_name);
        println!("  {}", entry.role_class);
        println!("  Thankful for: {}", entry.thankful_for);
        println!();
    }
    print_stats(view);
}

fn print_bulk(action: &str, outcome: &BulkOutcome) {
    println!("{action}: {} succeeded", outcome.succeeded);
    for failure in &outcome.failed {
        println!("  {} failed: {}", failure.id, failure.reason);
    }
}

async fn run(wall: &Wall, command: Command) -> Result<()> {
    match command {
        Command::List => print_wall(&wall.view().await),
        Command::Stats => print_stats(&wall.view().await),
        Command::Submit(entry) => {
            let id = wall.submit(&entry.into()).await?;
            println!("Thank you! Your entry was added as #{id}.");
        }
        Command::Edit { id, entry, auth } => {
            let id = EntryId::new(id);
            wall.unlock(&auth.password)?
                .edit(&id, &entry.into())
                .await?;
            println!("Updated entry #{id}.");
        }
        Command::Feature { ids, auth } => {
            let selection: Vec<EntryId> = ids.into_iter().map(EntryId::new).collect();
            let outcome = wall.unlock(&auth.password)?.feature(&selection).await?;
            println!(
                "Featured {} entries; {} others unfeatured.",
                outcome.featured, outcome.cleared
            );
        }
        Command::ResetOrder { auth } => {
            let outcome = wall.unlock(&auth.password)?.reset_order().await?;
            print_bulk("Reset featured order", &outcome);
        }
        Command::Delete { id, auth } => {
            let id = EntryId::new(id);
            wall.unlock(&auth.password)?.delete(&id).await?;
            println!("Deleted entry #{id}.");
        }
        Command::DeleteAll { confirm, auth } => {
            let outcome = wall.unlock(&auth.password)?.delete_all(&confirm).await?;
            print_bulk("Delete all", &outcome);
        }
        Command::Import { file, auth } => {
            let outcome = wall.unlock(&auth.password)?.import(&file).await?;
            print_bulk("Import", &outcome);
        }
        Command::Export { output, auth } => {
            let document = wall.unlock(&auth.password)?.export().await?;
            let json = serde_json::to_string_pretty(&document)?;
            match output {
                Some(path) => {
                    atomic_write(&path, &json).await?;
                    println!(
                        "Exported {} entries to {}",
                        document.entries.len(),
                        format_display_path(&path.to_string_lossy())
                    );
                }
                None => println!("{json}"),
            }
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Install color-eyre error hooks for colored error output
    color_eyre::install()?;

    let args = Args::parse();

    let mut config = load_config(args.config.as_deref())?;
    apply_overrides(&mut config, &args, std::env::var(ADMIN_PASSWORD_ENV).ok());

    let log_config = LogConfig::from_settings(&config.logging);
    let log_file = log_config.log_dir.join(LOG_FILENAME);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("Error: Failed to initialize logging: {e}");
        eprintln!("Logs: {}", log_file.display());
        return Err(e);
    }
    info!("Logging to {}", log_file.display());

    if let Some(warning) = backend_warning(&config.store) {
        warn!("{}", warning);
        eprintln!("Warning: {warning}");
    }
    let store = open_store(&config.store).await;
    let wall = Wall::new(store, AdminGate::from_config(&config.admin));

    run(&wall, args.command).await
}

mod app;
mod domain;
mod item;
mod seed;
mod store;
mod ui;

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app::App;
use store::TaskStore;

#[derive(Parser, Debug)]
#[command(author, version, about = "ticklist: a small in-memory todo screen", long_about = None)]
struct Args {
    /// Tick interval of render loop in milliseconds
    #[arg(long, default_value_t = 120)]
    tick_ms: u64,

    /// Start with demo tasks
    #[arg(long, default_value_t = false)]
    demo: bool,

    /// JSON file with initial tasks (array of titles or {"title", "done"} objects)
    #[arg(long)]
    seed: Option<PathBuf>,

    /// Log file (default: OS cache dir)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Disable logging
    #[arg(long, default_value_t = false)]
    no_log: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    if !args.no_log {
        let path = match args.log_file.clone() {
            Some(path) => path,
            None => default_log_path()?,
        };
        init_logging(&path)?;
    }

    let mut store = TaskStore::default();
    if args.demo {
        seed::apply(&mut store, &seed::demo());
    }
    if let Some(path) = args.seed.as_ref() {
        let entries = seed::read(path)?;
        let added = seed::apply(&mut store, &entries);
        info!(path = %path.display(), added, "seed loaded");
    }

    ui::run(App::new(store), Duration::from_millis(args.tick_ms))
}

fn init_logging(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create log dir {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ticklist=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn default_log_path() -> Result<PathBuf> {
    let base = dirs::cache_dir().context("failed to resolve cache dir")?;
    Ok(base.join("ticklist").join("ticklist.log"))
}

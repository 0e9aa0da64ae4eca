use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::ingest::{IngestReport, RefreshPolicy, load_or_refresh};
use crate::models::Actor;
use crate::month_index::MonthIndex;
use crate::parsers::load_actor;
use crate::server::{self, AppState};

#[derive(Parser)]
#[command(name = "masto-archive-viewer")]
#[command(version = "0.1.0")]
#[command(about = "Browse and search a Mastodon export archive", long_about = None)]
pub struct Cli {
    /// Directory containing actor.json and the outbox export
    #[arg(long, default_value = ".")]
    pub archive: PathBuf,

    /// Snapshot cache directory (defaults to .snapshot-cache inside the
    /// archive directory)
    #[arg(long)]
    pub cache_dir: Option<PathBuf>,

    /// Ignore any cached snapshot and re-ingest the export
    #[arg(long)]
    pub rebuild: bool,

    /// Keep serving the cached snapshot even if the export changed
    #[arg(long)]
    pub no_update: bool,

    /// Port to serve on
    #[arg(long, default_value_t = 8000)]
    pub port: u16,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest the archive and print statistics instead of serving
    Stats,
}

pub async fn run() -> Result<()> {
    let cli = Cli::parse();

    let actor_path = cli.archive.join("actor.json");
    let actor = load_actor(&actor_path)?;

    let outbox = if PathBuf::from(&actor.outbox).is_absolute() {
        PathBuf::from(&actor.outbox)
    } else {
        cli.archive.join(&actor.outbox)
    };
    let cache_dir = cli.cache_dir.clone().unwrap_or_else(|| cli.archive.join(".snapshot-cache"));
    let policy = RefreshPolicy { force_rebuild: cli.rebuild, skip_update: cli.no_update };

    let report = load_or_refresh(&outbox, &cache_dir, &policy)?;

    match cli.command {
        Some(Commands::Stats) => {
            show_stats(&actor, &report)?;
            Ok(())
        }
        None => {
            let index = MonthIndex::build(report.snapshot.records.values())
                .context("the archive contains no posts to serve")?;
            let state = AppState { actor, snapshot: report.snapshot, index };
            server::serve(Arc::new(state), cli.port).await
        }
    }
}

fn show_stats(actor: &Actor, report: &IngestReport) -> Result<()> {
    let snapshot = &report.snapshot;
    let toots = snapshot.records.values();

    let sensitive = toots.clone().filter(|t| t.sensitive).count();
    let with_media = toots.clone().filter(|t| !t.attachments.is_empty()).count();
    let polls = toots.clone().filter(|t| t.poll.is_some()).count();
    let replies = toots.clone().filter(|t| t.in_reply_to.is_some()).count();

    println!("Archive statistics for @{}", actor.username);
    println!("================================");
    println!("Total toots: {}", snapshot.len());
    println!("  Content-warned: {sensitive}");
    println!("  With media: {with_media}");
    println!("  With polls: {polls}");
    println!("  Replies: {replies}");
    println!("Change since last run: {:+}", report.delta);
    if report.stale {
        println!("(snapshot is stale; re-run without --no-update to refresh)");
    }

    if let Ok(index) = MonthIndex::build(snapshot.records.values()) {
        println!();
        println!(
            "Span: {} to {} (busiest month: {} toots)",
            index.earliest_month().format("%Y-%m"),
            index.latest_month().format("%Y-%m"),
            index.max_count()
        );
    }

    Ok(())
}

//! Command-line front end for the goal dashboard.
//!
//! # Responsibility
//! - Parse user intents and forward them to `selfcare_core` services.
//! - Render goals with their urgency color; own no business rules.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;
use selfcare_core::{
    core_version, init_logging, now_millis, Dashboard, DashboardConfig, Goal, GoalDraft,
    GoalServiceError, GoalsFilter, Lookup, Urgency,
};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "selfcare", about = "Track recurring habits to chase or avoid")]
struct Cli {
    /// JSON config file; flags below override its fields.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// SQLite database file. Goals stay in memory when omitted.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Absolute directory for rolling log files.
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Pre-fill the remote stand-in with demo goals.
    #[arg(long, global = true)]
    seed: bool,

    /// Print list, show and stats output as JSON.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List goals with their urgency color.
    List {
        #[arg(long, default_value = "all")]
        filter: GoalsFilter,
        /// Bypass the cache and reload from the stores.
        #[arg(long)]
        refresh: bool,
    },
    /// Show one goal with its urgency details.
    Show { id: String },
    /// Add a new goal.
    Add(DraftArgs),
    /// Replace title, interval and polarity of a goal.
    Edit {
        id: String,
        #[command(flatten)]
        draft: DraftArgs,
    },
    /// Record that you acted on a goal just now.
    Touch { id: String },
    Archive { id: String },
    Activate { id: String },
    Delete { id: String },
    /// Delete every archived goal.
    ClearArchived,
    /// Delete every goal.
    DeleteAll,
    /// Show active/archived counts.
    Stats,
    /// Drop the cached list and reload it from the stores.
    Refresh,
    /// Print the effective settings after flag overrides.
    Config,
    Version,
}

impl Command {
    fn name(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Show { .. } => "show",
            Self::Add(_) => "add",
            Self::Edit { .. } => "edit",
            Self::Touch { .. } => "touch",
            Self::Archive { .. } => "archive",
            Self::Activate { .. } => "activate",
            Self::Delete { .. } => "delete",
            Self::ClearArchived => "clear-archived",
            Self::DeleteAll => "delete-all",
            Self::Stats => "stats",
            Self::Refresh => "refresh",
            Self::Config => "config",
            Self::Version => "version",
        }
    }
}

#[derive(Debug, Args)]
struct DraftArgs {
    #[arg(long)]
    title: String,
    /// Days between recurrences.
    #[arg(long, default_value_t = 1)]
    interval: i64,
    /// Mark the goal as something to avoid instead of chase.
    #[arg(long)]
    avoid: bool,
}

impl DraftArgs {
    fn to_draft(&self) -> GoalDraft {
        GoalDraft::new(self.title.as_str(), self.interval, !self.avoid)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(&config.log_level, log_dir).context("failed to initialize logging")?;
    }

    let dashboard = Dashboard::open(&config).context("failed to open goal store")?;
    info!("event=cli_command module=cli status=start command={}", cli.command.name());
    run(&dashboard, &config, cli.command, cli.json).await
}

fn resolve_config(cli: &Cli) -> Result<DashboardConfig> {
    let mut config = match &cli.config {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.db_path = Some(db.clone());
    }
    if let Some(log_dir) = &cli.log_dir {
        config.log_dir = Some(log_dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log_level = level.clone();
    }
    config.seed_remote |= cli.seed;
    config.validate()?;
    Ok(config)
}

async fn run(
    dashboard: &Dashboard,
    config: &DashboardConfig,
    command: Command,
    json: bool,
) -> Result<()> {
    let service = dashboard.service();
    match command {
        Command::List { filter, refresh } => {
            let goals = service
                .load_goals(filter, refresh)
                .await
                .into_option()
                .unwrap_or_default();
            let now = now_millis();
            if json {
                let rows: Vec<_> = goals.iter().map(|goal| GoalRow::new(goal, now)).collect();
                print_json(&rows)?;
            } else if goals.is_empty() {
                println!("No {filter} goals.");
            } else {
                for goal in &goals {
                    println!("{}", render_goal(goal, now));
                }
            }
        }
        Command::Show { id } => {
            let goal = service.get_goal(&id).await.map_err(user_error)?;
            let row = GoalRow::new(&goal, now_millis());
            if json {
                print_json(&row)?;
            } else {
                print!("{}", render_detail(&row));
            }
        }
        Command::Add(args) => {
            let goal = service
                .create_goal(&args.to_draft(), now_millis())
                .map_err(user_error)?;
            println!("Goal added: {}", goal.id);
        }
        Command::Edit { id, draft } => {
            service
                .update_goal(&id, &draft.to_draft())
                .await
                .map_err(user_error)?;
            println!("Goal saved.");
        }
        Command::Touch { id } => {
            let goal = service
                .touch_goal(&id, now_millis())
                .await
                .map_err(user_error)?;
            println!("{}", render_goal(&goal, goal.touched));
        }
        Command::Archive { id } => {
            service.set_archived(&id, true).await.map_err(user_error)?;
            println!("Goal archived.");
        }
        Command::Activate { id } => {
            service.set_archived(&id, false).await.map_err(user_error)?;
            println!("Goal marked active.");
        }
        Command::Delete { id } => {
            service.delete_goal(&id).await.map_err(user_error)?;
            println!("Goal deleted.");
        }
        Command::ClearArchived => {
            service.clear_archived_goals();
            println!("Archived goals cleared.");
        }
        Command::DeleteAll => {
            dashboard.repository().delete_all_goals();
            println!("All goals deleted.");
        }
        Command::Stats => {
            let stats = service
                .load_statistics()
                .await
                .into_option()
                .unwrap_or_default();
            if json {
                print_json(&stats)?;
            } else if stats.is_empty() {
                println!("You have no goals.");
            } else {
                println!("Active goals: {}", stats.active);
                println!("Archived goals: {}", stats.archived);
            }
        }
        Command::Refresh => match service.load_goals(GoalsFilter::All, true).await {
            Lookup::Loaded(goals) => println!("Reloaded {} goals.", goals.len()),
            Lookup::NotAvailable => println!("No goals available."),
        },
        Command::Config => print_json(config)?,
        Command::Version => println!("selfcare_core version={}", core_version()),
    }
    Ok(())
}

/// Goal plus its urgency at render time, as printed by `--json`.
#[derive(Debug, Serialize)]
struct GoalRow<'a> {
    #[serde(flatten)]
    goal: &'a Goal,
    urgency: Urgency,
    color_hex: String,
}

impl<'a> GoalRow<'a> {
    fn new(goal: &'a Goal, now_ms: i64) -> Self {
        let urgency = Urgency::of(goal, now_ms);
        Self {
            goal,
            urgency,
            color_hex: urgency.color.to_hex(),
        }
    }
}

fn print_json(value: &impl Serialize) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn render_detail(row: &GoalRow<'_>) -> String {
    let goal = row.goal;
    format!(
        "id:        {id}\n\
         title:     {title}\n\
         kind:      {kind}\n\
         interval:  every {interval}d\n\
         touched:   {elapsed:.1}d ago ({percent:.0}% of interval)\n\
         color:     {color}\n\
         status:    {status}\n",
        id = goal.id,
        title = goal.title_for_list(),
        kind = if goal.polarity { "chase" } else { "avoid" },
        interval = goal.interval,
        elapsed = row.urgency.elapsed_days,
        percent = row.urgency.fraction_elapsed * 100.0,
        color = row.color_hex,
        status = if goal.archived { "archived" } else { "active" },
    )
}

fn render_goal(goal: &Goal, now_ms: i64) -> String {
    let urgency = Urgency::of(goal, now_ms);
    format!(
        "{id}  {color}  {mark} {title}  every {interval}d  {elapsed:.1}d ago{archived}",
        id = goal.id,
        color = urgency.color.to_hex(),
        mark = if goal.polarity { "+" } else { "-" },
        title = goal.title_for_list(),
        interval = goal.interval,
        elapsed = urgency.elapsed_days,
        archived = if goal.archived { "  [archived]" } else { "" },
    )
}

fn user_error(err: GoalServiceError) -> anyhow::Error {
    match err {
        GoalServiceError::EmptyGoal => anyhow::anyhow!("Goals cannot be empty."),
        other => anyhow::Error::new(other),
    }
}

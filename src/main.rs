// Week Scheduler
// Command-line entry point

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

use week_scheduler::config::AppConfig;
use week_scheduler::layout::WeekLayout;
use week_scheduler::models::week::WeekWindow;
use week_scheduler::schedule::{
    Clock, DragController, DragOrigin, RescheduleOutcome, ScheduleBoard, SystemClock,
};
use week_scheduler::services::database::Database;
use week_scheduler::services::SqliteStore;
use week_scheduler::utils::date::{format_range, parse_iso_date, weekday_label};

#[derive(Parser)]
#[command(
    name = "week-scheduler",
    about = "Weekly schedule layout with drag-to-reschedule and audit history",
    version,
    long_about = None
)]
struct Cli {
    /// Config file (defaults to the per-user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file, overriding the config
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lay out one user's week
    Layout {
        #[arg(long)]
        user: String,

        /// Any date inside the week to show (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = parse_date_arg)]
        week: Option<NaiveDate>,

        /// JSON output for machine parsing
        #[arg(long)]
        json: bool,
    },

    /// Move an item so it starts on another day, keeping its duration
    Move {
        #[arg(long)]
        item: String,

        /// New start date (YYYY-MM-DD)
        #[arg(long, value_parser = parse_date_arg)]
        to: NaiveDate,

        /// Name recorded in the item's history
        #[arg(long)]
        actor: Option<String>,
    },

    /// Show an item's change history, newest first
    History {
        #[arg(long)]
        item: String,
    },
}

fn parse_date_arg(value: &str) -> Result<NaiveDate, String> {
    parse_iso_date(value).ok_or_else(|| format!("invalid date '{}', expected YYYY-MM-DD", value))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };
    let db_path = match cli.db {
        Some(path) => path,
        None => config.resolved_database_path()?,
    };

    log::info!("Using database {:?}", db_path);
    let database = Database::open(&db_path)?;
    database.initialize_schema()?;
    let store = SqliteStore::new(database.connection());
    let clock = SystemClock;

    match cli.command {
        Commands::Layout { user, week, json } => {
            let week = WeekWindow::containing(week.unwrap_or_else(|| clock.today()));
            let mut board = ScheduleBoard::new(user, week);
            board.refresh(&store)?;

            let layout = board
                .layout(&config.geometry, clock.today())
                .ok_or_else(|| anyhow!("Schedule is not loaded"))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&layout)?);
            } else {
                print_layout(&layout, &config.date_format);
            }
        }
        Commands::Move { item, to, actor } => {
            let persisted = store
                .items()
                .get(&item)?
                .with_context(|| format!("Item {} not found", item))?;
            let anchor = persisted
                .start
                .or(persisted.end)
                .or(persisted.deadline)
                .unwrap_or(to);

            let mut board = ScheduleBoard::new(persisted.user_id, WeekWindow::containing(anchor));
            board.refresh(&store)?;

            let actor = actor.unwrap_or_else(|| config.actor_name.clone());
            let mut drag = DragController::new(actor, config.date_format.clone());
            if !drag.begin(&board, &item, DragOrigin::Body) {
                bail!("Item {} cannot be moved", item);
            }
            drag.hover(Some(to));

            match drag.finish(&mut board, Some(to), &store, &clock)? {
                Some(RescheduleOutcome::Moved { item_id, plan }) => {
                    println!(
                        "{}: {} -> {}",
                        item_id,
                        format_range(plan.old_start, plan.old_end, &config.date_format),
                        format_range(plan.new_start, plan.new_end, &config.date_format)
                    );
                }
                Some(RescheduleOutcome::Unchanged { item_id }) => {
                    println!("{}: already scheduled there", item_id);
                }
                None => println!("{}: move cancelled", item),
            }
        }
        Commands::History { item } => {
            let history = store.items().history(&item)?;
            if history.is_empty() {
                println!("No history for {}", item);
            }
            for entry in history.newest_first() {
                println!(
                    "{}  {}  {}: {} -> {}",
                    entry.changed_at.format("%Y-%m-%d %H:%M"),
                    entry.actor,
                    entry.field,
                    entry.old_value,
                    entry.new_value
                );
            }
        }
    }

    Ok(())
}

fn print_layout(layout: &WeekLayout, date_format: &str) {
    println!(
        "Week {}",
        format_range(layout.week.start(), layout.week.end(), date_format)
    );
    let header: Vec<String> = layout
        .days
        .iter()
        .map(|day| {
            let marker = if day.is_today { "*" } else { " " };
            format!("{}{} {}", marker, day.label, day.date.format("%d"))
        })
        .collect();
    println!("{}", header.join(" | "));

    for row in 0..layout.row_count {
        for bar in layout.row(row) {
            let first = layout.week.day_at(bar.day_offset).unwrap_or(bar.start);
            println!(
                "  row {} {}{}{} {} [{}] {} ({})",
                row,
                if bar.continues_before { "<" } else { " " },
                weekday_label(first),
                if bar.continues_after { ">" } else { " " },
                bar.item_id,
                bar.status,
                bar.name,
                format_range(bar.start, bar.end, date_format)
            );
        }
    }
}

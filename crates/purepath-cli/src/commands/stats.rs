use chrono::Utc;
use clap::Subcommand;
use purepath_core::stats::PHASE_LENGTH_DAYS;
use purepath_core::{Config, Database, StatsStore};

use super::{confirm, print_json, CmdResult};

#[derive(Subcommand)]
pub enum StatsAction {
    /// Print the stats summary as JSON
    Show,
    /// Print the summary as a StatsSnapshot event
    Snapshot,
    /// Human-readable dashboard
    Dashboard,
    /// Record a daily check-in
    Checkin,
    /// Record a relapse and restart the streak
    Relapse {
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
    /// Set the recovery level
    SetLevel {
        level: u32,
    },
}

fn progress_bar(pct: f64, width: usize) -> String {
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

pub fn run(action: StatsAction) -> CmdResult {
    let db = Database::open()?;
    let store = StatsStore::new(&db);
    let now = Utc::now();

    match action {
        StatsAction::Show => {
            let stats = store.load_stats(now)?;
            print_json(&stats.summary(now))?;
        }
        StatsAction::Snapshot => {
            let stats = store.load_stats(now)?;
            print_json(&stats.summary(now).to_event(now))?;
        }
        StatsAction::Dashboard => {
            let stats = store.load_stats(now)?;
            let summary = stats.summary(now);
            let name = store
                .load_user()?
                .filter(|u| !u.is_guest)
                .map(|u| u.name)
                .unwrap_or_else(|| "friend".to_string());

            println!("Welcome back, {name}.");
            println!();
            println!("  Current streak   {} days", summary.current_streak_days);
            println!("  Longest streak   {} days", summary.longest_streak);
            println!("  Check-ins        {}", summary.total_checkins);
            println!("  Level            {}", summary.level);
            println!(
                "  Phase progress   {} {:.0}% of {PHASE_LENGTH_DAYS} days",
                progress_bar(summary.phase_progress_pct, 30),
                summary.phase_progress_pct
            );
            if let Some(at) = summary.last_relapse_date {
                println!("  Last relapse     {}", at.format("%Y-%m-%d"));
            }
        }
        StatsAction::Checkin => {
            let (_, event) = store.update_stats(now, |s| s.check_in(now))?;
            eprintln!("Check-in recorded");
            print_json(&event)?;
        }
        StatsAction::Relapse { yes } => {
            let config = Config::load_or_default();
            if !yes
                && config.ui.show_relapse_confirmation
                && !confirm("Reset your streak? Honesty is the first step to recovery.")?
            {
                eprintln!("cancelled");
                return Ok(());
            }
            let (_, event) = store.update_stats(now, |s| s.relapse(now))?;
            print_json(&event)?;
        }
        StatsAction::SetLevel { level } => {
            let (_, event) = store.update_stats(now, |s| s.set_level(level, now))?;
            print_json(&event)?;
        }
    }
    Ok(())
}

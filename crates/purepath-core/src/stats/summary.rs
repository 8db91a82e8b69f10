//! Dashboard snapshot of [`UserStats`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UserStats;
use crate::events::Event;

/// Length of one progress phase shown on the dashboard.
pub const PHASE_LENGTH_DAYS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub current_streak_days: u64,
    pub longest_streak: u64,
    pub total_checkins: u64,
    pub level: u32,
    /// 0.0 .. 100.0 progress through the current 30-day phase.
    pub phase_progress_pct: f64,
    pub streak_start_date: Option<DateTime<Utc>>,
    pub last_relapse_date: Option<DateTime<Utc>>,
}

impl StatsSummary {
    pub fn from_stats(stats: &UserStats, now: DateTime<Utc>) -> Self {
        let current = stats.current_streak_days(now);
        Self {
            current_streak_days: current,
            longest_streak: stats.longest_streak,
            total_checkins: stats.total_checkins,
            level: stats.level,
            phase_progress_pct: phase_progress_pct(current),
            streak_start_date: stats.streak_start_date,
            last_relapse_date: stats.last_relapse_date,
        }
    }

    pub fn to_event(&self, at: DateTime<Utc>) -> Event {
        Event::StatsSnapshot {
            current_streak_days: self.current_streak_days,
            longest_streak: self.longest_streak,
            total_checkins: self.total_checkins,
            level: self.level,
            phase_progress_pct: self.phase_progress_pct,
            at,
        }
    }
}

fn phase_progress_pct(streak_days: u64) -> f64 {
    let into_phase = (streak_days % PHASE_LENGTH_DAYS) as f64;
    (into_phase / PHASE_LENGTH_DAYS as f64 * 100.0).min(100.0)
}

//! Streak and recovery statistics.
//!
//! [`UserStats`] is a single fixed-shape record. Its two mutations are
//! monotonic: [`UserStats::check_in`] only ever increments the check-in
//! counter and [`UserStats::relapse`] resets the streak while raising the
//! longest-streak high-water mark. Neither can fail.
//!
//! ## State Transitions
//!
//! ```text
//! check_in:  total_checkins += 1
//! relapse:   elapsed = current_streak_days(now)
//!            last_relapse_date = now
//!            streak_start_date = now
//!            longest_streak    = max(longest_streak, elapsed)
//! ```

mod summary;

pub use summary::{StatsSummary, PHASE_LENGTH_DAYS};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::events::Event;

/// Milliseconds in one streak day.
pub const MS_PER_DAY: i64 = 1000 * 60 * 60 * 24;

/// Recovery statistics for the local user.
///
/// Serialized with camelCase keys and instants as integer milliseconds since
/// the Unix epoch. Absent instants are written as explicit `null`s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    /// When the current streak began.
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub streak_start_date: Option<DateTime<Utc>>,
    /// Largest completed streak, in whole days.
    pub longest_streak: u64,
    pub total_checkins: u64,
    #[serde(with = "chrono::serde::ts_milliseconds_option")]
    pub last_relapse_date: Option<DateTime<Utc>>,
    /// Gamification level. Set externally, never advanced by the engine.
    pub level: u32,
}

impl UserStats {
    /// Fresh stats for a first-time user: the streak starts at `now`.
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            streak_start_date: Some(now),
            longest_streak: 0,
            total_checkins: 0,
            last_relapse_date: None,
            level: 1,
        }
    }

    // ── Queries ──────────────────────────────────────────────────────

    /// Whole days elapsed since the streak started.
    ///
    /// Returns 0 when there is no start date, and also when `now` lies
    /// before the start date.
    pub fn current_streak_days(&self, now: DateTime<Utc>) -> u64 {
        let Some(start) = self.streak_start_date else {
            return 0;
        };
        let elapsed_ms = (now - start).num_milliseconds();
        elapsed_ms.div_euclid(MS_PER_DAY).max(0) as u64
    }

    pub fn summary(&self, now: DateTime<Utc>) -> StatsSummary {
        StatsSummary::from_stats(self, now)
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Log continued engagement. Leaves the streak untouched.
    pub fn check_in(&mut self, now: DateTime<Utc>) -> Event {
        self.total_checkins = self.total_checkins.saturating_add(1);
        info!(total_checkins = self.total_checkins, "check-in recorded");
        Event::CheckInRecorded {
            total_checkins: self.total_checkins,
            at: now,
        }
    }

    /// End the current streak at `now` and start a new one immediately.
    ///
    /// All fields are derived from one `elapsed` snapshot taken before any
    /// field is written.
    pub fn relapse(&mut self, now: DateTime<Utc>) -> Event {
        let elapsed = self.current_streak_days(now);
        let longest = self.longest_streak.max(elapsed);

        self.last_relapse_date = Some(now);
        self.streak_start_date = Some(now);
        self.longest_streak = longest;

        info!(
            ended_streak_days = elapsed,
            longest_streak = longest,
            "relapse recorded"
        );
        Event::RelapseRecorded {
            ended_streak_days: elapsed,
            longest_streak: longest,
            at: now,
        }
    }

    /// Set the gamification level. Levels below 1 are raised to 1.
    pub fn set_level(&mut self, level: u32, now: DateTime<Utc>) -> Event {
        let from = self.level;
        self.level = level.max(1);
        Event::LevelChanged {
            from,
            to: self.level,
            at: now,
        }
    }
}

/// Pure form of [`UserStats::check_in`].
pub fn check_in(stats: &UserStats, now: DateTime<Utc>) -> UserStats {
    let mut next = stats.clone();
    next.check_in(now);
    next
}

/// Pure form of [`UserStats::relapse`].
pub fn relapse(stats: &UserStats, now: DateTime<Utc>) -> UserStats {
    let mut next = stats.clone();
    next.relapse(now);
    next
}

/// Pure form of [`UserStats::current_streak_days`].
pub fn current_streak_days(stats: &UserStats, now: DateTime<Utc>) -> u64 {
    stats.current_streak_days(now)
}

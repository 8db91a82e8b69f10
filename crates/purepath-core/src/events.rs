use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Every state change in the system produces an Event.
/// The CLI prints them as JSON; nothing subscribes to them yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    CheckInRecorded {
        total_checkins: u64,
        at: DateTime<Utc>,
    },
    /// A relapse closed the previous streak and opened a new one.
    RelapseRecorded {
        ended_streak_days: u64,
        longest_streak: u64,
        at: DateTime<Utc>,
    },
    LevelChanged {
        from: u32,
        to: u32,
        at: DateTime<Utc>,
    },
    UserSignedIn {
        user_id: String,
        name: String,
        is_guest: bool,
        at: DateTime<Utc>,
    },
    UserSignedOut {
        at: DateTime<Utc>,
    },
    ShieldGuideConfigured {
        guide_id: String,
        at: DateTime<Utc>,
    },
    StatsSnapshot {
        current_streak_days: u64,
        longest_streak: u64,
        total_checkins: u64,
        level: u32,
        phase_progress_pct: f64,
        at: DateTime<Utc>,
    },
}

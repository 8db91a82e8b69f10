//! Typed records on top of the kv table.
//!
//! Stored blobs are never trusted: they are parsed into a lenient shape and
//! normalized, and anything unreadable is replaced by defaults.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::Database;
use crate::content::library;
use crate::error::Result;
use crate::events::Event;
use crate::stats::UserStats;
use crate::user::User;

pub const STATS_KEY: &str = "purepath_stats";
pub const USER_KEY: &str = "purepath_user";
pub const SHIELD_KEY: &str = "purepath_shield";

/// On-disk shape of [`UserStats`]; every field may be absent or mistyped.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct StoredStats {
    streak_start_date: Option<Value>,
    longest_streak: Option<Value>,
    total_checkins: Option<Value>,
    last_relapse_date: Option<Value>,
    level: Option<Value>,
}

/// A stored instant in epoch milliseconds, if it is one.
fn instant(value: Option<Value>, field: &str) -> Option<DateTime<Utc>> {
    let value = value?;
    let parsed = match &value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .and_then(DateTime::from_timestamp_millis),
        _ => None,
    };
    if parsed.is_none() {
        warn!(field, value = %value, "stored instant unreadable, treating as absent");
    }
    parsed
}

/// A stored non-negative counter. Negative values clamp to 0.
fn count(value: Option<Value>, field: &str) -> Option<u64> {
    let value = value?;
    let parsed = match &value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_i64().map(|i| i.max(0) as u64))
            .or_else(|| n.as_f64().map(|f| f.max(0.0) as u64)),
        _ => None,
    };
    if parsed.is_none() {
        warn!(field, value = %value, "stored counter unreadable, using default");
    }
    parsed
}

impl StoredStats {
    fn normalize(self) -> UserStats {
        let level = count(self.level, "level").unwrap_or(1);
        UserStats {
            streak_start_date: instant(self.streak_start_date, "streakStartDate"),
            longest_streak: count(self.longest_streak, "longestStreak").unwrap_or(0),
            total_checkins: count(self.total_checkins, "totalCheckins").unwrap_or(0),
            last_relapse_date: instant(self.last_relapse_date, "lastRelapseDate"),
            level: u32::try_from(level).unwrap_or(u32::MAX).max(1),
        }
    }
}

/// Persistence for stats, identity, shield progress and library articles.
pub struct StatsStore<'a> {
    db: &'a Database,
}

impl<'a> StatsStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    // ── Stats ────────────────────────────────────────────────────────

    /// Load stats, normalizing each stored field on its own.
    ///
    /// A missing record gets first-run defaults, which are written back so
    /// the streak starts counting from the first run. A record that is not
    /// a JSON object yields defaults but is left untouched until the next
    /// mutation.
    ///
    /// # Errors
    /// Returns an error if the database read or the first-run write fails.
    pub fn load_stats(&self, now: DateTime<Utc>) -> Result<UserStats> {
        let Some(json) = self.db.kv_get(STATS_KEY)? else {
            debug!("no stored stats, starting a new record");
            return self.init_stats(now);
        };
        match serde_json::from_str::<StoredStats>(&json) {
            Ok(stored) => Ok(stored.normalize()),
            Err(e) => {
                warn!(error = %e, "stored stats unreadable, using defaults");
                Ok(UserStats::new(now))
            }
        }
    }

    fn init_stats(&self, now: DateTime<Utc>) -> Result<UserStats> {
        let stats = UserStats::new(now);
        self.save_stats(&stats)?;
        Ok(stats)
    }

    /// # Errors
    /// Returns an error if serialization or the database write fails.
    pub fn save_stats(&self, stats: &UserStats) -> Result<()> {
        let json = serde_json::to_string(stats)?;
        self.db.kv_set(STATS_KEY, &json)?;
        Ok(())
    }

    /// Load, apply one mutation, persist, and return the new stats and event.
    ///
    /// # Errors
    /// Returns an error if loading or saving fails; nothing is written then.
    pub fn update_stats<F>(&self, now: DateTime<Utc>, mutate: F) -> Result<(UserStats, Event)>
    where
        F: FnOnce(&mut UserStats) -> Event,
    {
        let mut stats = self.load_stats(now)?;
        let event = mutate(&mut stats);
        self.save_stats(&stats)?;
        Ok((stats, event))
    }

    // ── Identity ─────────────────────────────────────────────────────

    /// # Errors
    /// Returns an error only if the database read fails.
    pub fn load_user(&self) -> Result<Option<User>> {
        let Some(json) = self.db.kv_get(USER_KEY)? else {
            return Ok(None);
        };
        match serde_json::from_str::<User>(&json) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "stored user unreadable, ignoring");
                Ok(None)
            }
        }
    }

    /// # Errors
    /// Returns an error if serialization or the database write fails.
    pub fn save_user(&self, user: &User) -> Result<()> {
        let json = serde_json::to_string(user)?;
        self.db.kv_set(USER_KEY, &json)?;
        Ok(())
    }

    /// # Errors
    /// Returns an error if the database write fails.
    pub fn clear_user(&self) -> Result<()> {
        self.db.kv_delete(USER_KEY)?;
        Ok(())
    }

    // ── Shield ───────────────────────────────────────────────────────

    /// Ids of guides the user marked as configured.
    ///
    /// # Errors
    /// Returns an error only if the database read fails.
    pub fn configured_guides(&self) -> Result<BTreeSet<String>> {
        let Some(json) = self.db.kv_get(SHIELD_KEY)? else {
            return Ok(BTreeSet::new());
        };
        Ok(serde_json::from_str(&json).unwrap_or_else(|e| {
            warn!(error = %e, "stored shield progress unreadable, resetting");
            BTreeSet::new()
        }))
    }

    /// Returns `true` if the guide was not already marked.
    ///
    /// # Errors
    /// Returns an error if the database read or write fails.
    pub fn mark_guide_configured(&self, guide_id: &str) -> Result<bool> {
        let mut guides = self.configured_guides()?;
        let inserted = guides.insert(guide_id.to_string());
        if inserted {
            self.db.kv_set(SHIELD_KEY, &serde_json::to_string(&guides)?)?;
        }
        Ok(inserted)
    }

    // ── Library ──────────────────────────────────────────────────────

    /// # Errors
    /// Returns an error if the database read fails.
    pub fn cached_article(&self, topic_id: &str) -> Result<Option<String>> {
        Ok(self.db.kv_get(&library::cache_key(topic_id))?)
    }

    /// # Errors
    /// Returns an error if the database write fails.
    pub fn cache_article(&self, topic_id: &str, text: &str) -> Result<()> {
        self.db.kv_set(&library::cache_key(topic_id), text)?;
        Ok(())
    }

    /// Topic ids with a cached article.
    ///
    /// # Errors
    /// Returns an error if the database read fails.
    pub fn cached_article_ids(&self) -> Result<BTreeSet<String>> {
        let keys = self.db.kv_keys_with_prefix(library::CACHE_PREFIX)?;
        Ok(keys
            .into_iter()
            .filter_map(|k| k.strip_prefix(library::CACHE_PREFIX).map(str::to_string))
            .collect())
    }

    /// Drop every cached article. Returns how many were removed.
    ///
    /// # Errors
    /// Returns an error if the database read or a delete fails.
    pub fn clear_article_cache(&self) -> Result<usize> {
        let ids = self.cached_article_ids()?;
        for id in &ids {
            self.db.kv_delete(&library::cache_key(id))?;
        }
        debug!(removed = ids.len(), "library cache cleared");
        Ok(ids.len())
    }
}

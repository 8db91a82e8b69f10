//! # PurePath Core Library
//!
//! This library provides the core logic for the PurePath recovery tracker.
//! Everything is exposed to a standalone CLI binary; the core itself holds
//! no UI state.
//!
//! ## Architecture
//!
//! - **Streak engine**: Pure, total mutations on a single [`UserStats`] record
//! - **Content graph**: An authored graph of educational topics plus a
//!   [`Navigator`] with back-history and search
//! - **Storage**: A SQLite kv table for records and TOML-based configuration
//! - **Coach**: A generative-AI client behind the [`CoachClient`] trait that
//!   never surfaces errors to the caller
//!
//! ## Key Components
//!
//! - [`UserStats`]: Streak, check-in and level record
//! - [`ContentGraph`]: Immutable topic graph
//! - [`StatsStore`]: Typed persistence over [`Database`]
//! - [`Config`]: Application configuration management

pub mod coach;
pub mod content;
pub mod emergency;
pub mod error;
pub mod events;
pub mod stats;
pub mod storage;
pub mod user;

pub use coach::{ChatMessage, ChatRole, CoachClient, Conversation, GeminiClient};
pub use content::{ContentGraph, Navigator, NavigatorState, TopicCategory, TopicNode};
pub use emergency::{BreathPhase, PanicSession};
pub use error::{CoachError, ConfigError, CoreError, DatabaseError, GraphError, SendRejected};
pub use events::Event;
pub use stats::{StatsSummary, UserStats};
pub use storage::{Config, Database, StatsStore};
pub use user::User;

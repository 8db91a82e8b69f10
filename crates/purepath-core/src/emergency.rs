//! Panic-mode breathing cycle.
//!
//! The screen loops Inhale -> Hold -> Exhale, one phase per fixed interval,
//! while showing a single random quote.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::content::quotes;

/// Default seconds spent in each breathing phase.
pub const DEFAULT_BREATH_STEP_SECS: u64 = 4;

/// Phases in one full breath.
pub const PHASES_PER_BREATH: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    Inhale,
    Hold,
    Exhale,
}

impl BreathPhase {
    pub fn next(self) -> Self {
        match self {
            BreathPhase::Inhale => BreathPhase::Hold,
            BreathPhase::Hold => BreathPhase::Exhale,
            BreathPhase::Exhale => BreathPhase::Inhale,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BreathPhase::Inhale => "Inhale",
            BreathPhase::Hold => "Hold",
            BreathPhase::Exhale => "Exhale",
        }
    }

    /// Whether the breathing circle is drawn expanded.
    pub fn expanded(self) -> bool {
        !matches!(self, BreathPhase::Exhale)
    }
}

/// One panic-screen session.
#[derive(Debug, Clone)]
pub struct PanicSession {
    quote: &'static str,
    phase: BreathPhase,
    step_secs: u64,
}

impl PanicSession {
    pub fn new<R: Rng + ?Sized>(rng: &mut R, step_secs: u64) -> Self {
        Self {
            quote: quotes::random_quote(rng),
            phase: BreathPhase::Inhale,
            step_secs: step_secs.max(1),
        }
    }

    /// A session with a quote from the thread-local RNG.
    pub fn start(step_secs: u64) -> Self {
        Self::new(&mut rand::thread_rng(), step_secs)
    }

    pub fn quote(&self) -> &'static str {
        self.quote
    }

    pub fn phase(&self) -> BreathPhase {
        self.phase
    }

    pub fn step_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.step_secs)
    }

    /// Advance to the next phase and return it.
    pub fn tick(&mut self) -> BreathPhase {
        self.phase = self.phase.next();
        self.phase
    }

}

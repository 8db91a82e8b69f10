//! Short lines shown on the panic screen.

use rand::seq::SliceRandom;
use rand::Rng;

pub const PANIC_QUOTES: [&str; 5] = [
    "The pain of discipline is far less than the pain of regret.",
    "You are not your urges. You are the observer of them.",
    "Don't trade what you want most for what you want now.",
    "This feeling is temporary. Glory is forever.",
    "Breathe. You have beaten 100% of your bad days so far.",
];

/// Pick one quote uniformly at random.
pub fn random_quote<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PANIC_QUOTES.choose(rng).copied().unwrap_or(PANIC_QUOTES[0])
}

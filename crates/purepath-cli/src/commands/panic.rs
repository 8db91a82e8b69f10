use std::io::Write;

use purepath_core::emergency::PHASES_PER_BREATH;
use purepath_core::{Config, PanicSession};

use super::CmdResult;

pub fn run(cycles: Option<u32>) -> CmdResult {
    let config = Config::load_or_default();
    let cycles = cycles.unwrap_or(config.panic.cycles);
    let mut session = PanicSession::start(config.panic.breath_step_secs);

    println!("Pause. Breathe. This urge will pass.");
    println!();
    println!("  \"{}\"", session.quote());
    println!();

    let mut stdout = std::io::stdout();
    for _ in 0..cycles.saturating_mul(PHASES_PER_BREATH) {
        let phase = session.phase();
        let circle = if phase.expanded() { "( O )" } else { " (o) " };
        writeln!(stdout, "{circle}  {}", phase.label())?;
        stdout.flush()?;
        std::thread::sleep(session.step_duration());
        session.tick();
    }

    if cycles > 0 {
        println!();
        println!("I am ready.");
    }
    Ok(())
}

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::mpsc;

use log::info;

use chip8_core::constants::INPUT_QUEUE_CAPACITY;
use chip8_core::{Interpreter, Rates, Result, Scheduler, SystemClock};
use display::TerminalDisplay;

use crate::input;

/// Loads `rom` and runs it in the terminal until the player quits or the program fails.
///
/// The terminal is restored before this returns, whichever way it ends.
pub fn run(rom: &Path, rates: Rates) -> Result<()> {
    let mut chip8 = Interpreter::new();

    let file = File::open(rom)?;
    let size = file.metadata()?.len();
    chip8.load_rom(&mut BufReader::new(file))?;
    info!("loaded ROM {} ({} bytes)", rom.display(), size);

    let (sender, inbound) = mpsc::sync_channel(INPUT_QUEUE_CAPACITY);
    let display = TerminalDisplay::new()?;
    input::spawn(sender)?;

    let mut scheduler = Scheduler::new(chip8, display, inbound, SystemClock::new(), rates);
    scheduler.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chip8_core::Error;

    #[test]
    fn test_missing_rom_fails_before_touching_the_terminal() {
        let result = run(Path::new("no/such/rom.ch8"), Rates::default());
        assert!(matches!(result, Err(Error::Io(_))));
    }
}

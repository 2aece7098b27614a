use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use env_logger::{Env, Target};
use log::error;

use chip8_core::constants::{CLOCK_HZ, KEYPAD_RESET_HZ};
use chip8_core::Rates;

mod input;
mod keymap;
mod run;

/// Runs a Chip-8 ROM in the terminal.
///
/// Keys 1234/QWER/ASDF/ZXCV are the hex keypad; Esc or Ctrl-C quits.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// ROM file to run
    #[arg(long)]
    rom: PathBuf,

    /// Instructions executed per second
    #[arg(long, default_value_t = CLOCK_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    clock_hz: u32,

    /// How many times per second every key is released
    #[arg(long, default_value_t = KEYPAD_RESET_HZ, value_parser = clap::value_parser!(u32).range(1..))]
    reset_hz: u32,

    /// Where log output goes; RUST_LOG sets the level
    #[arg(long, default_value = "chip8.log")]
    log_file: PathBuf,
}

impl Cli {
    fn rates(&self) -> Rates {
        Rates {
            step_hz: self.clock_hz,
            reset_hz: self.reset_hz,
        }
    }
}

/// Sends log output to the end of `path`, keeping it off the terminal the game is drawn on.
fn init_logging(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli.log_file) {
        eprintln!("unable to open log file {}: {}", cli.log_file.display(), e);
        process::exit(1);
    }

    if let Err(e) = run::run(&cli.rom, cli.rates()) {
        error!("{}", e);
        eprintln!("{}", e);
        process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["chip8", "--rom", "pong.ch8"]).unwrap();
        assert_eq!(cli.rom, PathBuf::from("pong.ch8"));
        assert_eq!(cli.rates(), Rates::default());
        assert_eq!(cli.log_file, PathBuf::from("chip8.log"));
    }

    #[test]
    fn test_rates_can_be_overridden() {
        let cli = Cli::try_parse_from([
            "chip8",
            "--rom",
            "pong.ch8",
            "--clock-hz",
            "500",
            "--reset-hz",
            "10",
        ])
        .unwrap();
        assert_eq!(
            cli.rates(),
            Rates {
                step_hz: 500,
                reset_hz: 10
            }
        );
    }

    #[test]
    fn test_rom_is_required() {
        assert!(Cli::try_parse_from(["chip8"]).is_err());
    }

    #[test]
    fn test_zero_rates_are_rejected() {
        assert!(Cli::try_parse_from(["chip8", "--rom", "a.ch8", "--clock-hz", "0"]).is_err());
    }
}

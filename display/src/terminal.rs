use std::io::{self, Stdout, Write};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
    LeaveAlternateScreen,
};
use crossterm::{execute, queue};

use chip8_core::Display;

/// Terminal columns per Chip-8 pixel, so pixels come out roughly square.
const CELL_WIDTH: usize = 2;

const LIT: &str = "██";
const UNLIT: &str = "  ";

/// # TerminalDisplay
/// Draws the Chip-8 screen into the terminal, green on black, one pixel per pair of
/// character cells with the top left pixel in the top left corner.
///
/// The terminal is switched to the alternate screen in raw mode with the cursor hidden
/// for as long as the display lives, and put back the way it was when it is dropped.
pub struct TerminalDisplay {
    out: Stdout,
}

impl TerminalDisplay {
    pub fn new() -> io::Result<Self> {
        let mut out = io::stdout();
        enable_raw_mode()?;
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(TerminalDisplay { out })
    }
}

impl Display for TerminalDisplay {
    fn set_pixel(&mut self, x: usize, y: usize, lit: bool) -> io::Result<()> {
        draw_pixel(&mut self.out, x, y, lit)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

impl Drop for TerminalDisplay {
    fn drop(&mut self) {
        // nothing left to report errors to
        let _ = execute!(self.out, ResetColor, Show, LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

/// Queues the commands that draw one pixel; nothing is written until `out` is flushed.
///
/// # Arguments
/// * `out` where the terminal commands go
/// * `x` the pixel's column on the Chip-8 screen
/// * `y` the pixel's row on the Chip-8 screen
/// * `lit` whether the pixel is on
fn draw_pixel<W: Write>(out: &mut W, x: usize, y: usize, lit: bool) -> io::Result<()> {
    queue!(
        out,
        MoveTo((x * CELL_WIDTH) as u16, y as u16),
        SetForegroundColor(Color::Green),
        SetBackgroundColor(Color::Black),
        Print(if lit { LIT } else { UNLIT })
    )
}

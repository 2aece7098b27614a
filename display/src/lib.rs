pub use terminal::TerminalDisplay;

mod terminal;

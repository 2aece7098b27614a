use log::warn;

use crate::constants::KEY_COUNT;

/// # Keypad
/// The 16 keys of the Chip-8 hex keypad, 0x0..=0xF.
///
/// Input only ever reports keys going down, so keys are released in bulk by `reset`
/// on a timer rather than one at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Keypad::default()
    }

    /// Marks `key` as held down. Codes above 0xF are ignored.
    pub fn press_key(&mut self, key: u8) {
        match self.keys.get_mut(key as usize) {
            Some(down) => *down = true,
            None => warn!("ignoring press of nonexistent key {:#04X}", key),
        }
    }

    /// Whether `key` is down. Codes above 0xF are never down.
    pub fn check_pressed(&self, key: u8) -> bool {
        self.keys.get(key as usize).copied().unwrap_or(false)
    }

    /// The lowest numbered key that is down, if any.
    pub fn first_pressed(&self) -> Option<u8> {
        self.keys.iter().position(|&down| down).map(|key| key as u8)
    }

    /// Releases every key.
    pub fn reset(&mut self) {
        self.keys = [false; KEY_COUNT];
    }
}

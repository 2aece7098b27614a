//! Outside inputs the interpreter asks for while executing, kept behind traits so tests
//! can decide what they return.

use crate::keypad::Keypad;

/// Supplies the random byte used by `Cxkk`.
pub trait RandomSource {
    fn random_byte(&mut self) -> u8;
}

/// Supplies the key `Fx0A` waits for.
pub trait KeySource {
    /// The key to hand to the program, or `None` if it should keep waiting.
    fn fetch_key(&mut self, keypad: &Keypad) -> Option<u8>;
}

/// Uniformly random bytes from the thread-local generator.
#[derive(Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn random_byte(&mut self) -> u8 {
        rand::random()
    }
}

/// Hands over whichever key is currently held down on the keypad.
#[derive(Default)]
pub struct HeldKey;

impl KeySource for HeldKey {
    fn fetch_key(&mut self, keypad: &Keypad) -> Option<u8> {
        keypad.first_pressed()
    }
}

/// Always the same byte.
pub struct FixedRandom(pub u8);

impl RandomSource for FixedRandom {
    fn random_byte(&mut self) -> u8 {
        self.0
    }
}

/// Always the same key, whatever the keypad says.
pub struct FixedKey(pub u8);

impl KeySource for FixedKey {
    fn fetch_key(&mut self, _keypad: &Keypad) -> Option<u8> {
        Some(self.0)
    }
}

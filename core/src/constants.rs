/// Bytes of addressable memory.
pub const MEMORY_SIZE: usize = 4096;

/// ROMs are loaded into memory starting here, and the PC starts here.
pub const PROGRAM_START: u16 = 0x200;

/// Room left for a ROM between `PROGRAM_START` and the end of memory.
pub const PROGRAM_CAPACITY: usize = MEMORY_SIZE - PROGRAM_START as usize;

pub const REGISTER_COUNT: usize = 16;

/// Return addresses the call stack can hold. Slot 0 is never written by a call.
pub const STACK_DEPTH: usize = 16;

pub const KEY_COUNT: usize = 16;

pub const DISPLAY_WIDTH: usize = 64;
pub const DISPLAY_HEIGHT: usize = 32;
pub const DISPLAY_SIZE: usize = DISPLAY_WIDTH * DISPLAY_HEIGHT;

/// Sprites are at most this many rows tall.
pub const MAX_SPRITE_ROWS: usize = 15;

/// Instructions executed per second.
pub const CLOCK_HZ: u32 = 120;

/// How often every key is released, since the terminal only reports key presses.
pub const KEYPAD_RESET_HZ: u32 = 6;

/// Slots in the queue between the keyboard thread and the run loop.
pub const INPUT_QUEUE_CAPACITY: usize = 10;

/// Slots in the queue of pending redraws.
pub const RENDER_QUEUE_CAPACITY: usize = 5;

/// Bytes per glyph in `FONT_SET`.
pub const FONT_GLYPH_SIZE: u16 = 5;

/// # Font
/// Glyphs for the hex digits 0..F, 5 rows of 4 pixels each, stored at 0x000.
///
/// ```text
/// 0xF0  ****
/// 0x90  *  *
/// 0x90  *  *
/// 0x90  *  *
/// 0xF0  ****
/// ```
#[rustfmt::skip]
pub const FONT_SET: [u8; 80] = [
    0xF0, 0x90, 0x90, 0x90, 0xF0, // 0
    0x20, 0x60, 0x20, 0x20, 0x70, // 1
    0xF0, 0x10, 0xF0, 0x80, 0xF0, // 2
    0xF0, 0x10, 0xF0, 0x10, 0xF0, // 3
    0x90, 0x90, 0xF0, 0x10, 0x10, // 4
    0xF0, 0x80, 0xF0, 0x10, 0xF0, // 5
    0xF0, 0x80, 0xF0, 0x90, 0xF0, // 6
    0xF0, 0x10, 0x20, 0x40, 0x40, // 7
    0xF0, 0x90, 0xF0, 0x90, 0xF0, // 8
    0xF0, 0x90, 0xF0, 0x10, 0xF0, // 9
    0xF0, 0x90, 0xF0, 0x90, 0x90, // A
    0xE0, 0x90, 0xE0, 0x90, 0xE0, // B
    0xF0, 0x80, 0x80, 0x80, 0xF0, // C
    0xE0, 0x90, 0x90, 0x90, 0xE0, // D
    0xF0, 0x80, 0xF0, 0x80, 0xF0, // E
    0xF0, 0x80, 0xF0, 0x80, 0x80, // F
];

use std::io;

use thiserror::Error;

use crate::opcode::Opcode;

/// Everything that can stop the interpreter.
///
/// None of these are recoverable: the run loop returns the first one it sees.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Unknown OpCode: {0}")]
    UnknownOpcode(Opcode),

    #[error("program counter {pc:#05X} is outside of memory")]
    PcOutOfRange { pc: u16 },

    #[error("call at {pc:#05X} overflows the stack")]
    StackOverflow { pc: u16 },

    #[error("return at {pc:#05X} with an empty stack")]
    StackUnderflow { pc: u16 },

    #[error("{len} byte access at {addr:#05X} runs past the end of memory")]
    AddressOutOfRange { addr: usize, len: usize },

    #[error("ROM is {size} bytes but only {capacity} fit in memory")]
    RomTooLarge { size: usize, capacity: usize },

    #[error(transparent)]
    Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

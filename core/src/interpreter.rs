use std::collections::VecDeque;
use std::io::Read;
use std::ops::Range;

use log::{debug, trace};

use crate::constants::{
    FONT_SET, MEMORY_SIZE, PROGRAM_CAPACITY, PROGRAM_START, REGISTER_COUNT, RENDER_QUEUE_CAPACITY,
    STACK_DEPTH,
};
use crate::error::{Error, Result};
use crate::framebuffer::FrameBuffer;
use crate::instruction::Instruction;
use crate::keypad::Keypad;
use crate::opcode::Opcode;
use crate::sources::{HeldKey, KeySource, RandomSource, ThreadRandom};

/// Asks whoever owns the display to show the current frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderRequest;

/// # Interpreter
/// The Chip-8 virtual machine.
///
/// ## Registers
/// - (v) 16 8-bit registers V0..VF; VF doubles as the flag written by arithmetic,
///   shifts and draws
/// - (i) a 16-bit memory address register
/// - (pc) a 16-bit program counter, starting at 0x200
/// - (sp) an 8-bit stack pointer; a call pre-increments it, so slot 0 is never used
///
/// ## Timers
/// - delay and sound, both decremented once per successful `step` while above 0
///
/// ## Memory
/// - 4096 bytes, with the font at 0x000 and programs loaded at 0x200
/// - a 16 slot stack of return addresses
///
/// ## Peripherals
/// - the frame buffer that `Dxyn` draws to
/// - the keypad that `Ex9E`/`ExA1` read
/// - a bounded queue of render requests for the run loop to act on
pub struct Interpreter {
    pub(crate) memory: [u8; MEMORY_SIZE],
    pub(crate) v: [u8; REGISTER_COUNT],
    pub(crate) i: u16,
    pub(crate) pc: u16,
    pub(crate) sp: u8,
    pub(crate) stack: [u16; STACK_DEPTH],
    pub(crate) delay_timer: u8,
    pub(crate) sound_timer: u8,
    pub(crate) frame_buffer: FrameBuffer,
    pub(crate) keypad: Keypad,
    pub(crate) render_requests: VecDeque<RenderRequest>,
    pub(crate) random: Box<dyn RandomSource>,
    pub(crate) keys: Box<dyn KeySource>,
}

impl Interpreter {
    /// An interpreter drawing random bytes from the system and taking `Fx0A` keys
    /// from the keypad.
    pub fn new() -> Self {
        Self::with_sources(Box::new(ThreadRandom), Box::new(HeldKey))
    }

    pub fn with_sources(random: Box<dyn RandomSource>, keys: Box<dyn KeySource>) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        memory[..FONT_SET.len()].copy_from_slice(&FONT_SET);

        Interpreter {
            memory,
            v: [0; REGISTER_COUNT],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
            frame_buffer: FrameBuffer::new(),
            keypad: Keypad::new(),
            render_requests: VecDeque::with_capacity(RENDER_QUEUE_CAPACITY),
            random,
            keys,
        }
    }

    /// Copies `program` into memory at 0x200.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > PROGRAM_CAPACITY {
            return Err(Error::RomTooLarge {
                size: program.len(),
                capacity: PROGRAM_CAPACITY,
            });
        }
        let start = PROGRAM_START as usize;
        self.memory[start..start + program.len()].copy_from_slice(program);
        debug!("loaded {} byte program at {:#05X}", program.len(), start);
        Ok(())
    }

    /// Reads a whole ROM from `reader` and loads it.
    ///
    /// # Arguments
    /// * `reader` a source that yields the raw ROM bytes
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<()> {
        let mut program = Vec::with_capacity(PROGRAM_CAPACITY);
        reader.read_to_end(&mut program)?;
        self.load_program(&program)
    }

    /// Executes the instruction at the PC, then counts both timers down.
    ///
    /// Timers are left alone if the instruction fails.
    pub fn step(&mut self) -> Result<()> {
        let op = self.fetch()?;
        self.exec_op(op)?;

        if self.delay_timer > 0 {
            self.delay_timer -= 1;
        }
        if self.sound_timer > 0 {
            self.sound_timer -= 1;
        }
        Ok(())
    }

    /// Decodes and executes a single opcode.
    ///
    /// Nothing changes if `op` is not an instruction.
    pub fn exec_op(&mut self, op: Opcode) -> Result<()> {
        let instruction = Instruction::decode(op)?;
        trace!(
            "{} {:?} v{:02X?} i{:04X} pc{:04X}",
            op,
            instruction,
            self.v,
            self.i,
            self.pc
        );
        self.execute(instruction)
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    pub(crate) fn fetch(&self) -> Result<Opcode> {
        let pc = self.pc as usize;
        if pc + 1 >= MEMORY_SIZE {
            return Err(Error::PcOutOfRange { pc: self.pc });
        }
        Ok(Opcode::from_bytes(self.memory[pc], self.memory[pc + 1]))
    }

    /// The memory range `addr..addr + len`, if all of it exists.
    pub(crate) fn span(&self, addr: u16, len: usize) -> Result<Range<usize>> {
        let start = addr as usize;
        if start + len > MEMORY_SIZE {
            return Err(Error::AddressOutOfRange { addr: start, len });
        }
        Ok(start..start + len)
    }

    /// Queues a redraw unless one is already waiting in every slot.
    pub(crate) fn request_render(&mut self) {
        if self.render_requests.len() < RENDER_QUEUE_CAPACITY {
            self.render_requests.push_back(RenderRequest);
        } else {
            trace!("render queue full, dropping request");
        }
    }

    /// Takes the oldest pending render request.
    pub fn take_render_request(&mut self) -> Option<RenderRequest> {
        self.render_requests.pop_front()
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame_buffer
    }

    pub fn keypad(&self) -> &Keypad {
        &self.keypad
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.keypad
    }

    pub fn memory(&self) -> &[u8] {
        &self.memory
    }

    pub fn registers(&self) -> &[u8; REGISTER_COUNT] {
        &self.v
    }

    pub fn index(&self) -> u16 {
        self.i
    }

    pub fn pc(&self) -> u16 {
        self.pc
    }

    pub fn sp(&self) -> u8 {
        self.sp
    }

    pub fn delay_timer(&self) -> u8 {
        self.delay_timer
    }

    pub fn sound_timer(&self) -> u8 {
        self.sound_timer
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

pub use clock::{Clock, ManualClock, SystemClock, Ticker, Wake};
pub use error::{Error, Result};
pub use framebuffer::{Display, FrameBuffer};
pub use instruction::Instruction;
pub use interpreter::{Interpreter, RenderRequest};
pub use keypad::Keypad;
pub use opcode::Opcode;
pub use scheduler::{Control, InputEvent, Rates, Scheduler};
pub use sources::{FixedKey, FixedRandom, HeldKey, KeySource, RandomSource, ThreadRandom};

mod clock;
pub mod constants;
mod error;
mod framebuffer;
mod instruction;
mod interpreter;
mod keypad;
mod opcode;
mod operations;
mod scheduler;
mod sources;

pub use chip8::Chip8;
pub use constants::{CLOCK_SPEED, TIMER_RATE};
pub use error::Error;
pub use instruction::Instruction;

mod chip8;
pub mod constants;
mod error;
mod instruction;
mod opcode;
mod operations;
pub mod state;

use std::io;
use std::path::PathBuf;

/// Everything that can stop the Chip-8 from executing.
///
/// Arithmetic overflow is not in here: registers wrap and report through VF.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unknown opcode {opcode:#06X}")]
    UnknownOpcode { opcode: u16 },

    #[error("machine code routine {addr:#05X} called at {address:#05X} is not supported")]
    UnsupportedSys { addr: u16, address: u16 },

    #[error("stack overflow: call at {address:#05X} exceeds 16 nested subroutines")]
    StackOverflow { address: u16 },

    #[error("stack underflow: return at {address:#05X} with an empty call stack")]
    StackUnderflow { address: u16 },

    #[error("memory access out of bounds at {address:#06X}")]
    MemoryOutOfBounds { address: usize },

    #[error("ROM is too large ({size} bytes), max size is {max_size} bytes")]
    RomTooLarge { size: usize, max_size: usize },

    #[error("ROM is empty")]
    EmptyRom,

    #[error("unable to read ROM {path}: {source}")]
    RomRead { path: PathBuf, source: io::Error },

    #[error(transparent)]
    Io(#[from] io::Error),
}

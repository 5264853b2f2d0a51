use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, MEMORY_SIZE, PIXEL_ON, PROGRAM_START,
    SPRITE_SHEET, STACK_DEPTH,
};
use crate::error::Error;

/// A snapshot of the Chip8 internal state
///
/// ## CPU
/// Registers
/// - (v) 16 primary 8-bit registers (V0..VF)
///     - the first 15 (V0..VE) are general purpose registers
///     - the 16th (VF) is the carry/borrow/collision flag
/// - (i) a 16-bit memory address register
///
/// Counter
/// - (pc) a 16-bit program counter, always pointing at the next opcode to fetch
///
/// Pointer
/// - (sp) the number of return addresses on the stack (0..=16)
///
/// Timers
/// - 2 8-bit timers (delay & sound)
/// - whoever drives the Chip-8 is responsible for counting them down
///
/// ## Memory
/// - 16 slot stack of return addresses
/// - 4096 bytes of addressable memory
///     - 0x000..0x200 is reserved, with the sprite sheet at 0x050
///     - ROMs are loaded at 0x200
/// - 64x32 frame buffer
///     - stores the contents of the next frame to be drawn
///
/// ## Input
/// - 16 flags tracking the pressed status of keys 0..F
#[derive(Clone)]
pub struct State {
    pub v: [u8; 16],
    pub i: u16,
    pub pc: u16,
    pub sp: u8,
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub stack: [u16; STACK_DEPTH],
    pub memory: [u8; MEMORY_SIZE],
    pub frame_buffer: FrameBuffer,
    pub draw_flag: bool,
    pub keys: [bool; 16],
    pub opcode: u16,
    pub rng: StdRng,
}

impl State {
    pub fn new() -> Self {
        State::with_rng(StdRng::from_entropy())
    }

    /// A state whose random number generator is seeded with `seed`, making RND reproducible.
    pub fn with_seed(seed: u64) -> Self {
        State::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        let mut memory = [0; MEMORY_SIZE];
        let font = FONT_START as usize;
        memory[font..font + SPRITE_SHEET.len()].copy_from_slice(&SPRITE_SHEET);

        State {
            v: [0; 16],
            i: 0,
            pc: PROGRAM_START,
            sp: 0,
            delay_timer: 0,
            sound_timer: 0,
            stack: [0; STACK_DEPTH],
            memory,
            frame_buffer: [0; DISPLAY_WIDTH * DISPLAY_HEIGHT],
            draw_flag: false,
            keys: [false; 16],
            opcode: 0,
            rng,
        }
    }

    /// Address of the opcode currently being executed.
    ///
    /// The pc is bumped as soon as an opcode is fetched, so this is the one before it.
    pub fn current_address(&self) -> u16 {
        self.pc.wrapping_sub(0x2)
    }

    /// Borrows `len` bytes of memory starting at `address`.
    pub fn memory_slice(&self, address: u16, len: usize) -> Result<&[u8], Error> {
        let start = address as usize;
        self.memory
            .get(start..start + len)
            .ok_or(Error::MemoryOutOfBounds {
                address: start.max(MEMORY_SIZE),
            })
    }

    /// Mutably borrows `len` bytes of memory starting at `address`.
    pub fn memory_slice_mut(&mut self, address: u16, len: usize) -> Result<&mut [u8], Error> {
        let start = address as usize;
        self.memory
            .get_mut(start..start + len)
            .ok_or(Error::MemoryOutOfBounds {
                address: start.max(MEMORY_SIZE),
            })
    }

    /// Whether the pixel at `x`, `y` is lit. Anything off screen is unlit.
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        if x >= DISPLAY_WIDTH || y >= DISPLAY_HEIGHT {
            return false;
        }
        self.frame_buffer
            .get(y * DISPLAY_WIDTH + x)
            .map_or(false, |&p| p == PIXEL_ON)
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}

/// The FrameBuffer is a row-major 64x32 grid, indexed as [y * DISPLAY_WIDTH + x]
pub type FrameBuffer = [u32; DISPLAY_WIDTH * DISPLAY_HEIGHT];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_program_origin() {
        let state = State::with_seed(0);
        assert_eq!(state.pc, 0x200);
        assert_eq!(state.sp, 0);
        assert_eq!(state.v, [0; 16]);
        assert_eq!(state.i, 0);
    }

    #[test]
    fn test_loads_sprite_sheet_at_font_start() {
        let state = State::with_seed(0);
        assert_eq!(state.memory[0x050..0x0A0], SPRITE_SHEET[..]);
        assert!(state.memory[..0x050].iter().all(|&b| b == 0));
        assert!(state.memory[0x0A0..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_memory_slice_in_bounds() {
        let mut state = State::with_seed(0);
        state.memory[0xFFE..].copy_from_slice(&[0xAB, 0xCD]);
        assert_eq!(state.memory_slice(0xFFE, 2).unwrap(), &[0xAB, 0xCD]);
    }

    #[test]
    fn test_memory_slice_out_of_bounds() {
        let state = State::with_seed(0);
        match state.memory_slice(0xFFF, 2) {
            Err(Error::MemoryOutOfBounds { address }) => assert_eq!(address, 0x1000),
            _ => panic!("expected an out of bounds error"),
        }
    }

    #[test]
    fn test_memory_slice_reports_first_missing_address() {
        let state = State::with_seed(0);
        match state.memory_slice(0xFFE, 5) {
            Err(Error::MemoryOutOfBounds { address }) => assert_eq!(address, 0x1000),
            _ => panic!("expected an out of bounds error"),
        }
    }

    #[test]
    fn test_pixel_off_screen_is_unlit() {
        let mut state = State::with_seed(0);
        state.frame_buffer = [PIXEL_ON; DISPLAY_WIDTH * DISPLAY_HEIGHT];
        assert!(state.pixel(63, 31));
        assert!(!state.pixel(64, 0));
        assert!(!state.pixel(0, 32));
        assert!(!state.pixel(usize::MAX, usize::MAX));
    }

    #[test]
    fn test_current_address_trails_pc() {
        let mut state = State::with_seed(0);
        state.pc = 0x204;
        assert_eq!(state.current_address(), 0x202);
    }
}

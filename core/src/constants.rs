/// Width of the display in pixels
pub const DISPLAY_WIDTH: usize = 64;

/// Height of the display in pixels
pub const DISPLAY_HEIGHT: usize = 32;

/// Value of a lit pixel in the FrameBuffer; unlit pixels are 0
pub const PIXEL_ON: u32 = 0xFFFF_FFFF;

/// Total addressable memory in bytes
pub const MEMORY_SIZE: usize = 4096;

/// Address at which ROMs are loaded and execution starts
pub const PROGRAM_START: u16 = 0x200;

/// Largest ROM that fits between `PROGRAM_START` and the end of memory
pub const MAX_ROM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;

/// Number of return addresses the call stack can hold
pub const STACK_DEPTH: usize = 16;

/// Address of the first glyph of the built-in font
pub const FONT_START: u16 = 0x050;

/// Bytes per font glyph
pub const GLYPH_SIZE: u16 = 5;

/// Default instruction rate in Hz
pub const CLOCK_SPEED: u32 = 500;

/// Rate at which the delay and sound timers count down in Hz
pub const TIMER_RATE: u32 = 60;

/// How many past states are kept around for rewinding
pub const MAX_SAVED_STATES: usize = 1024;

/// # Sprite sheet
/// Hexadecimal digits 0..F, each 5 rows tall and 4 pixels wide.
/// Only the high nibble of each byte is lit.
/// ```text
/// "0"     Binary   Hex
/// ****    11110000 0xF0
/// *  *    10010000 0x90
/// *  *    10010000 0x90
/// *  *    10010000 0x90
/// ****    11110000 0xF0
/// ```
pub const SPRITE_SHEET: [u8; 80] = [
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

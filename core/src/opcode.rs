/// # Opcodes
///
/// Chip-8 opcodes are 16 bits each, stored big-endian in memory.
/// Which instruction they encode is decided on nibble boundaries:
/// - `[o___]` the family; enough on its own for most instructions
/// - `[o__n]` the low nibble picks the operation in families 0x5, 0x8 and 0x9
/// - `[o_kk]` the low byte picks the operation in families 0x0, 0xE and 0xF
///
/// The remaining nibbles are operands:
/// - `[_nnn]` a 12-bit address
/// - `[__kk]` a byte that is assigned to or compared with Vx
/// - `[_x__]` the register Vx, or the last register of the range V0..=Vx
/// - `[__y_]` the register Vy
/// - `[___n]` a sprite height
pub trait Opcode {
    /// The Opcode's four nibbles, most significant first.
    fn nibbles(&self) -> (u8, u8, u8, u8);

    /// `[_x__]`
    fn x(&self) -> u8;

    /// `[__y_]`
    fn y(&self) -> u8;

    /// `[___n]`
    fn n(&self) -> u8;

    /// `[__kk]`
    fn kk(&self) -> u8;

    /// `[_nnn]`
    fn addr(&self) -> u16;
}

impl Opcode for u16 {
    fn nibbles(&self) -> (u8, u8, u8, u8) {
        ((self >> 12) as u8, self.x(), self.y(), self.n())
    }

    fn x(&self) -> u8 {
        ((self & 0x0F00) >> 8) as u8
    }

    fn y(&self) -> u8 {
        ((self & 0x00F0) >> 4) as u8
    }

    fn n(&self) -> u8 {
        (self & 0x000F) as u8
    }

    fn kk(&self) -> u8 {
        (self & 0x00FF) as u8
    }

    fn addr(&self) -> u16 {
        self & 0x0FFF
    }
}

/// Joins the two bytes of an opcode as they are laid out in memory.
pub fn from_bytes(high: u8, low: u8) -> u16 {
    u16::from(high) << 8 | u16::from(low)
}

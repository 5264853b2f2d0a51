use std::fmt;

use crate::error::Error;
use crate::opcode::Opcode;
use crate::operations::*;
use crate::state::State;

/// A decoded Chip-8 opcode along with its operands.
///
/// Names follow the usual Chip-8 assembly mnemonics.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    /// `0nnn`
    Sys { addr: u16 },
    /// `00E0`
    Cls,
    /// `00EE`
    Ret,
    /// `1nnn`
    Jp { addr: u16 },
    /// `2nnn`
    Call { addr: u16 },
    /// `3xkk`
    SeByte { x: u8, kk: u8 },
    /// `4xkk`
    SneByte { x: u8, kk: u8 },
    /// `5xyn`; n is ignored
    SeReg { x: u8, y: u8 },
    /// `6xkk`
    LdByte { x: u8, kk: u8 },
    /// `7xkk`
    AddByte { x: u8, kk: u8 },
    /// `8xy0`
    LdReg { x: u8, y: u8 },
    /// `8xy1`
    Or { x: u8, y: u8 },
    /// `8xy2`
    And { x: u8, y: u8 },
    /// `8xy3`
    Xor { x: u8, y: u8 },
    /// `8xy4`
    AddReg { x: u8, y: u8 },
    /// `8xy5`
    Sub { x: u8, y: u8 },
    /// `8xy6`
    Shr { x: u8 },
    /// `8xy7`
    Subn { x: u8, y: u8 },
    /// `8xyE`
    Shl { x: u8 },
    /// `9xyn`; n is ignored
    SneReg { x: u8, y: u8 },
    /// `Annn`
    LdI { addr: u16 },
    /// `Bnnn`
    JpV0 { addr: u16 },
    /// `Cxkk`
    Rnd { x: u8, kk: u8 },
    /// `Dxyn`
    Drw { x: u8, y: u8, n: u8 },
    /// `Ex9E`
    Skp { x: u8 },
    /// `ExA1`
    Sknp { x: u8 },
    /// `Fx07`
    LdVxDt { x: u8 },
    /// `Fx0A`
    LdKey { x: u8 },
    /// `Fx15`
    LdDtVx { x: u8 },
    /// `Fx18`
    LdStVx { x: u8 },
    /// `Fx1E`
    AddI { x: u8 },
    /// `Fx29`
    LdFont { x: u8 },
    /// `Fx33`
    LdBcd { x: u8 },
    /// `Fx55`
    Store { x: u8 },
    /// `Fx65`
    Load { x: u8 },
}

impl Instruction {
    /// Selects the Instruction a given Opcode encodes.
    pub fn decode(op: u16) -> Result<Self, Error> {
        let (x, y, n, kk, addr) = (op.x(), op.y(), op.n(), op.kk(), op.addr());
        let instruction = match op.nibbles() {
            (0x0, 0x0, 0xE, 0x0) => Instruction::Cls,
            (0x0, 0x0, 0xE, 0xE) => Instruction::Ret,
            (0x0, ..) => Instruction::Sys { addr },
            (0x1, ..) => Instruction::Jp { addr },
            (0x2, ..) => Instruction::Call { addr },
            (0x3, ..) => Instruction::SeByte { x, kk },
            (0x4, ..) => Instruction::SneByte { x, kk },
            (0x5, ..) => Instruction::SeReg { x, y },
            (0x6, ..) => Instruction::LdByte { x, kk },
            (0x7, ..) => Instruction::AddByte { x, kk },
            (0x8, .., 0x0) => Instruction::LdReg { x, y },
            (0x8, .., 0x1) => Instruction::Or { x, y },
            (0x8, .., 0x2) => Instruction::And { x, y },
            (0x8, .., 0x3) => Instruction::Xor { x, y },
            (0x8, .., 0x4) => Instruction::AddReg { x, y },
            (0x8, .., 0x5) => Instruction::Sub { x, y },
            (0x8, .., 0x6) => Instruction::Shr { x },
            (0x8, .., 0x7) => Instruction::Subn { x, y },
            (0x8, .., 0xE) => Instruction::Shl { x },
            (0x9, ..) => Instruction::SneReg { x, y },
            (0xA, ..) => Instruction::LdI { addr },
            (0xB, ..) => Instruction::JpV0 { addr },
            (0xC, ..) => Instruction::Rnd { x, kk },
            (0xD, ..) => Instruction::Drw { x, y, n },
            (0xE, .., 0x9, 0xE) => Instruction::Skp { x },
            (0xE, .., 0xA, 0x1) => Instruction::Sknp { x },
            (0xF, .., 0x0, 0x7) => Instruction::LdVxDt { x },
            (0xF, .., 0x0, 0xA) => Instruction::LdKey { x },
            (0xF, .., 0x1, 0x5) => Instruction::LdDtVx { x },
            (0xF, .., 0x1, 0x8) => Instruction::LdStVx { x },
            (0xF, .., 0x1, 0xE) => Instruction::AddI { x },
            (0xF, .., 0x2, 0x9) => Instruction::LdFont { x },
            (0xF, .., 0x3, 0x3) => Instruction::LdBcd { x },
            (0xF, .., 0x5, 0x5) => Instruction::Store { x },
            (0xF, .., 0x6, 0x5) => Instruction::Load { x },
            _ => return Err(Error::UnknownOpcode { opcode: op }),
        };
        Ok(instruction)
    }

    /// Runs the Instruction against `state`.
    ///
    /// Expects the pc to already point at the following opcode.
    pub fn execute(self, state: &mut State) -> Result<(), Error> {
        match self {
            Instruction::Sys { addr } => sys(state, addr)?,
            Instruction::Cls => clr(state),
            Instruction::Ret => rts(state)?,
            Instruction::Jp { addr } => jump(state, addr),
            Instruction::Call { addr } => call(state, addr)?,
            Instruction::SeByte { x, kk } => ske(state, x, kk),
            Instruction::SneByte { x, kk } => skne(state, x, kk),
            Instruction::SeReg { x, y } => skre(state, x, y),
            Instruction::LdByte { x, kk } => load(state, x, kk),
            Instruction::AddByte { x, kk } => add(state, x, kk),
            Instruction::LdReg { x, y } => mv(state, x, y),
            Instruction::Or { x, y } => or(state, x, y),
            Instruction::And { x, y } => and(state, x, y),
            Instruction::Xor { x, y } => xor(state, x, y),
            Instruction::AddReg { x, y } => addv(state, x, y),
            Instruction::Sub { x, y } => sub(state, x, y),
            Instruction::Shr { x } => shr(state, x),
            Instruction::Subn { x, y } => subn(state, x, y),
            Instruction::Shl { x } => shl(state, x),
            Instruction::SneReg { x, y } => skrne(state, x, y),
            Instruction::LdI { addr } => loadi(state, addr),
            Instruction::JpV0 { addr } => jumpi(state, addr),
            Instruction::Rnd { x, kk } => rnd(state, x, kk),
            Instruction::Drw { x, y, n } => draw(state, x, y, n)?,
            Instruction::Skp { x } => skpr(state, x),
            Instruction::Sknp { x } => skup(state, x),
            Instruction::LdVxDt { x } => moved(state, x),
            Instruction::LdKey { x } => keyd(state, x),
            Instruction::LdDtVx { x } => setdt(state, x),
            Instruction::LdStVx { x } => setst(state, x),
            Instruction::AddI { x } => addi(state, x),
            Instruction::LdFont { x } => ldspr(state, x),
            Instruction::LdBcd { x } => bcd(state, x)?,
            Instruction::Store { x } => stor(state, x)?,
            Instruction::Load { x } => read(state, x)?,
        }
        Ok(())
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Instruction::Sys { addr } => write!(f, "SYS {:#05X}", addr),
            Instruction::Cls => write!(f, "CLS"),
            Instruction::Ret => write!(f, "RET"),
            Instruction::Jp { addr } => write!(f, "JP {:#05X}", addr),
            Instruction::Call { addr } => write!(f, "CALL {:#05X}", addr),
            Instruction::SeByte { x, kk } => write!(f, "SE V{:X}, {:#04X}", x, kk),
            Instruction::SneByte { x, kk } => write!(f, "SNE V{:X}, {:#04X}", x, kk),
            Instruction::SeReg { x, y } => write!(f, "SE V{:X}, V{:X}", x, y),
            Instruction::LdByte { x, kk } => write!(f, "LD V{:X}, {:#04X}", x, kk),
            Instruction::AddByte { x, kk } => write!(f, "ADD V{:X}, {:#04X}", x, kk),
            Instruction::LdReg { x, y } => write!(f, "LD V{:X}, V{:X}", x, y),
            Instruction::Or { x, y } => write!(f, "OR V{:X}, V{:X}", x, y),
            Instruction::And { x, y } => write!(f, "AND V{:X}, V{:X}", x, y),
            Instruction::Xor { x, y } => write!(f, "XOR V{:X}, V{:X}", x, y),
            Instruction::AddReg { x, y } => write!(f, "ADD V{:X}, V{:X}", x, y),
            Instruction::Sub { x, y } => write!(f, "SUB V{:X}, V{:X}", x, y),
            Instruction::Shr { x } => write!(f, "SHR V{:X}", x),
            Instruction::Subn { x, y } => write!(f, "SUBN V{:X}, V{:X}", x, y),
            Instruction::Shl { x } => write!(f, "SHL V{:X}", x),
            Instruction::SneReg { x, y } => write!(f, "SNE V{:X}, V{:X}", x, y),
            Instruction::LdI { addr } => write!(f, "LD I, {:#05X}", addr),
            Instruction::JpV0 { addr } => write!(f, "JP V0, {:#05X}", addr),
            Instruction::Rnd { x, kk } => write!(f, "RND V{:X}, {:#04X}", x, kk),
            Instruction::Drw { x, y, n } => write!(f, "DRW V{:X}, V{:X}, {}", x, y, n),
            Instruction::Skp { x } => write!(f, "SKP V{:X}", x),
            Instruction::Sknp { x } => write!(f, "SKNP V{:X}", x),
            Instruction::LdVxDt { x } => write!(f, "LD V{:X}, DT", x),
            Instruction::LdKey { x } => write!(f, "LD V{:X}, K", x),
            Instruction::LdDtVx { x } => write!(f, "LD DT, V{:X}", x),
            Instruction::LdStVx { x } => write!(f, "LD ST, V{:X}", x),
            Instruction::AddI { x } => write!(f, "ADD I, V{:X}", x),
            Instruction::LdFont { x } => write!(f, "LD F, V{:X}", x),
            Instruction::LdBcd { x } => write!(f, "LD B, V{:X}", x),
            Instruction::Store { x } => write!(f, "LD [I], V{:X}", x),
            Instruction::Load { x } => write!(f, "LD V{:X}, [I]", x),
        }
    }
}

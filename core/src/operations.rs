use rand::Rng;

use crate::constants::{
    DISPLAY_HEIGHT, DISPLAY_WIDTH, FONT_START, GLYPH_SIZE, PIXEL_ON, STACK_DEPTH,
};
use crate::error::Error;
use crate::state::State;

// The pc already points past the current opcode by the time any of these run.

fn skip_if(state: &mut State, condition: bool) {
    if condition {
        state.pc = state.pc.wrapping_add(0x2);
    }
}

/// machine code routine; not supported
pub fn sys(state: &mut State, addr: u16) -> Result<(), Error> {
    Err(Error::UnsupportedSys {
        addr,
        address: state.current_address(),
    })
}

/// clear
pub fn clr(state: &mut State) {
    state.frame_buffer = [0; DISPLAY_WIDTH * DISPLAY_HEIGHT];
    state.draw_flag = true;
}

/// PC = STACK.pop()
pub fn rts(state: &mut State) -> Result<(), Error> {
    if state.sp == 0 {
        return Err(Error::StackUnderflow {
            address: state.current_address(),
        });
    }
    state.sp -= 0x1;
    state.pc = state.stack[state.sp as usize];
    Ok(())
}

/// PC = addr
pub fn jump(state: &mut State, addr: u16) {
    state.pc = addr;
}

/// STACK.push(PC); PC = addr
pub fn call(state: &mut State, addr: u16) -> Result<(), Error> {
    if state.sp as usize >= STACK_DEPTH {
        return Err(Error::StackOverflow {
            address: state.current_address(),
        });
    }
    state.stack[state.sp as usize] = state.pc;
    state.sp += 0x1;
    state.pc = addr;
    Ok(())
}

/// if Vx == kk then pc += 2
pub fn ske(state: &mut State, x: u8, kk: u8) {
    let condition = state.v[x as usize] == kk;
    skip_if(state, condition);
}

/// if Vx != kk then pc += 2
pub fn skne(state: &mut State, x: u8, kk: u8) {
    let condition = state.v[x as usize] != kk;
    skip_if(state, condition);
}

/// if Vx == Vy then pc += 2
pub fn skre(state: &mut State, x: u8, y: u8) {
    let condition = state.v[x as usize] == state.v[y as usize];
    skip_if(state, condition);
}

/// Vx = kk
pub fn load(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = kk;
}

/// Vx += kk
/// Add kk to Vx; allow for overflow but implicitly drop it
pub fn add(state: &mut State, x: u8, kk: u8) {
    state.v[x as usize] = state.v[x as usize].wrapping_add(kk);
}

/// Vx = Vy
pub fn mv(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] = state.v[y as usize];
}

/// Vx |= Vy
pub fn or(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] |= state.v[y as usize];
}

/// Vx &= Vy
pub fn and(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] &= state.v[y as usize];
}

/// Vx ^= Vy
pub fn xor(state: &mut State, x: u8, y: u8) {
    state.v[x as usize] ^= state.v[y as usize];
}

// The arithmetic operations below write VF last so that it wins when x is 0xF.

/// Vx += Vy; VF = overflow
pub fn addv(state: &mut State, x: u8, y: u8) {
    let (res, over) = state.v[x as usize].overflowing_add(state.v[y as usize]);
    state.v[x as usize] = res;
    state.v[0xF] = over as u8;
}

/// Vx -= Vy; VF = Vx > Vy
pub fn sub(state: &mut State, x: u8, y: u8) {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = vx.wrapping_sub(vy);
    state.v[0xF] = (vx > vy) as u8;
}

/// Vx >>= 1; VF = lsb
pub fn shr(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    state.v[x as usize] = vx >> 1;
    state.v[0xF] = vx & 0x1;
}

/// Vx = Vy - Vx; VF = Vy > Vx
pub fn subn(state: &mut State, x: u8, y: u8) {
    let (vx, vy) = (state.v[x as usize], state.v[y as usize]);
    state.v[x as usize] = vy.wrapping_sub(vx);
    state.v[0xF] = (vy > vx) as u8;
}

/// Vx <<= 1; VF = msb
pub fn shl(state: &mut State, x: u8) {
    let vx = state.v[x as usize];
    state.v[x as usize] = vx << 1;
    state.v[0xF] = (vx & 0x80) >> 7;
}

/// if Vx != Vy then pc +=2
pub fn skrne(state: &mut State, x: u8, y: u8) {
    let condition = state.v[x as usize] != state.v[y as usize];
    skip_if(state, condition);
}

/// I = addr
pub fn loadi(state: &mut State, addr: u16) {
    state.i = addr;
}

/// PC = V0 + addr
pub fn jumpi(state: &mut State, addr: u16) {
    state.pc = u16::from(state.v[0x0]).wrapping_add(addr);
}

/// Vx = rand_byte & kk
pub fn rnd(state: &mut State, x: u8, kk: u8) {
    let rand_byte: u8 = state.rng.gen();
    state.v[x as usize] = rand_byte & kk;
}

/// draw_sprite(x=Vx y=Vy size=n)
/// XORs the n byte sprite at I onto the FrameBuffer at Vx, Vy.
///
/// The origin wraps around the display but the sprite itself is clipped at
/// the right and bottom edges. VF is set if any lit pixel gets erased.
pub fn draw(state: &mut State, x: u8, y: u8, n: u8) -> Result<(), Error> {
    let origin_x = state.v[x as usize] as usize % DISPLAY_WIDTH;
    let origin_y = state.v[y as usize] as usize % DISPLAY_HEIGHT;

    let rows = n as usize;
    let mut sprite = [0u8; 15];
    sprite[..rows].copy_from_slice(state.memory_slice(state.i, rows)?);

    let mut collision = false;
    for (row, byte) in sprite[..rows].iter().enumerate() {
        let py = origin_y + row;
        if py >= DISPLAY_HEIGHT {
            break;
        }
        for bit in 0..8 {
            let px = origin_x + bit;
            if px >= DISPLAY_WIDTH {
                break;
            }
            if (byte >> (7 - bit)) & 0x1 == 0x1 {
                let pixel = &mut state.frame_buffer[py * DISPLAY_WIDTH + px];
                collision |= *pixel == PIXEL_ON;
                *pixel ^= PIXEL_ON;
            }
        }
    }

    state.v[0xF] = collision as u8;
    state.draw_flag = true;
    Ok(())
}

/// Keys past 0xF don't exist and so are never pressed.
fn is_pressed(state: &State, key: u8) -> bool {
    state.keys.get(key as usize).copied().unwrap_or(false)
}

/// if Vx.pressed then pc += 2
pub fn skpr(state: &mut State, x: u8) {
    let condition = is_pressed(state, state.v[x as usize]);
    skip_if(state, condition);
}

/// if !Vx.pressed then pc += 2
pub fn skup(state: &mut State, x: u8) {
    let condition = !is_pressed(state, state.v[x as usize]);
    skip_if(state, condition);
}

/// Vx = DT
pub fn moved(state: &mut State, x: u8) {
    state.v[x as usize] = state.delay_timer;
}

/// await keypress for Vx
/// Re-runs itself by rewinding the pc until some key is held down.
pub fn keyd(state: &mut State, x: u8) {
    match state.keys.iter().position(|&pressed| pressed) {
        Some(key) => state.v[x as usize] = key as u8,
        None => state.pc = state.pc.wrapping_sub(0x2),
    }
}

/// DT = Vx
pub fn setdt(state: &mut State, x: u8) {
    state.delay_timer = state.v[x as usize];
}

/// ST = Vx
pub fn setst(state: &mut State, x: u8) {
    state.sound_timer = state.v[x as usize];
}

/// I += Vx
pub fn addi(state: &mut State, x: u8) {
    state.i = state.i.wrapping_add(u16::from(state.v[x as usize]));
}

/// I = FONT_START + Vx * 5
/// Set I to the memory address of the glyph for the low nibble of Vx
pub fn ldspr(state: &mut State, x: u8) {
    let digit = u16::from(state.v[x as usize] & 0xF);
    state.i = FONT_START + digit * GLYPH_SIZE;
}

/// mem[I..I+3] = bcd(Vx)
/// Store the decimal digits of Vx in memory starting at address I
pub fn bcd(state: &mut State, x: u8) -> Result<(), Error> {
    let vx = state.v[x as usize];
    let digits = [vx / 100, vx / 10 % 10, vx % 10];
    state.memory_slice_mut(state.i, 3)?.copy_from_slice(&digits);
    Ok(())
}

/// mem[I..=I+x] = V0..=Vx
pub fn stor(state: &mut State, x: u8) -> Result<(), Error> {
    let len = x as usize + 1;
    let v = state.v;
    state.memory_slice_mut(state.i, len)?.copy_from_slice(&v[..len]);
    Ok(())
}

/// V0..=Vx = mem[I..=I+x]
pub fn read(state: &mut State, x: u8) -> Result<(), Error> {
    let len = x as usize + 1;
    let mut values = [0u8; 16];
    values[..len].copy_from_slice(state.memory_slice(state.i, len)?);
    state.v[..len].copy_from_slice(&values[..len]);
    Ok(())
}

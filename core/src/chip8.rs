use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::constants::{MAX_ROM_SIZE, MAX_SAVED_STATES, PROGRAM_START};
use crate::error::Error;
use crate::instruction::Instruction;
use crate::opcode;
use crate::state::{FrameBuffer, State};

/// # Chip-8
/// Chip-8 is a virtual machine and corresponding interpreted language.
///
/// Tracks:
///  - current `state`
///  - `previous_states` for rewinding
///
/// Supplies interfaces for:
/// - loading roms
/// - pressing and releasing keys
/// - advancing and reversing the CPU
/// - counting down its timers
/// - inspecting its frame buffer for rendering by some display
///
/// How often the CPU and the timers are advanced is up to the caller.
pub struct Chip8 {
    state: State,
    previous_states: VecDeque<State>,
}

// TODO explore time/memory efficiency of more compact representations of past states (e.g. diffs)
impl Chip8 {
    pub fn new() -> Self {
        Chip8::from_state(State::new())
    }

    /// A Chip-8 whose random numbers are determined by `seed`.
    pub fn with_seed(seed: u64) -> Self {
        Chip8::from_state(State::with_seed(seed))
    }

    fn from_state(state: State) -> Self {
        Chip8 {
            state,
            previous_states: VecDeque::with_capacity(MAX_SAVED_STATES),
        }
    }

    /// Load a rom from a source
    ///
    /// The whole rom is read before anything is written, so memory is left
    /// untouched if reading fails or the rom doesn't fit.
    ///
    /// # Arguments
    /// * `reader` a reader that contains a ROM
    pub fn load_rom(&mut self, reader: &mut dyn Read) -> Result<usize, Error> {
        let mut rom = Vec::with_capacity(MAX_ROM_SIZE);
        reader.read_to_end(&mut rom)?;

        if rom.is_empty() {
            return Err(Error::EmptyRom);
        }
        if rom.len() > MAX_ROM_SIZE {
            return Err(Error::RomTooLarge {
                size: rom.len(),
                max_size: MAX_ROM_SIZE,
            });
        }

        let start = PROGRAM_START as usize;
        self.state.memory[start..start + rom.len()].copy_from_slice(&rom);
        Ok(rom.len())
    }

    /// Load a rom from a file on disk
    ///
    /// # Arguments
    /// * `path` location of the ROM file
    pub fn load_rom_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, Error> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::RomRead {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_rom(&mut BufReader::new(file))
    }

    /// Returns the FrameBuffer if the display should be redrawn, clearing the draw flag
    pub fn get_frame(&mut self) -> Option<&FrameBuffer> {
        if std::mem::replace(&mut self.state.draw_flag, false) {
            Some(&self.state.frame_buffer)
        } else {
            None
        }
    }

    /// The FrameBuffer as it currently is
    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.state.frame_buffer
    }

    /// A read-only view of the whole machine
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Set the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was pressed
    pub fn key_press(&mut self, key: u8) {
        self.set_key(key, true);
    }

    /// Unset the pressed status of key
    ///
    /// # Arguments
    /// * `key` the 8-bit representation of the key that was released
    pub fn key_release(&mut self, key: u8) {
        self.set_key(key, false);
    }

    fn set_key(&mut self, key: u8, pressed: bool) {
        if let Some(held) = self.state.keys.get_mut(key as usize) {
            *held = pressed;
        }
    }

    /// Advances the CPU by a single cycle
    /// - fetches the opcode at the pc and bumps the pc past it
    /// - decodes and executes it
    /// - saves the state from before the cycle so it can be rewound to
    ///
    /// If anything goes wrong the state is rolled back to how it was before the
    /// cycle, leaving the pc at the faulting opcode. A faulting cycle is never
    /// saved, so the rewind history is untouched.
    pub fn advance_cpu(&mut self) -> Result<Instruction, Error> {
        let previous = self.state.clone();
        match self.cycle() {
            Ok(instruction) => {
                self.save_state(previous);
                Ok(instruction)
            }
            Err(e) => {
                self.state = previous;
                Err(e)
            }
        }
    }

    fn cycle(&mut self) -> Result<Instruction, Error> {
        let op = self.get_op()?;
        self.state.opcode = op;
        self.state.pc = self.state.pc.wrapping_add(0x2);
        let instruction = Instruction::decode(op)?;
        instruction.execute(&mut self.state)?;
        Ok(instruction)
    }

    /// Reverses the CPU by a single cycle if possible
    /// - if there are previous_states, pops the last one and restores it
    /// - keys stay as they are since they belong to whoever is pressing them
    pub fn reverse_cpu(&mut self) {
        if let Some(state) = self.previous_states.pop_front() {
            let keys = self.state.keys;
            self.state = state;
            self.state.keys = keys;
        }
    }

    /// Puts a state in previous_states
    /// - if there are already MAX_SAVED_STATES saved then the oldest is dropped
    fn save_state(&mut self, state: State) {
        if self.previous_states.len() == MAX_SAVED_STATES {
            self.previous_states.pop_back();
        }
        self.previous_states.push_front(state);
    }

    /// Counts both timers down by one, stopping at 0
    ///
    /// Meant to be called at `TIMER_RATE` regardless of how fast the CPU is running.
    pub fn advance_timers(&mut self) {
        self.state.delay_timer = self.state.delay_timer.saturating_sub(1);
        self.state.sound_timer = self.state.sound_timer.saturating_sub(1);
    }

    /// Whether a tone should currently be playing
    pub fn sound_active(&self) -> bool {
        self.state.sound_timer > 0
    }

    /// Gets the opcode currently pointed at by the pc.
    /// Memory is stored as bytes, but opcodes are 16 bits so we combine two subsequent bytes.
    fn get_op(&self) -> Result<u16, Error> {
        let bytes = self.state.memory_slice(self.state.pc, 2)?;
        Ok(opcode::from_bytes(bytes[0], bytes[1]))
    }
}

impl Default for Chip8 {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_chip8_gets_op() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xAA, 0xBB]);
        assert_eq!(chip8.get_op().unwrap(), 0xAABB);
    }

    #[test]
    fn test_get_op_past_end_of_memory() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.state.pc = 0xFFF;
        assert!(matches!(
            chip8.get_op(),
            Err(Error::MemoryOutOfBounds { address: 0x1000 })
        ));
    }

    #[test]
    fn test_cycle_bumps_pc_and_records_opcode() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x00, 0xE0]);
        let instruction = chip8.advance_cpu().unwrap();
        assert_eq!(instruction, Instruction::Cls);
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.opcode, 0x00E0);
    }

    #[test]
    fn test_fault_rolls_back_to_faulting_opcode() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xFF, 0xFF]);
        assert!(matches!(
            chip8.advance_cpu(),
            Err(Error::UnknownOpcode { opcode: 0xFFFF })
        ));
        assert_eq!(chip8.state.pc, 0x200);
        assert!(chip8.previous_states.is_empty());
    }

    #[test]
    fn test_loads_rom_at_program_start() {
        let mut chip8 = Chip8::with_seed(0);
        let loaded = chip8.load_rom(&mut Cursor::new(vec![0x12, 0x34, 0x56])).unwrap();
        assert_eq!(loaded, 3);
        assert_eq!(chip8.state.memory[0x200..0x204], [0x12, 0x34, 0x56, 0x00]);
    }

    #[test]
    fn test_rejects_empty_rom() {
        let mut chip8 = Chip8::with_seed(0);
        assert!(matches!(
            chip8.load_rom(&mut Cursor::new(Vec::new())),
            Err(Error::EmptyRom)
        ));
    }

    #[test]
    fn test_rejects_oversized_rom_without_loading_any_of_it() {
        let mut chip8 = Chip8::with_seed(0);
        let rom = vec![0xAA; MAX_ROM_SIZE + 1];
        match chip8.load_rom(&mut Cursor::new(rom)) {
            Err(Error::RomTooLarge { size, max_size }) => {
                assert_eq!(size, 3585);
                assert_eq!(max_size, 3584);
            }
            _ => panic!("expected the rom to be rejected"),
        }
        assert!(chip8.state.memory[0x200..].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_loads_rom_filling_all_of_memory() {
        let mut chip8 = Chip8::with_seed(0);
        let rom = vec![0xAA; MAX_ROM_SIZE];
        assert_eq!(chip8.load_rom(&mut Cursor::new(rom)).unwrap(), 3584);
        assert_eq!(chip8.state.memory[0xFFF], 0xAA);
    }

    #[test]
    fn test_missing_rom_file() {
        let mut chip8 = Chip8::with_seed(0);
        match chip8.load_rom_file("/definitely/not/a/rom.ch8") {
            Err(Error::RomRead { path, .. }) => {
                assert_eq!(path, Path::new("/definitely/not/a/rom.ch8"))
            }
            _ => panic!("expected the rom to be unreadable"),
        }
    }

    #[test]
    fn test_key_presses_update_latch() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.key_press(0xE);
        assert!(chip8.state.keys[0xE]);
        chip8.key_release(0xE);
        assert!(!chip8.state.keys[0xE]);
        // Not a key; ignored
        chip8.key_press(0x10);
        assert_eq!(chip8.state.keys, [false; 16]);
    }

    #[test]
    fn test_waits_for_key_until_pressed() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xF1, 0x0A]);
        chip8.advance_cpu().unwrap();
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.pc, 0x200);
        chip8.key_press(0x7);
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.pc, 0x202);
        assert_eq!(chip8.state.v[0x1], 0x7);
    }

    #[test]
    fn test_get_frame_only_when_drawn() {
        let mut chip8 = Chip8::with_seed(0);
        assert!(chip8.get_frame().is_none());
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x00, 0xE0]);
        chip8.advance_cpu().unwrap();
        assert!(chip8.get_frame().is_some());
        assert!(chip8.get_frame().is_none());
    }

    #[test]
    fn test_advance_timers_stops_at_zero() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.state.delay_timer = 2;
        chip8.state.sound_timer = 1;
        assert!(chip8.sound_active());
        chip8.advance_timers();
        assert_eq!(chip8.state.delay_timer, 1);
        assert!(!chip8.sound_active());
        chip8.advance_timers();
        chip8.advance_timers();
        assert_eq!(chip8.state.delay_timer, 0);
        assert_eq!(chip8.state.sound_timer, 0);
    }

    #[test]
    fn test_chip8_saves_state() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.save_state(chip8.state.clone());
        assert_eq!(chip8.previous_states.len(), 1);
    }

    // TODO this test is unnecessarily slow because we can't parameterize MAX_SAVED_STATES
    #[test]
    fn test_chip8_drops_old_saved_states() {
        let mut chip8 = Chip8::with_seed(0);
        for _ in 0..MAX_SAVED_STATES {
            chip8.save_state(chip8.state.clone());
        }
        assert_eq!(MAX_SAVED_STATES, chip8.previous_states.len());
        chip8.save_state(chip8.state.clone());
        assert_eq!(MAX_SAVED_STATES, chip8.previous_states.len());
    }

    #[test]
    fn test_fault_with_full_history_keeps_oldest_state() {
        let mut chip8 = Chip8::with_seed(0);
        for _ in 0..MAX_SAVED_STATES {
            chip8.save_state(chip8.state.clone());
        }
        if let Some(oldest) = chip8.previous_states.back_mut() {
            oldest.v[0x0] = 0xAB;
        }
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0xFF, 0xFF]);
        assert!(chip8.advance_cpu().is_err());
        assert_eq!(MAX_SAVED_STATES, chip8.previous_states.len());
        assert_eq!(chip8.previous_states.back().unwrap().v[0x0], 0xAB);
        assert_eq!(chip8.state.pc, 0x200);
    }

    #[test]
    fn test_reverse_cpu_undoes_a_cycle() {
        let mut chip8 = Chip8::with_seed(0);
        chip8.state.memory[0x200..0x202].copy_from_slice(&[0x60, 0x0A]);
        chip8.advance_cpu().unwrap();
        assert_eq!(chip8.state.v[0x0], 0x0A);
        chip8.key_press(0x3);
        chip8.reverse_cpu();
        assert_eq!(chip8.state.v[0x0], 0x0);
        assert_eq!(chip8.state.pc, 0x200);
        assert!(chip8.state.keys[0x3]);
    }
}

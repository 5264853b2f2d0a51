use sdl2::keyboard::Keycode;

/// Something the keyboard can ask of the emulator.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// One of the Chip-8's hex keys
    Key(u8),
    /// Ignore the clock speed while held
    FastForward,
    /// Run backwards while held
    Rewind,
    Quit,
}

/// # Keymap
/// Chip-8 input is generated with a hexadecimal keypad.
///
/// This original layout is mapped to the left 4 alphanumeric columns.
/// ```text
/// |1|2|3|C|      |1|2|3|4|
/// |4|5|6|D|  ->  |Q|W|E|R|
/// |7|8|9|E|  ->  |A|S|D|F|
/// |A|0|B|F|      |Z|X|C|V|
/// ```
pub fn keymap(key: Keycode) -> Option<Input> {
    let hex = match key {
        Keycode::X => 0x0,
        Keycode::Num1 => 0x1,
        Keycode::Num2 => 0x2,
        Keycode::Num3 => 0x3,
        Keycode::Q => 0x4,
        Keycode::W => 0x5,
        Keycode::E => 0x6,
        Keycode::A => 0x7,
        Keycode::S => 0x8,
        Keycode::D => 0x9,
        Keycode::Z => 0xA,
        Keycode::C => 0xB,
        Keycode::Num4 => 0xC,
        Keycode::R => 0xD,
        Keycode::F => 0xE,
        Keycode::V => 0xF,
        Keycode::Space => return Some(Input::FastForward),
        Keycode::Backspace => return Some(Input::Rewind),
        Keycode::Escape => return Some(Input::Quit),
        _ => return None,
    };
    Some(Input::Key(hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_hex_keypad_corners() {
        assert_eq!(keymap(Keycode::Num1), Some(Input::Key(0x1)));
        assert_eq!(keymap(Keycode::Num4), Some(Input::Key(0xC)));
        assert_eq!(keymap(Keycode::Z), Some(Input::Key(0xA)));
        assert_eq!(keymap(Keycode::V), Some(Input::Key(0xF)));
    }

    #[test]
    fn test_maps_controls() {
        assert_eq!(keymap(Keycode::Space), Some(Input::FastForward));
        assert_eq!(keymap(Keycode::Backspace), Some(Input::Rewind));
        assert_eq!(keymap(Keycode::Escape), Some(Input::Quit));
    }

    #[test]
    fn test_ignores_unmapped_keys() {
        assert_eq!(keymap(Keycode::P), None);
    }
}

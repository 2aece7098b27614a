use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use chip8_core::InputEvent;

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
/// Esc and Ctrl-C quit. Letters match regardless of case.
pub fn keymap(key: &KeyEvent) -> Option<InputEvent> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('C') => Some(InputEvent::Quit),
            _ => None,
        };
    }
    let c = match key.code {
        KeyCode::Esc => return Some(InputEvent::Quit),
        KeyCode::Char(c) => c.to_ascii_lowercase(),
        _ => return None,
    };
    let hex = match c {
        'x' => 0x0,
        '1' => 0x1,
        '2' => 0x2,
        '3' => 0x3,
        'q' => 0x4,
        'w' => 0x5,
        'e' => 0x6,
        'a' => 0x7,
        's' => 0x8,
        'd' => 0x9,
        'z' => 0xA,
        'c' => 0xB,
        '4' => 0xC,
        'r' => 0xD,
        'f' => 0xE,
        'v' => 0xF,
        _ => return None,
    };
    Some(InputEvent::Key(hex))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_keypad_layout() {
        let rows = ["123c", "456d", "789e", "a0bf"];
        let keys = ["1234", "qwer", "asdf", "zxcv"];
        for (hex_row, key_row) in rows.iter().zip(keys.iter()) {
            for (hex, key) in hex_row.chars().zip(key_row.chars()) {
                let expected = hex.to_digit(16).unwrap() as u8;
                assert_eq!(
                    keymap(&press(KeyCode::Char(key))),
                    Some(InputEvent::Key(expected)),
                    "key {}",
                    key
                );
            }
        }
    }

    #[test]
    fn test_upper_case_letters_map_too() {
        assert_eq!(keymap(&press(KeyCode::Char('V'))), Some(InputEvent::Key(0xF)));
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(keymap(&press(KeyCode::Esc)), Some(InputEvent::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(keymap(&ctrl_c), Some(InputEvent::Quit));
    }

    #[test]
    fn test_unmapped_keys() {
        assert_eq!(keymap(&press(KeyCode::Char('5'))), None);
        assert_eq!(keymap(&press(KeyCode::Char('g'))), None);
        assert_eq!(keymap(&press(KeyCode::Enter)), None);
        let ctrl_x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL);
        assert_eq!(keymap(&ctrl_x), None);
    }
}

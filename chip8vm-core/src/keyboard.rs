pub const KEY_COUNT: usize = 16;

/// The hexadecimal keypad, written by the front-end and read by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keypad {
    keys: [bool; KEY_COUNT],
}

impl Keypad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = true;
    }

    pub fn release(&mut self, key: u8) {
        self.keys[(key & 0xF) as usize] = false;
    }

    /// Replaces the whole key vector, one entry per key code.
    pub fn set_keys(&mut self, keys: [bool; KEY_COUNT]) {
        self.keys = keys;
    }

    pub fn release_all(&mut self) {
        self.keys = [false; KEY_COUNT];
    }

    /// Only the low nibble of `key` selects a key.
    pub fn is_key_down(&self, key: u8) -> bool {
        self.keys[(key & 0xF) as usize]
    }

    /// Lowest pressed key code, which is released as it is taken.
    pub fn take_first_pressed(&mut self) -> Option<u8> {
        let key = self.keys.iter().position(|&down| down)?;
        self.keys[key] = false;
        Some(key as u8)
    }
}

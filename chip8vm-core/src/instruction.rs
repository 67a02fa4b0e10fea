use std::fmt;

/// A raw 16-bit instruction word with accessors for its operand fields.
///
/// Decoding never fails: every word yields some field values, and whether
/// they name a real instruction is decided by the interpreter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Instruction(u16);

impl Instruction {
    pub fn decode(word: u16) -> Self {
        Self(word)
    }

    pub fn from_bytes(high: u8, low: u8) -> Self {
        Self(u16::from_be_bytes([high, low]))
    }

    pub fn word(self) -> u16 {
        self.0
    }

    /// Top nibble, selecting the instruction group.
    pub fn family(self) -> u8 {
        (self.0 >> 12) as u8
    }

    pub fn x(self) -> u8 {
        ((self.0 >> 8) & 0xF) as u8
    }

    pub fn y(self) -> u8 {
        ((self.0 >> 4) & 0xF) as u8
    }

    pub fn n(self) -> u8 {
        (self.0 & 0xF) as u8
    }

    pub fn nn(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    pub fn nnn(self) -> u16 {
        self.0 & 0xFFF
    }

    pub fn nibbles(self) -> [u8; 4] {
        [self.family(), self.x(), self.y(), self.n()]
    }

    /// Assembly-style rendering, `???` for words with no defined behaviour.
    pub fn mnemonic(self) -> String {
        let (x, y, n, nn, nnn) = (self.x(), self.y(), self.n(), self.nn(), self.nnn());
        match self.nibbles() {
            [0x0, 0x0, 0xE, 0x0] => "CLS".into(),
            [0x0, 0x0, 0xE, 0xE] => "RET".into(),
            [0x1, ..] => format!("JP {nnn:03X}"),
            [0x2, ..] => format!("CALL {nnn:03X}"),
            [0x3, ..] => format!("SE V{x:X}, {nn:02X}"),
            [0x4, ..] => format!("SNE V{x:X}, {nn:02X}"),
            [0x5, _, _, 0x0] => format!("SE V{x:X}, V{y:X}"),
            [0x6, ..] => format!("LD V{x:X}, {nn:02X}"),
            [0x7, ..] => format!("ADD V{x:X}, {nn:02X}"),
            [0x8, _, _, 0x0] => format!("LD V{x:X}, V{y:X}"),
            [0x8, _, _, 0x1] => format!("OR V{x:X}, V{y:X}"),
            [0x8, _, _, 0x2] => format!("AND V{x:X}, V{y:X}"),
            [0x8, _, _, 0x3] => format!("XOR V{x:X}, V{y:X}"),
            [0x8, _, _, 0x4] => format!("ADD V{x:X}, V{y:X}"),
            [0x8, _, _, 0x5] => format!("SUB V{x:X}, V{y:X}"),
            [0x8, _, _, 0x6] => format!("SHR V{x:X}"),
            [0x8, _, _, 0x7] => format!("SUBN V{x:X}, V{y:X}"),
            [0x8, _, _, 0xE] => format!("SHL V{x:X}"),
            [0x9, _, _, 0x0] => format!("SNE V{x:X}, V{y:X}"),
            [0xA, ..] => format!("LD I, {nnn:03X}"),
            [0xB, ..] => format!("JP V0, {nnn:03X}"),
            [0xC, ..] => format!("RND V{x:X}, {nn:02X}"),
            [0xD, ..] => format!("DRW V{x:X}, V{y:X}, {n:X}"),
            [0xE, _, 0x9, 0xE] => format!("SKP V{x:X}"),
            [0xE, _, 0xA, 0x1] => format!("SKNP V{x:X}"),
            [0xF, _, 0x0, 0x7] => format!("LD V{x:X}, DT"),
            [0xF, _, 0x0, 0xA] => format!("LD V{x:X}, K"),
            [0xF, _, 0x1, 0x5] => format!("LD DT, V{x:X}"),
            [0xF, _, 0x1, 0x8] => format!("LD ST, V{x:X}"),
            [0xF, _, 0x1, 0xE] => format!("ADD I, V{x:X}"),
            [0xF, _, 0x2, 0x9] => format!("LD F, V{x:X}"),
            [0xF, _, 0x3, 0x3] => format!("LD B, V{x:X}"),
            [0xF, _, 0x5, 0x5] => format!("LD [I], V{x:X}"),
            [0xF, _, 0x6, 0x5] => format!("LD V{x:X}, [I]"),
            _ => "???".into(),
        }
    }
}

impl From<u16> for Instruction {
    fn from(word: u16) -> Self {
        Self::decode(word)
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04X} {}", self.0, self.mnemonic())
    }
}

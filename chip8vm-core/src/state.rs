use crate::{Chip8Error, Display, Instruction, Keypad, Result};

pub const MEMORY_SIZE: usize = 4096;
pub const PROGRAM_START: u16 = 0x200;
pub const MAX_PROGRAM_SIZE: usize = MEMORY_SIZE - PROGRAM_START as usize;
pub const STACK_DEPTH: usize = 16;
pub const FONT_ADDRESS: u16 = 0x000;
pub const FONT_GLYPH_SIZE: u16 = 5;

pub const FONT: [u8; 16 * 5] = [
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

/// Everything the machine remembers between cycles.
#[derive(Debug, Clone)]
pub struct Chip8State {
    pub data_registers: [u8; 16],
    pub index_register: u16,
    pub program_counter: u16,
    pub stack_pointer: u8,
    pub ram: [u8; MEMORY_SIZE],
    pub stack: [u16; STACK_DEPTH],
    pub delay_timer: u8,
    pub sound_timer: u8,
    pub display: Display,
    pub keypad: Keypad,
}

impl Default for Chip8State {
    fn default() -> Self {
        let mut state = Self {
            data_registers: [0; 16],
            index_register: 0,
            program_counter: PROGRAM_START,
            stack_pointer: 0,
            ram: [0; MEMORY_SIZE],
            stack: [0; STACK_DEPTH],
            delay_timer: 0,
            sound_timer: 0,
            display: Display::new(),
            keypad: Keypad::new(),
        };
        state.load_font_data(&FONT);
        state
    }
}

impl Chip8State {
    pub fn load_font_data(&mut self, fonts: &[u8]) {
        let start = FONT_ADDRESS as usize;
        self.ram[start..start + fonts.len()].copy_from_slice(fonts);
    }

    /// Puts every mutable field back to its power-on value and reinstalls the
    /// font. Program memory and the keypad are left alone.
    pub fn reset(&mut self) {
        self.data_registers = [0; 16];
        self.index_register = 0;
        self.program_counter = PROGRAM_START;
        self.stack_pointer = 0;
        self.stack = [0; STACK_DEPTH];
        self.delay_timer = 0;
        self.sound_timer = 0;
        self.display.clear();
        self.load_font_data(&FONT);
        tracing::debug!("machine reset");
    }

    /// Resets the machine and copies `program` to `0x200`.
    ///
    /// An oversized image is rejected before anything is touched.
    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        if program.len() > MAX_PROGRAM_SIZE {
            return Err(Chip8Error::RomTooLarge {
                size: program.len(),
                max: MAX_PROGRAM_SIZE,
            });
        }

        self.reset();
        let start = PROGRAM_START as usize;
        self.ram[start..].fill(0);
        self.ram[start..start + program.len()].copy_from_slice(program);
        tracing::debug!(size = program.len(), "program loaded");
        Ok(())
    }

    /// The instruction at the program counter.
    pub fn fetch(&self) -> Instruction {
        Instruction::from_bytes(
            self.read(self.program_counter),
            self.read(self.program_counter.wrapping_add(1)),
        )
    }

    /// Byte at `address`, wrapped into the 4 KiB address space.
    pub fn read(&self, address: u16) -> u8 {
        self.ram[address as usize % MEMORY_SIZE]
    }

    pub fn write(&mut self, address: u16, value: u8) {
        self.ram[address as usize % MEMORY_SIZE] = value;
    }

    pub fn register(&self, register_index: u8) -> u8 {
        self.data_registers[register_index as usize]
    }

    pub fn register_mut(&mut self, register_index: u8) -> &mut u8 {
        &mut self.data_registers[register_index as usize]
    }

    pub fn set_flag(&mut self, flag: bool) {
        *self.register_mut(0xF) = flag as u8;
    }
}

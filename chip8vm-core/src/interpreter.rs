use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};

use crate::{
    Chip8Beeper, Chip8Config, Chip8Error, Chip8State, Display, Instruction, Keypad, Result,
    SilentBeeper, StackPolicy, FONT_ADDRESS, FONT_GLYPH_SIZE, MEMORY_SIZE, STACK_DEPTH,
};

/// How the program counter moves once an instruction has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Next,
    Skip,
    Jump(u16),
    /// Re-run the same instruction next cycle.
    Wait,
}

impl Flow {
    fn skip_if(condition: bool) -> Self {
        if condition {
            Flow::Skip
        } else {
            Flow::Next
        }
    }
}

/// Instruction engine plus cycle driver.
///
/// `R` supplies the bytes for the random instruction and `B` is told when the
/// sound timer is running. The caller owns the loop and calls [`cycle`] once
/// per time step, writing keys into [`keypad_mut`] before and reading
/// [`display`] after.
///
/// [`cycle`]: Chip8Interpreter::cycle
/// [`keypad_mut`]: Chip8Interpreter::keypad_mut
/// [`display`]: Chip8Interpreter::display
pub struct Chip8Interpreter<R: RngCore, B: Chip8Beeper> {
    pub state: Chip8State,
    pub config: Chip8Config,
    rng: R,
    beeper: B,
}

impl Default for Chip8Interpreter<StdRng, SilentBeeper> {
    fn default() -> Self {
        Self::new(StdRng::from_entropy(), SilentBeeper)
    }
}

impl<R: RngCore, B: Chip8Beeper> Chip8Interpreter<R, B> {
    pub fn new(rng: R, beeper: B) -> Self {
        Self::with_config(rng, beeper, Chip8Config::default())
    }

    pub fn with_config(rng: R, beeper: B, config: Chip8Config) -> Self {
        Self {
            state: Chip8State::default(),
            config,
            rng,
            beeper,
        }
    }

    pub fn load_program(&mut self, program: &[u8]) -> Result<()> {
        self.state.load_program(program)
    }

    pub fn reset(&mut self) {
        self.state.reset();
    }

    pub fn display(&self) -> &Display {
        &self.state.display
    }

    pub fn keypad_mut(&mut self) -> &mut Keypad {
        &mut self.state.keypad
    }

    pub fn beeper(&self) -> &B {
        &self.beeper
    }

    pub fn beeper_mut(&mut self) -> &mut B {
        &mut self.beeper
    }

    /// One fetch-decode-execute step followed by one timer step.
    ///
    /// On error nothing has changed, timers included.
    pub fn cycle(&mut self) -> Result<()> {
        let instruction = self.state.fetch();
        self.execute(instruction)?;
        self.tick_timers();
        Ok(())
    }

    /// Runs `instruction` as if it had been fetched from the program counter.
    pub fn execute(&mut self, instruction: Instruction) -> Result<()> {
        let address = self.state.program_counter;
        if self.config.trace_instructions {
            tracing::trace!("{address:03X}: {instruction}");
        }

        let flow = self.apply(instruction, address)?;

        let next = match flow {
            Flow::Next => address.wrapping_add(2),
            Flow::Skip => address.wrapping_add(4),
            Flow::Jump(target) => target,
            Flow::Wait => address,
        };
        self.state.program_counter = next % MEMORY_SIZE as u16;
        Ok(())
    }

    fn tick_timers(&mut self) {
        let state = &mut self.state;
        if state.delay_timer > 0 {
            state.delay_timer -= 1;
        }
        if state.sound_timer > 0 {
            self.beeper.play();
            state.sound_timer -= 1;
        } else {
            self.beeper.pause();
        }
    }

    fn apply(&mut self, instruction: Instruction, address: u16) -> Result<Flow> {
        let state = &mut self.state;
        let nnn = instruction.nnn();
        let immediate_value = instruction.nn();

        let flow = match instruction.nibbles() {
            //clear display
            [0x0, 0x0, 0xE, 0x0] => {
                state.display.clear();
                Flow::Next
            }
            //return
            [0x0, 0x0, 0xE, 0xE] => {
                if state.stack_pointer == 0 && self.config.stack_policy == StackPolicy::Strict {
                    return Err(Chip8Error::StackUnderflow { address });
                }
                let return_address = state.stack[state.stack_pointer as usize % STACK_DEPTH];
                state.stack_pointer =
                    ((state.stack_pointer as usize + STACK_DEPTH - 1) % STACK_DEPTH) as u8;
                Flow::Jump(return_address)
            }
            //jump to address
            [0x1, _, _, _] => Flow::Jump(nnn),
            //call subroutine
            [0x2, _, _, _] => {
                if state.stack_pointer as usize >= STACK_DEPTH - 1
                    && self.config.stack_policy == StackPolicy::Strict
                {
                    return Err(Chip8Error::StackOverflow { address });
                }
                state.stack_pointer = ((state.stack_pointer as usize + 1) % STACK_DEPTH) as u8;
                state.stack[state.stack_pointer as usize] = address.wrapping_add(2);
                Flow::Jump(nnn)
            }
            //skip if Vx == NN
            [0x3, vx, _, _] => Flow::skip_if(state.register(vx) == immediate_value),
            //skip if Vx != NN
            [0x4, vx, _, _] => Flow::skip_if(state.register(vx) != immediate_value),
            //skip if Vx == Vy
            [0x5, vx, vy, 0x0] => Flow::skip_if(state.register(vx) == state.register(vy)),
            //Vx = value
            [0x6, vx, _, _] => {
                *state.register_mut(vx) = immediate_value;
                Flow::Next
            }
            //Vx += value, no carry
            [0x7, vx, _, _] => {
                *state.register_mut(vx) = state.register(vx).wrapping_add(immediate_value);
                Flow::Next
            }
            //Vx = Vy
            [0x8, vx, vy, 0x0] => {
                *state.register_mut(vx) = state.register(vy);
                Flow::Next
            }
            //Vx |= Vy
            [0x8, vx, vy, 0x1] => {
                *state.register_mut(vx) |= state.register(vy);
                Flow::Next
            }
            //Vx &= Vy
            [0x8, vx, vy, 0x2] => {
                *state.register_mut(vx) &= state.register(vy);
                Flow::Next
            }
            //Vx ^= Vy
            [0x8, vx, vy, 0x3] => {
                *state.register_mut(vx) ^= state.register(vy);
                Flow::Next
            }
            //Vx += Vy
            [0x8, vx, vy, 0x4] => {
                let (result, overflow) = state.register(vx).overflowing_add(state.register(vy));
                state.set_flag(overflow);
                *state.register_mut(vx) = result;
                Flow::Next
            }
            //Vx -= Vy
            [0x8, vx, vy, 0x5] => {
                let (x, y) = (state.register(vx), state.register(vy));
                state.set_flag(x > y);
                *state.register_mut(vx) = state.register(vx).wrapping_sub(state.register(vy));
                Flow::Next
            }
            //Vx >>= 1
            [0x8, vx, _, 0x6] => {
                state.set_flag(state.register(vx) & 1 == 1);
                *state.register_mut(vx) = state.register(vx) >> 1;
                Flow::Next
            }
            //Vx = Vy - Vx
            [0x8, vx, vy, 0x7] => {
                let (x, y) = (state.register(vx), state.register(vy));
                state.set_flag(y > x);
                *state.register_mut(vx) = state.register(vy).wrapping_sub(state.register(vx));
                Flow::Next
            }
            //Vx <<= 1
            [0x8, vx, _, 0xE] => {
                state.set_flag(state.register(vx) >> 7 == 1);
                *state.register_mut(vx) = state.register(vx) << 1;
                Flow::Next
            }
            //skip if Vx != Vy
            [0x9, vx, vy, 0x0] => Flow::skip_if(state.register(vx) != state.register(vy)),
            //I = address
            [0xA, _, _, _] => {
                state.index_register = nnn;
                Flow::Next
            }
            //jump to NNN + V0
            [0xB, _, _, _] => Flow::Jump(nnn + state.register(0x0) as u16),
            //Vx = rand() & NN
            [0xC, vx, _, _] => {
                *state.register_mut(vx) = immediate_value & self.rng.gen::<u8>();
                Flow::Next
            }
            //display sprite
            [0xD, vx, vy, rows] => {
                state.set_flag(false);
                let x = state.register(vx);
                let y = state.register(vy);
                let mut sprite = [0u8; 15];
                for (i, byte) in sprite.iter_mut().take(rows as usize).enumerate() {
                    *byte = state.read(state.index_register.wrapping_add(i as u16));
                }
                if state.display.draw(x, y, &sprite[..rows as usize]) {
                    state.set_flag(true);
                }
                Flow::Next
            }
            //skip if key()
            [0xE, vx, 0x9, 0xE] => Flow::skip_if(state.keypad.is_key_down(state.register(vx))),
            //skip if !key()
            [0xE, vx, 0xA, 0x1] => Flow::skip_if(!state.keypad.is_key_down(state.register(vx))),
            //Vx = delay timer
            [0xF, vx, 0x0, 0x7] => {
                *state.register_mut(vx) = state.delay_timer;
                Flow::Next
            }
            //Vx = get_key(), stays on this instruction until a key is down
            [0xF, vx, 0x0, 0xA] => match state.keypad.take_first_pressed() {
                Some(key) => {
                    *state.register_mut(vx) = key;
                    Flow::Next
                }
                None => Flow::Wait,
            },
            //delay timer = Vx
            [0xF, vx, 0x1, 0x5] => {
                state.delay_timer = state.register(vx);
                Flow::Next
            }
            //sound timer = Vx
            [0xF, vx, 0x1, 0x8] => {
                state.sound_timer = state.register(vx);
                Flow::Next
            }
            //I += Vx, VF only touched when I leaves the address space
            [0xF, vx, 0x1, 0xE] => {
                let result = state.index_register.wrapping_add(state.register(vx) as u16);
                state.index_register = result;
                if result > 0xFFF {
                    state.set_flag(true);
                }
                Flow::Next
            }
            //I = Vx'th character
            [0xF, vx, 0x2, 0x9] => {
                state.index_register = FONT_ADDRESS + state.register(vx) as u16 * FONT_GLYPH_SIZE;
                Flow::Next
            }
            //store Vx as decimal digits
            [0xF, vx, 0x3, 0x3] => {
                let value = state.register(vx);
                let index = state.index_register;
                state.write(index, value / 100);
                state.write(index.wrapping_add(1), value / 10 % 10);
                state.write(index.wrapping_add(2), value % 10);
                Flow::Next
            }
            //store V0 through Vx
            [0xF, vx, 0x5, 0x5] => {
                for i in 0..=vx {
                    state.write(state.index_register.wrapping_add(i as u16), state.register(i));
                }
                Flow::Next
            }
            //load V0 through Vx
            [0xF, vx, 0x6, 0x5] => {
                for i in 0..=vx {
                    *state.register_mut(i) = state.read(state.index_register.wrapping_add(i as u16));
                }
                Flow::Next
            }
            _ => {
                return Err(Chip8Error::UnsupportedInstruction {
                    word: instruction.word(),
                    address,
                })
            }
        };
        Ok(flow)
    }
}

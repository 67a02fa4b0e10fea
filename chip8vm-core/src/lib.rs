mod beeper;
mod config;
mod display;
mod error;
mod instruction;
mod interpreter;
mod keyboard;
mod state;

pub use beeper::*;
pub use config::*;
pub use display::*;
pub use error::*;
pub use instruction::*;
pub use interpreter::*;
pub use keyboard::*;
pub use state::*;

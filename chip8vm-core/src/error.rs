use thiserror::Error;

pub type Result<T> = std::result::Result<T, Chip8Error>;

/// Failures surfaced by program loading and by the cycle driver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Chip8Error {
    /// The program image does not fit in the memory above `0x200`.
    #[error("program is {size} bytes but at most {max} bytes fit in program memory")]
    RomTooLarge { size: usize, max: usize },
    /// The fetched word has no defined behaviour.
    #[error("unsupported instruction {word:04X} at {address:03X}")]
    UnsupportedInstruction { word: u16, address: u16 },
    /// A call was made with every stack slot in use.
    #[error("stack overflow on call at {address:03X}")]
    StackOverflow { address: u16 },
    /// A return was made with no matching call.
    #[error("stack underflow on return at {address:03X}")]
    StackUnderflow { address: u16 },
}

/// What happens when a call or return runs off either end of the stack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StackPolicy {
    /// Refuse the instruction with `StackOverflow` / `StackUnderflow`.
    #[default]
    Strict,
    /// Wrap the stack pointer modulo the stack depth, like the bare hardware would.
    Wrapping,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chip8Config {
    pub stack_policy: StackPolicy,
    /// Emit a `trace` event for every executed instruction.
    pub trace_instructions: bool,
}

impl Default for Chip8Config {
    fn default() -> Self {
        Self {
            stack_policy: StackPolicy::Strict,
            trace_instructions: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_strict_and_quiet() {
        let config = Chip8Config::default();
        assert_eq!(config.stack_policy, StackPolicy::Strict);
        assert!(!config.trace_instructions);
    }
}

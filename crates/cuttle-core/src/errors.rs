use core::fmt;

/// The only failures the core surfaces at its boundary (spec §6/§7).
/// Invariant violations (a phase substate missing when the phase demands
/// one, a generator move the executor rejects) are bugs, not caller errors,
/// and are asserted via `debug_assert!` inside the executor instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    IllegalMove(String),
    NoLegalMoves,
    GameAlreadyOver,
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::IllegalMove(reason) => write!(f, "illegal move: {reason}"),
            CoreError::NoLegalMoves => write!(f, "no legal moves for a non-terminal state"),
            CoreError::GameAlreadyOver => write!(f, "game is already over"),
        }
    }
}

impl std::error::Error for CoreError {}

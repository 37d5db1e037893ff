use cuttle_core::model::game_state::GameState;
use cuttle_core::moves::Move;

/// Per-move statistics returned alongside a search's chosen move (§6);
/// `availability_count` is only populated by ISMCTS.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveStats {
    pub mv: Move,
    pub visits: u32,
    pub wins: f64,
    pub win_rate: f64,
    pub availability_count: Option<u32>,
}

impl MoveStats {
    pub fn new(mv: Move, visits: u32, wins: f64, availability_count: Option<u32>) -> Self {
        let win_rate = if visits > 0 { wins / visits as f64 } else { 0.0 };
        Self { mv, visits, wins, win_rate, availability_count }
    }
}

/// A search or policy that picks one move out of `legal_moves` for `state`,
/// reporting per-move statistics from the same run that produced the pick.
pub trait Strategy {
    fn select_move(&mut self, state: &GameState, legal_moves: &[Move]) -> (Move, Vec<MoveStats>);
}

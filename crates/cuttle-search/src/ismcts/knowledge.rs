use cuttle_core::model::game_state::GameState;
use cuttle_core::moves::Move;
use std::collections::HashSet;

/// A monotonically-growing set of cards a perspective has learned the exact
/// identity of, beyond what is structurally public in a `GameState` (board
/// zones, scrap, revealed sevens, and the perspective's own hand are already
/// public there). The only genuinely hidden information in Cuttle is *which*
/// cards sit in the opponent's hand versus the deck; every transition other
/// than `Draw` moves a named card into a hand in full view of both players
/// (a Three-revive from scrap, a Nine returning a permanent), so this is
/// symmetric public knowledge rather than one player's private belief.
#[derive(Debug, Clone, Default)]
pub struct Knowledge {
    known_hand_cards: HashSet<cuttle_core::model::card::Card>,
}

impl Knowledge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds in one executed transition. Only `Draw` hides the identity of
    /// the card entering a hand; every other move that adds a card to either
    /// player's hand does so in public view.
    pub fn observe(&mut self, before: &GameState, after: &GameState, mv: &Move) {
        if matches!(mv, Move::Draw) {
            return;
        }
        for player in 0..2 {
            let before_hand: HashSet<_> = before.player(player).hand().iter().copied().collect();
            for &card in after.player(player).hand() {
                if !before_hand.contains(&card) {
                    self.known_hand_cards.insert(card);
                }
            }
        }
    }

    pub fn is_known(&self, card: cuttle_core::model::card::Card) -> bool {
        self.known_hand_cards.contains(&card)
    }
}

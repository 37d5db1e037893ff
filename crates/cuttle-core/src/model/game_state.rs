use crate::model::card::Card;
use crate::model::deck::{create_deck, shuffle_deck};
use crate::model::phase::{CounterState, FourState, Phase, SevenState, WinReason};
use crate::model::player_state::PlayerState;
use serde::{Deserialize, Serialize};

/// The full, immutable state of a two-player game. Every mutation goes
/// through a `with_*` constructor that returns a new value; nothing is
/// edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    players: [PlayerState; 2],
    deck: Vec<Card>,
    scrap: Vec<Card>,
    current_player: usize,
    phase: Phase,
    turn_number: u32,
    consecutive_passes: u8,
    counter_state: Option<CounterState>,
    seven_state: Option<SevenState>,
    four_state: Option<FourState>,
    winner: Option<usize>,
    win_reason: Option<WinReason>,
}

impl GameState {
    /// Deals 5 cards to player 0 and 6 to player 1 from a deck shuffled with
    /// `seed` (or an OS-entropy seed when `None`); player 0 acts first.
    pub fn initial(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(rand::random);
        let mut deck = create_deck();
        shuffle_deck(&mut deck, seed);

        let p0_hand = deck[0..5].to_vec();
        let p1_hand = deck[5..11].to_vec();
        let remaining = deck[11..].to_vec();

        Self {
            players: [PlayerState::new(p0_hand), PlayerState::new(p1_hand)],
            deck: remaining,
            scrap: Vec::new(),
            current_player: 0,
            phase: Phase::Main,
            turn_number: 0,
            consecutive_passes: 0,
            counter_state: None,
            seven_state: None,
            four_state: None,
            winner: None,
            win_reason: None,
        }
    }

    pub fn players(&self) -> &[PlayerState; 2] {
        &self.players
    }

    pub fn player(&self, index: usize) -> &PlayerState {
        &self.players[index]
    }

    pub fn current_player(&self) -> usize {
        self.current_player
    }

    pub fn opponent(&self) -> usize {
        1 - self.current_player
    }

    pub fn current_player_state(&self) -> &PlayerState {
        &self.players[self.current_player]
    }

    pub fn opponent_state(&self) -> &PlayerState {
        &self.players[self.opponent()]
    }

    pub fn deck(&self) -> &[Card] {
        &self.deck
    }

    pub fn scrap(&self) -> &[Card] {
        &self.scrap
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn counter_state(&self) -> Option<&CounterState> {
        self.counter_state.as_ref()
    }

    pub fn seven_state(&self) -> Option<&SevenState> {
        self.seven_state.as_ref()
    }

    pub fn four_state(&self) -> Option<&FourState> {
        self.four_state.as_ref()
    }

    pub fn winner(&self) -> Option<usize> {
        self.winner
    }

    pub fn win_reason(&self) -> Option<WinReason> {
        self.win_reason
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The player who must act right now, which differs from
    /// `current_player` during Counter/DiscardFour/ResolveSeven phases.
    pub fn acting_player(&self) -> usize {
        match self.phase {
            Phase::Counter => self
                .counter_state
                .as_ref()
                .map(|c| c.waiting_for_player())
                .unwrap_or(self.current_player),
            Phase::DiscardFour => self
                .four_state
                .as_ref()
                .map(|f| f.player)
                .unwrap_or(self.current_player),
            Phase::ResolveSeven => self
                .seven_state
                .as_ref()
                .map(|s| s.player)
                .unwrap_or(self.current_player),
            Phase::Main | Phase::GameOver => self.current_player,
        }
    }

    /// `max(21 - 7*kings, 7)`.
    pub fn point_threshold(&self, player: usize) -> u32 {
        let kings = self.players[player].kings_count() as i32;
        (21 - 7 * kings).max(7) as u32
    }

    /// Threshold win, then empty-deck comparison, then empty-deck empty-hand.
    /// Returns `(winner, reason)` if the game should end given this state.
    pub fn check_winner(&self) -> Option<(usize, WinReason)> {
        for player in 0..2 {
            if self.players[player].point_total() >= self.point_threshold(player) {
                return Some((player, WinReason::Points));
            }
        }

        if self.deck.is_empty() {
            let totals = [self.players[0].point_total(), self.players[1].point_total()];
            if totals[0] > totals[1] {
                return Some((0, WinReason::EmptyDeckPoints));
            }
            if totals[1] > totals[0] {
                return Some((1, WinReason::EmptyDeckPoints));
            }
            for player in 0..2 {
                if self.players[player].hand().is_empty() {
                    return Some((1 - player, WinReason::OpponentEmptyHand));
                }
            }
        }

        None
    }

    pub fn with_players(&self, players: [PlayerState; 2]) -> Self {
        Self { players, ..self.clone() }
    }

    pub fn with_deck(&self, deck: Vec<Card>) -> Self {
        Self { deck, ..self.clone() }
    }

    pub fn with_scrap(&self, scrap: Vec<Card>) -> Self {
        Self { scrap, ..self.clone() }
    }

    pub fn with_current_player(&self, current_player: usize) -> Self {
        Self { current_player, ..self.clone() }
    }

    pub fn with_phase(&self, phase: Phase) -> Self {
        Self { phase, ..self.clone() }
    }

    pub fn with_turn_number(&self, turn_number: u32) -> Self {
        Self { turn_number, ..self.clone() }
    }

    pub fn with_consecutive_passes(&self, consecutive_passes: u8) -> Self {
        Self { consecutive_passes, ..self.clone() }
    }

    pub fn with_counter_state(&self, counter_state: Option<CounterState>) -> Self {
        Self { counter_state, ..self.clone() }
    }

    pub fn with_seven_state(&self, seven_state: Option<SevenState>) -> Self {
        Self { seven_state, ..self.clone() }
    }

    pub fn with_four_state(&self, four_state: Option<FourState>) -> Self {
        Self { four_state, ..self.clone() }
    }

    pub fn with_winner(&self, winner: usize, reason: WinReason) -> Self {
        Self {
            winner: Some(winner),
            win_reason: Some(reason),
            phase: Phase::GameOver,
            ..self.clone()
        }
    }

    /// Total cards across every location; must always equal 52.
    pub fn total_card_count(&self) -> usize {
        let mut count = self.deck.len() + self.scrap.len();
        for player in &self.players {
            count += player.hand().len();
            count += player.points_field().len();
            count += player.permanents().len();
            count += player.jacks().len() * 2;
        }
        if let Some(seven) = &self.seven_state {
            count += seven.revealed_cards.len();
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::GameState;
    use crate::model::phase::{Phase, WinReason};

    #[test]
    fn initial_deals_five_and_six() {
        let state = GameState::initial(Some(1));
        assert_eq!(state.player(0).hand().len(), 5);
        assert_eq!(state.player(1).hand().len(), 6);
        assert_eq!(state.deck().len(), 52 - 11);
        assert_eq!(state.current_player(), 0);
        assert_eq!(state.phase(), Phase::Main);
    }

    #[test]
    fn initial_is_pure_under_seed() {
        let a = GameState::initial(Some(99));
        let b = GameState::initial(Some(99));
        assert_eq!(a, b);
    }

    #[test]
    fn total_card_count_is_52_at_start() {
        let state = GameState::initial(Some(5));
        assert_eq!(state.total_card_count(), 52);
    }

    #[test]
    fn point_threshold_drops_with_kings() {
        let state = GameState::initial(Some(2));
        assert_eq!(state.point_threshold(0), 21);
        let with_two_kings = state.with_players([
            state
                .player(0)
                .with_permanents(vec![
                    crate::model::card::Card::new(crate::model::rank::Rank::King, crate::model::suit::Suit::Clubs),
                    crate::model::card::Card::new(crate::model::rank::Rank::King, crate::model::suit::Suit::Spades),
                ]),
            state.player(1).clone(),
        ]);
        assert_eq!(with_two_kings.point_threshold(0), 7);
    }

    #[test]
    fn acting_player_follows_current_player_in_main() {
        let state = GameState::initial(Some(3));
        assert_eq!(state.acting_player(), state.current_player());
    }

    #[test]
    fn win_check_detects_threshold() {
        let state = GameState::initial(Some(4));
        let ten_clubs = crate::model::card::Card::new(crate::model::rank::Rank::Ten, crate::model::suit::Suit::Clubs);
        let ten_spades = crate::model::card::Card::new(crate::model::rank::Rank::Ten, crate::model::suit::Suit::Spades);
        let king = crate::model::card::Card::new(crate::model::rank::Rank::King, crate::model::suit::Suit::Hearts);
        let ace = crate::model::card::Card::new(crate::model::rank::Rank::Ace, crate::model::suit::Suit::Diamonds);
        let p0 = state
            .player(0)
            .with_points_field(vec![ten_clubs, ten_spades, ace])
            .with_permanents(vec![king]);
        let with_points = state.with_players([p0, state.player(1).clone()]);
        assert_eq!(with_points.check_winner(), Some((0, WinReason::Points)));
    }
}

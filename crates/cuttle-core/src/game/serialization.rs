use crate::model::card::Card;
use crate::model::game_state::GameState;
use crate::model::phase::Phase;
use crate::model::player_state::PlayerState;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// The persistence record consumed by the logger (§6): turn number, current
/// player, phase name, deck/scrap sizes, and per-player hand/points/
/// permanents as card string tokens. Deck and scrap contents are recorded
/// only by size, so `restore` cannot reconstruct their exact cards; this
/// format round-trips Main-phase states under snapshot equality, not under
/// full `GameState` equality.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameStateSnapshot {
    pub turn_number: u32,
    pub current_player: usize,
    pub phase: String,
    pub deck_size: usize,
    pub scrap_size: usize,
    pub hands: [Vec<String>; 2],
    pub points_fields: [Vec<String>; 2],
    pub permanents: [Vec<String>; 2],
}

impl GameStateSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let hands = std::array::from_fn(|i| state.player(i).hand().iter().copied().map(card_to_string).collect());
        let points_fields =
            std::array::from_fn(|i| state.player(i).points_field().iter().copied().map(card_to_string).collect());
        let permanents =
            std::array::from_fn(|i| state.player(i).permanents().iter().copied().map(card_to_string).collect());

        GameStateSnapshot {
            turn_number: state.turn_number(),
            current_player: state.current_player(),
            phase: phase_name(state.phase()).to_string(),
            deck_size: state.deck().len(),
            scrap_size: state.scrap().len(),
            hands,
            points_fields,
            permanents,
        }
    }

    /// Reconstructs a Main-phase state from the snapshot. Deck and scrap are
    /// rebuilt only up to their recorded lengths, using whichever cards from
    /// the full 52-card set are not already accounted for in hands/points/
    /// permanents; which of those cards land in deck vs. scrap is therefore
    /// unspecified and this state is not meant to resume play.
    pub fn restore(&self) -> Option<GameState> {
        if self.phase != phase_name(Phase::Main) {
            return None;
        }

        let mut hands = [Vec::new(), Vec::new()];
        let mut points_fields = [Vec::new(), Vec::new()];
        let mut permanents = [Vec::new(), Vec::new()];
        for i in 0..2 {
            hands[i] = self.hands[i].iter().map(|s| parse_card(s)).collect::<Option<Vec<_>>>()?;
            points_fields[i] = self.points_fields[i].iter().map(|s| parse_card(s)).collect::<Option<Vec<_>>>()?;
            permanents[i] = self.permanents[i].iter().map(|s| parse_card(s)).collect::<Option<Vec<_>>>()?;
        }

        let mut accounted: Vec<Card> = Vec::new();
        for i in 0..2 {
            accounted.extend(hands[i].iter().copied());
            accounted.extend(points_fields[i].iter().copied());
            accounted.extend(permanents[i].iter().copied());
        }

        let mut remaining: Vec<Card> = crate::model::deck::create_deck()
            .into_iter()
            .filter(|c| !accounted.contains(c))
            .collect();
        if remaining.len() < self.deck_size + self.scrap_size {
            return None;
        }
        let scrap = remaining.split_off(remaining.len() - self.scrap_size);
        let deck = remaining.split_off(remaining.len() - self.deck_size);

        let players = [
            PlayerState::new(hands[0].clone()).with_points_field(points_fields[0].clone()).with_permanents(permanents[0].clone()),
            PlayerState::new(hands[1].clone()).with_points_field(points_fields[1].clone()).with_permanents(permanents[1].clone()),
        ];

        Some(
            GameState::initial(Some(0))
                .with_players(players)
                .with_deck(deck)
                .with_scrap(scrap)
                .with_current_player(self.current_player)
                .with_turn_number(self.turn_number)
                .with_phase(Phase::Main),
        )
    }

    pub fn to_json(state: &GameState) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&Self::capture(state))
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::Main => "Main",
        Phase::Counter => "Counter",
        Phase::ResolveSeven => "ResolveSeven",
        Phase::DiscardFour => "DiscardFour",
        Phase::GameOver => "GameOver",
    }
}

fn card_to_string(card: Card) -> String {
    card.to_string()
}

fn parse_card(code: &str) -> Option<Card> {
    if code.is_empty() {
        return None;
    }
    let mut chars = code.chars();
    let suit_char = chars.next_back()?;
    let rank_str: String = chars.collect();

    let suit = match suit_char {
        '\u{2663}' => Suit::Clubs,
        '\u{2666}' => Suit::Diamonds,
        '\u{2665}' => Suit::Hearts,
        '\u{2660}' => Suit::Spades,
        _ => return None,
    };
    let rank = match rank_str.as_str() {
        "A" => Rank::Ace,
        "2" => Rank::Two,
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "8" => Rank::Eight,
        "9" => Rank::Nine,
        "10" => Rank::Ten,
        "J" => Rank::Jack,
        "Q" => Rank::Queen,
        "K" => Rank::King,
        _ => return None,
    };
    Some(Card::new(rank, suit))
}

#[cfg(test)]
mod tests {
    use super::GameStateSnapshot;
    use crate::model::card::Card;
    use crate::model::game_state::GameState;
    use crate::model::player_state::PlayerState;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;

    #[test]
    fn snapshot_round_trips_through_json() {
        let base = GameState::initial(Some(42));
        let p0 = PlayerState::new(vec![Card::new(Rank::Ace, Suit::Clubs)])
            .with_points_field(vec![Card::new(Rank::Ten, Suit::Spades)]);
        let state = base.with_players([p0, base.player(1).clone()]);

        let json = GameStateSnapshot::to_json(&state).unwrap();
        let parsed = GameStateSnapshot::from_json(&json).unwrap();
        assert_eq!(parsed, GameStateSnapshot::capture(&state));
    }

    #[test]
    fn card_token_round_trips() {
        let card = Card::new(Rank::Queen, Suit::Diamonds);
        let token = super::card_to_string(card);
        assert_eq!(super::parse_card(&token), Some(card));
    }

    #[test]
    fn restore_reconstructs_hands_and_board() {
        let base = GameState::initial(Some(1));
        let p0 = PlayerState::new(vec![Card::new(Rank::Five, Suit::Clubs)])
            .with_points_field(vec![Card::new(Rank::Ten, Suit::Spades)]);
        let state = base.with_players([p0, base.player(1).clone()]).with_turn_number(3);

        let snapshot = GameStateSnapshot::capture(&state);
        let restored = snapshot.restore().unwrap();
        assert_eq!(restored.turn_number(), 3);
        assert_eq!(restored.player(0).hand(), state.player(0).hand());
        assert_eq!(restored.player(0).points_field(), state.player(0).points_field());
    }

    #[test]
    fn non_main_phase_does_not_restore() {
        let state = GameState::initial(Some(2)).with_phase(crate::model::phase::Phase::Counter);
        let snapshot = GameStateSnapshot::capture(&state);
        assert!(snapshot.restore().is_none());
    }
}

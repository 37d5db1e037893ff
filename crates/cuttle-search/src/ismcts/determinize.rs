use super::knowledge::Knowledge;
use cuttle_core::model::card::Card;
use cuttle_core::model::deck::create_deck;
use cuttle_core::model::game_state::GameState;
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

/// Samples a concrete `GameState` consistent with everything `perspective`
/// knows (§4.7). Every zone but the opponent's hand and the deck is already
/// public inside `GameState`, so determinizing only has to decide which of
/// the 52 cards the opponent is holding versus which remain in the deck:
/// cards `knowledge` has observed entering that hand stay fixed there, and
/// the rest of the unseen pool is shuffled and split by size.
///
/// If `perspective` controls Glasses (an Eight permanent), the opponent's
/// hand is public per the rules and the real state is returned unchanged.
pub fn determinize<R: Rng + ?Sized>(
    state: &GameState,
    perspective: usize,
    knowledge: &Knowledge,
    rng: &mut R,
) -> GameState {
    if state.player(perspective).has_glasses() {
        return state.clone();
    }

    let opponent = 1 - perspective;
    let opponent_hand = state.player(opponent).hand().to_vec();

    let mut known: HashSet<Card> = HashSet::new();
    for player in state.players() {
        known.extend(player.points_field().iter().copied());
        known.extend(player.permanents().iter().copied());
        for (jack, stolen) in player.jacks() {
            known.insert(*jack);
            known.insert(*stolen);
        }
    }
    known.extend(state.scrap().iter().copied());
    if let Some(seven) = state.seven_state() {
        known.extend(seven.revealed_cards.iter().copied());
    }
    known.extend(state.player(perspective).hand().iter().copied());

    let fixed_in_opponent_hand: Vec<Card> =
        opponent_hand.iter().copied().filter(|c| knowledge.is_known(*c)).collect();
    known.extend(fixed_in_opponent_hand.iter().copied());

    let mut unseen: Vec<Card> = create_deck().into_iter().filter(|c| !known.contains(c)).collect();
    unseen.shuffle(rng);

    let remaining_hand_slots = opponent_hand.len() - fixed_in_opponent_hand.len();
    let mut new_opponent_hand = fixed_in_opponent_hand;
    new_opponent_hand.extend(unseen.drain(0..remaining_hand_slots));
    let new_deck = unseen;

    let mut players = state.players().clone();
    players[opponent] = players[opponent].clone().with_hand(new_opponent_hand);

    state.with_players(players).with_deck(new_deck)
}

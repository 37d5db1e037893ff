use crate::errors::CoreError;
use crate::model::card::Card;
use crate::model::game_state::GameState;
use crate::model::phase::{CounterState, FourState, Phase, SevenState, WinReason};
use crate::model::rank::Rank;
use crate::moves::{Move, OneOffEffect, PlayAs};

/// Applies `mv` to `state`, producing the successor state. The executor
/// trusts that `mv` came from `legal_moves(state)`; it still rejects the
/// obviously wrong (wrong phase, card not held) but does not re-derive full
/// legality for every target.
pub fn execute(state: &GameState, mv: Move) -> Result<GameState, CoreError> {
    if state.is_game_over() {
        return Err(CoreError::GameAlreadyOver);
    }

    match mv {
        Move::Draw => execute_draw(state),
        Move::PlayPoints { card } => execute_play_points(state, card),
        Move::Scuttle { card, target } => execute_scuttle(state, card, target),
        Move::PlayOneOff {
            card,
            effect: _,
            target_card,
            target_player,
        } => execute_play_one_off(state, card, target_card, target_player),
        Move::PlayPermanent { card, target_card } => execute_play_permanent(state, card, target_card),
        Move::Counter { card } => execute_counter(state, card),
        Move::DeclineCounter => execute_decline_counter(state),
        Move::ResolveSeven { card, play_as, target_card } => execute_resolve_seven(state, card, play_as, target_card),
        Move::Discard { card } => execute_discard(state, card),
        Move::Pass => execute_pass(state),
    }
}

/// Flips the turn with no win check. Used by moves that cannot change either
/// player's points or permanents: Draw, Pass, a declined counter that does
/// not resolve, and a one-off resolution that only touches a hand.
fn end_turn(state: &GameState) -> GameState {
    let next_player = 1 - state.current_player();
    let next_turn = if state.current_player() == 1 {
        state.turn_number() + 1
    } else {
        state.turn_number()
    };
    state.with_current_player(next_player).with_turn_number(next_turn)
}

/// Checks for a winner, then flips the turn if there isn't one. Used by
/// every move that can change points or permanents (spec §4.4.12); never by
/// Draw or Pass, which cannot.
fn check_win_then_end_turn(state: &GameState) -> GameState {
    if let Some((winner, reason)) = state.check_winner() {
        return state.with_winner(winner, reason);
    }
    end_turn(state)
}

fn is_protected_by_queen(owner: &crate::model::player_state::PlayerState, card: Card) -> bool {
    if card.rank == Rank::Queen {
        return false;
    }
    owner.has_queen_protection()
}

fn owner_of_permanent(state: &GameState, target: Card) -> Option<usize> {
    state
        .players()
        .iter()
        .position(|p| p.permanents().contains(&target) || p.jacks().iter().any(|(jack, _)| *jack == target))
}

fn execute_draw(state: &GameState) -> Result<GameState, CoreError> {
    if state.phase() != Phase::Main {
        return Err(CoreError::IllegalMove("draw is only legal in the main phase".into()));
    }
    if state.deck().is_empty() {
        return Err(CoreError::IllegalMove("deck is empty".into()));
    }

    let mut deck = state.deck().to_vec();
    let drawn = deck.remove(0);
    let player = state.current_player();

    let mut hand = state.player(player).hand().to_vec();
    hand.push(drawn);
    let mut players = state.players().clone();
    players[player] = players[player].with_hand(hand);

    Ok(end_turn(&state.with_players(players).with_deck(deck).with_consecutive_passes(0)))
}

fn execute_play_points(state: &GameState, card: Card) -> Result<GameState, CoreError> {
    if state.phase() != Phase::Main {
        return Err(CoreError::IllegalMove("play-points is only legal in the main phase".into()));
    }
    let player = state.current_player();
    if !state.player(player).hand().contains(&card) {
        return Err(CoreError::IllegalMove("card not in hand".into()));
    }
    if !card.can_play_for_points() {
        return Err(CoreError::IllegalMove("card cannot be played for points".into()));
    }

    let mut hand = state.player(player).hand().to_vec();
    hand.retain(|&c| c != card);
    let mut field = state.player(player).points_field().to_vec();
    field.push(card);

    let mut players = state.players().clone();
    players[player] = players[player].with_hand(hand).with_points_field(field);

    Ok(check_win_then_end_turn(&state.with_players(players).with_consecutive_passes(0)))
}

fn execute_scuttle(state: &GameState, card: Card, target: Card) -> Result<GameState, CoreError> {
    if state.phase() != Phase::Main {
        return Err(CoreError::IllegalMove("scuttle is only legal in the main phase".into()));
    }
    let player = state.current_player();
    if !state.player(player).hand().contains(&card) {
        return Err(CoreError::IllegalMove("card not in hand".into()));
    }
    if !card.scuttles(target) {
        return Err(CoreError::IllegalMove("card does not scuttle target".into()));
    }

    let opponent_idx = state.opponent();
    let opponent = state.player(opponent_idx).clone();
    if is_protected_by_queen(&opponent, target) {
        return Err(CoreError::IllegalMove("target is protected by a queen".into()));
    }

    let mut hand = state.player(player).hand().to_vec();
    hand.retain(|&c| c != card);
    let mut scrap = state.scrap().to_vec();
    scrap.push(card);

    let new_opponent = if let Some(pos) = opponent.points_field().iter().position(|&c| c == target) {
        let mut field = opponent.points_field().to_vec();
        field.remove(pos);
        scrap.push(target);
        opponent.with_points_field(field)
    } else if let Some(pos) = opponent.jacks().iter().position(|(_, stolen)| *stolen == target) {
        let mut jacks = opponent.jacks().to_vec();
        let (jack, stolen) = jacks.remove(pos);
        scrap.push(jack);
        scrap.push(stolen);
        opponent.with_jacks(jacks)
    } else {
        return Err(CoreError::IllegalMove("scuttle target not found".into()));
    };

    let mut players = state.players().clone();
    players[player] = players[player].with_hand(hand);
    players[opponent_idx] = new_opponent;

    Ok(check_win_then_end_turn(&state.with_players(players).with_scrap(scrap).with_consecutive_passes(0)))
}

fn execute_play_one_off(
    state: &GameState,
    card: Card,
    target_card: Option<Card>,
    target_player: Option<usize>,
) -> Result<GameState, CoreError> {
    if state.phase() != Phase::Main {
        return Err(CoreError::IllegalMove("one-offs are only cast in the main phase".into()));
    }
    let player = state.current_player();
    if !state.player(player).hand().contains(&card) {
        return Err(CoreError::IllegalMove("card not in hand".into()));
    }
    if !card.can_play_as_one_off() {
        return Err(CoreError::IllegalMove("card cannot be played as a one-off".into()));
    }

    let mut hand = state.player(player).hand().to_vec();
    hand.retain(|&c| c != card);
    let mut players = state.players().clone();
    players[player] = players[player].with_hand(hand);

    let counter_state = CounterState::new(card, player, target_card, target_player);
    Ok(state
        .with_players(players)
        .with_phase(Phase::Counter)
        .with_counter_state(Some(counter_state))
        .with_consecutive_passes(0))
}

fn execute_play_permanent(state: &GameState, card: Card, target_card: Option<Card>) -> Result<GameState, CoreError> {
    if state.phase() != Phase::Main {
        return Err(CoreError::IllegalMove("permanents are only played in the main phase".into()));
    }
    let player = state.current_player();
    if !state.player(player).hand().contains(&card) {
        return Err(CoreError::IllegalMove("card not in hand".into()));
    }
    if !card.can_play_as_permanent() {
        return Err(CoreError::IllegalMove("card cannot be played as a permanent".into()));
    }

    let mut hand = state.player(player).hand().to_vec();
    hand.retain(|&c| c != card);
    let mut players = state.players().clone();
    players[player] = players[player].with_hand(hand);
    let base = state.with_players(players).with_consecutive_passes(0);

    if card.rank == Rank::Jack {
        let target = target_card.ok_or_else(|| CoreError::IllegalMove("jack requires a target".into()))?;
        return jack_steal(&base, player, card, target);
    }

    let mut players = base.players().clone();
    let mut perms = players[player].permanents().to_vec();
    perms.push(card);
    players[player] = players[player].with_permanents(perms);

    Ok(check_win_then_end_turn(&base.with_players(players)))
}

/// Shared by PlayPermanent(Jack) and the ResolveSeven permanent path.
fn jack_steal(state: &GameState, caster: usize, jack: Card, target: Card) -> Result<GameState, CoreError> {
    let opponent_idx = 1 - caster;
    let mut players = state.players().clone();
    let opponent = players[opponent_idx].clone();
    let mut scrap = state.scrap().to_vec();

    let stolen = if let Some(pos) = opponent.points_field().iter().position(|&c| c == target) {
        let mut field = opponent.points_field().to_vec();
        field.remove(pos);
        players[opponent_idx] = opponent.with_points_field(field);
        target
    } else if let Some(pos) = opponent.jacks().iter().position(|(_, stolen)| *stolen == target) {
        let mut jacks = opponent.jacks().to_vec();
        let (old_jack, stolen) = jacks.remove(pos);
        scrap.push(old_jack);
        players[opponent_idx] = opponent.with_jacks(jacks);
        stolen
    } else {
        return Err(CoreError::IllegalMove("jack target not found".into()));
    };

    let mut jacks = players[caster].jacks().to_vec();
    jacks.push((jack, stolen));
    players[caster] = players[caster].with_jacks(jacks);

    Ok(check_win_then_end_turn(&state.with_players(players).with_scrap(scrap)))
}

fn execute_counter(state: &GameState, card: Card) -> Result<GameState, CoreError> {
    if state.phase() != Phase::Counter {
        return Err(CoreError::IllegalMove("counter is only legal in the counter phase".into()));
    }
    if card.rank != Rank::Two {
        return Err(CoreError::IllegalMove("only a two may counter".into()));
    }
    let counter = state
        .counter_state()
        .ok_or(CoreError::IllegalMove("no pending one-off".into()))?
        .clone();
    let waiting = counter.waiting_for_player();
    if !state.player(waiting).hand().contains(&card) {
        return Err(CoreError::IllegalMove("card not in hand".into()));
    }

    let mut hand = state.player(waiting).hand().to_vec();
    hand.retain(|&c| c != card);
    let mut players = state.players().clone();
    players[waiting] = players[waiting].with_hand(hand);

    Ok(state
        .with_players(players)
        .with_counter_state(Some(counter.with_counter(card))))
}

fn execute_decline_counter(state: &GameState) -> Result<GameState, CoreError> {
    if state.phase() != Phase::Counter {
        return Err(CoreError::IllegalMove("decline-counter is only legal in the counter phase".into()));
    }
    let counter = state
        .counter_state()
        .ok_or(CoreError::IllegalMove("no pending one-off".into()))?
        .clone();

    let mut scrap = state.scrap().to_vec();
    scrap.push(counter.one_off_card);
    scrap.extend(counter.counter_chain.iter().copied());

    let base = state
        .with_scrap(scrap)
        .with_phase(Phase::Main)
        .with_counter_state(None);

    if counter.resolves() {
        resolve_one_off(&base, &counter)
    } else {
        Ok(end_turn(&base))
    }
}

fn resolve_one_off(state: &GameState, counter: &CounterState) -> Result<GameState, CoreError> {
    match counter.one_off_card.rank {
        Rank::Ace => Ok(resolve_ace(state)),
        Rank::Two => resolve_two(state, counter),
        Rank::Three => resolve_three(state, counter),
        Rank::Four => Ok(resolve_four(state, counter)),
        Rank::Five => Ok(resolve_five(state, counter)),
        Rank::Six => Ok(resolve_six(state)),
        Rank::Seven => Ok(resolve_seven(state, counter)),
        Rank::Nine => resolve_nine(state, counter),
        other => Err(CoreError::IllegalMove(format!("{other} has no one-off effect"))),
    }
}

fn resolve_ace(state: &GameState) -> GameState {
    let mut scrap = state.scrap().to_vec();
    let mut players = state.players().clone();
    for p in players.iter_mut() {
        scrap.extend(p.points_field().iter().copied());
        for (jack, stolen) in p.jacks() {
            scrap.push(*jack);
            scrap.push(*stolen);
        }
        *p = p.with_points_field(Vec::new()).with_jacks(Vec::new());
    }
    check_win_then_end_turn(&state.with_players(players).with_scrap(scrap))
}

/// The counted-out-of-band effect for a Two cast as a one-off (not the
/// counter usage): destroy the named permanent. A stolen card under the
/// destroyed Jack is discarded with it, never returned.
fn resolve_two(state: &GameState, counter: &CounterState) -> Result<GameState, CoreError> {
    let target_player = counter
        .target_player
        .ok_or(CoreError::IllegalMove("two requires a target player".into()))?;
    let target = counter
        .target_card
        .ok_or(CoreError::IllegalMove("two requires a target card".into()))?;

    let mut players = state.players().clone();
    let owner = players[target_player].clone();
    let mut scrap = state.scrap().to_vec();

    let new_owner = if let Some(pos) = owner.permanents().iter().position(|&c| c == target) {
        let mut perms = owner.permanents().to_vec();
        perms.remove(pos);
        scrap.push(target);
        owner.with_permanents(perms)
    } else if let Some(pos) = owner.jacks().iter().position(|(jack, _)| *jack == target) {
        let mut jacks = owner.jacks().to_vec();
        let (jack, stolen) = jacks.remove(pos);
        scrap.push(jack);
        scrap.push(stolen);
        owner.with_jacks(jacks)
    } else {
        return Err(CoreError::IllegalMove("two target not found".into()));
    };
    players[target_player] = new_owner;

    Ok(check_win_then_end_turn(&state.with_players(players).with_scrap(scrap)))
}

fn resolve_three(state: &GameState, counter: &CounterState) -> Result<GameState, CoreError> {
    let target = counter
        .target_card
        .ok_or(CoreError::IllegalMove("three requires a scrap target".into()))?;
    let caster = counter.one_off_player;

    let mut scrap = state.scrap().to_vec();
    let pos = scrap
        .iter()
        .position(|&c| c == target)
        .ok_or(CoreError::IllegalMove("three target not in scrap".into()))?;
    scrap.remove(pos);

    let mut players = state.players().clone();
    let mut hand = players[caster].hand().to_vec();
    hand.push(target);
    players[caster] = players[caster].with_hand(hand);

    Ok(end_turn(&state.with_players(players).with_scrap(scrap)))
}

fn resolve_four(state: &GameState, counter: &CounterState) -> GameState {
    let caster = counter.one_off_player;
    let opponent = 1 - caster;
    let count = state.player(opponent).hand().len().min(2);
    if count == 0 {
        return end_turn(state);
    }
    state
        .with_phase(Phase::DiscardFour)
        .with_four_state(Some(FourState { player: opponent, cards_to_discard: count }))
}

fn resolve_five(state: &GameState, counter: &CounterState) -> GameState {
    let caster = counter.one_off_player;
    let mut deck = state.deck().to_vec();
    let n = deck.len().min(2);
    let drawn: Vec<Card> = deck.drain(0..n).collect();

    let mut players = state.players().clone();
    let mut hand = players[caster].hand().to_vec();
    hand.extend(drawn);
    players[caster] = players[caster].with_hand(hand);

    end_turn(&state.with_players(players).with_deck(deck))
}

fn resolve_six(state: &GameState) -> GameState {
    let mut scrap = state.scrap().to_vec();
    let mut players = state.players().clone();
    for p in players.iter_mut() {
        scrap.extend(p.permanents().iter().copied());
        for (jack, stolen) in p.jacks() {
            scrap.push(*jack);
            scrap.push(*stolen);
        }
        *p = p.with_permanents(Vec::new()).with_jacks(Vec::new());
    }
    check_win_then_end_turn(&state.with_players(players).with_scrap(scrap))
}

/// How many deck-top cards a Seven reveals. Other Cuttle variants reveal
/// two (§9); kept as a single named constant rather than a per-call
/// parameter so `execute`'s two-argument signature (§6) stays fixed.
pub const SEVEN_REVEAL_COUNT: usize = 1;

fn resolve_seven(state: &GameState, counter: &CounterState) -> GameState {
    let caster = counter.one_off_player;
    let mut deck = state.deck().to_vec();
    debug_assert!(!deck.is_empty(), "generator must not offer seven with an empty deck");
    let n = SEVEN_REVEAL_COUNT.min(deck.len());
    let revealed: Vec<Card> = deck.drain(0..n).collect();
    state
        .with_deck(deck)
        .with_phase(Phase::ResolveSeven)
        .with_seven_state(Some(SevenState { revealed_cards: revealed, player: caster }))
}

/// Unlike Two, returning a Jack via Nine sends the stolen card back to its
/// original owner's points field rather than to scrap.
fn resolve_nine(state: &GameState, counter: &CounterState) -> Result<GameState, CoreError> {
    let target_player = counter
        .target_player
        .ok_or(CoreError::IllegalMove("nine requires a target player".into()))?;
    let target = counter
        .target_card
        .ok_or(CoreError::IllegalMove("nine requires a target card".into()))?;

    let mut players = state.players().clone();
    let owner = players[target_player].clone();

    if let Some(pos) = owner.permanents().iter().position(|&c| c == target) {
        let mut perms = owner.permanents().to_vec();
        perms.remove(pos);
        let mut hand = owner.hand().to_vec();
        hand.push(target);
        players[target_player] = owner.with_permanents(perms).with_hand(hand);
    } else if let Some(pos) = owner.jacks().iter().position(|(jack, _)| *jack == target) {
        let mut jacks = owner.jacks().to_vec();
        let (jack, stolen) = jacks.remove(pos);
        let mut hand = owner.hand().to_vec();
        hand.push(jack);
        players[target_player] = owner.with_jacks(jacks).with_hand(hand);

        let original_owner_idx = 1 - target_player;
        let original_owner = players[original_owner_idx].clone();
        let mut field = original_owner.points_field().to_vec();
        field.push(stolen);
        players[original_owner_idx] = original_owner.with_points_field(field);
    } else {
        return Err(CoreError::IllegalMove("nine target not found".into()));
    }

    Ok(check_win_then_end_turn(&state.with_players(players)))
}

fn execute_resolve_seven(
    state: &GameState,
    card: Card,
    play_as: PlayAs,
    target_card: Option<Card>,
) -> Result<GameState, CoreError> {
    if state.phase() != Phase::ResolveSeven {
        return Err(CoreError::IllegalMove("resolve-seven is only legal in the resolve-seven phase".into()));
    }
    let seven = state
        .seven_state()
        .ok_or(CoreError::IllegalMove("no pending seven reveal".into()))?
        .clone();
    let player = seven.player;

    let mut revealed = seven.revealed_cards.clone();
    let pos = revealed
        .iter()
        .position(|&c| c == card)
        .ok_or(CoreError::IllegalMove("card was not revealed".into()))?;
    revealed.remove(pos);

    // Whichever revealed card is not chosen goes back to the top of the deck.
    let mut deck = state.deck().to_vec();
    for &unused in revealed.iter().rev() {
        deck.insert(0, unused);
    }

    let base = state.with_seven_state(None).with_phase(Phase::Main).with_deck(deck);

    match play_as {
        PlayAs::Discard => {
            let mut scrap = base.scrap().to_vec();
            scrap.push(card);
            Ok(end_turn(&base.with_scrap(scrap)))
        }
        PlayAs::Points => {
            let mut players = base.players().clone();
            let mut field = players[player].points_field().to_vec();
            field.push(card);
            players[player] = players[player].with_points_field(field);
            Ok(check_win_then_end_turn(&base.with_players(players)))
        }
        PlayAs::Scuttle => {
            let target = target_card.ok_or(CoreError::IllegalMove("scuttle requires a target".into()))?;
            let opponent_idx = 1 - player;
            let mut players = base.players().clone();
            let opponent = players[opponent_idx].clone();
            let mut scrap = base.scrap().to_vec();
            scrap.push(card);

            let new_opponent = if let Some(pos) = opponent.points_field().iter().position(|&c| c == target) {
                let mut field = opponent.points_field().to_vec();
                field.remove(pos);
                scrap.push(target);
                opponent.with_points_field(field)
            } else if let Some(pos) = opponent.jacks().iter().position(|(_, stolen)| *stolen == target) {
                let mut jacks = opponent.jacks().to_vec();
                let (jack, stolen) = jacks.remove(pos);
                scrap.push(jack);
                scrap.push(stolen);
                opponent.with_jacks(jacks)
            } else {
                return Err(CoreError::IllegalMove("seven scuttle target not found".into()));
            };
            players[opponent_idx] = new_opponent;

            Ok(check_win_then_end_turn(&base.with_players(players).with_scrap(scrap)))
        }
        PlayAs::Permanent => {
            if card.rank == Rank::Jack {
                let target = target_card.ok_or(CoreError::IllegalMove("jack requires a target".into()))?;
                jack_steal(&base, player, card, target)
            } else {
                let mut players = base.players().clone();
                let mut perms = players[player].permanents().to_vec();
                perms.push(card);
                players[player] = players[player].with_permanents(perms);
                Ok(check_win_then_end_turn(&base.with_players(players)))
            }
        }
        PlayAs::OneOff => {
            let target_player = target_card.and_then(|t| owner_of_permanent(&base, t));
            let counter_state = CounterState::new(card, player, target_card, target_player);
            Ok(base.with_phase(Phase::Counter).with_counter_state(Some(counter_state)))
        }
    }
}

fn execute_discard(state: &GameState, card: Card) -> Result<GameState, CoreError> {
    if state.phase() != Phase::DiscardFour {
        return Err(CoreError::IllegalMove("discard is only legal in the discard-four phase".into()));
    }
    let four = state
        .four_state()
        .ok_or(CoreError::IllegalMove("no pending discard".into()))?
        .clone();
    if !state.player(four.player).hand().contains(&card) {
        return Err(CoreError::IllegalMove("card not in hand".into()));
    }

    let mut hand = state.player(four.player).hand().to_vec();
    hand.retain(|&c| c != card);
    let hand_empty = hand.is_empty();
    let mut players = state.players().clone();
    players[four.player] = players[four.player].with_hand(hand);

    let mut scrap = state.scrap().to_vec();
    scrap.push(card);
    let new_state = state.with_players(players).with_scrap(scrap);

    let remaining = four.cards_to_discard - 1;
    if remaining == 0 || hand_empty {
        Ok(end_turn(&new_state.with_phase(Phase::Main).with_four_state(None)))
    } else {
        Ok(new_state.with_four_state(Some(FourState { player: four.player, cards_to_discard: remaining })))
    }
}

fn execute_pass(state: &GameState) -> Result<GameState, CoreError> {
    if state.phase() != Phase::Main {
        return Err(CoreError::IllegalMove("pass is only legal in the main phase".into()));
    }
    if !state.deck().is_empty() {
        return Err(CoreError::IllegalMove("pass is only legal with an empty deck".into()));
    }

    let passes = state.consecutive_passes() + 1;
    if passes >= 2 {
        let totals = [state.player(0).point_total(), state.player(1).point_total()];
        if totals[0] != totals[1] {
            let winner = if totals[0] > totals[1] { 0 } else { 1 };
            return Ok(state.with_winner(winner, WinReason::EmptyDeckPoints));
        }
        return Ok(end_turn(&state.with_consecutive_passes(0)));
    }

    Ok(end_turn(&state.with_consecutive_passes(passes)))
}

#[cfg(test)]
mod tests {
    use super::execute;
    use crate::model::card::Card;
    use crate::model::game_state::GameState;
    use crate::model::phase::{CounterState, Phase, WinReason};
    use crate::model::player_state::PlayerState;
    use crate::model::rank::Rank;
    use crate::model::suit::Suit;
    use crate::moves::{Move, OneOffEffect};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card::new(rank, suit)
    }

    #[test]
    fn point_win_ends_the_game() {
        let base = GameState::initial(Some(1)).with_deck(vec![card(Rank::Two, Suit::Clubs)]);
        let p0 = PlayerState::new(vec![card(Rank::Ace, Suit::Clubs)])
            .with_points_field(vec![card(Rank::Ten, Suit::Clubs), card(Rank::Ten, Suit::Spades)]);
        let state = base.with_players([p0, base.player(1).clone()]).with_current_player(0);

        let result = execute(&state, Move::PlayPoints { card: card(Rank::Ace, Suit::Clubs) }).unwrap();
        assert_eq!(result.winner(), Some(0));
        assert_eq!(result.win_reason(), Some(WinReason::Points));
        assert_eq!(result.phase(), Phase::GameOver);
    }

    #[test]
    fn counter_canceled_ace_sends_ace_and_two_to_scrap() {
        let base = GameState::initial(Some(2));
        let ace = card(Rank::Ace, Suit::Clubs);
        let two = card(Rank::Two, Suit::Hearts);
        let p0 = PlayerState::new(vec![ace]);
        let p1 = PlayerState::new(vec![two]).with_points_field(vec![card(Rank::Five, Suit::Diamonds)]);
        let state = base.with_players([p0, p1]).with_current_player(0);

        let after_cast = execute(&state, Move::PlayOneOff {
            card: ace,
            effect: OneOffEffect::AceScrapAllPoints,
            target_card: None,
            target_player: None,
        })
        .unwrap();
        assert_eq!(after_cast.phase(), Phase::Counter);

        let after_counter = execute(&after_cast, Move::Counter { card: two }).unwrap();
        assert!(!after_counter.counter_state().unwrap().resolves());

        let resolved = execute(&after_counter, Move::DeclineCounter).unwrap();
        assert_eq!(resolved.phase(), Phase::Main);
        assert!(resolved.scrap().contains(&ace));
        assert!(resolved.scrap().contains(&two));
        assert_eq!(resolved.player(1).points_field(), &[card(Rank::Five, Suit::Diamonds)]);
        assert_eq!(resolved.current_player(), 1);
    }

    #[test]
    fn jack_then_scuttle_of_stolen_card_scraps_jack_and_stolen() {
        let base = GameState::initial(Some(3));
        let jack = card(Rank::Jack, Suit::Spades);
        let five_clubs = card(Rank::Five, Suit::Clubs);
        let six = card(Rank::Six, Suit::Diamonds);

        let p0 = PlayerState::new(vec![jack]);
        let p1 = PlayerState::new(vec![six]).with_points_field(vec![five_clubs]);
        let state = base.with_players([p0, p1]).with_current_player(0);

        let after_steal = execute(&state, Move::PlayPermanent { card: jack, target_card: Some(five_clubs) }).unwrap();
        assert_eq!(after_steal.player(0).jacks(), &[(jack, five_clubs)]);
        assert_eq!(after_steal.current_player(), 1);

        let after_scuttle = execute(&after_steal, Move::Scuttle { card: six, target: five_clubs }).unwrap();
        assert!(after_scuttle.scrap().contains(&five_clubs));
        assert!(after_scuttle.scrap().contains(&six));
        assert!(after_scuttle.scrap().contains(&jack));
        assert!(after_scuttle.player(0).jacks().is_empty());
    }

    #[test]
    fn empty_deck_double_pass_awards_higher_points() {
        let base = GameState::initial(Some(4)).with_deck(Vec::new());
        let p0 = PlayerState::new(vec![card(Rank::Three, Suit::Clubs)])
            .with_points_field(vec![card(Rank::Ten, Suit::Clubs), card(Rank::Five, Suit::Hearts)]);
        let p1 = PlayerState::new(vec![card(Rank::Four, Suit::Clubs)])
            .with_points_field(vec![card(Rank::Ten, Suit::Spades)]);
        let state = base.with_players([p0, p1]).with_current_player(0);

        let after_first_pass = execute(&state, Move::Pass).unwrap();
        assert_eq!(after_first_pass.consecutive_passes(), 1);
        let after_second_pass = execute(&after_first_pass, Move::Pass).unwrap();

        assert_eq!(after_second_pass.winner(), Some(0));
        assert_eq!(after_second_pass.win_reason(), Some(WinReason::EmptyDeckPoints));
    }

    #[test]
    fn tied_double_pass_resets_and_continues() {
        let base = GameState::initial(Some(5)).with_deck(Vec::new());
        let p0 = PlayerState::new(vec![card(Rank::Three, Suit::Clubs)])
            .with_points_field(vec![card(Rank::Ten, Suit::Clubs)]);
        let p1 = PlayerState::new(vec![card(Rank::Four, Suit::Clubs)])
            .with_points_field(vec![card(Rank::Ten, Suit::Spades)]);
        let state = base.with_players([p0, p1]).with_current_player(0);

        let after_first = execute(&state, Move::Pass).unwrap();
        let after_second = execute(&after_first, Move::Pass).unwrap();

        assert!(after_second.winner().is_none());
        assert_eq!(after_second.consecutive_passes(), 0);
        assert_eq!(after_second.phase(), Phase::Main);
    }

    #[test]
    fn seven_reveals_and_enters_resolve_seven_phase() {
        let base = GameState::initial(Some(6)).with_deck(vec![card(Rank::Five, Suit::Diamonds), card(Rank::Eight, Suit::Clubs)]);
        let seven = card(Rank::Seven, Suit::Clubs);
        let p0 = PlayerState::new(vec![seven]);
        let state = base.with_players([p0, base.player(1).clone()]).with_current_player(0);

        let after_cast = execute(&state, Move::PlayOneOff {
            card: seven,
            effect: OneOffEffect::SevenPlayFromDeck,
            target_card: None,
            target_player: None,
        })
        .unwrap();
        let resolved = execute(&after_cast, Move::DeclineCounter).unwrap();

        assert_eq!(resolved.phase(), Phase::ResolveSeven);
        assert_eq!(resolved.seven_state().unwrap().revealed_cards, vec![card(Rank::Five, Suit::Diamonds)]);
        assert_eq!(resolved.deck(), &[card(Rank::Eight, Suit::Clubs)]);
    }

    #[test]
    fn execute_on_game_over_state_errors() {
        let state = GameState::initial(Some(7)).with_winner(0, WinReason::Points);
        let err = execute(&state, Move::Draw).unwrap_err();
        assert_eq!(err, crate::errors::CoreError::GameAlreadyOver);
    }

    #[test]
    fn illegal_move_rejected_outside_generator_output() {
        let state = GameState::initial(Some(8));
        let card_not_in_hand = card(Rank::King, Suit::Hearts);
        let err = execute(&state, Move::PlayPoints { card: card_not_in_hand });
        assert!(err.is_err());
    }

    #[test]
    fn nine_return_sends_stolen_card_back_to_original_owner() {
        let base = GameState::initial(Some(9));
        let jack = card(Rank::Jack, Suit::Spades);
        let nine = card(Rank::Nine, Suit::Hearts);
        let five = card(Rank::Five, Suit::Clubs);

        let p0 = PlayerState::new(vec![nine]).with_jacks(vec![(jack, five)]);
        let p1 = PlayerState::new(Vec::new());
        let state = base.with_players([p0, p1]).with_current_player(1);

        // force a counter state directly to exercise resolve_nine without
        // needing full generator-driven targeting from player 1's turn.
        let counter = CounterState::new(nine, 1, Some(jack), Some(0));
        let with_counter = state
            .with_phase(Phase::Counter)
            .with_counter_state(Some(counter))
            .with_players([state.player(0).clone(), state.player(1).with_hand(Vec::new())]);

        let resolved = execute(&with_counter, Move::DeclineCounter).unwrap();
        assert!(resolved.player(0).jacks().is_empty());
        assert!(resolved.player(0).hand().contains(&jack));
        assert!(resolved.player(1).points_field().contains(&five));
    }
}

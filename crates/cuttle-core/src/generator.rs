use crate::model::card::Card;
use crate::model::game_state::GameState;
use crate::model::phase::Phase;
use crate::model::player_state::PlayerState;
use crate::model::rank::Rank;
use crate::moves::{Move, OneOffEffect, PlayAs};

/// Enumerates every legal move for whichever player must act in `state`.
/// Empty only for a game-over state; a non-terminal state with no legal
/// moves is an invariant violation the caller should treat as a bug.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    if state.is_game_over() {
        return Vec::new();
    }

    match state.phase() {
        Phase::Main => main_phase_moves(state),
        Phase::Counter => counter_phase_moves(state),
        Phase::ResolveSeven => seven_phase_moves(state),
        Phase::DiscardFour => discard_phase_moves(state),
        Phase::GameOver => Vec::new(),
    }
}

fn is_protected_by_queen(owner: &PlayerState, card: Card) -> bool {
    if card.rank == Rank::Queen {
        return false;
    }
    owner.has_queen_protection()
}

fn scuttleable_targets(opponent: &PlayerState, card: Card) -> Vec<Card> {
    let mut targets = Vec::new();
    for &target in opponent.points_field() {
        if card.scuttles(target) && !is_protected_by_queen(opponent, target) {
            targets.push(target);
        }
    }
    for stolen in opponent.stolen_cards() {
        if card.scuttles(stolen) && !is_protected_by_queen(opponent, stolen) {
            targets.push(stolen);
        }
    }
    targets
}

fn main_phase_moves(state: &GameState) -> Vec<Move> {
    let mut moves = Vec::new();
    let player = state.current_player_state();
    let opponent = state.opponent_state();

    if !state.deck().is_empty() {
        moves.push(Move::Draw);
    }
    if state.deck().is_empty() {
        moves.push(Move::Pass);
    }

    for &card in player.hand() {
        if card.can_play_for_points() {
            moves.push(Move::PlayPoints { card });
            for target in scuttleable_targets(opponent, card) {
                moves.push(Move::Scuttle { card, target });
            }
        }

        one_off_moves(state, card, &mut moves);
        permanent_moves(state, card, &mut moves);
    }

    moves
}

fn one_off_moves(state: &GameState, card: Card, out: &mut Vec<Move>) {
    if !card.can_play_as_one_off() {
        return;
    }
    let opponent = state.opponent_state();

    match card.rank {
        Rank::Ace => {
            let has_points = state.players().iter().any(|p| !p.points_field().is_empty() || !p.jacks().is_empty());
            if has_points {
                out.push(Move::PlayOneOff {
                    card,
                    effect: OneOffEffect::AceScrapAllPoints,
                    target_card: None,
                    target_player: None,
                });
            }
        }
        Rank::Two => {
            for target in opponent.permanents().iter().copied().chain(opponent.jack_cards()) {
                if !is_protected_by_queen(opponent, target) {
                    out.push(Move::PlayOneOff {
                        card,
                        effect: OneOffEffect::TwoDestroyPermanent,
                        target_card: Some(target),
                        target_player: Some(state.opponent()),
                    });
                }
            }
        }
        Rank::Three => {
            for &target in state.scrap() {
                out.push(Move::PlayOneOff {
                    card,
                    effect: OneOffEffect::ThreeRevive,
                    target_card: Some(target),
                    target_player: None,
                });
            }
        }
        Rank::Four => {
            if !opponent.hand().is_empty() {
                out.push(Move::PlayOneOff {
                    card,
                    effect: OneOffEffect::FourDiscard,
                    target_card: None,
                    target_player: Some(state.opponent()),
                });
            }
        }
        Rank::Five => {
            if !state.deck().is_empty() {
                out.push(Move::PlayOneOff {
                    card,
                    effect: OneOffEffect::FiveDrawTwo,
                    target_card: None,
                    target_player: None,
                });
            }
        }
        Rank::Six => {
            let has_permanents = state.players().iter().any(|p| !p.permanents().is_empty() || !p.jacks().is_empty());
            if has_permanents {
                out.push(Move::PlayOneOff {
                    card,
                    effect: OneOffEffect::SixScrapAllPermanents,
                    target_card: None,
                    target_player: None,
                });
            }
        }
        Rank::Seven => {
            if !state.deck().is_empty() {
                out.push(Move::PlayOneOff {
                    card,
                    effect: OneOffEffect::SevenPlayFromDeck,
                    target_card: None,
                    target_player: None,
                });
            }
        }
        Rank::Nine => {
            for target in opponent.permanents().iter().copied().chain(opponent.jack_cards()) {
                if !is_protected_by_queen(opponent, target) {
                    out.push(Move::PlayOneOff {
                        card,
                        effect: OneOffEffect::NineReturnPermanent,
                        target_card: Some(target),
                        target_player: Some(state.opponent()),
                    });
                }
            }
            // A Nine may also retreat one of the caster's own permanents.
            let current = state.current_player_state();
            for target in current.permanents().iter().copied().chain(current.jack_cards()) {
                out.push(Move::PlayOneOff {
                    card,
                    effect: OneOffEffect::NineReturnPermanent,
                    target_card: Some(target),
                    target_player: Some(state.current_player()),
                });
            }
        }
        _ => {}
    }
}

fn permanent_moves(state: &GameState, card: Card, out: &mut Vec<Move>) {
    if !card.can_play_as_permanent() {
        return;
    }
    let opponent = state.opponent_state();

    match card.rank {
        Rank::Eight | Rank::Queen | Rank::King => {
            out.push(Move::PlayPermanent { card, target_card: None });
        }
        Rank::Jack => {
            for target in opponent.points_field().iter().copied().chain(opponent.stolen_cards()) {
                if !is_protected_by_queen(opponent, target) {
                    out.push(Move::PlayPermanent { card, target_card: Some(target) });
                }
            }
        }
        _ => {}
    }
}

fn counter_phase_moves(state: &GameState) -> Vec<Move> {
    let Some(counter) = state.counter_state() else {
        return Vec::new();
    };
    let waiting = state.player(counter.waiting_for_player());

    let mut moves: Vec<Move> = waiting
        .hand()
        .iter()
        .filter(|c| c.rank == Rank::Two)
        .map(|&card| Move::Counter { card })
        .collect();
    moves.push(Move::DeclineCounter);
    moves
}

fn seven_phase_moves(state: &GameState) -> Vec<Move> {
    let Some(seven) = state.seven_state() else {
        return Vec::new();
    };
    let player_idx = seven.player;
    let opponent = state.player(1 - player_idx);

    let mut moves = Vec::new();
    for &card in &seven.revealed_cards {
        let before = moves.len();

        if card.can_play_for_points() {
            moves.push(Move::ResolveSeven { card, play_as: PlayAs::Points, target_card: None });
            for target in opponent.points_field().iter().copied() {
                if card.scuttles(target) && !is_protected_by_queen(opponent, target) {
                    moves.push(Move::ResolveSeven { card, play_as: PlayAs::Scuttle, target_card: Some(target) });
                }
            }
        }

        if card.can_play_as_one_off() {
            seven_one_off_options(state, card, player_idx, &mut moves);
        }

        if card.can_play_as_permanent() {
            seven_permanent_options(state, card, player_idx, &mut moves);
        }

        if moves.len() == before {
            moves.push(Move::ResolveSeven { card, play_as: PlayAs::Discard, target_card: None });
        }
    }
    moves
}

fn seven_one_off_options(state: &GameState, card: Card, player: usize, out: &mut Vec<Move>) {
    let opponent = state.player(1 - player);
    let current = state.player(player);

    match card.rank {
        Rank::Ace => {
            let has_points = state.players().iter().any(|p| !p.points_field().is_empty() || !p.jacks().is_empty());
            if has_points {
                out.push(Move::ResolveSeven { card, play_as: PlayAs::OneOff, target_card: None });
            }
        }
        Rank::Two => {
            for target in opponent.permanents().iter().copied().chain(opponent.jack_cards()) {
                if !is_protected_by_queen(opponent, target) {
                    out.push(Move::ResolveSeven { card, play_as: PlayAs::OneOff, target_card: Some(target) });
                }
            }
        }
        Rank::Three => {
            for &target in state.scrap() {
                out.push(Move::ResolveSeven { card, play_as: PlayAs::OneOff, target_card: Some(target) });
            }
        }
        Rank::Four => {
            if !opponent.hand().is_empty() {
                out.push(Move::ResolveSeven { card, play_as: PlayAs::OneOff, target_card: None });
            }
        }
        Rank::Five => {
            if !state.deck().is_empty() {
                out.push(Move::ResolveSeven { card, play_as: PlayAs::OneOff, target_card: None });
            }
        }
        Rank::Six => {
            let has_permanents = state.players().iter().any(|p| !p.permanents().is_empty() || !p.jacks().is_empty());
            if has_permanents {
                out.push(Move::ResolveSeven { card, play_as: PlayAs::OneOff, target_card: None });
            }
        }
        Rank::Seven => {
            if !state.deck().is_empty() {
                out.push(Move::ResolveSeven { card, play_as: PlayAs::OneOff, target_card: None });
            }
        }
        Rank::Nine => {
            for target in opponent.permanents().iter().copied().chain(opponent.jack_cards()) {
                if !is_protected_by_queen(opponent, target) {
                    out.push(Move::ResolveSeven { card, play_as: PlayAs::OneOff, target_card: Some(target) });
                }
            }
            for target in current.permanents().iter().copied().chain(current.jack_cards()) {
                out.push(Move::ResolveSeven { card, play_as: PlayAs::OneOff, target_card: Some(target) });
            }
        }
        _ => {}
    }
}

fn seven_permanent_options(state: &GameState, card: Card, player: usize, out: &mut Vec<Move>) {
    let opponent = state.player(1 - player);

    match card.rank {
        Rank::Eight | Rank::Queen | Rank::King => {
            out.push(Move::ResolveSeven { card, play_as: PlayAs::Permanent, target_card: None });
        }
        Rank::Jack => {
            for target in opponent.points_field().iter().copied().chain(opponent.stolen_cards()) {
                if !is_protected_by_queen(opponent, target) {
                    out.push(Move::ResolveSeven { card, play_as: PlayAs::Permanent, target_card: Some(target) });
                }
            }
        }
        _ => {}
    }
}

fn discard_phase_moves(state: &GameState) -> Vec<Move> {
    let Some(four) = state.four_state() else {
        return Vec::new();
    };
    state
        .player(four.player)
        .hand()
        .iter()
        .map(|&card| Move::Discard { card })
        .collect()
}

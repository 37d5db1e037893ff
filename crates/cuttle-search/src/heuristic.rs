use cuttle_core::model::game_state::GameState;
use cuttle_core::model::phase::Phase;
use cuttle_core::model::rank::Rank;
use cuttle_core::moves::{Move, OneOffEffect, PlayAs};

/// A pure, deterministic per-move score used to order MCTS expansion and to
/// drive the greedy half of an epsilon-greedy rollout. Higher is better.
/// Guarantees: a move that reaches the caster's point threshold this turn
/// scores strictly above any move that does not (§4.5a).
pub fn score(state: &GameState, mv: &Move) -> i64 {
    let player = state.current_player();

    match mv {
        Move::PlayPoints { card } => {
            let current = state.player(player).point_total();
            let threshold = state.point_threshold(player);
            if current + card.point_value() as u32 >= threshold {
                return 10_000;
            }
            100 + card.point_value() as i64
        }
        Move::Scuttle { card, target } => 200 + target.point_value() as i64 - card.point_value() as i64,
        Move::PlayPermanent { card, target_card } => match card.rank {
            Rank::King => 500,
            Rank::Queen => 400,
            Rank::Jack if target_card.is_some() => 300 + target_card.unwrap().point_value() as i64,
            Rank::Eight => 150,
            _ => 0,
        },
        Move::PlayOneOff { effect, .. } => score_one_off(state, player, *effect),
        Move::Counter { .. } => 300,
        Move::DeclineCounter => match state.counter_state() {
            Some(counter) if counter.resolves() => -100,
            Some(_) => 50,
            None => 0,
        },
        Move::Draw => 50,
        Move::Pass => 0,
        Move::Discard { card } => 10 - card.point_value() as i64,
        Move::ResolveSeven { card, play_as, .. } => match play_as {
            PlayAs::Points => 100 + card.point_value() as i64,
            PlayAs::Permanent => 150,
            _ => 80,
        },
    }
}

fn score_one_off(state: &GameState, player: usize, effect: OneOffEffect) -> i64 {
    match effect {
        OneOffEffect::AceScrapAllPoints => {
            let ours = state.player(player).point_total();
            let theirs = state.player(1 - player).point_total();
            if theirs > ours { 250 } else { 50 }
        }
        OneOffEffect::TwoDestroyPermanent => 200,
        OneOffEffect::FourDiscard => 150,
        OneOffEffect::FiveDrawTwo => 100,
        OneOffEffect::SixScrapAllPermanents => {
            let ours = state.player(player).permanents().len() + state.player(player).jacks().len();
            let theirs = state.player(1 - player).permanents().len() + state.player(1 - player).jacks().len();
            if theirs > ours { 200 } else { 30 }
        }
        OneOffEffect::ThreeRevive | OneOffEffect::SevenPlayFromDeck | OneOffEffect::NineReturnPermanent => 80,
    }
}

/// Stable, deterministic ordering of `moves` by descending heuristic score,
/// used to seed the expansion queue of a search tree node.
pub fn order_by_score(state: &GameState, moves: &[Move]) -> Vec<Move> {
    let mut scored: Vec<(i64, usize, Move)> = moves.iter().enumerate().map(|(i, m)| (score(state, m), i, *m)).collect();
    scored.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    scored.into_iter().map(|(_, _, m)| m).collect()
}

pub fn is_main_phase(state: &GameState) -> bool {
    state.phase() == Phase::Main
}

#[cfg(test)]
mod tests {
    use super::{order_by_score, score};
    use cuttle_core::model::card::Card;
    use cuttle_core::model::game_state::GameState;
    use cuttle_core::model::player_state::PlayerState;
    use cuttle_core::model::rank::Rank;
    use cuttle_core::model::suit::Suit;
    use cuttle_core::moves::Move;

    #[test]
    fn winning_play_points_scores_strictly_above_non_winning() {
        let base = GameState::initial(Some(1));
        let ace = Card::new(Rank::Ace, Suit::Clubs);
        let p0 = PlayerState::new(vec![ace]).with_points_field(vec![
            Card::new(Rank::Ten, Suit::Clubs),
            Card::new(Rank::Ten, Suit::Spades),
        ]);
        let winning_state = base.with_players([p0, base.player(1).clone()]).with_current_player(0);
        let winning_score = score(&winning_state, &Move::PlayPoints { card: ace });

        let two = Card::new(Rank::Two, Suit::Diamonds);
        let p0_low = PlayerState::new(vec![two]);
        let losing_state = base.with_players([p0_low, base.player(1).clone()]).with_current_player(0);
        let losing_score = score(&losing_state, &Move::PlayPoints { card: two });

        assert!(winning_score > losing_score);
        assert_eq!(winning_score, 10_000);
    }

    #[test]
    fn score_is_deterministic() {
        let state = GameState::initial(Some(2));
        let mv = Move::Draw;
        assert_eq!(score(&state, &mv), score(&state, &mv));
    }

    #[test]
    fn order_by_score_is_descending() {
        let state = GameState::initial(Some(3));
        let moves = vec![Move::Pass, Move::Draw, Move::DeclineCounter];
        let ordered = order_by_score(&state, &moves);
        let scores: Vec<i64> = ordered.iter().map(|m| score(&state, m)).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }
}

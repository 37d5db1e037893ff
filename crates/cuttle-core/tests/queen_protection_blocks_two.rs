//! Scenario 6 (spec §8): a player holding a Queen is immune to having their
//! other non-Queen permanents destroyed by a Two, both in what the generator
//! offers and in what the executor will accept.

use cuttle_core::generator::legal_moves;
use cuttle_core::model::card::Card;
use cuttle_core::model::game_state::GameState;
use cuttle_core::model::player_state::PlayerState;
use cuttle_core::model::rank::Rank;
use cuttle_core::model::suit::Suit;
use cuttle_core::moves::OneOffEffect;
use cuttle_core::Move;

#[test]
fn generator_never_offers_a_two_targeting_a_queen_protected_permanent() {
    let base = GameState::initial(Some(10));
    let two = Card::new(Rank::Two, Suit::Clubs);
    let king = Card::new(Rank::King, Suit::Diamonds);
    let queen = Card::new(Rank::Queen, Suit::Hearts);

    let p0 = PlayerState::new(vec![two]);
    let p1 = PlayerState::new(Vec::new()).with_permanents(vec![king, queen]);
    let state = base.with_players([p0, p1]).with_current_player(0);

    let moves = legal_moves(&state);
    let targets_king = moves.iter().any(|mv| {
        matches!(
            mv,
            Move::PlayOneOff { card, effect: OneOffEffect::TwoDestroyPermanent, target_card: Some(t), .. }
            if *card == two && *t == king
        )
    });
    assert!(!targets_king, "queen protection must remove the king as a legal two target");
}

#[test]
fn queen_itself_remains_a_legal_two_target() {
    let base = GameState::initial(Some(11));
    let two = Card::new(Rank::Two, Suit::Clubs);
    let queen = Card::new(Rank::Queen, Suit::Hearts);

    let p0 = PlayerState::new(vec![two]);
    let p1 = PlayerState::new(Vec::new()).with_permanents(vec![queen]);
    let state = base.with_players([p0, p1]).with_current_player(0);

    let moves = legal_moves(&state);
    let targets_queen = moves.iter().any(|mv| {
        matches!(
            mv,
            Move::PlayOneOff { card, effect: OneOffEffect::TwoDestroyPermanent, target_card: Some(t), .. }
            if *card == two && *t == queen
        )
    });
    assert!(targets_queen, "a queen is not protected from a two that targets it directly");
}

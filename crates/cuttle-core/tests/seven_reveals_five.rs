//! Scenario 4 (spec §8): casting a Seven uncontested reveals the top of the
//! deck and moves the game into the resolve-seven phase for the caster.

use cuttle_core::execute;
use cuttle_core::model::card::Card;
use cuttle_core::model::game_state::GameState;
use cuttle_core::model::phase::Phase;
use cuttle_core::model::player_state::PlayerState;
use cuttle_core::model::rank::Rank;
use cuttle_core::model::suit::Suit;
use cuttle_core::moves::OneOffEffect;
use cuttle_core::Move;

#[test]
fn seven_reveals_deck_top_and_enters_resolve_seven() {
    let base = GameState::initial(Some(6))
        .with_deck(vec![Card::new(Rank::Five, Suit::Diamonds), Card::new(Rank::Eight, Suit::Clubs)]);
    let seven = Card::new(Rank::Seven, Suit::Clubs);
    let p0 = PlayerState::new(vec![seven]);
    let state = base.with_players([p0, base.player(1).clone()]).with_current_player(0);

    let after_cast = execute(
        &state,
        Move::PlayOneOff { card: seven, effect: OneOffEffect::SevenPlayFromDeck, target_card: None, target_player: None },
    )
    .unwrap();
    let resolved = execute(&after_cast, Move::DeclineCounter).unwrap();

    assert_eq!(resolved.phase(), Phase::ResolveSeven);
    assert_eq!(resolved.seven_state().unwrap().revealed_cards, vec![Card::new(Rank::Five, Suit::Diamonds)]);
    assert_eq!(resolved.seven_state().unwrap().player, 0);
    assert_eq!(resolved.deck(), &[Card::new(Rank::Eight, Suit::Clubs)]);
}

#[test]
fn resolving_a_revealed_card_as_points_returns_to_main_phase() {
    let base = GameState::initial(Some(60)).with_deck(vec![Card::new(Rank::Five, Suit::Diamonds)]);
    let seven = Card::new(Rank::Seven, Suit::Clubs);
    let p0 = PlayerState::new(vec![seven]);
    let state = base.with_players([p0, base.player(1).clone()]).with_current_player(0);

    let after_cast = execute(
        &state,
        Move::PlayOneOff { card: seven, effect: OneOffEffect::SevenPlayFromDeck, target_card: None, target_player: None },
    )
    .unwrap();
    let revealed_state = execute(&after_cast, Move::DeclineCounter).unwrap();
    let revealed_card = revealed_state.seven_state().unwrap().revealed_cards[0];

    let resolved = execute(
        &revealed_state,
        Move::ResolveSeven { card: revealed_card, play_as: cuttle_core::moves::PlayAs::Points, target_card: None },
    )
    .unwrap();

    assert_eq!(resolved.phase(), Phase::Main);
    assert!(resolved.player(0).points_field().contains(&revealed_card));
    assert!(resolved.seven_state().is_none());
}

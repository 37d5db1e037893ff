use crate::model::card::Card;
use serde::{Deserialize, Serialize};

/// A one-off's effect, tagged by the source card's rank. The Two-as-counter
/// usage is expressed by `Move::Counter`, not by an effect here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OneOffEffect {
    AceScrapAllPoints,
    TwoDestroyPermanent,
    ThreeRevive,
    FourDiscard,
    FiveDrawTwo,
    SixScrapAllPermanents,
    SevenPlayFromDeck,
    NineReturnPermanent,
}

/// How a card revealed by a Seven is committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayAs {
    Points,
    Scuttle,
    OneOff,
    Permanent,
    Discard,
}

/// Every legal action is exactly one of these tagged variants; the executor
/// and generator are closed over this set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Move {
    Draw,
    PlayPoints {
        card: Card,
    },
    Scuttle {
        card: Card,
        target: Card,
    },
    PlayOneOff {
        card: Card,
        effect: OneOffEffect,
        target_card: Option<Card>,
        target_player: Option<usize>,
    },
    PlayPermanent {
        card: Card,
        target_card: Option<Card>,
    },
    Counter {
        card: Card,
    },
    DeclineCounter,
    ResolveSeven {
        card: Card,
        play_as: PlayAs,
        target_card: Option<Card>,
    },
    Discard {
        card: Card,
    },
    Pass,
}

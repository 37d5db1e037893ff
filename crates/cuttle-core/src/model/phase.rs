use crate::model::card::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Main,
    Counter,
    ResolveSeven,
    DiscardFour,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    Points,
    EmptyDeckPoints,
    OpponentEmptyHand,
}

/// The pending one-off awaiting counters. `waiting_for_player` is derived
/// from chain parity, never stored, per the phase-state-machine design note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterState {
    pub one_off_card: Card,
    pub one_off_player: usize,
    pub target_card: Option<Card>,
    pub target_player: Option<usize>,
    pub counter_chain: Vec<Card>,
}

impl CounterState {
    pub fn new(
        one_off_card: Card,
        one_off_player: usize,
        target_card: Option<Card>,
        target_player: Option<usize>,
    ) -> Self {
        Self {
            one_off_card,
            one_off_player,
            target_card,
            target_player,
            counter_chain: Vec::new(),
        }
    }

    pub fn with_counter(&self, two: Card) -> Self {
        let mut counter_chain = self.counter_chain.clone();
        counter_chain.push(two);
        Self { counter_chain, ..self.clone() }
    }

    pub fn counter_count(&self) -> usize {
        self.counter_chain.len()
    }

    /// Even count (including zero) means the original effect resolves.
    pub fn resolves(&self) -> bool {
        self.counter_count() % 2 == 0
    }

    pub fn waiting_for_player(&self) -> usize {
        if self.counter_count() % 2 == 0 {
            1 - self.one_off_player
        } else {
            self.one_off_player
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SevenState {
    pub revealed_cards: Vec<Card>,
    pub player: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FourState {
    pub player: usize,
    pub cards_to_discard: usize,
}

use crate::model::card::Card;
use crate::model::rank::Rank;
use serde::{Deserialize, Serialize};

/// One player's board: hand, point cards in play, non-Jack permanents (8/Q/K),
/// and (jack, stolen_card) pairs. All sequences are immutable from the
/// outside; every mutator returns a new `PlayerState`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    hand: Vec<Card>,
    points_field: Vec<Card>,
    permanents: Vec<Card>,
    jacks: Vec<(Card, Card)>,
}

impl PlayerState {
    pub fn new(hand: Vec<Card>) -> Self {
        Self {
            hand,
            points_field: Vec::new(),
            permanents: Vec::new(),
            jacks: Vec::new(),
        }
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    pub fn points_field(&self) -> &[Card] {
        &self.points_field
    }

    pub fn permanents(&self) -> &[Card] {
        &self.permanents
    }

    pub fn jacks(&self) -> &[(Card, Card)] {
        &self.jacks
    }

    pub fn with_hand(&self, hand: Vec<Card>) -> Self {
        Self { hand, ..self.clone() }
    }

    pub fn with_points_field(&self, points_field: Vec<Card>) -> Self {
        Self { points_field, ..self.clone() }
    }

    pub fn with_permanents(&self, permanents: Vec<Card>) -> Self {
        Self { permanents, ..self.clone() }
    }

    pub fn with_jacks(&self, jacks: Vec<(Card, Card)>) -> Self {
        Self { jacks, ..self.clone() }
    }

    /// Sum of point_value over points_field plus every card stolen by a Jack.
    pub fn point_total(&self) -> u32 {
        let field_total: u32 = self.points_field.iter().map(|c| c.point_value() as u32).sum();
        let stolen_total: u32 = self.jacks.iter().map(|(_, stolen)| stolen.point_value() as u32).sum();
        field_total + stolen_total
    }

    pub fn queens_count(&self) -> usize {
        self.permanents.iter().filter(|c| c.rank == Rank::Queen).count()
    }

    pub fn kings_count(&self) -> usize {
        self.permanents.iter().filter(|c| c.rank == Rank::King).count()
    }

    pub fn has_glasses(&self) -> bool {
        self.permanents.iter().any(|c| c.rank == Rank::Eight)
    }

    pub fn has_queen_protection(&self) -> bool {
        self.queens_count() > 0
    }

    /// All (permanent) cards this player controls that a Two/Nine/Jack could
    /// target, i.e. direct permanents plus every jack-and-stolen pair card.
    pub fn stolen_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.jacks.iter().map(|(_, stolen)| *stolen)
    }

    pub fn jack_cards(&self) -> impl Iterator<Item = Card> + '_ {
        self.jacks.iter().map(|(jack, _)| *jack)
    }
}

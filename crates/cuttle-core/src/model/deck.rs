use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

/// Returns the 52 cards in canonical suit-major, rank-minor order:
/// Clubs A..K, Diamonds A..K, Hearts A..K, Spades A..K.
pub fn create_deck() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ORDERED {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

/// Permutes `deck` in place using a `StdRng` seeded from `seed`. Identical
/// seeds always yield identical permutations, independent of platform.
pub fn shuffle_deck(deck: &mut [Card], seed: u64) {
    let mut rng = StdRng::seed_from_u64(seed);
    deck.shuffle(&mut rng);
}

pub fn shuffled_deck(seed: u64) -> Vec<Card> {
    let mut deck = create_deck();
    shuffle_deck(&mut deck, seed);
    deck
}

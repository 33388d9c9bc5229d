//! Ordered card sequences (decks and the war pile)

use crate::core::Card;
use serde::{Deserialize, Serialize};

/// An ordered pile of cards
///
/// The top of the pile is the end of the backing vector: draws pop from the
/// end, captured cards go in at the front (the bottom) so they cannot be
/// re-drawn until the rest of the pile has cycled through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pile {
    cards: Vec<Card>,
}

impl Pile {
    pub fn new() -> Self {
        Pile { cards: Vec::new() }
    }

    pub fn from_cards(cards: Vec<Card>) -> Self {
        Pile { cards }
    }

    /// Draw from the top
    pub fn draw_top(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Look at the top card without removing it
    pub fn peek_top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// Add to the top
    pub fn add(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Add to the bottom
    pub fn add_to_bottom(&mut self, card: Card) {
        self.cards.insert(0, card);
    }

    /// Remove and return up to `n` cards from the bottom, bottom-most first
    pub fn take_from_bottom(&mut self, n: usize) -> Vec<Card> {
        let n = n.min(self.cards.len());
        self.cards.drain(..n).collect()
    }

    /// Remove and return every card, bottom-most first
    pub fn take_all(&mut self) -> Vec<Card> {
        std::mem::take(&mut self.cards)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.cards.iter()
    }

    /// Shuffle the pile (unbiased Fisher–Yates via `SliceRandom`)
    pub fn shuffle(&mut self, rng: &mut impl rand::Rng) {
        use rand::seq::SliceRandom;
        self.cards.shuffle(rng);
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl Extend<Card> for Pile {
    fn extend<T: IntoIterator<Item = Card>>(&mut self, iter: T) {
        self.cards.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Rank, Suit};

    fn card(rank: u8) -> Card {
        Card::new(Rank(rank), Suit::Clubs)
    }

    #[test]
    fn test_draw_order() {
        let mut pile = Pile::new();
        pile.add(card(2)); // bottom
        pile.add(card(3));
        pile.add(card(4)); // top

        assert_eq!(pile.peek_top(), Some(&card(4)));
        assert_eq!(pile.draw_top(), Some(card(4)));
        assert_eq!(pile.draw_top(), Some(card(3)));
        assert_eq!(pile.draw_top(), Some(card(2)));
        assert_eq!(pile.draw_top(), None);
    }

    #[test]
    fn test_add_to_bottom_is_drawn_last() {
        let mut pile = Pile::new();
        pile.add(card(2));
        pile.add_to_bottom(card(9));

        assert_eq!(pile.draw_top(), Some(card(2)));
        assert_eq!(pile.draw_top(), Some(card(9)));
    }

    #[test]
    fn test_take_from_bottom() {
        let mut pile = Pile::new();
        for r in 2..=6 {
            pile.add(card(r));
        }

        let taken = pile.take_from_bottom(3);
        assert_eq!(taken, vec![card(2), card(3), card(4)]);
        assert_eq!(pile.len(), 2);
        assert_eq!(pile.peek_top(), Some(&card(6)));

        // Asking for more than remains drains the pile without panicking
        let rest = pile.take_from_bottom(10);
        assert_eq!(rest.len(), 2);
        assert!(pile.is_empty());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        use rand::SeedableRng;

        let mut pile = Pile::new();
        for r in 2..=14 {
            pile.add(card(r));
        }
        let before: Vec<Card> = pile.iter().cloned().collect();

        let mut rng = rand_chacha::ChaCha12Rng::seed_from_u64(7);
        pile.shuffle(&mut rng);

        let mut after: Vec<u8> = pile.iter().map(|c| c.rank.as_u8()).collect();
        let mut expected: Vec<u8> = before.iter().map(|c| c.rank.as_u8()).collect();
        after.sort_unstable();
        expected.sort_unstable();
        assert_eq!(after, expected);
    }

    #[test]
    fn test_shuffle_seeded_reproducible() {
        use rand::SeedableRng;

        let build = || {
            let mut pile = Pile::new();
            for r in 2..=14 {
                pile.add(card(r));
            }
            pile
        };

        let mut a = build();
        let mut b = build();
        a.shuffle(&mut rand_chacha::ChaCha12Rng::seed_from_u64(42));
        b.shuffle(&mut rand_chacha::ChaCha12Rng::seed_from_u64(42));
        assert_eq!(a, b);
    }
}

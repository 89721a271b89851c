use crate::cards::Card;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Number of cards in the classic deck.
pub const CLASSIC_SIZE: u32 = 104;

/// An ordered pile of uniquely numbered cards. The top of the deck is the end
/// of the vector.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Cards numbered `1..=max_cards`, unshuffled.
    ///
    /// ```
    /// use take6::deck::Deck;
    ///
    /// let deck = Deck::numbered(10);
    /// assert_eq!(deck.len(), 10);
    /// assert_eq!(deck.cards()[9].points(), 3);
    /// ```
    pub fn numbered(max_cards: u32) -> Self {
        Self { cards: (1..=max_cards).map(Card::numbered).collect() }
    }

    /// The classic 104-card deck.
    pub fn classic() -> Self {
        Self::numbered(CLASSIC_SIZE)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Shuffle using a seeded RNG for reproducibility.
    pub fn shuffle_seeded(&mut self, seed: u64) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        self.cards.shuffle(&mut rng);
    }

    /// Shuffle using the provided RNG implementing Rng.
    pub fn shuffle_with<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    /// Draw one card from the top of the deck.
    pub fn draw(&mut self) -> Option<Card> {
        self.cards.pop()
    }

    /// Draw up to `n` cards from the top of the deck.
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        let at = self.cards.len().saturating_sub(n);
        let mut drawn = self.cards.split_off(at);
        drawn.reverse();
        drawn
    }
}

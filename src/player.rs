use crate::agents::{
    AutomatedStrategy, DecisionError, ExternalStrategy, HandEntry, HandProvider, ProviderError,
    Strategy, StrategyKind,
};
use crate::cards::{total_points, Card};
use crate::table::Table;
use core::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_PLAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique player identity; survives across rounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(u64);

impl PlayerId {
    fn next() -> Self {
        Self(NEXT_PLAYER_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A seat at the table: hand and graveyard for the current round, score for
/// the whole game.
pub struct Player {
    id: PlayerId,
    name: String,
    hand: Vec<Card>,
    graveyard: Vec<Card>,
    score: u32,
    strategy: Box<dyn Strategy>,
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("hand", &self.hand)
            .field("graveyard", &self.graveyard)
            .field("score", &self.score)
            .field("strategy", &self.strategy.kind())
            .finish()
    }
}

impl Player {
    pub fn new(name: impl Into<String>, strategy: Box<dyn Strategy>) -> Self {
        Self {
            id: PlayerId::next(),
            name: name.into(),
            hand: Vec::new(),
            graveyard: Vec::new(),
            score: 0,
            strategy,
        }
    }

    /// A heuristic player seeded from the thread RNG.
    pub fn automated(name: impl Into<String>) -> Self {
        Self::new(name, Box::new(AutomatedStrategy::new()))
    }

    /// A heuristic player with reproducible decisions.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self::new(name, Box::new(AutomatedStrategy::with_seed(seed)))
    }

    /// A player whose choices come from `provider`.
    pub fn external(name: impl Into<String>, provider: Box<dyn HandProvider>) -> Self {
        Self::new(name, Box::new(ExternalStrategy::new(provider)))
    }

    /// A player whose choices come from a closure over the labeled hand.
    pub fn scripted<F>(name: impl Into<String>, f: F) -> Self
    where
        F: FnMut(&[HandEntry]) -> Result<usize, ProviderError> + 'static,
    {
        Self::new(name, Box::new(ExternalStrategy::from_fn(f)))
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &[Card] {
        &self.hand
    }

    /// Penalty cards collected this round.
    pub fn graveyard(&self) -> &[Card] {
        &self.graveyard
    }

    /// Cumulative score over all completed rounds.
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn graveyard_points(&self) -> u32 {
        total_points(&self.graveyard)
    }

    /// Replace the hand with freshly dealt cards.
    pub fn deal(&mut self, cards: Vec<Card>) {
        self.hand = cards;
    }

    /// Ask the strategy for a hand index without removing the card.
    pub fn choose_index(&mut self, table: Option<&Table>) -> Result<usize, DecisionError> {
        let len = self.hand.len();
        let index = self.strategy.choose(&self.hand, table)?;
        if index >= len {
            return Err(match self.strategy.kind() {
                StrategyKind::External => DecisionError::InvalidSelection { index, len },
                _ => DecisionError::IndexOutOfBounds { index, len },
            });
        }
        Ok(index)
    }

    /// Decide and remove the chosen card from the hand.
    pub fn choose_card(&mut self, table: Option<&Table>) -> Result<Card, DecisionError> {
        let index = self.choose_index(table)?;
        self.take_card(index)
    }

    pub(crate) fn take_card(&mut self, index: usize) -> Result<Card, DecisionError> {
        if index >= self.hand.len() {
            return Err(DecisionError::IndexOutOfBounds { index, len: self.hand.len() });
        }
        Ok(self.hand.remove(index))
    }

    pub(crate) fn bury(&mut self, cards: Vec<Card>) {
        self.graveyard.extend(cards);
    }

    pub(crate) fn start_round(&mut self) {
        self.hand.clear();
        self.graveyard.clear();
    }

    /// Add this round's graveyard to the score and return the points added.
    pub(crate) fn settle_round(&mut self) -> u32 {
        let points = self.graveyard_points();
        self.score += points;
        points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    struct Fixed(usize);

    impl Strategy for Fixed {
        fn choose(&mut self, _hand: &[Card], _table: Option<&Table>) -> Result<usize, DecisionError> {
            Ok(self.0)
        }
        fn kind(&self) -> StrategyKind {
            StrategyKind::Automated
        }
    }

    #[test]
    fn ids_are_unique() {
        let a = Player::seeded("a", 1);
        let b = Player::seeded("b", 1);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn choose_card_removes_exactly_one() {
        let mut p = Player::scripted("s", |_| Ok(1));
        p.deal(parse_cards("4 8 15").unwrap());
        let card = p.choose_card(None).unwrap();
        assert_eq!(card.value(), 8);
        assert_eq!(p.hand().iter().map(Card::value).collect::<Vec<_>>(), vec![4, 15]);
    }

    #[test]
    fn out_of_bounds_automated_index_is_invalid_state() {
        let mut p = Player::new("broken", Box::new(Fixed(5)));
        p.deal(parse_cards("1 2").unwrap());
        assert_eq!(p.choose_index(None), Err(DecisionError::IndexOutOfBounds { index: 5, len: 2 }));
        assert_eq!(p.hand().len(), 2);
    }

    #[test]
    fn settle_round_accumulates() {
        let mut p = Player::seeded("p", 0);
        p.bury(parse_cards("10 55").unwrap());
        assert_eq!(p.settle_round(), 10);
        p.start_round();
        assert!(p.graveyard().is_empty());
        p.bury(parse_cards("1").unwrap());
        assert_eq!(p.settle_round(), 1);
        assert_eq!(p.score(), 11);
    }
}

use crate::cards::Card;
use crate::table::Table;
use rand::{rngs::StdRng, Rng, RngCore, SeedableRng};
use tracing::trace;

use super::{DecisionError, Strategy, StrategyKind};

/// Which rule of the heuristic produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecisionTier {
    /// A card exactly one above the head of a row with room to spare.
    AdjacentSafe,
    /// A random card whose row is not about to flush.
    SafeRandom,
    /// Nothing safe was left; any card.
    ForcedRandom,
}

impl DecisionTier {
    pub fn label(self) -> &'static str {
        match self {
            DecisionTier::AdjacentSafe => "adjacent_safe",
            DecisionTier::SafeRandom => "safe_random",
            DecisionTier::ForcedRandom => "forced_random",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub index: usize,
    pub tier: DecisionTier,
}

/// The built-in greedy player.
///
/// ```
/// use take6::agents::{AutomatedStrategy, DecisionTier};
/// use take6::cards::parse_cards;
/// use take6::table::Table;
///
/// let table = Table::seeded(parse_cards("10 20 30 40").unwrap(), 6);
/// let hand = parse_cards("77 31 5").unwrap();
/// let decision = AutomatedStrategy::with_seed(1).decide(&hand, &table).unwrap();
/// assert_eq!(decision.index, 1);
/// assert_eq!(decision.tier, DecisionTier::AdjacentSafe);
/// ```
#[derive(Debug, Clone)]
pub struct AutomatedStrategy {
    rng: StdRng,
}

impl AutomatedStrategy {
    /// A strategy seeded from the thread RNG.
    pub fn new() -> Self {
        let mut seed = [0u8; 32];
        rand::rng().fill_bytes(&mut seed);
        Self { rng: StdRng::from_seed(seed) }
    }

    /// Set a deterministic RNG seed for reproducible decisions.
    pub fn with_seed(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self { rng }
    }

    /// Run the heuristic without touching the hand.
    pub fn decide(&mut self, hand: &[Card], table: &Table) -> Result<Decision, DecisionError> {
        if hand.is_empty() {
            return Err(DecisionError::EmptyHand);
        }
        if let Some(index) = adjacent_safe(hand, table) {
            return Ok(Decision { index, tier: DecisionTier::AdjacentSafe });
        }
        let safe = safe_candidates(hand, table);
        if !safe.is_empty() {
            let pick = self.rng.random_range(0..safe.len());
            return Ok(Decision { index: safe[pick], tier: DecisionTier::SafeRandom });
        }
        let index = self.rng.random_range(0..hand.len());
        Ok(Decision { index, tier: DecisionTier::ForcedRandom })
    }
}

impl Default for AutomatedStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for AutomatedStrategy {
    fn choose(&mut self, hand: &[Card], table: Option<&Table>) -> Result<usize, DecisionError> {
        let table = table.ok_or(DecisionError::MissingTable)?;
        let decision = self.decide(hand, table)?;
        trace!(
            index = decision.index,
            value = hand[decision.index].value(),
            tier = decision.tier.label(),
            "automated decision"
        );
        Ok(decision.index)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::Automated
    }
}

/// First hand card that continues a non-dangerous row by exactly one. Rows are
/// scanned in table order, then the hand in hand order.
fn adjacent_safe(hand: &[Card], table: &Table) -> Option<usize> {
    let roomy = table.takes().saturating_sub(1);
    table
        .rows()
        .iter()
        .filter(|row| row.len() < roomy)
        .filter_map(|row| row.last())
        .find_map(|head| {
            let next = head.value().checked_add(1)?;
            hand.iter().position(|c| c.value() == next)
        })
}

/// Hand indices that land on a row which will not flush. Cards below every
/// head would take a row, so they never count as safe.
fn safe_candidates(hand: &[Card], table: &Table) -> Vec<usize> {
    let dangerous = table.dangerous_row_indices();
    hand.iter()
        .enumerate()
        .filter(|(_, c)| {
            table.predict_row_index(c.value()).is_some_and(|row| !dangerous.contains(&row))
        })
        .map(|(i, _)| i)
        .collect()
}

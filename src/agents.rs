//! Agents: pluggable decision makers for players.
//!
//! A [`Strategy`] picks one hand index per turn. The automated heuristic lives
//! in [`AutomatedStrategy`]; anything outside the engine (a console prompt, a
//! network client, a scripted test) plugs in through [`HandProvider`] wrapped
//! in an [`ExternalStrategy`].

use crate::cards::Card;
use crate::table::Table;
use core::fmt;
use std::str::FromStr;

mod bots;

pub use bots::{AutomatedStrategy, Decision, DecisionTier};

/// Kinds of strategies a player can be built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum StrategyKind {
    Automated,
    External,
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Automated => f.write_str("automated"),
            StrategyKind::External => f.write_str("external"),
        }
    }
}

impl FromStr for StrategyKind {
    type Err = DecisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automated" | "ai" | "bot" => Ok(StrategyKind::Automated),
            "external" | "human" => Ok(StrategyKind::External),
            _ => Err(DecisionError::UnsupportedStrategy(s.to_string())),
        }
    }
}

/// Failure reported by a [`HandProvider`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecisionError {
    #[error("automated strategy needs a table to decide")]
    MissingTable,
    #[error("cannot choose from an empty hand")]
    EmptyHand,
    #[error("decision index {index} is out of bounds for a hand of {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("unsupported strategy: '{0}'")]
    UnsupportedStrategy(String),
    #[error("external input failed: {0}")]
    ExternalInput(#[from] ProviderError),
    #[error("external selection {index} is not a valid choice for a hand of {len}")]
    InvalidSelection { index: usize, len: usize },
}

impl DecisionError {
    /// Whether the error came from an external input source rather than a
    /// broken decision contract.
    pub fn is_external(&self) -> bool {
        matches!(self, DecisionError::ExternalInput(_) | DecisionError::InvalidSelection { .. })
    }
}

/// Picks the index of the card to play from `hand`.
///
/// Every decision of a turn sees the same table; the round only mutates it
/// once all players have chosen.
pub trait Strategy {
    fn choose(&mut self, hand: &[Card], table: Option<&Table>) -> Result<usize, DecisionError>;

    fn kind(&self) -> StrategyKind;
}

/// A hand card as presented to an external chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandEntry {
    pub index: usize,
    pub label: String,
    pub value: u32,
    pub points: u32,
}

impl HandEntry {
    pub fn from_hand(hand: &[Card]) -> Vec<HandEntry> {
        hand.iter()
            .enumerate()
            .map(|(index, c)| HandEntry { index, label: c.label(), value: c.value(), points: c.points() })
            .collect()
    }
}

/// Source of choices for externally driven players. The provider owns any
/// retry, prompting or timeout policy.
pub trait HandProvider {
    fn select(&mut self, entries: &[HandEntry], table: Option<&Table>) -> Result<usize, ProviderError>;
}

struct FnProvider<F>(F);

impl<F> HandProvider for FnProvider<F>
where
    F: FnMut(&[HandEntry]) -> Result<usize, ProviderError>,
{
    fn select(&mut self, entries: &[HandEntry], _table: Option<&Table>) -> Result<usize, ProviderError> {
        (self.0)(entries)
    }
}

/// Strategy that forwards every decision to a [`HandProvider`].
///
/// ```
/// use take6::agents::{ExternalStrategy, Strategy};
/// use take6::cards::parse_cards;
///
/// let mut lowest = ExternalStrategy::from_fn(|entries| {
///     Ok(entries.iter().min_by_key(|e| e.value).map(|e| e.index).unwrap_or(0))
/// });
/// let hand = parse_cards("40 7 19").unwrap();
/// assert_eq!(lowest.choose(&hand, None), Ok(1));
/// ```
pub struct ExternalStrategy {
    provider: Box<dyn HandProvider>,
}

impl ExternalStrategy {
    pub fn new(provider: Box<dyn HandProvider>) -> Self {
        Self { provider }
    }

    pub fn from_fn<F>(f: F) -> Self
    where
        F: FnMut(&[HandEntry]) -> Result<usize, ProviderError> + 'static,
    {
        Self::new(Box::new(FnProvider(f)))
    }
}

impl fmt::Debug for ExternalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ExternalStrategy")
    }
}

impl Strategy for ExternalStrategy {
    fn choose(&mut self, hand: &[Card], table: Option<&Table>) -> Result<usize, DecisionError> {
        let entries = HandEntry::from_hand(hand);
        let index = self.provider.select(&entries, table)?;
        if index >= hand.len() {
            return Err(DecisionError::InvalidSelection { index, len: hand.len() });
        }
        Ok(index)
    }

    fn kind(&self) -> StrategyKind {
        StrategyKind::External
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;

    #[test]
    fn strategy_kind_parses_known_tags() {
        assert_eq!("bot".parse::<StrategyKind>(), Ok(StrategyKind::Automated));
        assert_eq!(" Human ".parse::<StrategyKind>(), Ok(StrategyKind::External));
        assert_eq!(
            "robot".parse::<StrategyKind>(),
            Err(DecisionError::UnsupportedStrategy("robot".to_string()))
        );
    }

    #[test]
    fn provider_sees_labeled_entries() {
        let hand = parse_cards("10 55").unwrap();
        let entries = HandEntry::from_hand(&hand);
        let labels: Vec<&str> = entries.iter().map(|e| e.label.as_str()).collect();
        assert_eq!(labels, vec!["10 (3 pts)", "55 (7 pts)"]);
        assert_eq!(entries[1].index, 1);
        assert_eq!(entries[1].points, 7);
    }

    #[test]
    fn provider_failures_surface_as_external_errors() {
        let hand = parse_cards("1 2").unwrap();
        let mut failing = ExternalStrategy::from_fn(|_| Err(ProviderError::new("stdin closed")));
        let err = failing.choose(&hand, None).unwrap_err();
        assert!(err.is_external());
        assert_eq!(err.to_string(), "external input failed: stdin closed");

        let mut out_of_range = ExternalStrategy::from_fn(|_| Ok(2));
        assert_eq!(
            out_of_range.choose(&hand, None),
            Err(DecisionError::InvalidSelection { index: 2, len: 2 })
        );
    }
}

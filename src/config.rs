//! Game constants, adjustable as a group.

use crate::deck::CLASSIC_SIZE;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("a game needs at least one player")]
    NoPlayers,
    #[error("the table needs at least one row")]
    NoRows,
    #[error("hand size must be at least one card")]
    EmptyHand,
    #[error("a row must hold at least two cards before it is taken, got takes = {0}")]
    TakesTooSmall(usize),
    #[error(
        "deal overruns the deck: {rows} rows + {players} players x {max_hand} cards > {max_cards}"
    )]
    DeckTooSmall { rows: usize, players: usize, max_hand: usize, max_cards: u32 },
}

/// Table and scoring constants.
///
/// ```
/// use take6::config::Settings;
///
/// let s = Settings::default();
/// assert!(s.validate(4).is_ok());
/// assert!(s.validate(11).is_err());
/// assert!(s.with_max_cards(200).validate(11).is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct Settings {
    /// Number of lanes on the table.
    pub rows: usize,
    /// Cards dealt to every player, and turns per round.
    pub max_hand: usize,
    /// Deck size; card values run `1..=max_cards`.
    pub max_cards: u32,
    /// Lane length that triggers a flush.
    pub takes: usize,
    /// Cumulative score every player must reach for the game to end.
    pub max_score: u32,
    /// Abort the game after this many rounds.
    pub round_limit: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: 4,
            max_hand: 10,
            max_cards: CLASSIC_SIZE,
            takes: 6,
            max_score: 66,
            round_limit: None,
        }
    }
}

impl Settings {
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_max_hand(mut self, max_hand: usize) -> Self {
        self.max_hand = max_hand;
        self
    }

    pub fn with_max_cards(mut self, max_cards: u32) -> Self {
        self.max_cards = max_cards;
        self
    }

    pub fn with_takes(mut self, takes: usize) -> Self {
        self.takes = takes;
        self
    }

    pub fn with_max_score(mut self, max_score: u32) -> Self {
        self.max_score = max_score;
        self
    }

    pub fn with_round_limit(mut self, limit: Option<u32>) -> Self {
        self.round_limit = limit;
        self
    }

    /// Resize the deck so a deal for `players` leaves nothing undealt.
    pub fn sized_for(mut self, players: usize) -> Self {
        self.max_cards = (self.rows + players * self.max_hand) as u32;
        self
    }

    /// Cards consumed by one deal.
    pub fn deal_size(&self, players: usize) -> usize {
        self.rows + players * self.max_hand
    }

    /// Check the settings against a player count.
    pub fn validate(&self, players: usize) -> Result<(), ConfigError> {
        if players == 0 {
            return Err(ConfigError::NoPlayers);
        }
        if self.rows == 0 {
            return Err(ConfigError::NoRows);
        }
        if self.max_hand == 0 {
            return Err(ConfigError::EmptyHand);
        }
        if self.takes < 2 {
            return Err(ConfigError::TakesTooSmall(self.takes));
        }
        // undealt cards stay in the deck
        if self.deal_size(players) > self.max_cards as usize {
            return Err(ConfigError::DeckTooSmall {
                rows: self.rows,
                players,
                max_hand: self.max_hand,
                max_cards: self.max_cards,
            });
        }
        Ok(())
    }
}

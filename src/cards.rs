use std::fmt;
use std::str::FromStr;

/// The single "double" card: the only value in the classic deck that is a
/// multiple of both 5 and 11.
pub const SPECIAL_VALUE: u32 = 55;

/// Penalty points for a card value.
///
/// Rules are applied in order of specificity, the most specific one wins:
/// base 1, multiple of 5 is 2, multiple of 10 is 3, multiple of 11 is 5 and
/// [`SPECIAL_VALUE`] is 7.
///
/// ```
/// use take6::cards::points_for;
///
/// assert_eq!(points_for(7), 1);
/// assert_eq!(points_for(15), 2);
/// assert_eq!(points_for(20), 3);
/// assert_eq!(points_for(33), 5);
/// assert_eq!(points_for(55), 7);
/// ```
pub const fn points_for(value: u32) -> u32 {
    if value == SPECIAL_VALUE {
        7
    } else if value % 11 == 0 {
        5
    } else if value % 10 == 0 {
        3
    } else if value % 5 == 0 {
        2
    } else {
        1
    }
}

/// A numbered card carrying penalty points.
///
/// Cards are deliberately not `Copy`: a card lives in exactly one container
/// (deck, hand, lane or graveyard) and is moved between them.
///
/// ```
/// use take6::cards::Card;
///
/// let card = Card::numbered(55);
/// assert_eq!(card.points(), 7);
/// assert_eq!(card.to_string(), "55");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Card {
    value: u32,
    points: u32,
}

impl Card {
    pub const fn new(value: u32, points: u32) -> Self {
        Self { value, points }
    }

    /// Build a card whose points follow [`points_for`].
    pub const fn numbered(value: u32) -> Self {
        Self::new(value, points_for(value))
    }

    pub const fn value(&self) -> u32 {
        self.value
    }

    pub const fn points(&self) -> u32 {
        self.points
    }

    /// Short label used when presenting a hand to an external chooser.
    pub fn label(&self) -> String {
        match self.points {
            1 => format!("{} (1 pt)", self.value),
            p => format!("{} ({p} pts)", self.value),
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CardParseError {
    #[error("invalid card: '{0}'")]
    Invalid(String),
    #[error("card values start at 1")]
    Zero,
}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u32 = s.trim().parse().map_err(|_| CardParseError::Invalid(s.to_string()))?;
        if value == 0 {
            return Err(CardParseError::Zero);
        }
        Ok(Card::numbered(value))
    }
}

/// Sum of penalty points over a slice of cards.
pub fn total_points(cards: &[Card]) -> u32 {
    cards.iter().map(Card::points).sum()
}

/// Parse multiple numbered cards separated by whitespace or commas.
///
/// ```
/// use take6::cards::parse_cards;
///
/// let cards = parse_cards("3, 10 55").unwrap();
/// assert_eq!(cards.iter().map(|c| c.points()).collect::<Vec<_>>(), vec![1, 3, 7]);
/// ```
pub fn parse_cards(input: &str) -> Result<Vec<Card>, CardParseError> {
    input
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(Card::from_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_follow_precedence() {
        assert_eq!(points_for(1), 1);
        assert_eq!(points_for(5), 2);
        assert_eq!(points_for(10), 3);
        assert_eq!(points_for(11), 5);
        assert_eq!(points_for(22), 5);
        assert_eq!(points_for(55), 7);
        // multiple of both 10 and 11
        assert_eq!(points_for(110), 5);
    }

    #[test]
    fn card_display_and_from_str() {
        let c = Card::from_str(" 42 ").unwrap();
        assert_eq!(c.value(), 42);
        assert_eq!(c.points(), 1);
        assert_eq!(c.to_string(), "42");
        assert_eq!(Card::from_str("0"), Err(CardParseError::Zero));
        assert!(Card::from_str("x").is_err());
    }

    #[test]
    fn labels_mention_points() {
        assert_eq!(Card::numbered(4).label(), "4 (1 pt)");
        assert_eq!(Card::numbered(55).label(), "55 (7 pts)");
    }

    #[test]
    fn total_points_sums_cards() {
        let cards = parse_cards("5 10 11 55").unwrap();
        assert_eq!(total_points(&cards), 2 + 3 + 5 + 7);
        assert_eq!(total_points(&[]), 0);
    }
}

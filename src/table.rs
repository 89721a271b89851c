//! The lanes cards are played onto, and the placement rules that decide who
//! picks up what.

use crate::cards::{total_points, Card};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TableError {
    #[error("table has no rows")]
    NoRows,
    #[error("row {0} is empty")]
    EmptyRow(usize),
    #[error("row {0} is not strictly ascending")]
    NotAscending(usize),
}

/// Outcome of placing one card.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Placement {
    /// The card joined `row` without filling it.
    Appended { row: usize },
    /// The card filled `row`; every earlier card in the row was taken.
    Flushed { row: usize, taken: Vec<Card> },
    /// The card fit nowhere; the whole cheapest `row` was taken and the card
    /// now heads it alone.
    Cried { row: usize, taken: Vec<Card> },
}

impl Placement {
    pub fn row(&self) -> usize {
        match self {
            Placement::Appended { row }
            | Placement::Flushed { row, .. }
            | Placement::Cried { row, .. } => *row,
        }
    }

    /// Cards the player must absorb.
    pub fn taken(&self) -> &[Card] {
        match self {
            Placement::Appended { .. } => &[],
            Placement::Flushed { taken, .. } | Placement::Cried { taken, .. } => taken,
        }
    }

    pub fn into_taken(self) -> Vec<Card> {
        match self {
            Placement::Appended { .. } => Vec::new(),
            Placement::Flushed { taken, .. } | Placement::Cried { taken, .. } => taken,
        }
    }
}

/// A fixed set of ascending lanes.
///
/// ```
/// use take6::cards::Card;
/// use take6::table::{Placement, Table};
///
/// let mut table = Table::seeded(vec![Card::numbered(10), Card::numbered(40)], 6);
/// assert_eq!(table.predict_row_index(12), Some(0));
/// assert_eq!(table.predict_row_index(41), Some(1));
/// assert_eq!(table.predict_row_index(3), None);
///
/// let placement = table.place(Card::numbered(3)).unwrap();
/// assert!(matches!(placement, Placement::Cried { row: 0, .. }));
/// assert_eq!(table.head_values(), vec![(3, 0), (40, 1)]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    rows: Vec<Vec<Card>>,
    takes: usize,
}

impl Table {
    /// One lane per seed card.
    pub fn seeded(seeds: Vec<Card>, takes: usize) -> Self {
        Self { rows: seeds.into_iter().map(|c| vec![c]).collect(), takes }
    }

    /// Build a table from explicit lanes, checking they are non-empty and
    /// strictly ascending.
    pub fn from_rows(rows: Vec<Vec<Card>>, takes: usize) -> Result<Self, TableError> {
        if rows.is_empty() {
            return Err(TableError::NoRows);
        }
        for (i, row) in rows.iter().enumerate() {
            if row.is_empty() {
                return Err(TableError::EmptyRow(i));
            }
            if row.windows(2).any(|w| w[0].value() >= w[1].value()) {
                return Err(TableError::NotAscending(i));
            }
        }
        Ok(Self { rows, takes })
    }

    pub fn rows(&self) -> &[Vec<Card>] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&[Card]> {
        self.rows.get(index).map(Vec::as_slice)
    }

    pub fn takes(&self) -> usize {
        self.takes
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of cards on the table.
    pub fn card_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    pub fn head(&self, index: usize) -> Option<&Card> {
        self.rows.get(index).and_then(|r| r.last())
    }

    /// `(head value, row index)` for every non-empty row, in row order.
    pub fn head_values(&self) -> Vec<(u32, usize)> {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.last().map(|c| (c.value(), i)))
            .collect()
    }

    pub fn row_points(&self, index: usize) -> u32 {
        self.rows.get(index).map(|r| total_points(r)).unwrap_or(0)
    }

    /// Row with the fewest penalty points; the lowest index wins ties.
    pub fn cheapest_row_index(&self) -> Option<usize> {
        (0..self.rows.len()).min_by_key(|&i| (self.row_points(i), i))
    }

    /// Row a card of `value` would join: the highest head strictly below
    /// `value`, lowest index on equal heads. `None` when `value` is at or
    /// below every head. Row capacity is not considered.
    pub fn predict_row_index(&self, value: u32) -> Option<usize> {
        self.head_values()
            .into_iter()
            .filter(|&(head, _)| head < value)
            .fold(None, |best: Option<(u32, usize)>, (head, i)| match best {
                Some((h, _)) if h >= head => best,
                _ => Some((head, i)),
            })
            .map(|(_, i)| i)
    }

    /// Rows one card away from a flush.
    pub fn dangerous_row_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.len() + 1 == self.takes)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_dangerous(&self, index: usize) -> bool {
        self.rows.get(index).is_some_and(|r| r.len() + 1 == self.takes)
    }

    /// Play `card` onto the table and report what has to be picked up.
    pub fn place(&mut self, card: Card) -> Result<Placement, TableError> {
        if let Some(row) = self.predict_row_index(card.value()) {
            let lane = &mut self.rows[row];
            lane.push(card);
            if lane.len() >= self.takes {
                let taken: Vec<Card> = lane.drain(..lane.len() - 1).collect();
                return Ok(Placement::Flushed { row, taken });
            }
            return Ok(Placement::Appended { row });
        }
        let row = self.cheapest_row_index().ok_or(TableError::NoRows)?;
        let taken = std::mem::replace(&mut self.rows[row], vec![card]);
        Ok(Placement::Cried { row, taken })
    }
}

//! Lifecycle notifications. Listeners only observe; nothing they do feeds back
//! into the game.

use crate::player::PlayerId;
use core::fmt;
use tracing::trace;

/// One card committed in a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayRecord {
    pub player: PlayerId,
    pub value: u32,
}

/// Points a player picked up in a round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundScore {
    pub player: PlayerId,
    pub points: u32,
    pub total: u32,
}

/// Final position of a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    /// 1-based; equal scores share a rank.
    pub rank: usize,
    pub player: PlayerId,
    pub name: String,
    pub score: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameEvent {
    RoundStarted { round: u32 },
    /// Hands are dealt; `heads` are the seed card of each row.
    CardsDistributed { round: u32, heads: Vec<u32> },
    /// Every player committed a card; `plays` are in resolution order.
    DecisionsMade { round: u32, turn: usize, plays: Vec<PlayRecord> },
    CardPlaced { round: u32, turn: usize, player: PlayerId, value: u32, row: usize },
    RowFlushed { round: u32, turn: usize, player: PlayerId, row: usize, taken: Vec<u32>, points: u32 },
    PlayerCried { round: u32, turn: usize, player: PlayerId, row: usize, taken: Vec<u32>, points: u32 },
    RoundScored { round: u32, scores: Vec<RoundScore> },
    GameFinished { rounds: u32, standings: Vec<Standing> },
}

type Listener = Box<dyn FnMut(&GameEvent)>;

/// Fan-out of [`GameEvent`]s to registered callbacks.
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use take6::events::{EventBus, GameEvent};
///
/// let seen = Rc::new(RefCell::new(Vec::new()));
/// let mut bus = EventBus::new();
/// let sink = Rc::clone(&seen);
/// bus.subscribe(move |e| sink.borrow_mut().push(e.clone()));
/// bus.emit(GameEvent::RoundStarted { round: 1 });
/// assert_eq!(seen.borrow().len(), 1);
/// ```
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Listener>,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EventBus({} listeners)", self.listeners.len())
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn emit(&mut self, event: GameEvent) {
        trace!(?event, "game event");
        for listener in &mut self.listeners {
            listener(&event);
        }
    }
}

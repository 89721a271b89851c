//! One deal-to-empty-hands cycle.
//!
//! A round moves through [`RoundPhase`]s in a fixed order:
//! `Created -> Distributing -> TurnLoop(0..max_hand) -> Scoring -> Complete`.
//! Each turn every player decides against the same table; only after all
//! decisions are in are the cards removed from hands and resolved in
//! ascending value order.

use crate::cards::{total_points, Card};
use crate::config::{ConfigError, Settings};
use crate::deck::Deck;
use crate::events::{EventBus, GameEvent, PlayRecord, RoundScore};
use crate::game::GameError;
use crate::player::Player;
use crate::table::{Placement, Table};
use rand::Rng;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RoundPhase {
    Created,
    Distributing,
    /// Waiting for the turn with this 0-based index.
    TurnLoop(usize),
    Scoring,
    Complete,
}

/// A card taken from a player's hand, waiting to be resolved.
#[derive(Debug)]
struct Play {
    seat: usize,
    card: Card,
}

#[derive(Debug)]
pub struct Round {
    number: u32,
    settings: Settings,
    deck: Deck,
    table: Table,
    players: Vec<Player>,
    phase: RoundPhase,
}

impl Round {
    /// Set up a round for `players`. Fails fast when the deal would need more
    /// cards than the deck holds.
    pub fn new(players: Vec<Player>, settings: Settings) -> Result<Self, ConfigError> {
        settings.validate(players.len())?;
        Ok(Self {
            number: 1,
            deck: Deck::numbered(settings.max_cards),
            table: Table::seeded(Vec::new(), settings.takes),
            players,
            settings,
            phase: RoundPhase::Created,
        })
    }

    /// Label the round with its 1-based position in the game.
    pub fn numbered(mut self, number: u32) -> Self {
        self.number = number;
        self
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn into_players(self) -> Vec<Player> {
        self.players
    }

    /// Cards currently held anywhere in the round: deck, hands, rows and
    /// graveyards.
    pub fn card_count(&self) -> usize {
        self.deck.len()
            + self.table.card_count()
            + self.players.iter().map(|p| p.hand().len() + p.graveyard().len()).sum::<usize>()
    }

    fn expect_phase(&self, expected: RoundPhase, operation: &'static str) -> Result<(), GameError> {
        if self.phase != expected {
            return Err(GameError::OutOfPhase { operation, phase: self.phase });
        }
        Ok(())
    }

    /// Shuffle, deal `max_hand` cards to each player in order, then seed every
    /// row with one card.
    pub fn distribute<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        events: &mut EventBus,
    ) -> Result<(), GameError> {
        self.expect_phase(RoundPhase::Created, "distribute")?;
        self.phase = RoundPhase::Distributing;
        events.emit(GameEvent::RoundStarted { round: self.number });

        self.deck = Deck::numbered(self.settings.max_cards);
        self.deck.shuffle_with(rng);
        for player in &mut self.players {
            player.start_round();
            player.deal(self.deck.draw_n(self.settings.max_hand));
        }
        let seeds = self.deck.draw_n(self.settings.rows);
        self.table = Table::seeded(seeds, self.settings.takes);

        let heads: Vec<u32> = self.table.head_values().into_iter().map(|(v, _)| v).collect();
        debug!(round = self.number, ?heads, players = self.players.len(), "cards distributed");
        events.emit(GameEvent::CardsDistributed { round: self.number, heads });
        self.phase = RoundPhase::TurnLoop(0);
        Ok(())
    }

    /// Collect one decision per player, then resolve the played cards in
    /// ascending order. A failed decision aborts the turn before any hand or
    /// row changes.
    pub fn play_turn(&mut self, events: &mut EventBus) -> Result<(), GameError> {
        let turn = match self.phase {
            RoundPhase::TurnLoop(turn) => turn,
            phase => return Err(GameError::OutOfPhase { operation: "play_turn", phase }),
        };

        let table = &self.table;
        let mut choices = Vec::with_capacity(self.players.len());
        for player in &mut self.players {
            let index = player
                .choose_index(Some(table))
                .map_err(|source| GameError::decision(player.name(), source))?;
            choices.push(index);
        }

        let mut plays = Vec::with_capacity(choices.len());
        for (seat, index) in choices.into_iter().enumerate() {
            let player = &mut self.players[seat];
            let card = player
                .take_card(index)
                .map_err(|source| GameError::decision(player.name(), source))?;
            plays.push(Play { seat, card });
        }
        // stable: equal values keep decision order
        plays.sort_by_key(|p| p.card.value());

        events.emit(GameEvent::DecisionsMade {
            round: self.number,
            turn,
            plays: plays
                .iter()
                .map(|p| PlayRecord { player: self.players[p.seat].id(), value: p.card.value() })
                .collect(),
        });

        for play in plays {
            self.resolve(turn, play, events)?;
        }

        self.phase = if turn + 1 >= self.settings.max_hand {
            RoundPhase::Scoring
        } else {
            RoundPhase::TurnLoop(turn + 1)
        };
        Ok(())
    }

    fn resolve(&mut self, turn: usize, play: Play, events: &mut EventBus) -> Result<(), GameError> {
        let value = play.card.value();
        let player = &mut self.players[play.seat];
        let id = player.id();
        let placement = self.table.place(play.card)?;
        let row = placement.row();
        trace!(round = self.number, turn, player = player.name(), value, row, "card placed");
        events.emit(GameEvent::CardPlaced { round: self.number, turn, player: id, value, row });

        let taken = match placement {
            Placement::Appended { .. } => return Ok(()),
            Placement::Flushed { taken, .. } => {
                debug!(round = self.number, player = player.name(), row, count = taken.len(), "row flushed");
                events.emit(GameEvent::RowFlushed {
                    round: self.number,
                    turn,
                    player: id,
                    row,
                    taken: taken.iter().map(Card::value).collect(),
                    points: total_points(&taken),
                });
                taken
            }
            Placement::Cried { taken, .. } => {
                debug!(round = self.number, player = player.name(), row, value, "player cries");
                events.emit(GameEvent::PlayerCried {
                    round: self.number,
                    turn,
                    player: id,
                    row,
                    taken: taken.iter().map(Card::value).collect(),
                    points: total_points(&taken),
                });
                taken
            }
        };
        player.bury(taken);
        Ok(())
    }

    /// Add graveyard points to each cumulative score and order the players by
    /// score, lowest first.
    pub fn score(&mut self, events: &mut EventBus) -> Result<Vec<RoundScore>, GameError> {
        self.expect_phase(RoundPhase::Scoring, "score")?;
        let scores: Vec<RoundScore> = self
            .players
            .iter_mut()
            .map(|p| {
                let points = p.settle_round();
                RoundScore { player: p.id(), points, total: p.score() }
            })
            .collect();
        self.players.sort_by_key(Player::score);
        debug!(round = self.number, ?scores, "round scored");
        events.emit(GameEvent::RoundScored { round: self.number, scores: scores.clone() });
        self.phase = RoundPhase::Complete;
        Ok(scores)
    }

    /// Drive the round from `Created` to `Complete`.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        events: &mut EventBus,
    ) -> Result<Vec<RoundScore>, GameError> {
        self.distribute(rng, events)?;
        while matches!(self.phase, RoundPhase::TurnLoop(_)) {
            self.play_turn(events)?;
        }
        self.score(events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn bots(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::seeded(format!("Bot {}", i + 1), i as u64)).collect()
    }

    #[test]
    fn distribute_leaves_the_rest_in_the_deck() {
        let mut round = Round::new(bots(4), Settings::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        round.distribute(&mut rng, &mut EventBus::new()).unwrap();
        assert_eq!(round.deck_len(), 60);
        assert_eq!(round.table().len(), 4);
        assert!(round.players().iter().all(|p| p.hand().len() == 10));
        assert_eq!(round.card_count(), 104);
        assert_eq!(round.phase(), RoundPhase::TurnLoop(0));
    }

    #[test]
    fn phases_advance_to_complete() {
        let mut round = Round::new(bots(4), Settings::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut events = EventBus::new();
        round.distribute(&mut rng, &mut events).unwrap();
        for turn in 0..10 {
            assert_eq!(round.phase(), RoundPhase::TurnLoop(turn));
            round.play_turn(&mut events).unwrap();
        }
        assert_eq!(round.phase(), RoundPhase::Scoring);
        round.score(&mut events).unwrap();
        assert_eq!(round.phase(), RoundPhase::Complete);
        assert!(round.players().iter().all(|p| p.hand().is_empty()));
    }

    #[test]
    fn out_of_order_calls_are_rejected() {
        let mut round = Round::new(bots(4), Settings::default()).unwrap();
        let mut events = EventBus::new();
        assert!(matches!(
            round.play_turn(&mut events),
            Err(GameError::OutOfPhase { operation: "play_turn", phase: RoundPhase::Created })
        ));
        assert!(matches!(round.score(&mut events), Err(GameError::OutOfPhase { .. })));
    }

    #[test]
    fn oversized_table_fails_fast() {
        let err = Round::new(bots(11), Settings::default()).unwrap_err();
        assert!(matches!(err, ConfigError::DeckTooSmall { players: 11, .. }));
        assert!(Round::new(bots(10), Settings::default()).is_ok());
    }

    #[test]
    fn players_sorted_by_score_after_round() {
        let mut round = Round::new(bots(4), Settings::default()).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(21);
        round.run(&mut rng, &mut EventBus::new()).unwrap();
        let scores: Vec<u32> = round.players().iter().map(Player::score).collect();
        assert!(scores.windows(2).all(|w| w[0] <= w[1]));
    }
}

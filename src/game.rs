use crate::agents::DecisionError;
use crate::config::{ConfigError, Settings};
use crate::events::{EventBus, GameEvent, RoundScore, Standing};
use crate::player::Player;
use crate::round::{Round, RoundPhase};
use crate::table::TableError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("player {player} could not decide: {source}")]
    Decision {
        player: String,
        #[source]
        source: DecisionError,
    },
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("cannot {operation} while the round is {phase:?}")]
    OutOfPhase { operation: &'static str, phase: RoundPhase },
    #[error("round limit of {0} reached before every player hit the score threshold")]
    RoundLimit(u32),
}

impl GameError {
    pub(crate) fn decision(player: &str, source: DecisionError) -> Self {
        GameError::Decision { player: player.to_string(), source }
    }
}

/// A full game: rounds repeat until every player's score reaches
/// `max_score`.
///
/// ```
/// use take6::game::Game;
/// use take6::player::Player;
///
/// let players = (0..4).map(|i| Player::seeded(format!("Bot {i}"), i)).collect();
/// let mut game = Game::new(players).unwrap().with_seed(7);
/// let standings = game.start().unwrap();
/// assert_eq!(standings.len(), 4);
/// assert!(standings.iter().all(|s| s.score >= 66));
/// assert!(standings.windows(2).all(|w| w[0].score <= w[1].score));
/// ```
#[derive(Debug)]
pub struct Game {
    settings: Settings,
    players: Vec<Player>,
    rng: ChaCha8Rng,
    events: EventBus,
    rounds_played: u32,
}

impl Game {
    /// A game with the classic settings.
    pub fn new(players: Vec<Player>) -> Result<Self, ConfigError> {
        Self::with_settings(players, Settings::default())
    }

    pub fn with_settings(players: Vec<Player>, settings: Settings) -> Result<Self, ConfigError> {
        settings.validate(players.len())?;
        let seed: u64 = rand::rng().random();
        Ok(Self {
            settings,
            players,
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: EventBus::new(),
            rounds_played: 0,
        })
    }

    /// Seed the shuffles for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        self
    }

    /// Register a listener for lifecycle events.
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&GameEvent) + 'static,
    {
        self.events.subscribe(listener);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Players in their current order: seating order before the first round,
    /// ascending by score afterwards.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    /// True once every player has reached the score threshold.
    pub fn is_over(&self) -> bool {
        self.players.iter().all(|p| p.score() >= self.settings.max_score)
    }

    /// Play a single round with the current players.
    pub fn play_round(&mut self) -> Result<Vec<RoundScore>, GameError> {
        let number = self.rounds_played + 1;
        self.settings.validate(self.players.len())?;
        let players = std::mem::take(&mut self.players);
        let mut round = Round::new(players, self.settings)?.numbered(number);
        let result = round.run(&mut self.rng, &mut self.events);
        self.players = round.into_players();
        let scores = result?;
        self.rounds_played = number;
        Ok(scores)
    }

    /// Run rounds until the game is over and return the final ranking.
    pub fn start(&mut self) -> Result<Vec<Standing>, GameError> {
        while !self.is_over() {
            if let Some(limit) = self.settings.round_limit {
                if self.rounds_played >= limit {
                    return Err(GameError::RoundLimit(limit));
                }
            }
            self.play_round()?;
            debug!(
                round = self.rounds_played,
                scores = ?self.players.iter().map(|p| (p.name(), p.score())).collect::<Vec<_>>(),
                "round complete"
            );
        }
        let standings = self.standings();
        info!(rounds = self.rounds_played, winner = ?standings.first().map(|s| &s.name), "game finished");
        self.events.emit(GameEvent::GameFinished {
            rounds: self.rounds_played,
            standings: standings.clone(),
        });
        Ok(standings)
    }

    /// Players ranked by ascending score; equal scores share a rank.
    pub fn standings(&self) -> Vec<Standing> {
        let mut ordered: Vec<&Player> = self.players.iter().collect();
        ordered.sort_by_key(|p| p.score());
        let mut standings: Vec<Standing> = Vec::with_capacity(ordered.len());
        for (i, p) in ordered.into_iter().enumerate() {
            let rank = match standings.last() {
                Some(prev) if prev.score == p.score() => prev.rank,
                _ => i + 1,
            };
            standings.push(Standing { rank, player: p.id(), name: p.name().to_string(), score: p.score() });
        }
        standings
    }

    /// The player with the lowest score; the earliest in order on ties.
    pub fn winner(&self) -> Option<&Player> {
        self.players.iter().min_by_key(|p| p.score())
    }
}

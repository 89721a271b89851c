//! take6: a "Take 6" style card game engine
//!
//! Goals:
//! - Exact lane placement, flush and cry rules
//! - Reproducible games: every random choice comes from a seedable RNG
//! - No panics for invalid input or broken strategies; use `Result`
//!
//! ## Quick start: run a game between bots
//! ```
//! use take6::game::Game;
//! use take6::player::Player;
//!
//! let players = vec![
//!     Player::seeded("Ada", 1),
//!     Player::seeded("Bert", 2),
//!     Player::seeded("Cleo", 3),
//!     Player::seeded("Dina", 4),
//! ];
//! let mut game = Game::new(players).unwrap().with_seed(42);
//! let standings = game.start().unwrap();
//! assert_eq!(standings[0].rank, 1);
//! ```
//!
//! ## CLI
//! Simulate a seeded game from the command line with:
//! ```sh
//! cargo run --bin take6 -- --players 4 --seed 42
//! ```

pub mod agents;
pub mod cards;
pub mod config;
pub mod deck;
pub mod events;
pub mod game;
pub mod player;
pub mod round;
pub mod table;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! holdem-engine: a single-table Texas Hold'em hand engine.
//!
//! Covers betting rounds with side pots, hand categorisation, showdown
//! settlement and rule-driven bots. Rendering is left to the caller, which
//! drives a [`game::Game`] through [`engine::TableEngine`].
//!
//! ## Quick start: classify a hand
//! ```
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::evaluator::{evaluate, Category};
//!
//! let cards = parse_cards("Ah Kh Qh Jh Th 2c 3d").unwrap();
//! assert_eq!(evaluate(&cards), Category::RoyalFlush);
//! ```
//!
//! ## Quick start: play a hand
//! ```
//! use holdem_engine::config::TableConfig;
//! use holdem_engine::game::{Action, Game};
//!
//! let mut game = Game::new(TableConfig::default().with_seed(42)).unwrap();
//! game.start_new_round().unwrap();
//! while game.current_actor().is_some() {
//!     game.handle_player_action(Action::Fold).unwrap();
//! }
//! assert_eq!(game.total_chips(), 6000);
//! ```
//!
//! ## Terminal table
//! ```sh
//! cargo run --bin holdem -- --difficulty hard
//! ```

pub mod bot;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod evaluator;
pub mod game;
pub mod guidance;
pub mod pot;
pub mod showdown;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

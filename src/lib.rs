//! blackjack-rs: a single-player blackjack table
//!
//! Goals:
//! - One player against a dealer who stands on all 17s
//! - Exact money arithmetic in cents
//! - No panics for invalid input; every rejected move is a `Result`
//!
//! ## Quick start: play a stacked round
//! ```
//! use blackjack_rs::cards::parse_cards;
//! use blackjack_rs::config::TableConfig;
//! use blackjack_rs::money::Money;
//! use blackjack_rs::round::{Decision, Phase, Table};
//! use blackjack_rs::shoe::Shoe;
//!
//! let mut table = Table::with_seed(TableConfig::default(), 7);
//! // Deal order: player, dealer (hole), player, dealer (up), then draws.
//! let shoe = Shoe::stacked(parse_cards("10s 9c 9h 8d").unwrap());
//! table.start_round_with_shoe(Money::from_units(10), shoe).unwrap();
//! assert_eq!(table.phase(), Phase::PlayerDecision);
//!
//! table.decide(Decision::Stand, 0).unwrap();
//! assert_eq!(table.phase(), Phase::Done);
//! assert_eq!(table.bankroll(), Money::from_units(1010));
//! ```
//!
//! ## TUI
//! Run the interactive TUI with:
//! ```sh
//! cargo run --bin blackjack-rs
//! ```

pub mod cards;
pub mod config;
pub mod engine;
pub mod hand;
pub mod money;
pub mod participant;
pub mod round;
pub mod settlement;
pub mod shoe;
pub mod tui;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

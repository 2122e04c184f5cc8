//! # saa-engine: Streets and Alleys Game Engine
//!
//! Game state for the Streets and Alleys solitaire: eight stacks and four
//! suit foundations dealt from a deck of 5 to 13 ranks per suit. A game is
//! won when every stack is ordered so that each card is covered only by
//! cards of lesser rank.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card encoding (`rank * 4 + suit`), suits and rank counts
//! - [`pool`] - Fixed-capacity cell arena backing the piles
//! - [`board`] - The board and its card-accounting invariants
//! - [`deck`] - Seeded shuffling and round-robin dealing
//! - [`moves`] - Moves to a foundation or another stack
//! - [`rules`] - Move legality and win detection
//! - [`persistence`] - Binary save file
//! - [`game`] - A board together with its dealer
//! - [`logger`] - JSONL history of finished games
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use saa_engine::cards::Ranks;
//! use saa_engine::deck::Dealer;
//! use saa_engine::game::Game;
//!
//! let mut game = Game::new(Dealer::new_with_seed(42));
//! game.deal(Ranks::new(6).unwrap()).unwrap();
//!
//! // Try every legal move from the first position
//! for mv in game.board().legal_moves() {
//!     println!("{:?}", mv);
//! }
//! assert!(game.board().verify().is_ok());
//! ```
//!
//! ## Moves
//!
//! A refused move reports why and leaves the board alone:
//!
//! ```rust
//! use saa_engine::board::Board;
//! use saa_engine::cards::{all_suits, full_deck, Card, Ranks, Suit, STACKS};
//!
//! let ranks = Ranks::new(5).unwrap();
//! let h3 = Card::new(3, Suit::Hearts).unwrap();
//! let mut stacks: [Vec<Card>; STACKS] = Default::default();
//! for (i, card) in full_deck(ranks).into_iter().filter(|c| *c != h3).enumerate() {
//!     stacks[i % STACKS].push(card);
//! }
//! stacks[0].push(h3);
//! let mut board = Board::from_layout(ranks, &stacks, all_suits().map(Card::sentinel)).unwrap();
//!
//! let err = board.move_to_foundation(0).unwrap_err();
//! assert_eq!(err.to_string(), "The H3 cannot be moved to the foundation.");
//! assert_eq!(board.top_card(0), Some(h3));
//! ```

pub mod board;
pub mod cards;
pub mod deck;
pub mod errors;
pub mod game;
pub mod logger;
pub mod moves;
pub mod persistence;
pub mod pool;
pub mod rules;

/*
  Rookery, a chess rules engine and game-tree search agent.
  Copyright (C) 2024 The Rookery Authors.

  Rookery is free software: you can redistribute it and/or modify
  it under the terms of the GNU General Public License as published by
  the Free Software Foundation, either version 3 of the License, or
  (at your option) any later version.

  Rookery is distributed in the hope that it will be useful,
  but WITHOUT ANY WARRANTY; without even the implied warranty of
  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
  GNU General Public License for more details.

  You should have received a copy of the GNU General Public License
  along with this program.  If not, see <http://www.gnu.org/licenses/>.
*/
#![warn(clippy::pedantic)]

//! Rookery: a chess rules engine with a game-tree search agent.
//!
//! The crate is split into two halves:
//! - [`base`] holds the rules of the game: pieces, the board, legality, check, checkmate and
//!   stalemate detection, and undo.
//! - [`engine`] holds the agent which picks moves: a tapered static evaluation and a fixed-depth
//!   alpha-beta search.
//!
//! [`game`] ties the two together into a session between a human and the agent, with clocks and
//! an outcome, configured through [`config`].
//!
//! The library only emits [`tracing`] events and never installs a subscriber; that is left to the
//! program using it.

pub mod base;
pub mod config;
pub mod engine;
pub mod fens;
pub mod game;

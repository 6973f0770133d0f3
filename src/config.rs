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

//! Configuration of a game against the agent.
//!
//! Configuration is read from TOML. Every field is optional; missing fields take their defaults.
//!
//! ```toml
//! player_color = "black"
//! time_control_minutes = 5
//! search_depth = 2
//! ```

use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use crate::{
    base::{Color, Error},
    engine::search::{Agent, DEFAULT_DEPTH},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
/// The settings chosen before a game starts.
pub struct Config {
    /// The color the human plays. The agent plays the other color.
    pub player_color: Color,
    /// The time each player starts with, in minutes.
    pub time_control_minutes: u32,
    /// The number of plies the agent searches.
    pub search_depth: u8,
}

impl Config {
    /// Parse a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `s` is not valid TOML, or if a field has the wrong type or an unknown name.
    pub fn from_toml_str(s: &str) -> Result<Config, Error> {
        Ok(toml::from_str(s)?)
    }

    /// Load a configuration from the TOML file at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file cannot be read or does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Config, Error> {
        let text = fs::read_to_string(path)?;
        Config::from_toml_str(&text)
    }

    #[must_use]
    /// Get the agent which plays against the human under this configuration.
    pub const fn agent(&self) -> Agent {
        Agent::new(self.agent_color(), self.search_depth)
    }

    #[must_use]
    /// Get the color the agent plays.
    pub const fn agent_color(&self) -> Color {
        match self.player_color {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[must_use]
    /// Get the time each player starts with, in seconds.
    pub fn clock_seconds(&self) -> f64 {
        f64::from(self.time_control_minutes) * 60.0
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            player_color: Color::White,
            time_control_minutes: 10,
            search_depth: DEFAULT_DEPTH,
        }
    }
}

//! Command-line configuration.

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use log::LevelFilter;

use crate::game::MONSTER_INTERVAL_MS;

/// Runtime options of the game.
///
/// Rule constants are fixed; these flags only cover reproducibility, pacing and diagnostics.
#[derive(Clone, Debug, PartialEq, Eq, Parser)]
#[command(version, about)]
pub struct Config {
    /// Seed for level generation and monster movement; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Milliseconds between two monster steps.
    #[arg(
        long,
        value_name = "MS",
        default_value_t = MONSTER_INTERVAL_MS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub monster_interval: u64,
    /// Write a log to this file. The terminal belongs to the game, so nothing is logged without it.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
    /// Most verbose level written to the log file.
    #[arg(long, value_name = "LEVEL", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed: None,
            monster_interval: MONSTER_INTERVAL_MS,
            log_file: None,
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    /// Returns the monster step period as a duration.
    #[must_use]
    pub const fn monster_interval(&self) -> Duration {
        Duration::from_millis(self.monster_interval)
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;
    use crate::game::MONSTER_INTERVAL;

    #[test]
    fn test_command_is_well_formed() {
        Config::command().debug_assert();
    }

    #[test]
    fn test_defaults_match_rules() {
        let config = Config::try_parse_from(["blastmaze"]).expect("no flags should parse");

        assert_eq!(config, Config::default());
        assert_eq!(config.monster_interval(), MONSTER_INTERVAL);
    }

    #[test]
    fn test_flags() {
        let config = Config::try_parse_from([
            "blastmaze",
            "--seed",
            "42",
            "--monster-interval",
            "250",
            "--log-file",
            "game.log",
            "--log-level",
            "debug",
        ])
        .expect("flags should parse");

        assert_eq!(config.seed, Some(42));
        assert_eq!(config.monster_interval(), Duration::from_millis(250));
        assert_eq!(config.log_file, Some(PathBuf::from("game.log")));
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        assert!(Config::try_parse_from(["blastmaze", "--monster-interval", "0"]).is_err());
    }
}

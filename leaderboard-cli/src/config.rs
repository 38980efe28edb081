/// Config file loading and creation for the leaderboard CLI.
///
/// Config lives at ~/.config/leaderboard/config.toml.
/// All fields are optional — CLI args override config values.
use leaderboard_core::{Metric, TieStrategy};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::bail;

#[derive(Debug, Deserialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct LeaderboardConfig {
    pub ties: Option<TieStrategy>,
    pub metric: Option<Metric>,
    pub min_games: Option<usize>,
    pub json: Option<bool>,
}

const DEFAULT_CONFIG_TEMPLATE: &str = "\
# leaderboard configuration
# All values here can be overridden by CLI flags.

# How ranks continue after tied scores:
#   \"competition\" (1, 1, 3) or \"dense\" (1, 1, 2)
# ties = \"competition\"

# Score used by `leaderboard standings`:
#   \"win-rate\", \"impostor-win-rate\" or \"crewmate-win-rate\"
# metric = \"win-rate\"

# Models with fewer games than this are left off the standings
# min_games = 1

# Print JSON instead of a table
# json = false
";

/// Returns the default config path: ~/.config/leaderboard/config.toml
pub fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| bail("HOME environment variable not set"));
    PathBuf::from(home).join(".config").join("leaderboard").join("config.toml")
}

pub fn parse_config(content: &str) -> Result<LeaderboardConfig, toml::de::Error> {
    toml::from_str(content)
}

/// Load config from a file path. Returns default (all None) if file doesn't exist.
pub fn load_config(path: &Path) -> LeaderboardConfig {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_config(&content)
            .unwrap_or_else(|e| bail(format!("Failed to parse config at {}: {e}", path.display()))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => LeaderboardConfig::default(),
        Err(e) => bail(format!("Failed to read config at {}: {e}", path.display())),
    }
}

/// Create the default config file at `path`. Errors if it already exists.
pub fn create_default_config(path: &Path) {
    if path.exists() {
        bail(format!("Config file already exists at {}", path.display()));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .unwrap_or_else(|e| bail(format!("Failed to create directory {}: {e}", parent.display())));
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .unwrap_or_else(|e| bail(format!("Failed to write config to {}: {e}", path.display())));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config(&dir.path().join("nope.toml"));
        assert_eq!(cfg, LeaderboardConfig::default());
    }

    #[test]
    fn test_parse_all_fields() {
        let cfg = parse_config("ties = \"dense\"\nmetric = \"impostor-win-rate\"\nmin_games = 3\njson = true\n").unwrap();
        assert_eq!(cfg.ties, Some(TieStrategy::Dense));
        assert_eq!(cfg.metric, Some(Metric::ImpostorWinRate));
        assert_eq!(cfg.min_games, Some(3));
        assert_eq!(cfg.json, Some(true));
    }

    #[test]
    fn test_unknown_tie_strategy_rejected() {
        assert!(parse_config("ties = \"olympic\"\n").is_err());
    }

    #[test]
    fn test_default_template_is_valid_and_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("leaderboard").join("config.toml");
        create_default_config(&path);
        assert_eq!(load_config(&path), LeaderboardConfig::default());
    }
}

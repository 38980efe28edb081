/// Per-model win/loss tallies built from finished games.
///
/// Every seat counts as one game for the model that played it, in the role it
/// was dealt. Scores are plain win rates; ranking them is left to
/// `rank_participants()`.
use std::collections::BTreeMap;

use crate::types::{GameOutcome, Metric, Participant, Role};

/// Games and wins for one model, split by role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelRecord {
    pub impostor_games: usize,
    pub impostor_wins: usize,
    pub crewmate_games: usize,
    pub crewmate_wins: usize,
}

impl ModelRecord {
    pub fn games(&self, metric: Metric) -> usize {
        match metric {
            Metric::WinRate => self.impostor_games + self.crewmate_games,
            Metric::ImpostorWinRate => self.impostor_games,
            Metric::CrewmateWinRate => self.crewmate_games,
        }
    }

    pub fn wins(&self, metric: Metric) -> usize {
        match metric {
            Metric::WinRate => self.impostor_wins + self.crewmate_wins,
            Metric::ImpostorWinRate => self.impostor_wins,
            Metric::CrewmateWinRate => self.crewmate_wins,
        }
    }

    /// Wins / games for the metric's subset. `None` if no games were played in it.
    pub fn win_rate(&self, metric: Metric) -> Option<f64> {
        let games = self.games(metric);
        if games == 0 {
            return None;
        }
        Some(self.wins(metric) as f64 / games as f64)
    }

    fn record_seat(&mut self, role: Role, won: bool) {
        let (games, wins) = match role {
            Role::Impostor => (&mut self.impostor_games, &mut self.impostor_wins),
            Role::Crewmate => (&mut self.crewmate_games, &mut self.crewmate_wins),
        };
        *games += 1;
        if won {
            *wins += 1;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Standings {
    /// Keyed by model id. Ordered so iteration is deterministic.
    records: BTreeMap<String, ModelRecord>,
    games_recorded: usize,
}

impl Standings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_games(games: &[GameOutcome]) -> Self {
        let mut standings = Standings::new();
        for game in games {
            standings.record_game(game);
        }
        standings
    }

    pub fn record_game(&mut self, game: &GameOutcome) {
        for player in &game.players {
            let won = player.role.team() == game.winner;
            self.records
                .entry(player.model.clone())
                .or_default()
                .record_seat(player.role, won);
        }
        self.games_recorded += 1;
    }

    pub fn games_recorded(&self) -> usize {
        self.games_recorded
    }

    pub fn record(&self, model: &str) -> Option<&ModelRecord> {
        self.records.get(model)
    }

    pub fn models(&self) -> impl Iterator<Item = (&str, &ModelRecord)> {
        self.records.iter().map(|(model, record)| (model.as_str(), record))
    }

    /// Scored participants for `metric`.
    ///
    /// Models with fewer than `min_games` games in the metric's subset are
    /// left out; a model with zero games there is always left out since it
    /// has no win rate.
    pub fn participants(&self, metric: Metric, min_games: usize) -> Vec<Participant> {
        self.records
            .iter()
            .filter(|(_, record)| record.games(metric) >= min_games)
            .filter_map(|(model, record)| {
                record
                    .win_rate(metric)
                    .map(|rate| Participant::new(model.clone(), rate))
            })
            .collect()
    }
}

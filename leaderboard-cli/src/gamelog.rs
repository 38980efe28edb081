/// Game log reading: players, votes, kills and the outcome of one game.
///
/// A log is a JSON object with a `summary` (one entry per player plus
/// `winner` / `winner_reason`) and `agent_logs` (one entry per agent turn).
/// Logs are written by the game runner from free-form LLM output, so every
/// field is optional here and inconsistencies become warnings, not errors.
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use leaderboard_core::{GameOutcome, PlayerRecord, Role, Standings, Team};
use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum GameLogError {
    #[error("failed to read {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("failed to parse {}: {source}", path.display())]
    Json { path: PathBuf, source: serde_json::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: std::io::Error },

    #[error("no readable game logs among {0} file(s)")]
    NoReadableLogs(usize),

    #[error("log has no summary object")]
    MissingSummary,

    #[error("no players found in summary")]
    NoPlayers,

    #[error("player \"{player}\" has unknown identity \"{identity}\"")]
    UnknownIdentity { player: String, identity: String },

    #[error("no model recorded for player \"{0}\"")]
    MissingModel(String),

    #[error("cannot determine winner (winner_reason: \"{0}\")")]
    NoWinner(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Vote {
    pub voter: String,
    pub target: String,
}

/// All votes cast at one meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteRound {
    /// 1-based, in timestep order.
    pub meeting_number: usize,
    pub timestep: Option<i64>,
    pub votes: Vec<Vote>,
    pub tally: BTreeMap<String, usize>,
    /// Unique plurality target. A tied top vote ejects nobody.
    pub eliminated: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KillRecord {
    pub killer: String,
    pub victim: String,
    pub timestep: Option<i64>,
    pub location: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameLog {
    pub outcome: GameOutcome,
    pub reason: String,
    pub voting_history: Vec<VoteRound>,
    pub kill_history: Vec<KillRecord>,
    pub surviving_players: Vec<String>,
    pub eliminated_players: Vec<String>,
    pub warnings: Vec<String>,
}

impl GameLog {
    /// Impostors still alive at the end of the game.
    pub fn final_impostor_count(&self) -> usize {
        self.outcome
            .players
            .iter()
            .filter(|p| p.role == Role::Impostor && self.surviving_players.contains(&p.name))
            .count()
    }

    pub fn final_crewmate_count(&self) -> usize {
        self.surviving_players.len() - self.final_impostor_count()
    }
}

/// Expand directories to the `*.json` files directly inside them (sorted).
/// Plain file paths pass through unchanged.
pub fn collect_log_paths(paths: &[PathBuf]) -> Result<Vec<PathBuf>, GameLogError> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let io_err = |source| GameLogError::Io { path: path.clone(), source };
        let mut in_dir = Vec::new();
        for entry in std::fs::read_dir(path).map_err(io_err)? {
            let entry_path = entry.map_err(io_err)?.path();
            if entry_path.is_file() && entry_path.extension().is_some_and(|ext| ext == "json") {
                in_dir.push(entry_path);
            }
        }
        in_dir.sort();
        files.extend(in_dir);
    }
    Ok(files)
}

fn read_log_value(path: &Path) -> Result<Value, GameLogError> {
    let content = std::fs::read_to_string(path)
        .map_err(|source| GameLogError::Io { path: path.to_path_buf(), source })?;
    serde_json::from_str(&content).map_err(|source| GameLogError::Json { path: path.to_path_buf(), source })
}

pub fn read_game_log(path: &Path) -> Result<GameLog, GameLogError> {
    parse_game_log(&read_log_value(path)?)
}

/// Tally every readable log into standings. Unreadable logs are logged and
/// skipped; the second value counts them. Fails only if nothing was readable.
pub fn standings_from_logs(paths: &[PathBuf]) -> Result<(Standings, usize), GameLogError> {
    let mut standings = Standings::new();
    let mut skipped = 0usize;

    for path in paths {
        match read_game_log(path) {
            Ok(log) => {
                for warning in &log.warnings {
                    warn!(log = %path.display(), "inconsistent game outcome: {warning}");
                }
                standings.record_game(&log.outcome);
            }
            Err(e) => {
                skipped += 1;
                warn!(log = %path.display(), "skipping game log: {e}");
            }
        }
    }

    if standings.games_recorded() == 0 {
        return Err(GameLogError::NoReadableLogs(paths.len()));
    }
    Ok((standings, skipped))
}

/// Rewrite a game log with `voting_history`, `kill_history` and
/// `game_outcome` added to its summary. Writes to `output`, or back to
/// `path` when no output is given.
pub fn enrich_game_log(path: &Path, output: Option<&Path>) -> Result<GameLog, GameLogError> {
    let mut raw = read_log_value(path)?;
    let log = parse_game_log(&raw)?;
    let summary = enhanced_summary(&raw, &log);
    if let Some(obj) = raw.as_object_mut() {
        obj.insert("summary".to_string(), summary);
    }

    let target = output.unwrap_or(path);
    let text = serde_json::to_string_pretty(&raw)
        .map_err(|source| GameLogError::Json { path: target.to_path_buf(), source })?;
    std::fs::write(target, text).map_err(|source| GameLogError::Write { path: target.to_path_buf(), source })?;
    Ok(log)
}

/// The raw summary with the extracted histories and outcome merged in.
pub fn enhanced_summary(raw: &Value, log: &GameLog) -> Value {
    let mut summary = raw
        .get("summary")
        .and_then(Value::as_object)
        .cloned()
        .unwrap_or_default();

    let voting_history: Vec<Value> = log
        .voting_history
        .iter()
        .map(|round| {
            let votes: Vec<Value> = round
                .votes
                .iter()
                .map(|v| json!({ "voter": v.voter, "target": v.target, "timestep": round.timestep }))
                .collect();
            json!({
                "meeting_number": round.meeting_number,
                "timestep": round.timestep,
                "votes": votes,
                "vote_tally": round.tally,
                "eliminated": round.eliminated,
            })
        })
        .collect();

    let winner = summary.get("winner").cloned().unwrap_or(Value::Null);
    let game_outcome = json!({
        "winner": winner,
        "reason": log.reason,
        "surviving_players": log.surviving_players,
        "eliminated_players": log.eliminated_players,
        "final_impostor_count": log.final_impostor_count(),
        "final_crewmate_count": log.final_crewmate_count(),
    });

    summary.insert("voting_history".to_string(), Value::Array(voting_history));
    summary.insert("kill_history".to_string(), json!(log.kill_history));
    summary.insert("game_outcome".to_string(), game_outcome);
    Value::Object(summary)
}

pub fn parse_game_log(log: &Value) -> Result<GameLog, GameLogError> {
    let summary = log
        .get("summary")
        .and_then(Value::as_object)
        .ok_or(GameLogError::MissingSummary)?;
    let agent_logs: &[Value] = log
        .get("agent_logs")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    let players = extract_players(summary, agent_logs)?;

    let reason = summary
        .get("winner_reason")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string();
    let winner = determine_winner(&reason, summary.get("winner"))
        .ok_or_else(|| GameLogError::NoWinner(reason.clone()))?;

    let voting_history = extract_voting_history(agent_logs);
    let kill_history = extract_kill_history(agent_logs);

    let mut eliminated: BTreeSet<String> = voting_history
        .iter()
        .filter_map(|round| round.eliminated.clone())
        .collect();
    eliminated.extend(kill_history.iter().map(|kill| kill.victim.clone()));

    let mut surviving_players: Vec<String> = players
        .iter()
        .filter(|p| !eliminated.contains(&p.name))
        .map(|p| p.name.clone())
        .collect();
    surviving_players.sort();
    let eliminated_players: Vec<String> = eliminated.into_iter().collect();

    let outcome = GameOutcome { players, winner };
    let warnings = consistency_warnings(&outcome, &reason, &surviving_players, &eliminated_players);

    Ok(GameLog {
        outcome,
        reason,
        voting_history,
        kill_history,
        surviving_players,
        eliminated_players,
        warnings,
    })
}

fn extract_players(summary: &Map<String, Value>, agent_logs: &[Value]) -> Result<Vec<PlayerRecord>, GameLogError> {
    let mut players = Vec::new();

    for entry in summary.values() {
        let name = entry.get("name").and_then(Value::as_str);
        let identity = entry.get("identity").and_then(Value::as_str);
        let (Some(name), Some(identity)) = (name, identity) else {
            continue;
        };

        let role = parse_role(identity).ok_or_else(|| GameLogError::UnknownIdentity {
            player: name.to_string(),
            identity: identity.to_string(),
        })?;
        let model = entry
            .get("model")
            .and_then(Value::as_str)
            .or_else(|| model_from_agent_logs(agent_logs, name))
            .ok_or_else(|| GameLogError::MissingModel(name.to_string()))?;

        players.push(PlayerRecord {
            name: name.to_string(),
            model: model.to_string(),
            role,
        });
    }

    if players.is_empty() {
        return Err(GameLogError::NoPlayers);
    }
    Ok(players)
}

fn parse_role(identity: &str) -> Option<Role> {
    match identity.trim().to_lowercase().as_str() {
        "impostor" | "imposter" => Some(Role::Impostor),
        "crewmate" => Some(Role::Crewmate),
        _ => None,
    }
}

fn model_from_agent_logs<'a>(agent_logs: &'a [Value], name: &str) -> Option<&'a str> {
    agent_logs
        .iter()
        .filter_map(|entry| entry.get("player"))
        .find(|player| player.get("name").and_then(Value::as_str) == Some(name))
        .and_then(|player| player.get("model"))
        .and_then(Value::as_str)
}

/// Winner from the free-text reason first, then the numeric `winner` code.
///
/// Reasons look like "Impostors win! (Time limit reached)" or
/// "Crewmates win! (Impostors eliminated)", so the leading word decides.
fn determine_winner(reason: &str, winner: Option<&Value>) -> Option<Team> {
    if let Some(team) = team_from_text(reason) {
        return Some(team);
    }
    match winner {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(1) | Some(4) => Some(Team::Impostors),
            Some(2) | Some(3) => Some(Team::Crewmates),
            _ => None,
        },
        Some(Value::String(s)) => team_from_text(s),
        _ => None,
    }
}

fn team_from_text(text: &str) -> Option<Team> {
    let lower = text.trim().to_lowercase();
    if lower.starts_with("impostor") || lower.starts_with("imposter") {
        Some(Team::Impostors)
    } else if lower.starts_with("crewmate") {
        Some(Team::Crewmates)
    } else if lower.contains("eliminated") || lower.contains("task") {
        Some(Team::Crewmates)
    } else if lower.contains("time limit") || lower.contains("outnumber") {
        Some(Team::Impostors)
    } else {
        None
    }
}

/// The action an agent took this turn, wherever the response put it.
fn action_of(entry: &Value) -> &str {
    let Some(response) = entry.pointer("/interaction/response").filter(|r| r.is_object()) else {
        return "";
    };
    response
        .get("Action")
        .and_then(Value::as_str)
        .filter(|action| !action.is_empty())
        .or_else(|| {
            response
                .get("Thinking Process")
                .and_then(|thinking| thinking.get("action"))
                .and_then(Value::as_str)
        })
        .unwrap_or("")
}

/// Target named after `keyword` in an action like "VOTE Player 5: blue".
fn target_after(action: &str, keyword: &str) -> Option<String> {
    let (_, rest) = action.split_once(keyword)?;
    let target = narrow_player_name(rest.trim());
    if target.is_empty() {
        return None;
    }
    Some(target.to_string())
}

/// Cut a target down to its leading "Player N: color" if it has one.
fn narrow_player_name(target: &str) -> &str {
    const PREFIX: &str = "Player ";
    const SEPARATOR: &str = ": ";

    let Some(rest) = target.strip_prefix(PREFIX) else {
        return target;
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return target;
    }
    let Some(after) = rest[digits..].strip_prefix(SEPARATOR) else {
        return target;
    };
    let word: usize = after
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum();
    if word == 0 {
        return target;
    }
    &target[..PREFIX.len() + digits + SEPARATOR.len() + word]
}

fn player_name(entry: &Value) -> String {
    entry
        .pointer("/player/name")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn step_of(entry: &Value) -> Option<i64> {
    entry.get("step").and_then(Value::as_i64)
}

fn extract_voting_history(agent_logs: &[Value]) -> Vec<VoteRound> {
    let mut votes_by_step: BTreeMap<Option<i64>, Vec<Vote>> = BTreeMap::new();

    for entry in agent_logs {
        if let Some(target) = target_after(action_of(entry), "VOTE") {
            votes_by_step.entry(step_of(entry)).or_default().push(Vote {
                voter: player_name(entry),
                target,
            });
        }
    }

    votes_by_step
        .into_iter()
        .enumerate()
        .map(|(i, (timestep, votes))| {
            let mut tally: BTreeMap<String, usize> = BTreeMap::new();
            for vote in &votes {
                *tally.entry(vote.target.clone()).or_insert(0) += 1;
            }
            let eliminated = unique_plurality(&tally);
            VoteRound {
                meeting_number: i + 1,
                timestep,
                votes,
                tally,
                eliminated,
            }
        })
        .collect()
}

fn unique_plurality(tally: &BTreeMap<String, usize>) -> Option<String> {
    let max = tally.values().copied().max()?;
    let mut leaders = tally.iter().filter(|(_, count)| **count == max);
    let (leader, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None;
    }
    Some(leader.clone())
}

fn extract_kill_history(agent_logs: &[Value]) -> Vec<KillRecord> {
    agent_logs
        .iter()
        .filter_map(|entry| {
            let victim = target_after(action_of(entry), "KILL")?;
            Some(KillRecord {
                killer: player_name(entry),
                victim,
                timestep: step_of(entry),
                location: entry
                    .pointer("/player/location")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string(),
            })
        })
        .collect()
}

fn consistency_warnings(
    outcome: &GameOutcome,
    reason: &str,
    surviving_players: &[String],
    eliminated_players: &[String],
) -> Vec<String> {
    let mut warnings = Vec::new();
    let reason = reason.to_lowercase();

    let impostor_survivors: Vec<&str> = outcome
        .players
        .iter()
        .filter(|p| p.role == Role::Impostor && surviving_players.contains(&p.name))
        .map(|p| p.name.as_str())
        .collect();

    // Checked against the stated reason only; a bare numeric winner code is trusted.
    if reason.contains("impostor") && reason.contains("eliminated") {
        if !impostor_survivors.is_empty() {
            warnings.push(format!(
                "game claims impostors were eliminated but {} impostor(s) survived: {:?}",
                impostor_survivors.len(),
                impostor_survivors,
            ));
        }
    } else if reason.contains("impostor") && reason.contains("win") {
        if impostor_survivors.is_empty() {
            warnings.push("game claims impostors won but no impostors survived".to_string());
        }
    } else if reason.contains("task") && reason.contains("complete") {
        warnings.push("game claims tasks were completed but logs carry no task tracking to confirm it".to_string());
    }

    let accounted = surviving_players.len() + eliminated_players.len();
    if accounted != outcome.players.len() {
        warnings.push(format!(
            "player count mismatch: {} accounted for vs {} expected",
            accounted,
            outcome.players.len(),
        ));
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(name: &str, model: &str, step: i64, action: &str) -> Value {
        json!({
            "step": step,
            "player": { "name": name, "model": model, "location": "Cafeteria" },
            "interaction": { "response": { "Action": action } },
        })
    }

    fn sample_log() -> Value {
        json!({
            "summary": {
                "winner": 2,
                "winner_reason": "Crewmates win! (Impostors eliminated)",
                "Player 1": { "name": "Player 1: red", "identity": "Impostor", "model": "gpt" },
                "Player 2": { "name": "Player 2: blue", "identity": "Crewmate", "model": "claude" },
                "Player 3": { "name": "Player 3: green", "identity": "Crewmate" },
                "Player 4": { "name": "Player 4: pink", "identity": "Crewmate", "model": "gemini" },
            },
            "agent_logs": [
                turn("Player 1: red", "gpt", 3, "KILL Player 4: pink"),
                turn("Player 3: green", "llama", 5, "VOTE Player 1: red"),
                turn("Player 2: blue", "claude", 5, "VOTE Player 1: red, they were near the body"),
                {
                    "step": 5,
                    "player": { "name": "Player 1: red", "model": "gpt" },
                    "interaction": { "response": { "Thinking Process": { "action": "VOTE Player 2: blue" } } },
                },
            ],
        })
    }

    #[test]
    fn test_players_and_models() {
        let log = parse_game_log(&sample_log()).unwrap();
        assert_eq!(log.outcome.players.len(), 4);
        let green = log.outcome.players.iter().find(|p| p.name == "Player 3: green").unwrap();
        // model missing from summary, recovered from agent logs
        assert_eq!(green.model, "llama");
        assert_eq!(green.role, Role::Crewmate);
        assert_eq!(log.outcome.winner, Team::Crewmates);
    }

    #[test]
    fn test_voting_history() {
        let log = parse_game_log(&sample_log()).unwrap();
        assert_eq!(log.voting_history.len(), 1);
        let round = &log.voting_history[0];
        assert_eq!(round.meeting_number, 1);
        assert_eq!(round.timestep, Some(5));
        assert_eq!(round.votes.len(), 3);
        assert_eq!(round.tally["Player 1: red"], 2);
        assert_eq!(round.tally["Player 2: blue"], 1);
        assert_eq!(round.eliminated.as_deref(), Some("Player 1: red"));
    }

    #[test]
    fn test_kill_history_and_survivors() {
        let log = parse_game_log(&sample_log()).unwrap();
        assert_eq!(
            log.kill_history,
            vec![KillRecord {
                killer: "Player 1: red".into(),
                victim: "Player 4: pink".into(),
                timestep: Some(3),
                location: "Cafeteria".into(),
            }]
        );
        assert_eq!(log.eliminated_players, vec!["Player 1: red", "Player 4: pink"]);
        assert_eq!(log.surviving_players, vec!["Player 2: blue", "Player 3: green"]);
        assert!(log.warnings.is_empty(), "unexpected warnings: {:?}", log.warnings);
    }

    #[test]
    fn test_tied_vote_ejects_nobody() {
        let log = json!({
            "summary": {
                "winner_reason": "Impostors win! (Time limit reached)",
                "Player 1": { "name": "Player 1: red", "identity": "Impostor", "model": "gpt" },
                "Player 2": { "name": "Player 2: blue", "identity": "Crewmate", "model": "claude" },
            },
            "agent_logs": [
                turn("Player 1: red", "gpt", 8, "VOTE Player 2: blue"),
                turn("Player 2: blue", "claude", 8, "VOTE Player 1: red"),
            ],
        });
        let log = parse_game_log(&log).unwrap();
        assert_eq!(log.voting_history[0].eliminated, None);
        assert_eq!(log.outcome.winner, Team::Impostors);
        assert_eq!(log.surviving_players.len(), 2);
    }

    #[test]
    fn test_inconsistent_outcome_warns() {
        let log = json!({
            "summary": {
                "winner_reason": "Crewmates win! (Impostors eliminated)",
                "Player 1": { "name": "Player 1: red", "identity": "Impostor", "model": "gpt" },
                "Player 2": { "name": "Player 2: blue", "identity": "Crewmate", "model": "claude" },
            },
            "agent_logs": [],
        });
        let log = parse_game_log(&log).unwrap();
        assert_eq!(log.warnings.len(), 1);
        assert!(log.warnings[0].contains("impostor(s) survived"));
    }

    #[test]
    fn test_numeric_winner_fallback() {
        assert_eq!(determine_winner("", Some(&json!(1))), Some(Team::Impostors));
        assert_eq!(determine_winner("", Some(&json!(3))), Some(Team::Crewmates));
        assert_eq!(determine_winner("", Some(&json!(9))), None);
        assert_eq!(determine_winner("All tasks completed", None), Some(Team::Crewmates));
    }

    #[test]
    fn test_missing_winner_is_error() {
        let log = json!({
            "summary": {
                "Player 1": { "name": "Player 1: red", "identity": "Impostor", "model": "gpt" },
            },
        });
        assert!(matches!(parse_game_log(&log), Err(GameLogError::NoWinner(_))));
    }

    #[test]
    fn test_unknown_identity_is_error() {
        let log = json!({
            "summary": {
                "winner": 1,
                "Player 1": { "name": "Player 1: red", "identity": "Ghost", "model": "gpt" },
            },
        });
        assert!(matches!(parse_game_log(&log), Err(GameLogError::UnknownIdentity { .. })));
    }

    #[test]
    fn test_missing_summary_is_error() {
        assert!(matches!(parse_game_log(&json!({})), Err(GameLogError::MissingSummary)));
    }

    #[test]
    fn test_narrow_player_name() {
        assert_eq!(narrow_player_name("Player 5: blue because sus"), "Player 5: blue");
        assert_eq!(narrow_player_name("Player 12: dark_green"), "Player 12: dark_green");
        assert_eq!(narrow_player_name("skip"), "skip");
        assert_eq!(narrow_player_name("Player X: red"), "Player X: red");
    }

    #[test]
    fn test_collect_and_read_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("game-2.json"), sample_log().to_string()).unwrap();
        std::fs::write(dir.path().join("game-1.json"), sample_log().to_string()).unwrap();
        std::fs::write(dir.path().join("notes.txt"), "not a log").unwrap();

        let paths = collect_log_paths(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = paths.iter().map(|p| p.file_name().unwrap().to_str().unwrap().to_string()).collect();
        assert_eq!(names, vec!["game-1.json", "game-2.json"]);

        let log = read_game_log(&paths[0]).unwrap();
        assert_eq!(log.outcome.players.len(), 4);
    }

    #[test]
    fn test_read_invalid_json_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(read_game_log(&path), Err(GameLogError::Json { .. })));
    }

    #[test]
    fn test_numeric_winner_is_not_checked_against_survivors() {
        let log = json!({
            "summary": {
                "winner": 1,
                "Player 1": { "name": "Player 1: red", "identity": "Impostor", "model": "gpt" },
                "Player 2": { "name": "Player 2: blue", "identity": "Crewmate", "model": "claude" },
                "Player 3": { "name": "Player 3: green", "identity": "Crewmate", "model": "llama" },
            },
            "agent_logs": [
                turn("Player 2: blue", "claude", 4, "VOTE Player 1: red"),
                turn("Player 3: green", "llama", 4, "VOTE Player 1: red"),
            ],
        });
        let log = parse_game_log(&log).unwrap();
        assert_eq!(log.outcome.winner, Team::Impostors);
        assert_eq!(log.final_impostor_count(), 0);
        assert!(log.warnings.is_empty(), "unexpected warnings: {:?}", log.warnings);
    }

    #[test]
    fn test_task_win_warns_untracked() {
        let mut log = sample_log();
        log["summary"]["winner_reason"] = json!("Crewmates win! (All task completed)");
        let log = parse_game_log(&log).unwrap();
        assert_eq!(log.outcome.winner, Team::Crewmates);
        assert_eq!(log.warnings.len(), 1);
        assert!(log.warnings[0].contains("tasks were completed"));
    }

    #[test]
    fn test_enrich_writes_enhanced_summary() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("game.json");
        let output = dir.path().join("game-enriched.json");
        let original = sample_log().to_string();
        std::fs::write(&input, &original).unwrap();

        enrich_game_log(&input, Some(&output)).unwrap();

        assert_eq!(std::fs::read_to_string(&input).unwrap(), original);
        let written: Value = serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
        let summary = &written["summary"];

        assert_eq!(summary["Player 1"]["model"], "gpt");
        assert_eq!(summary["winner"], 2);
        assert_eq!(written["agent_logs"].as_array().unwrap().len(), 4);

        let meeting = &summary["voting_history"][0];
        assert_eq!(meeting["meeting_number"], 1);
        assert_eq!(meeting["timestep"], 5);
        assert_eq!(meeting["vote_tally"]["Player 1: red"], 2);
        assert_eq!(meeting["eliminated"], "Player 1: red");
        assert_eq!(meeting["votes"][0]["timestep"], 5);

        assert_eq!(summary["kill_history"][0]["victim"], "Player 4: pink");
        assert_eq!(summary["kill_history"][0]["location"], "Cafeteria");

        let outcome = &summary["game_outcome"];
        assert_eq!(outcome["winner"], 2);
        assert_eq!(outcome["reason"], "Crewmates win! (Impostors eliminated)");
        assert_eq!(outcome["surviving_players"], json!(["Player 2: blue", "Player 3: green"]));
        assert_eq!(outcome["eliminated_players"], json!(["Player 1: red", "Player 4: pink"]));
        assert_eq!(outcome["final_impostor_count"], 0);
        assert_eq!(outcome["final_crewmate_count"], 2);

        // An enriched log still reads as the same game.
        let reread = read_game_log(&output).unwrap();
        assert_eq!(reread.outcome.players.len(), 4);
        assert_eq!(reread.voting_history.len(), 1);
    }

    #[test]
    fn test_enrich_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, sample_log().to_string()).unwrap();

        let log = enrich_game_log(&path, None).unwrap();
        assert_eq!(log.kill_history.len(), 1);

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["summary"]["game_outcome"]["final_crewmate_count"], 2);
    }

    #[test]
    fn test_standings_skip_unreadable_logs() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a-good.json"), sample_log().to_string()).unwrap();
        std::fs::write(dir.path().join("b-broken.json"), "{ truncated").unwrap();

        let paths = collect_log_paths(&[dir.path().to_path_buf()]).unwrap();
        let (standings, skipped) = standings_from_logs(&paths).unwrap();
        assert_eq!(skipped, 1);
        assert_eq!(standings.games_recorded(), 1);
        assert_eq!(standings.record("gpt").unwrap().impostor_games, 1);
    }

    #[test]
    fn test_standings_fail_when_no_log_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("a.json"), "not json").unwrap();
        std::fs::write(dir.path().join("b.json"), r#"{"summary": {}}"#).unwrap();

        let paths = collect_log_paths(&[dir.path().to_path_buf()]).unwrap();
        assert!(matches!(standings_from_logs(&paths), Err(GameLogError::NoReadableLogs(2))));
    }
}

/// Output formatting: terminal table and JSON.
use std::fmt::Write;

use leaderboard_core::{Metric, RankedEntry, Role, Standings, TieStrategy};
use serde::{Serialize, Serializer};

use crate::bail;
use crate::gamelog::GameLog;

/// Per-model tallies shown next to standings scores.
#[derive(Clone, Copy)]
pub struct Tallies<'a> {
    pub standings: &'a Standings,
    pub metric: Metric,
}

#[derive(Serialize)]
struct JsonEntry<'a> {
    rank: usize,
    id: &'a str,
    #[serde(serialize_with = "serialize_score")]
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    wins: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    games: Option<usize>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    entries: Vec<JsonEntry<'a>>,
    tie_strategy: TieStrategy,
    #[serde(skip_serializing_if = "Option::is_none")]
    metric: Option<Metric>,
    total: usize,
}

/// JSON has no infinity; write non-finite scores as "inf" / "-inf" instead of null.
fn serialize_score<S: Serializer>(score: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if score.is_finite() {
        serializer.serialize_f64(*score)
    } else if score.is_nan() {
        serializer.serialize_str("nan")
    } else if *score > 0.0 {
        serializer.serialize_str("inf")
    } else {
        serializer.serialize_str("-inf")
    }
}

fn metric_label(metric: Metric) -> &'static str {
    match metric {
        Metric::WinRate => "Win rate",
        Metric::ImpostorWinRate => "Impostor win rate",
        Metric::CrewmateWinRate => "Crewmate win rate",
    }
}

/// Render ranked entries as a terminal table.
pub fn format_table(entries: &[RankedEntry], tallies: Option<Tallies>) -> String {
    let mut out = String::new();

    // Find the widest id for padding
    let id_width = entries
        .iter()
        .map(|e| e.id.chars().count())
        .max()
        .unwrap_or(0)
        .max(11); // at least "Participant"

    match tallies {
        None => {
            let _ = writeln!(out, "  # | {:<id_width$} |      Score", "Participant");
            let _ = writeln!(out, "----|-{}-|-----------", "-".repeat(id_width));
            for e in entries {
                let _ = writeln!(out, "{:>3} | {:<id_width$} | {:>10.4}", e.rank, e.id, e.score);
            }
        }
        Some(t) => {
            let _ = writeln!(out, "  # | {:<id_width$} | Win rate |  Wins | Games", "Model");
            let _ = writeln!(out, "----|-{}-|----------|-------|------", "-".repeat(id_width));
            for e in entries {
                let record = t.standings.record(&e.id).copied().unwrap_or_default();
                let _ = writeln!(
                    out,
                    "{:>3} | {:<id_width$} | {:>7.1}% | {:>5} | {:>5}",
                    e.rank,
                    e.id,
                    e.score * 100.0,
                    record.wins(t.metric),
                    record.games(t.metric),
                );
            }
        }
    }

    let _ = write!(out, "\n{} ranked", entries.len());
    if let Some(t) = tallies {
        let _ = write!(
            out,
            " by {} across {} games",
            metric_label(t.metric).to_lowercase(),
            t.standings.games_recorded(),
        );
    }
    let _ = writeln!(out);
    out
}

pub fn print_table(entries: &[RankedEntry], tallies: Option<Tallies>) {
    print!("{}", format_table(entries, tallies));
}

/// Render ranked entries as pretty JSON.
pub fn format_json(entries: &[RankedEntry], tie_strategy: TieStrategy, tallies: Option<Tallies>) -> String {
    let json_entries: Vec<JsonEntry> = entries
        .iter()
        .map(|e| {
            let record = tallies.and_then(|t| t.standings.record(&e.id).map(|r| (r, t.metric)));
            JsonEntry {
                rank: e.rank,
                id: &e.id,
                score: e.score,
                wins: record.map(|(r, m)| r.wins(m)),
                games: record.map(|(r, m)| r.games(m)),
            }
        })
        .collect();

    let output = JsonOutput {
        entries: json_entries,
        tie_strategy,
        metric: tallies.map(|t| t.metric),
        total: entries.len(),
    };

    serde_json::to_string_pretty(&output).unwrap_or_else(|e| bail(format!("Failed to serialize output: {e}")))
}

pub fn print_json(entries: &[RankedEntry], tie_strategy: TieStrategy, tallies: Option<Tallies>) {
    println!("{}", format_json(entries, tie_strategy, tallies));
}

/// Print the structured contents of one game log.
pub fn print_game_log(log: &GameLog, json: bool) {
    if json {
        let text = serde_json::to_string_pretty(log)
            .unwrap_or_else(|e| bail(format!("Failed to serialize game log: {e}")));
        println!("{text}");
        return;
    }

    println!("Winner: {:?} ({})", log.outcome.winner, log.reason);
    println!("\nPlayers:");
    for p in &log.outcome.players {
        let status = if log.surviving_players.contains(&p.name) { "survived" } else { "eliminated" };
        let role = match p.role {
            Role::Impostor => "Impostor",
            Role::Crewmate => "Crewmate",
        };
        println!("  {:<20} {:<9} {:<10} {}", p.name, role, status, p.model);
    }

    println!("\nMeetings: {}", log.voting_history.len());
    for round in &log.voting_history {
        let ejected = round.eliminated.as_deref().unwrap_or("no one (tie)");
        println!("  #{} (step {}): ejected {}", round.meeting_number, step_label(round.timestep), ejected);
        for (target, count) in &round.tally {
            println!("      {count} × {target}");
        }
    }

    println!("\nKills: {}", log.kill_history.len());
    for kill in &log.kill_history {
        println!(
            "  step {}: {} killed {} in {}",
            step_label(kill.timestep),
            kill.killer,
            kill.victim,
            kill.location,
        );
    }

    if !log.warnings.is_empty() {
        println!("\nWarnings:");
        for w in &log.warnings {
            println!("  - {w}");
        }
    }
}

fn step_label(step: Option<i64>) -> String {
    step.map(|s| s.to_string()).unwrap_or_else(|| "?".to_string())
}

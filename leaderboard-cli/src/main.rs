mod config;
mod gamelog;
mod logging;
mod output;
mod parse;

use clap::Parser;
use leaderboard_core::{Metric, Participant, RankedEntry, RankingCalculator, TieStrategy};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::config::LeaderboardConfig;
use crate::output::Tallies;

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "leaderboard", version, about = "Rank models by score or by social-deduction game results")]
struct Cli {
    /// Show progress during execution
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (default: ~/.config/leaderboard/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Rank a list of participant scores
    Rank(RankArgs),
    /// Rank models by win rate across a set of game logs
    Standings(StandingsArgs),
    /// Show the players, meetings, kills and outcome of one game log
    Inspect(InspectArgs),
    /// Add voting history, kill history and outcome to a game log's summary
    Enrich(EnrichArgs),
    /// Create a default config file at ~/.config/leaderboard/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// File with one "<id> <score>" per line, or a JSON array of {"id", "score"}
    #[arg(long)]
    scores: Option<PathBuf>,

    /// Inline participant as ID=SCORE (repeatable)
    #[arg(long = "entry")]
    entries: Vec<String>,

    /// Tie handling: "competition" (1,1,3) or "dense" (1,1,2)
    #[arg(long)]
    ties: Option<String>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct StandingsArgs {
    /// Game log files, or directories of *.json game logs
    #[arg(long, required = true, num_args = 1..)]
    logs: Vec<PathBuf>,

    /// Score to rank by: "win-rate", "impostor" (deception) or "crewmate" (detection)
    #[arg(long)]
    metric: Option<String>,

    /// Leave out models with fewer games than this in the chosen metric
    #[arg(long)]
    min_games: Option<usize>,

    /// Tie handling: "competition" (1,1,3) or "dense" (1,1,2)
    #[arg(long)]
    ties: Option<String>,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct InspectArgs {
    /// Game log file
    log: PathBuf,

    /// Output JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct EnrichArgs {
    /// Game log file
    log: PathBuf,

    /// Write the enriched log here instead of overwriting the input
    #[arg(long)]
    output: Option<PathBuf>,
}

fn resolve_ties(arg: Option<&str>, cfg: Option<TieStrategy>) -> TieStrategy {
    match arg {
        Some("competition") => TieStrategy::Competition,
        Some("dense") => TieStrategy::Dense,
        Some(other) => bail(format!("Unknown tie strategy \"{other}\". Use \"competition\" or \"dense\".")),
        None => cfg.unwrap_or_default(),
    }
}

fn resolve_metric(arg: Option<&str>, cfg: Option<Metric>) -> Metric {
    match arg {
        Some("win-rate") => Metric::WinRate,
        Some("impostor") | Some("impostor-win-rate") => Metric::ImpostorWinRate,
        Some("crewmate") | Some("crewmate-win-rate") => Metric::CrewmateWinRate,
        Some(other) => bail(format!(
            "Unknown metric \"{other}\". Use \"win-rate\", \"impostor\" or \"crewmate\"."
        )),
        None => cfg.unwrap_or_default(),
    }
}

/// Load participants from all sources: --scores file, --entry inline args, or stdin.
fn load_participants(args: &RankArgs) -> Vec<Participant> {
    let mut participants = Vec::new();

    if let Some(ref path) = args.scores {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read scores file {}: {e}", path.display())));
        participants = parse::parse_scores(&content)
            .unwrap_or_else(|e| bail(format!("{}: {e}", path.display())));
    }

    for entry in &args.entries {
        participants.push(parse::parse_entry(entry).unwrap_or_else(|e| bail(e)));
    }

    // From stdin (only if no file and no inline entries)
    if args.scores.is_none() && args.entries.is_empty() {
        let mut stdin = io::stdin();
        if stdin.is_terminal() {
            bail("No scores provided. Use --scores <file>, --entry ID=SCORE, or pipe scores via stdin.");
        }
        let mut content = String::new();
        stdin
            .read_to_string(&mut content)
            .unwrap_or_else(|e| bail(format!("Failed to read from stdin: {e}")));
        participants = parse::parse_scores(&content).unwrap_or_else(|e| bail(format!("stdin: {e}")));
    }

    participants
}

fn rank_or_bail(participants: &[Participant], ties: TieStrategy) -> Vec<RankedEntry> {
    RankingCalculator::new(ties)
        .rank(participants)
        .unwrap_or_else(|e| bail(e))
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);

    match cli.command {
        Commands::Rank(args) => run_rank(args, &config::load_config(&config_path)),
        Commands::Standings(args) => run_standings(args, &config::load_config(&config_path)),
        Commands::Inspect(args) => run_inspect(args),
        Commands::Enrich(args) => run_enrich(args),
        Commands::Init => {
            config::create_default_config(&config_path);
            println!("Created config at {}", config_path.display());
            println!("Edit it to set your default tie strategy, metric, etc.");
        }
    }
}

fn run_rank(args: RankArgs, cfg: &LeaderboardConfig) {
    let ties = resolve_ties(args.ties.as_deref(), cfg.ties);
    let json = args.json || cfg.json.unwrap_or(false);

    let participants = load_participants(&args);
    debug!(participants = participants.len(), ?ties, "ranking scores");

    let ranked = rank_or_bail(&participants, ties);

    if json {
        output::print_json(&ranked, ties, None);
    } else {
        output::print_table(&ranked, None);
    }
}

fn run_standings(args: StandingsArgs, cfg: &LeaderboardConfig) {
    let ties = resolve_ties(args.ties.as_deref(), cfg.ties);
    let metric = resolve_metric(args.metric.as_deref(), cfg.metric);
    let min_games = args.min_games.or(cfg.min_games).unwrap_or(1);
    let json = args.json || cfg.json.unwrap_or(false);

    let paths = gamelog::collect_log_paths(&args.logs).unwrap_or_else(|e| bail(e));
    debug!(files = paths.len(), "reading game logs");

    let (standings, skipped) = gamelog::standings_from_logs(&paths).unwrap_or_else(|e| bail(e));
    debug!(games = standings.games_recorded(), skipped, ?metric, min_games, "computing standings");

    let participants = standings.participants(metric, min_games);
    let ranked = rank_or_bail(&participants, ties);
    let tallies = Tallies { standings: &standings, metric };

    if json {
        output::print_json(&ranked, ties, Some(tallies));
    } else {
        output::print_table(&ranked, Some(tallies));
    }
}

fn run_inspect(args: InspectArgs) {
    let log = gamelog::read_game_log(&args.log).unwrap_or_else(|e| bail(e));
    for warning in &log.warnings {
        warn!(log = %args.log.display(), "inconsistent game outcome: {warning}");
    }
    output::print_game_log(&log, args.json);
}

fn run_enrich(args: EnrichArgs) {
    let log = gamelog::enrich_game_log(&args.log, args.output.as_deref()).unwrap_or_else(|e| bail(e));
    for warning in &log.warnings {
        warn!(log = %args.log.display(), "inconsistent game outcome: {warning}");
    }
    let written = args.output.as_ref().unwrap_or(&args.log);
    println!("Updated game log: {}", written.display());
    println!(
        "  {} voting round(s), {} kill(s), {} survivor(s)",
        log.voting_history.len(),
        log.kill_history.len(),
        log.surviving_players.len(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_tie_and_metric_resolution() {
        assert_eq!(resolve_ties(None, None), TieStrategy::Competition);
        assert_eq!(resolve_ties(None, Some(TieStrategy::Dense)), TieStrategy::Dense);
        assert_eq!(resolve_ties(Some("competition"), Some(TieStrategy::Dense)), TieStrategy::Competition);
        assert_eq!(resolve_metric(Some("impostor"), None), Metric::ImpostorWinRate);
        assert_eq!(resolve_metric(None, Some(Metric::CrewmateWinRate)), Metric::CrewmateWinRate);
        assert_eq!(resolve_metric(None, None), Metric::WinRate);
    }

    #[test]
    fn test_parse_rank_args() {
        let cli = Cli::try_parse_from(["leaderboard", "rank", "--entry", "A=100", "--entry", "B=100", "--ties", "dense", "-v"]).unwrap();
        assert!(cli.verbose);
        let Commands::Rank(args) = cli.command else {
            panic!("expected rank subcommand");
        };
        assert_eq!(args.entries, vec!["A=100", "B=100"]);
        assert_eq!(args.ties.as_deref(), Some("dense"));

        let participants = load_participants(&args);
        let ranked = rank_or_bail(&participants, resolve_ties(args.ties.as_deref(), None));
        assert!(ranked.iter().all(|e| e.rank == 1));
    }

    #[test]
    fn test_parse_enrich_args() {
        let cli = Cli::try_parse_from(["leaderboard", "enrich", "game.json", "--output", "out.json"]).unwrap();
        let Commands::Enrich(args) = cli.command else {
            panic!("expected enrich subcommand");
        };
        assert_eq!(args.log, PathBuf::from("game.json"));
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
    }

    #[test]
    fn test_standings_requires_logs() {
        assert!(Cli::try_parse_from(["leaderboard", "standings"]).is_err());
    }
}

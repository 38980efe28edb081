/// leaderboard-core: Pure-computation leaderboard ranking.
///
/// Scores → tie-aware ranks. Finished games → per-model win rates → scores.
/// No IO, no filesystem, no logging — the CLI owns all of that.
///
/// Participants are identified by caller-provided string ids.
///
/// # Quick start
///
/// ```rust
/// use leaderboard_core::{rank_participants, Participant, TieStrategy};
///
/// let participants = vec![
///     Participant::new("openai/gpt-4o", 0.62),
///     Participant::new("anthropic/claude-3.5-sonnet", 0.62),
///     Participant::new("meta-llama/llama-3.3-70b-instruct", 0.41),
/// ];
///
/// let ranked = rank_participants(&participants, TieStrategy::Competition).unwrap();
///
/// for e in &ranked {
///     println!("{:>2}. {} ({:.2})", e.rank, e.id, e.score);
/// }
/// assert_eq!(ranked[2].rank, 3);
/// ```

pub mod error;
pub mod ranking;
pub mod standings;
pub mod types;

// Re-export primary public API at crate root.
pub use error::{RankingError, Result};
pub use ranking::{rank_participants, RankingCalculator};
pub use standings::{ModelRecord, Standings};
pub use types::{GameOutcome, Metric, Participant, PlayerRecord, RankedEntry, Role, Team, TieStrategy};

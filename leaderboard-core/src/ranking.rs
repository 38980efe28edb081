/// Score → rank conversion with tie handling.
///
/// Pure function, no IO, no state. Inputs are never mutated.
use std::cmp::Ordering;
use std::collections::HashSet;

use crate::error::{RankingError, Result};
use crate::types::{Participant, RankedEntry, TieStrategy};

/// Ranks participants under a fixed tie policy.
///
/// ```rust
/// use leaderboard_core::{Participant, RankingCalculator, TieStrategy};
///
/// let calc = RankingCalculator::new(TieStrategy::Competition);
/// let ranked = calc.rank(&[
///     Participant::new("a", 100.0),
///     Participant::new("b", 100.0),
///     Participant::new("c", 40.0),
/// ]).unwrap();
///
/// assert_eq!(ranked[0].rank, 1);
/// assert_eq!(ranked[1].rank, 1);
/// assert_eq!(ranked[2].rank, 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingCalculator {
    pub tie_strategy: TieStrategy,
}

impl RankingCalculator {
    pub fn new(tie_strategy: TieStrategy) -> Self {
        RankingCalculator { tie_strategy }
    }

    pub fn rank(&self, participants: &[Participant]) -> Result<Vec<RankedEntry>> {
        rank_participants(participants, self.tie_strategy)
    }
}

/// Assign ranks to `participants`, best score first.
///
/// The output has one entry per input participant, ordered by descending
/// score. Equal scores share a rank; within a tie group entries are ordered by
/// ascending id, so the output depends only on the input multiset.
///
/// Fails with `InvalidInput` if any score is NaN, and with
/// `DuplicateParticipant` if an id appears twice. Nothing is ranked on failure.
pub fn rank_participants(
    participants: &[Participant],
    tie_strategy: TieStrategy,
) -> Result<Vec<RankedEntry>> {
    validate(participants)?;

    let mut order: Vec<&Participant> = participants.iter().collect();
    // partial_cmp is total here (no NaN), and keeps -0.0 == 0.0 in one group.
    order.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut entries = Vec::with_capacity(order.len());
    let mut rank = 0;
    let mut group_score: Option<f64> = None;

    for (position, p) in order.into_iter().enumerate() {
        if group_score != Some(p.score) {
            rank = match tie_strategy {
                TieStrategy::Competition => position + 1,
                TieStrategy::Dense => rank + 1,
            };
            group_score = Some(p.score);
        }
        entries.push(RankedEntry {
            id: p.id.clone(),
            score: p.score,
            rank,
        });
    }

    Ok(entries)
}

fn validate(participants: &[Participant]) -> Result<()> {
    let mut seen = HashSet::with_capacity(participants.len());
    for p in participants {
        if p.score.is_nan() {
            return Err(RankingError::InvalidInput {
                id: p.id.clone(),
                reason: "score is NaN".to_string(),
            });
        }
        if !seen.insert(p.id.as_str()) {
            return Err(RankingError::DuplicateParticipant(p.id.clone()));
        }
    }
    Ok(())
}

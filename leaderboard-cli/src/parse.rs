/// Score list parsing: JSON array or plain text, one participant per line.
use leaderboard_core::Participant;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScoreParseError {
    #[error("input looks like JSON but failed to parse: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: expected \"<id> <score>\", got \"{text}\"")]
    MissingScore { line: usize, text: String },

    #[error("line {line}: invalid score \"{score}\"")]
    InvalidScore { line: usize, score: String },

    #[error("invalid --entry \"{0}\": expected ID=SCORE")]
    InvalidEntry(String),
}

/// Parse a whole score file.
///
/// Content starting with `[{` or `[]` is read as a JSON array of `{"id": ..., "score": ...}`.
/// Anything else is plain text: the last whitespace-separated field of each line
/// is the score, the rest is the id. Blank lines and `#` comments are skipped.
pub fn parse_scores(content: &str) -> Result<Vec<Participant>, ScoreParseError> {
    let trimmed = content.trim();
    if looks_like_json_array(trimmed) {
        return Ok(serde_json::from_str(trimmed)?);
    }

    let mut participants = Vec::new();
    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (id, score) = line
            .rsplit_once(char::is_whitespace)
            .ok_or_else(|| ScoreParseError::MissingScore { line: i + 1, text: line.to_string() })?;
        let score: f64 = score
            .parse()
            .map_err(|_| ScoreParseError::InvalidScore { line: i + 1, score: score.to_string() })?;
        participants.push(Participant::new(id.trim(), score));
    }
    Ok(participants)
}

/// A plain-text id may start with `[` ("[bot] 5"), so require an object or `]` next.
fn looks_like_json_array(trimmed: &str) -> bool {
    trimmed
        .strip_prefix('[')
        .map(|rest| rest.trim_start().starts_with(|c| c == '{' || c == ']'))
        .unwrap_or(false)
}

/// Parse an inline `--entry ID=SCORE` value. The id may itself contain `=`.
pub fn parse_entry(value: &str) -> Result<Participant, ScoreParseError> {
    let (id, score) = value
        .rsplit_once('=')
        .ok_or_else(|| ScoreParseError::InvalidEntry(value.to_string()))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(ScoreParseError::InvalidEntry(value.to_string()));
    }
    let score: f64 = score
        .trim()
        .parse()
        .map_err(|_| ScoreParseError::InvalidEntry(value.to_string()))?;
    Ok(Participant::new(id, score))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_scores() {
        let content = "# model scores\nopenai/gpt-4o 0.75\n\nanthropic/claude-3.5-sonnet\t0.5\n";
        let parsed = parse_scores(content).unwrap();
        assert_eq!(
            parsed,
            vec![
                Participant::new("openai/gpt-4o", 0.75),
                Participant::new("anthropic/claude-3.5-sonnet", 0.5),
            ]
        );
    }

    #[test]
    fn test_ids_with_spaces_keep_everything_before_score() {
        let parsed = parse_scores("Team Red Alpha   12\n").unwrap();
        assert_eq!(parsed, vec![Participant::new("Team Red Alpha", 12.0)]);
    }

    #[test]
    fn test_json_scores() {
        let content = r#"[{"id": "A", "score": 100}, {"id": "B", "score": 99.5}]"#;
        let parsed = parse_scores(content).unwrap();
        assert_eq!(parsed, vec![Participant::new("A", 100.0), Participant::new("B", 99.5)]);
    }

    #[test]
    fn test_bad_json_is_error() {
        assert!(matches!(parse_scores("[{\"id\": 1}]"), Err(ScoreParseError::Json(_))));
    }

    #[test]
    fn test_bracketed_plain_text_id() {
        let parsed = parse_scores("[bot] 5\n[human] player 3\n").unwrap();
        assert_eq!(
            parsed,
            vec![Participant::new("[bot]", 5.0), Participant::new("[human] player", 3.0)]
        );
    }

    #[test]
    fn test_empty_json_array() {
        assert!(parse_scores(" [ ] ").unwrap().is_empty());
    }

    #[test]
    fn test_line_without_score() {
        let err = parse_scores("A 1\nlonely\n").unwrap_err();
        assert!(matches!(err, ScoreParseError::MissingScore { line: 2, .. }));
    }

    #[test]
    fn test_non_numeric_score() {
        let err = parse_scores("A high\n").unwrap_err();
        assert!(matches!(err, ScoreParseError::InvalidScore { line: 1, .. }));
    }

    #[test]
    fn test_nan_parses_and_is_left_to_the_ranker() {
        let parsed = parse_scores("A NaN\n").unwrap();
        assert!(parsed[0].score.is_nan());
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_scores("").unwrap().is_empty());
    }

    #[test]
    fn test_inline_entry() {
        assert_eq!(parse_entry("A=50").unwrap(), Participant::new("A", 50.0));
        assert_eq!(parse_entry("x=y=2.5").unwrap(), Participant::new("x=y", 2.5));
        assert!(parse_entry("A").is_err());
        assert!(parse_entry("=3").is_err());
        assert!(parse_entry("A=lots").is_err());
    }
}

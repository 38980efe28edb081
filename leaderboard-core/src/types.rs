/// A participant to be ranked: an opaque identifier and its score.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    /// Caller-provided identifier, unique within a ranking run.
    pub id: String,
    /// Higher is better. NaN is rejected at ranking time.
    pub score: f64,
}

impl Participant {
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Participant { id: id.into(), score }
    }
}

/// A participant with its assigned rank (1 = best).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RankedEntry {
    pub id: String,
    pub score: f64,
    pub rank: usize,
}

/// How ranks continue after a group of tied scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum TieStrategy {
    /// Standard competition ranking ("1224"): the rank after a tie group
    /// skips by the size of the group.
    #[default]
    Competition,
    /// Dense ranking ("1223"): the rank after a tie group is one more than
    /// the group's rank.
    Dense,
}

/// Which side a player was on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Impostor,
    Crewmate,
}

/// The winning side of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Team {
    Impostors,
    Crewmates,
}

impl Role {
    pub fn team(self) -> Team {
        match self {
            Role::Impostor => Team::Impostors,
            Role::Crewmate => Team::Crewmates,
        }
    }
}

/// One seat in a game: who sat there, which model drove it, and its role.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerRecord {
    /// In-game name, e.g. "Player 3: red".
    pub name: String,
    /// Model identifier, e.g. "openai/gpt-4o".
    pub model: String,
    pub role: Role,
}

/// Result of a single finished game.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameOutcome {
    pub players: Vec<PlayerRecord>,
    pub winner: Team,
}

/// Which games a standings score is computed over.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum Metric {
    /// Win rate across every game played, in either role.
    #[default]
    WinRate,
    /// Win rate as Impostor: how well the model deceives.
    ImpostorWinRate,
    /// Win rate as Crewmate: how well the model sees through deception.
    CrewmateWinRate,
}

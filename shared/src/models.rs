use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of teams. Anything else on the wire is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Team {
    Pradhan,
    Banrakas,
}

impl Team {
    pub const ALL: [Team; 2] = [Team::Pradhan, Team::Banrakas];

    pub fn as_str(&self) -> &'static str {
        match self {
            Team::Pradhan => "pradhan",
            Team::Banrakas => "banrakas",
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown team: {0}")]
pub struct UnknownTeam(pub String);

impl FromStr for Team {
    type Err = UnknownTeam;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pradhan" => Ok(Team::Pradhan),
            "banrakas" => Ok(Team::Banrakas),
            other => Err(UnknownTeam(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
}

impl VoteRequest {
    pub fn query_only() -> Self {
        Self { team: None }
    }

    pub fn for_team(team: Team) -> Self {
        Self {
            team: Some(team.as_str().to_string()),
        }
    }

    /// The polling client sends `{"team": ""}`, so an empty string counts as
    /// "no team" the same way an absent field does.
    pub fn team(&self) -> Result<Option<Team>, UnknownTeam> {
        match self.team.as_deref() {
            None | Some("") => Ok(None),
            Some(name) => name.parse().map(Some),
        }
    }
}

/// Point-in-time copy of both counters. Doubles as the HTTP response body and
/// the broadcast payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteSnapshot {
    pub pradhan: i64,
    pub banrakas: i64,
}

impl VoteSnapshot {
    pub fn count(&self, team: Team) -> i64 {
        match team {
            Team::Pradhan => self.pradhan,
            Team::Banrakas => self.banrakas,
        }
    }

    pub fn total(&self) -> i64 {
        self.pradhan + self.banrakas
    }
}

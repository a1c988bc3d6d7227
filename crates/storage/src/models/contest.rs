use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Lifecycle of a contest. Evaluators may only score photos of `Open`
/// contests and the public ranking is only published for `Closed` ones.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContestStatus {
    #[default]
    Draft,
    Open,
    Closed,
}

impl ContestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Open => "open",
            Self::Closed => "closed",
        }
    }

    pub fn accepts_ratings(&self) -> bool {
        matches!(self, Self::Open)
    }

    pub fn publishes_ranking(&self) -> bool {
        matches!(self, Self::Closed)
    }
}

impl fmt::Display for ContestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContestStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(format!(
                "invalid contest status '{}', expected draft, open or closed",
                other
            )),
        }
    }
}

impl TryFrom<String> for ContestStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Contest {
    pub contest_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: ContestStatus,
    pub owner_id: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [ContestStatus::Draft, ContestStatus::Open, ContestStatus::Closed] {
            assert_eq!(status.as_str().parse::<ContestStatus>(), Ok(status));
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!("archived".parse::<ContestStatus>().is_err());
        assert!("Open".parse::<ContestStatus>().is_err());
    }

    #[test]
    fn test_only_open_contests_accept_ratings() {
        assert!(!ContestStatus::Draft.accepts_ratings());
        assert!(ContestStatus::Open.accepts_ratings());
        assert!(!ContestStatus::Closed.accepts_ratings());
    }

    #[test]
    fn test_only_closed_contests_publish_ranking() {
        assert!(!ContestStatus::Draft.publishes_ranking());
        assert!(!ContestStatus::Open.publishes_ranking());
        assert!(ContestStatus::Closed.publishes_ranking());
    }
}

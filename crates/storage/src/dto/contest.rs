use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Contest, ContestStatus};

/// Request payload for creating a new contest. Contests always start as drafts.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateContestRequest {
    #[validate(length(
        min = 1,
        max = 255,
        message = "Name must be between 1 and 255 characters"
    ))]
    pub name: String,

    #[validate(length(max = 2000))]
    pub description: Option<String>,

    #[validate(length(min = 1, max = 255))]
    pub owner_id: Option<String>,
}

/// Request payload for editing a contest's name or description
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateContestRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,

    #[validate(length(max = 2000))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateContestStatusRequest {
    pub status: ContestStatus,
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ContestListFilter {
    /// Only return contests in this state
    pub status: Option<ContestStatus>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AddVoterRequest {
    #[validate(
        length(min = 1, max = 255),
        custom(function = "validate_username")
    )]
    pub username: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContestResponse {
    pub contest_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub status: ContestStatus,
    pub owner_id: Option<String>,
    pub created_at: chrono::NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VotersResponse {
    pub contest_id: Uuid,
    pub voters: Vec<String>,
}

pub(crate) fn validate_username(username: &str) -> Result<(), validator::ValidationError> {
    if username.chars().any(char::is_whitespace) {
        return Err(validator::ValidationError::new("invalid_username"));
    }
    Ok(())
}

impl From<Contest> for ContestResponse {
    fn from(contest: Contest) -> Self {
        Self {
            contest_id: contest.contest_id,
            name: contest.name,
            description: contest.description,
            status: contest.status,
            owner_id: contest.owner_id,
            created_at: contest.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_requires_name() {
        let req = CreateContestRequest {
            name: String::new(),
            description: None,
            owner_id: None,
        };
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_voter_username_cannot_contain_spaces() {
        let ok = AddVoterRequest {
            username: "jurado1".to_string(),
        };
        let bad = AddVoterRequest {
            username: "jurado 1".to_string(),
        };
        assert!(ok.validate().is_ok());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_status_request_parses_lowercase() {
        let req: UpdateContestStatusRequest =
            serde_json::from_str(r#"{"status": "closed"}"#).unwrap();
        assert_eq!(req.status, ContestStatus::Closed);
        assert!(serde_json::from_str::<UpdateContestStatusRequest>(r#"{"status": "done"}"#).is_err());
    }
}

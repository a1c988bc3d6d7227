use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::dto::contest::validate_username;
use crate::models::{CriterionScores, MAX_SCORE, Rating};

/// One evaluator's scores for a photo. Submitting again for the same photo
/// replaces the earlier rating.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct SubmitRatingRequest {
    #[validate(
        length(min = 1, max = 255),
        custom(function = "validate_username")
    )]
    pub evaluator: String,

    #[validate(custom(function = "validate_scores"))]
    #[serde(default)]
    pub scores: CriterionScores,

    #[validate(length(max = 5000))]
    pub comments: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RatingResponse {
    pub rating: Rating,
    /// `true` when this was the evaluator's first rating of the photo
    pub created: bool,
}

fn validate_scores(scores: &CriterionScores) -> Result<(), validator::ValidationError> {
    for (criterion, score) in scores.iter() {
        if criterion.trim().is_empty() {
            return Err(validator::ValidationError::new("empty_criterion"));
        }
        if score.value() > MAX_SCORE {
            let mut error = validator::ValidationError::new("score_out_of_range");
            error.message = Some(format!("{} must be between 0 and {}", criterion, MAX_SCORE).into());
            return Err(error);
        }
    }
    Ok(())
}

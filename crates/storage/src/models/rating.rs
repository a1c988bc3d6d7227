use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

/// Highest score an evaluator can give a single criterion.
pub const MAX_SCORE: u32 = 10;

/// Integer score for one rubric criterion.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct Score(u32);

impl Score {
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> u32 {
        self.0
    }

    /// Reads a score the way legacy snapshots stored it: a JSON number or a
    /// numeric string such as `"7"`. Only the leading integer part is kept, so
    /// `"7.9"` and `7.9` both become 7.
    ///
    /// Returns `None` for anything that has no non-negative integer prefix
    /// that fits in a `u32`. Callers decide what a missing score means.
    pub fn from_legacy(value: &Value) -> Option<Self> {
        match value {
            Value::Number(number) => {
                if let Some(int) = number.as_u64() {
                    return u32::try_from(int).ok().map(Self);
                }
                let float = number.as_f64()?;
                if float.is_finite() && float >= 0.0 && float < f64::from(u32::MAX) {
                    Some(Self(float.trunc() as u32))
                } else {
                    None
                }
            }
            Value::String(text) => parse_leading_integer(text),
            _ => None,
        }
    }
}

impl From<u32> for Score {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

fn parse_leading_integer(text: &str) -> Option<Score> {
    let trimmed = text.trim_start();
    let digits = trimmed.strip_prefix('+').unwrap_or(trimmed);
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());

    if end == 0 {
        return None;
    }

    digits[..end].parse::<u32>().ok().map(Score)
}

/// Scores given by one evaluator, keyed by criterion name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CriterionScores(BTreeMap<String, Score>);

impl CriterionScores {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, criterion: impl Into<String>, score: Score) -> Option<Score> {
        self.0.insert(criterion.into(), score)
    }

    pub fn get(&self, criterion: &str) -> Option<Score> {
        self.0.get(criterion).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Score)> {
        self.0.iter().map(|(criterion, score)| (criterion.as_str(), *score))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn total(&self) -> u64 {
        self.0.values().map(|score| u64::from(score.value())).sum()
    }
}

impl<K: Into<String>> FromIterator<(K, Score)> for CriterionScores {
    fn from_iter<I: IntoIterator<Item = (K, Score)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(criterion, score)| (criterion.into(), score))
                .collect(),
        )
    }
}

/// One evaluator's scoring of one photo.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Rating {
    pub rating_id: Uuid,
    pub photo_id: Uuid,
    pub evaluator: String,
    #[sqlx(json)]
    pub scores: CriterionScores,
    pub comments: Option<String>,
    pub created_at: chrono::NaiveDateTime,
    pub updated_at: chrono::NaiveDateTime,
}

impl Rating {
    pub fn new(
        photo_id: Uuid,
        evaluator: impl Into<String>,
        scores: CriterionScores,
        comments: Option<String>,
    ) -> Self {
        let now = chrono::Utc::now().naive_utc();
        Self {
            rating_id: Uuid::new_v4(),
            photo_id,
            evaluator: evaluator.into(),
            scores,
            comments,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    Replaced,
}

/// Records `rating` in `ratings`, keeping at most one rating per evaluator.
///
/// An existing rating from the same evaluator is replaced at its current
/// index so the list keeps its submission order; otherwise the rating is
/// appended. The replaced rating keeps its original `created_at`.
pub fn upsert_rating(ratings: &mut Vec<Rating>, mut rating: Rating) -> UpsertOutcome {
    match ratings
        .iter_mut()
        .find(|existing| existing.evaluator == rating.evaluator)
    {
        Some(existing) => {
            rating.created_at = existing.created_at;
            *existing = rating;
            UpsertOutcome::Replaced
        }
        None => {
            ratings.push(rating);
            UpsertOutcome::Inserted
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn scores(pairs: &[(&str, u32)]) -> CriterionScores {
        pairs
            .iter()
            .map(|(criterion, value)| (*criterion, Score::new(*value)))
            .collect()
    }

    #[test]
    fn test_legacy_numeric_strings() {
        assert_eq!(Score::from_legacy(&json!("7")), Some(Score::new(7)));
        assert_eq!(Score::from_legacy(&json!(" 8")), Some(Score::new(8)));
        assert_eq!(Score::from_legacy(&json!("7.9")), Some(Score::new(7)));
        assert_eq!(Score::from_legacy(&json!("9abc")), Some(Score::new(9)));
    }

    #[test]
    fn test_legacy_numbers_are_truncated() {
        assert_eq!(Score::from_legacy(&json!(10)), Some(Score::new(10)));
        assert_eq!(Score::from_legacy(&json!(7.9)), Some(Score::new(7)));
        assert_eq!(Score::from_legacy(&json!(0.4)), Some(Score::new(0)));
    }

    #[test]
    fn test_legacy_garbage_has_no_score() {
        assert_eq!(Score::from_legacy(&json!("abc")), None);
        assert_eq!(Score::from_legacy(&json!("")), None);
        assert_eq!(Score::from_legacy(&json!("-3")), None);
        assert_eq!(Score::from_legacy(&json!(-3)), None);
        assert_eq!(Score::from_legacy(&json!(null)), None);
        assert_eq!(Score::from_legacy(&json!(true)), None);
        assert_eq!(Score::from_legacy(&json!({"value": 3})), None);
    }

    #[test]
    fn test_criterion_scores_total() {
        let scores = scores(&[("composition", 8), ("creativity", 6)]);
        assert_eq!(scores.len(), 2);
        assert_eq!(scores.total(), 14);
        assert_eq!(scores.get("creativity"), Some(Score::new(6)));
        assert!(CriterionScores::new().is_empty());
        assert_eq!(CriterionScores::new().total(), 0);
    }

    #[test]
    fn test_criterion_scores_serialize_as_plain_map() {
        let value = serde_json::to_value(scores(&[("a", 3)])).unwrap();
        assert_eq!(value, json!({"a": 3}));

        let parsed: CriterionScores = serde_json::from_value(json!({"b": 4})).unwrap();
        assert_eq!(parsed.get("b"), Some(Score::new(4)));
    }

    #[test]
    fn test_criterion_scores_reject_non_integer_values() {
        assert!(serde_json::from_value::<CriterionScores>(json!({"a": "7"})).is_err());
        assert!(serde_json::from_value::<CriterionScores>(json!({"a": -1})).is_err());
        assert!(serde_json::from_value::<CriterionScores>(json!({"a": 2.5})).is_err());
    }

    #[test]
    fn test_upsert_appends_new_evaluator() {
        let photo_id = Uuid::new_v4();
        let mut ratings = vec![Rating::new(photo_id, "ana", scores(&[("a", 5)]), None)];

        let outcome = upsert_rating(
            &mut ratings,
            Rating::new(photo_id, "bruno", scores(&[("a", 7)]), None),
        );

        assert_eq!(outcome, UpsertOutcome::Inserted);
        let evaluators: Vec<&str> = ratings.iter().map(|r| r.evaluator.as_str()).collect();
        assert_eq!(evaluators, vec!["ana", "bruno"]);
    }

    #[test]
    fn test_upsert_replaces_in_place() {
        let photo_id = Uuid::new_v4();
        let mut ratings = vec![
            Rating::new(photo_id, "ana", scores(&[("a", 5)]), None),
            Rating::new(photo_id, "bruno", scores(&[("a", 7)]), None),
            Rating::new(photo_id, "carla", scores(&[("a", 2)]), None),
        ];
        let original_created_at = ratings[1].created_at;

        let outcome = upsert_rating(
            &mut ratings,
            Rating::new(
                photo_id,
                "bruno",
                scores(&[("a", 9)]),
                Some("revisto".to_string()),
            ),
        );

        assert_eq!(outcome, UpsertOutcome::Replaced);
        assert_eq!(ratings.len(), 3);
        assert_eq!(ratings[1].evaluator, "bruno");
        assert_eq!(ratings[1].scores.get("a"), Some(Score::new(9)));
        assert_eq!(ratings[1].comments.as_deref(), Some("revisto"));
        assert_eq!(ratings[1].created_at, original_created_at);
        assert_eq!(ratings[2].evaluator, "carla");
    }
}

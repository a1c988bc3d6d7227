//! Photo ranking.
//!
//! Each rating is first reduced to the mean of its criterion scores, then a
//! photo's average is the mean of those per-evaluator means. Every evaluator
//! therefore weighs the same no matter how many criteria they scored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::models::{CriterionScores, Photo, Rating};

const ALL_CATEGORIES: &str = "all";

/// Restricts a ranking to one category, or keeps every photo.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    #[default]
    All,
    Category(Uuid),
}

impl CategoryFilter {
    pub fn matches(&self, category_id: Uuid) -> bool {
        match self {
            Self::All => true,
            Self::Category(id) => *id == category_id,
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_CATEGORIES),
            Self::Category(id) => write!(f, "{}", id),
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == ALL_CATEGORIES {
            return Ok(Self::All);
        }

        Uuid::parse_str(s)
            .map(Self::Category)
            .map_err(|_| format!("category must be 'all' or a category id, got '{}'", s))
    }
}

impl Serialize for CategoryFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CategoryFilter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A photo together with its computed score.
#[derive(Debug, Clone, Serialize)]
pub struct RankedPhoto {
    #[serde(flatten)]
    pub photo: Photo,
    pub average: f64,
    pub num_evaluations: usize,
}

impl RankedPhoto {
    pub fn new(photo: Photo) -> Self {
        let average = overall_average(&photo.ratings);
        let num_evaluations = photo.ratings.len();

        Self {
            photo,
            average,
            num_evaluations,
        }
    }
}

/// Mean of one evaluator's criterion scores. A rating without any scored
/// criterion counts as 0.
pub fn evaluation_average(scores: &CriterionScores) -> f64 {
    if scores.is_empty() {
        return 0.0;
    }

    scores.total() as f64 / scores.len() as f64
}

/// Mean of the per-evaluator averages, or 0 for a photo nobody rated.
///
/// The averages are summed in sorted order, so the result is bit-for-bit the
/// same whatever order the ratings were submitted in.
pub fn overall_average(ratings: &[Rating]) -> f64 {
    if ratings.is_empty() {
        return 0.0;
    }

    let mut averages: Vec<f64> = ratings
        .iter()
        .map(|rating| evaluation_average(&rating.scores))
        .collect();
    averages.sort_by(f64::total_cmp);

    let sum: f64 = averages.into_iter().sum();

    sum / ratings.len() as f64
}

/// Ranks `photos` by average score, best first.
///
/// Photos outside `filter` are dropped. The sort is stable: photos with the
/// same average keep the order they were given in.
pub fn compute_ranking<I>(photos: I, filter: CategoryFilter) -> Vec<RankedPhoto>
where
    I: IntoIterator<Item = Photo>,
{
    let mut ranked: Vec<RankedPhoto> = photos
        .into_iter()
        .filter(|photo| filter.matches(photo.category_id))
        .map(RankedPhoto::new)
        .collect();

    ranked.sort_by(|a, b| b.average.total_cmp(&a.average));

    ranked
}

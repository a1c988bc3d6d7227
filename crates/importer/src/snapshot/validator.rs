use super::models::ContestSnapshot;
use crate::{ImporterError, Result};
use std::collections::HashSet;
use storage::models::{ContestStatus, MAX_SCORE, Score};
use tracing::warn;

pub struct SnapshotValidator;

impl SnapshotValidator {
    pub fn validate(snapshot: &ContestSnapshot) -> Result<ValidationReport> {
        let mut report = ValidationReport::default();
        let contest = &snapshot.contest;

        if contest.id.trim().is_empty() {
            report.errors.push("Contest id is required".to_string());
        }
        if contest.name.trim().is_empty() {
            report.errors.push("Contest name is required".to_string());
        }
        if contest.status.parse::<ContestStatus>().is_err() {
            report.errors.push(format!(
                "Invalid contest status: '{}'. Must be draft, open or closed",
                contest.status
            ));
        }

        let voters: HashSet<&str> = contest.voters.iter().map(String::as_str).collect();
        if voters.is_empty() {
            report
                .warnings
                .push("Contest has no evaluators".to_string());
        }

        let mut category_ids = HashSet::new();
        for category in &snapshot.categories {
            if category.name.trim().is_empty() {
                report.errors.push(format!(
                    "Category '{}' has an empty name",
                    category.id
                ));
            }
            if !category_ids.insert(category.id.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate category id: '{}'", category.id));
            }
        }

        if snapshot.photos.is_empty() {
            report.warnings.push("Contest has no photos".to_string());
        }

        let mut photo_ids = HashSet::new();
        for photo in &snapshot.photos {
            if !photo_ids.insert(photo.id.as_str()) {
                report
                    .errors
                    .push(format!("Duplicate photo id: '{}'", photo.id));
            }
            if !category_ids.contains(photo.category_id.as_str()) {
                report.errors.push(format!(
                    "Photo '{}' references unknown category '{}'",
                    photo.id, photo.category_id
                ));
            }
            if photo.url.trim().is_empty() {
                report
                    .errors
                    .push(format!("Photo '{}' has no url", photo.id));
            }

            let mut evaluators = HashSet::new();
            for rating in &photo.ratings {
                if rating.evaluator.trim().is_empty() {
                    report.errors.push(format!(
                        "Photo '{}' has a rating without evaluator",
                        photo.id
                    ));
                    continue;
                }
                if !evaluators.insert(rating.evaluator.as_str()) {
                    report.warnings.push(format!(
                        "Photo '{}' has several ratings by '{}'; the last one is kept",
                        photo.id, rating.evaluator
                    ));
                }
                if !voters.contains(rating.evaluator.as_str()) {
                    report.warnings.push(format!(
                        "Photo '{}' was rated by '{}', who is not an evaluator of the contest",
                        photo.id, rating.evaluator
                    ));
                }

                for (criterion, value) in &rating.scores {
                    match Score::from_legacy(value) {
                        None => report.warnings.push(format!(
                            "Photo '{}', evaluator '{}': score {} for '{}' is not a number and counts as 0",
                            photo.id, rating.evaluator, value, criterion
                        )),
                        Some(score) if score.value() > MAX_SCORE => report.warnings.push(format!(
                            "Photo '{}', evaluator '{}': score {} for '{}' is above {}",
                            photo.id, rating.evaluator, score.value(), criterion, MAX_SCORE
                        )),
                        Some(_) => {}
                    }
                }
            }
        }

        if !report.errors.is_empty() {
            Err(ImporterError::ValidationError(format!(
                "Validation failed with {} error(s): {}",
                report.errors.len(),
                report.errors.join("; ")
            )))
        } else {
            Ok(report)
        }
    }
}

#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn log_warnings(&self) {
        for warning in &self.warnings {
            warn!("{}", warning);
        }
    }
}

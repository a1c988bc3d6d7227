pub mod category;
pub mod contest;
pub mod photo;
pub mod rating;

pub use category::Category;
pub use contest::{Contest, ContestStatus};
pub use photo::{ANONYMOUS_AUTHOR, Photo};
pub use rating::{CriterionScores, MAX_SCORE, Rating, Score, UpsertOutcome, upsert_rating};

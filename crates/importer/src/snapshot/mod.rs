//! Legacy contest snapshots: parsing, validation and conversion.

pub mod models;
pub mod transformer;
pub mod validator;

pub use models::ContestSnapshot;
pub use transformer::{ImportedContest, SnapshotTransformer};
pub use validator::{SnapshotValidator, ValidationReport};

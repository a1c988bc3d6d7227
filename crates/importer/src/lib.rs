pub mod error;
pub mod snapshot;
pub mod traits;

pub use error::{ImporterError, Result};
pub use snapshot::{ContestSnapshot, ImportedContest, SnapshotTransformer, SnapshotValidator};
pub use traits::{ContestImporter, ImportContext, SnapshotImporter};

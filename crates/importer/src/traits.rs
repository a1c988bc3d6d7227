use crate::Result;
use crate::snapshot::{ContestSnapshot, SnapshotTransformer, SnapshotValidator};
use sqlx::PgPool;
use std::path::Path;

pub struct ImportContext {
    pub pool: PgPool,
}

#[async_trait::async_trait]
pub trait ContestImporter: Send + Sync {
    async fn import(&self, identifier: &str, context: &ImportContext) -> Result<()>;
}

/// Imports contest snapshot files; the identifier is a file path.
pub struct SnapshotImporter;

impl SnapshotImporter {
    pub async fn load(path: &Path) -> Result<ContestSnapshot> {
        let json = tokio::fs::read_to_string(path).await?;
        let snapshot = serde_json::from_str(&json)?;
        Ok(snapshot)
    }
}

#[async_trait::async_trait]
impl ContestImporter for SnapshotImporter {
    async fn import(&self, identifier: &str, context: &ImportContext) -> Result<()> {
        let snapshot = Self::load(Path::new(identifier)).await?;

        let report = SnapshotValidator::validate(&snapshot)?;
        report.log_warnings();

        let imported = SnapshotTransformer::convert(snapshot)?;
        SnapshotTransformer::new(&context.pool)
            .import_to_database(&imported)
            .await
    }
}

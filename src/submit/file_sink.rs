//! Sink that stores each submission as a JSON file

use super::FeedbackSinkTrait;
use crate::feedback::Extras;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One submission as written to disk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSubmission {
    pub id: Uuid,
    pub submitted_at: DateTime<Utc>,
    pub text: String,
    pub extras: Extras,
}

/// Writes submissions into a directory, one file each
#[derive(Debug, Clone)]
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default submissions directory under the user's data dir
    pub fn default_dir() -> Option<PathBuf> {
        ProjectDirs::from("io", "feedback-form", "feedback-form")
            .map(|dirs| dirs.data_dir().join("submissions"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl FeedbackSinkTrait for FileSink {
    async fn submit(&self, text: String, extras: Extras) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| anyhow!("Failed to create {}: {}", self.dir.display(), e))?;

        let record = StoredSubmission {
            id: Uuid::new_v4(),
            submitted_at: Utc::now(),
            text,
            extras,
        };
        let path = self.dir.join(format!(
            "{}-{}.json",
            record.submitted_at.format("%Y%m%dT%H%M%S"),
            record.id
        ));

        let content = serde_json::to_string_pretty(&record)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;

        tracing::info!("Stored feedback {} at {}", record.id, path.display());
        Ok(())
    }
}

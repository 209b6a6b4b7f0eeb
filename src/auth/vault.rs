//! Persisted session record storage.
//!
//! The boundary with the storage collaborator: one named record whose absence
//! means logged out. An unreadable body is the session manager's problem; the
//! vault only moves opaque text.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::debug;

/// Storage for the single persisted session record.
#[async_trait]
pub trait SessionVault: Send + Sync {
    /// Read the record; `None` when no record exists.
    async fn load(&self) -> Result<Option<String>>;
    /// Write the record, replacing any previous one.
    async fn save(&self, record: &str) -> Result<()>;
    /// Remove the record; removing an absent record is not an error.
    async fn clear(&self) -> Result<()>;
}

/// Session record persisted as a single JSON file.
pub struct FileVault {
    path: PathBuf,
}

impl FileVault {
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn staging_path(&self) -> PathBuf {
        let mut staged = self.path.as_os_str().to_owned();
        staged.push(".tmp");
        PathBuf::from(staged)
    }
}

#[async_trait]
impl SessionVault for FileVault {
    async fn load(&self) -> Result<Option<String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(record) => Ok(Some(record)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err).context("failed to read session record"),
        }
    }

    async fn save(&self, record: &str) -> Result<()> {
        // Write-then-rename so a crash mid-write never leaves a torn record.
        let staged = self.staging_path();
        tokio::fs::write(&staged, record)
            .await
            .context("failed to stage session record")?;
        tokio::fs::rename(&staged, &self.path)
            .await
            .context("failed to commit session record")?;
        debug!(path = %self.path.display(), "session record written");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err).context("failed to remove session record"),
        }
    }
}

/// In-process vault for tests and ephemeral runs.
#[derive(Default)]
pub struct MemoryVault {
    record: Mutex<Option<String>>,
}

impl MemoryVault {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Vault pre-loaded with an arbitrary record body.
    #[must_use]
    pub fn with_record(record: &str) -> Self {
        Self {
            record: Mutex::new(Some(record.to_string())),
        }
    }

    /// Snapshot of the stored record, for assertions.
    #[must_use]
    pub fn record(&self) -> Option<String> {
        self.record.lock().map(|guard| guard.clone()).unwrap_or(None)
    }
}

#[async_trait]
impl SessionVault for MemoryVault {
    async fn load(&self) -> Result<Option<String>> {
        Ok(self.record())
    }

    async fn save(&self, record: &str) -> Result<()> {
        if let Ok(mut guard) = self.record.lock() {
            *guard = Some(record.to_string());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if let Ok(mut guard) = self.record.lock() {
            *guard = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Result;
    use uuid::Uuid;

    fn scratch_path(tag: &str) -> PathBuf {
        std::env::temp_dir().join(format!("healthflow-{tag}-{}.json", Uuid::new_v4()))
    }

    #[tokio::test]
    async fn memory_vault_round_trips_and_clears() -> Result<()> {
        let vault = MemoryVault::new();
        assert_eq!(vault.load().await?, None);
        vault.save("{\"ok\":true}").await?;
        assert_eq!(vault.load().await?.as_deref(), Some("{\"ok\":true}"));
        vault.clear().await?;
        assert_eq!(vault.load().await?, None);
        Ok(())
    }

    #[tokio::test]
    async fn file_vault_round_trips_and_clears() -> Result<()> {
        let path = scratch_path("vault");
        let vault = FileVault::new(&path);
        assert_eq!(vault.load().await?, None);
        vault.save("record-body").await?;
        assert_eq!(vault.load().await?.as_deref(), Some("record-body"));
        vault.clear().await?;
        assert_eq!(vault.load().await?, None);
        // Clearing again must stay silent.
        vault.clear().await?;
        Ok(())
    }

    #[tokio::test]
    async fn file_vault_save_replaces_previous_record() -> Result<()> {
        let path = scratch_path("replace");
        let vault = FileVault::new(&path);
        vault.save("first").await?;
        vault.save("second").await?;
        assert_eq!(vault.load().await?.as_deref(), Some("second"));
        vault.clear().await?;
        Ok(())
    }
}

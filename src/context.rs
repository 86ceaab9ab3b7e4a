use crate::settings::Settings;
use anyhow::{Context, Result};
use slack_files_sdk::{FileObject, FileTypeFilter, FileUpload, SlackClient, WaitConfig};
use tracing::{info, warn};

/// State threaded through the lifecycle checks: the client, the wait budget,
/// the fixture to upload and whatever file the run currently owns.
pub struct FileApiContext {
    pub client: SlackClient,
    pub wait: WaitConfig,
    pub fixture: FileUpload,
    pub filter: FileTypeFilter,
    pub(crate) uploaded: Option<FileObject>,
}

impl FileApiContext {
    pub fn new(client: SlackClient, wait: WaitConfig, fixture: FileUpload) -> Self {
        Self {
            client,
            wait,
            fixture,
            filter: FileTypeFilter::Images,
            uploaded: None,
        }
    }

    pub async fn from_settings(settings: &Settings) -> Result<Self> {
        let client = settings.client()?;
        let fixture = FileUpload::from_path(&settings.fixture_path)
            .await
            .with_context(|| format!("failed to read fixture {}", settings.fixture_path.display()))?;
        Ok(Self::new(client, settings.wait, fixture))
    }

    pub fn uploaded(&self) -> Option<&FileObject> {
        self.uploaded.as_ref()
    }

    pub(crate) fn uploaded_id(&self) -> Result<&str> {
        self.uploaded
            .as_ref()
            .map(|file| file.id.as_str())
            .context("no uploaded file in context; upload_fixture must run first")
    }

    /// Delete the file this run uploaded, if it is still around. Failures
    /// are logged, not returned.
    pub async fn cleanup(&mut self) {
        let Some(file) = self.uploaded.take() else {
            return;
        };

        match self.client.delete(&file.id).await {
            Ok(outcome) if outcome.ok => info!(file_id = %file.id, "cleaned up uploaded file"),
            Ok(outcome) => warn!(
                file_id = %file.id,
                error = ?outcome.error,
                "cleanup delete was refused"
            ),
            Err(e) => warn!(file_id = %file.id, error = %e, "cleanup delete failed"),
        }
    }
}

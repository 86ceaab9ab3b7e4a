//! The file API lifecycle checks: upload, eventual listing, type filtering,
//! delete with eventual removal, and delete error codes.
//!
//! Each check fails with a message naming the assertion and the value that
//! broke it.

use crate::context::FileApiContext;
use anyhow::{Context, Result, bail, ensure};
use slack_files_sdk::{DeleteOutcome, FileObject};
use tracing::info;

/// Id used to provoke `file_not_found`.
pub const MISSING_FILE_ID: &str = "123ASDFG";

pub const FILE_NOT_FOUND: &str = "file_not_found";
pub const FILE_DELETED: &str = "file_deleted";

impl FileApiContext {
    /// Upload the fixture and check the returned file object. The file is
    /// kept in the context for the following checks.
    pub async fn upload_fixture(&mut self) -> Result<&FileObject> {
        let file = self
            .client
            .upload(&self.fixture)
            .await
            .context("files.upload failed")?;

        // Kept before checking so cleanup can still remove it.
        let file = self.uploaded.insert(file);
        check_uploaded_file(file, self.fixture.stem())?;
        info!(file_id = %file.id, "upload checks passed");

        Ok(&*file)
    }

    /// Wait for the uploaded file to show up as the newest listed file.
    pub async fn confirm_listed(&self) -> Result<()> {
        let file_id = self.uploaded_id()?;
        self.client
            .wait_for_listed(file_id, self.filter, &self.wait)
            .await
            .with_context(|| format!("uploaded file {file_id} never appeared in files.list"))?;
        Ok(())
    }

    /// Every file listed under the image filter is a png.
    pub async fn confirm_images_only(&self) -> Result<()> {
        let files = self
            .client
            .list(self.filter)
            .await
            .context("files.list failed")?;
        check_only_filetype(&files, "png")
    }

    /// Delete the uploaded file, wait for it to leave the listing, then
    /// delete it again and expect `file_deleted`.
    pub async fn delete_and_confirm(&mut self) -> Result<()> {
        let file_id = self.uploaded_id()?.to_string();

        let outcome = self
            .client
            .delete(&file_id)
            .await
            .context("files.delete failed")?;
        ensure!(
            outcome.ok,
            "Error deleting file {file_id}: ok was false (error: {:?})",
            outcome.error
        );
        self.uploaded = None;

        self.client
            .wait_for_unlisted(&file_id, self.filter, &self.wait)
            .await
            .with_context(|| format!("deleted file {file_id} is still listed"))?;

        let again = self
            .client
            .delete(&file_id)
            .await
            .context("second files.delete failed")?;
        check_delete_error(&again, FILE_DELETED)
    }

    /// Deleting an id that never existed reports `file_not_found`.
    pub async fn confirm_missing_delete(&self) -> Result<()> {
        let outcome = self
            .client
            .delete(MISSING_FILE_ID)
            .await
            .context("files.delete failed")?;
        check_delete_error(&outcome, FILE_NOT_FOUND)
    }
}

/// `files.upload` returned an id and all four thumbnails, each pointing at
/// the lowercased upload name.
pub fn check_uploaded_file(file: &FileObject, stem: &str) -> Result<()> {
    ensure!(!file.id.trim().is_empty(), "File ID is empty");

    let expected = stem.to_lowercase();
    for (field, url) in file.thumbnails() {
        let Some(url) = url else {
            bail!("{field} is missing from file {}", file.id);
        };
        ensure!(!url.is_empty(), "{field} is empty for file {}", file.id);
        ensure!(
            url.contains(&expected),
            "{field} does not contain lowercase file name {expected:?}: {url}"
        );
    }
    Ok(())
}

pub fn check_only_filetype(files: &[FileObject], expected: &str) -> Result<()> {
    for file in files {
        let filetype = file.filetype.as_deref().unwrap_or("<missing>");
        ensure!(
            filetype == expected,
            "Contains files other than {expected}: {} has filetype {filetype}",
            file.id
        );
    }
    Ok(())
}

pub fn check_delete_error(outcome: &DeleteOutcome, expected: &str) -> Result<()> {
    ensure!(
        !outcome.ok,
        "expected delete to fail with {expected}, but ok was true"
    );
    ensure!(
        outcome.error_code() == Some(expected),
        "expected error {expected}, got {:?}",
        outcome.error
    );
    Ok(())
}

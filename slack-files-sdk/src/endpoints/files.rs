use crate::client::SlackClient;
use crate::error::{Error, Result};
use crate::types::{DeleteOutcome, FileObject, FileTypeFilter, FileUpload, ListBody, UploadBody};
use crate::wait::{WaitConfig, equal_to, not};
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

impl SlackClient {
    /// Upload a file
    ///
    /// POST /files.upload (multipart, `file` part)
    ///
    pub async fn upload(&self, upload: &FileUpload) -> Result<FileObject> {
        let url = self.method_url("files.upload");

        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(&upload.content_type)?;
        let form = Form::new()
            .text("filename", upload.file_name.clone())
            .part("file", part);

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.token())
            .multipart(form)
            .send()
            .await?;

        let body: UploadBody = Self::parse_envelope("files.upload", response).await?;
        let file = body
            .file
            .ok_or_else(|| Error::BadResponse("files.upload returned no file".to_string()))?;

        info!(file_id = %file.id, name = %upload.file_name, "uploaded file");
        Ok(file)
    }

    /// List files, newest first
    ///
    /// GET /files.list?types={filter}
    ///
    pub async fn list(&self, filter: FileTypeFilter) -> Result<Vec<FileObject>> {
        let url = self.method_url("files.list");

        let response = self
            .client
            .get(&url)
            .bearer_auth(self.token())
            .query(&[("types", filter.as_str())])
            .send()
            .await?;

        let body: ListBody = Self::parse_envelope("files.list", response).await?;
        debug!(%filter, count = body.files.len(), "listed files");
        Ok(body.files)
    }

    /// Id of the newest file matching `filter`, if any.
    pub async fn latest_file_id(&self, filter: FileTypeFilter) -> Result<Option<String>> {
        let files = self.list(filter).await?;
        Ok(files.into_iter().next().map(|file| file.id))
    }

    /// Delete a file
    ///
    /// POST /files.delete (form `file={id}`)
    ///
    /// `ok: false` is returned as a [`DeleteOutcome`], not an error.
    pub async fn delete(&self, file_id: &str) -> Result<DeleteOutcome> {
        let url = self.method_url("files.delete");

        let response = self
            .client
            .post(&url)
            .bearer_auth(self.token())
            .form(&[("file", file_id)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::status_error(response).await);
        }

        let body = response.text().await?;
        let outcome: DeleteOutcome = serde_json::from_str(&body)?;

        debug!(file_id, ok = outcome.ok, error = ?outcome.error, "delete requested");
        Ok(outcome)
    }

    /// Wait until `file_id` is the newest file listed under `filter`.
    pub async fn wait_for_listed(
        &self,
        file_id: &str,
        filter: FileTypeFilter,
        wait: &WaitConfig,
    ) -> Result<Option<String>> {
        wait.until(
            &format!("{file_id} to appear in files.list"),
            || self.latest_file_id(filter),
            equal_to(Some(file_id.to_string())),
        )
        .await
    }

    /// Wait until `file_id` is no longer the newest file listed under
    /// `filter`.
    pub async fn wait_for_unlisted(
        &self,
        file_id: &str,
        filter: FileTypeFilter,
        wait: &WaitConfig,
    ) -> Result<Option<String>> {
        wait.until(
            &format!("{file_id} to leave files.list"),
            || self.latest_file_id(filter),
            not(equal_to(Some(file_id.to_string()))),
        )
        .await
    }
}

use crate::error::{Error, Result};
use serde::Deserialize;
use std::fmt;
use std::path::Path;

/// A file as returned by `files.upload` and `files.list`.
///
/// Thumbnail URLs are only present for image files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileObject {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub filetype: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub thumb_64: Option<String>,
    #[serde(default)]
    pub thumb_80: Option<String>,
    #[serde(default)]
    pub thumb_160: Option<String>,
    #[serde(default)]
    pub thumb_360: Option<String>,
}

impl FileObject {
    /// Thumbnail URLs keyed by their Slack field name, in ascending size.
    pub fn thumbnails(&self) -> [(&'static str, Option<&str>); 4] {
        [
            ("thumb_64", self.thumb_64.as_deref()),
            ("thumb_80", self.thumb_80.as_deref()),
            ("thumb_160", self.thumb_160.as_deref()),
            ("thumb_360", self.thumb_360.as_deref()),
        ]
    }
}

/// Value of the `types` filter accepted by `files.list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileTypeFilter {
    #[default]
    All,
    Spaces,
    Snippets,
    Images,
    Gdocs,
    Zips,
    Pdfs,
}

impl FileTypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileTypeFilter::All => "all",
            FileTypeFilter::Spaces => "spaces",
            FileTypeFilter::Snippets => "snippets",
            FileTypeFilter::Images => "images",
            FileTypeFilter::Gdocs => "gdocs",
            FileTypeFilter::Zips => "zips",
            FileTypeFilter::Pdfs => "pdfs",
        }
    }
}

impl fmt::Display for FileTypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File contents to send with `files.upload`.
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        let file_name = file_name.into();
        let content_type = content_type_for(&file_name).to_string();
        Self {
            file_name,
            content_type,
            bytes: bytes.into(),
        }
    }

    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| Error::Config(format!("Not a file path: {}", path.display())))?
            .to_string();
        let bytes = tokio::fs::read(path).await?;
        Ok(Self::new(file_name, bytes))
    }

    /// File name without its extension, as Slack lowercases it into
    /// thumbnail URLs.
    pub fn stem(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.file_name)
    }
}

fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}

/// Result of `files.delete`. Slack reports a failed delete with `ok: false`
/// and an error code such as `file_not_found` or `file_deleted`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DeleteOutcome {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}

impl DeleteOutcome {
    pub fn error_code(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct SlackEnvelope<T> {
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

#[derive(Debug, Deserialize)]
pub(crate) struct UploadBody {
    #[serde(default)]
    pub file: Option<FileObject>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ListBody {
    #[serde(default)]
    pub files: Vec<FileObject>,
}

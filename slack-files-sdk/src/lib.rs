mod client;
mod config;
mod endpoints;
mod error;
mod types;
pub mod wait;

pub use client::SlackClient;
pub use config::{ClientBuilder, Credentials, DEFAULT_ENDPOINT, ENDPOINT_VAR, TOKEN_VAR};
pub use error::{Error, Result};
pub use types::{DeleteOutcome, FileObject, FileTypeFilter, FileUpload};
pub use wait::{WaitConfig, equal_to, not};

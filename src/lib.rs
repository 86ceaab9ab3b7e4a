mod checks;
mod context;
mod settings;

pub use checks::{
    FILE_DELETED, FILE_NOT_FOUND, MISSING_FILE_ID, check_delete_error, check_only_filetype,
    check_uploaded_file,
};
pub use context::FileApiContext;
pub use settings::{
    DEFAULT_FIXTURE, FIXTURE_VAR, Settings, WAIT_DELAY_VAR, WAIT_MAX_VAR, WAIT_POLL_VAR,
};

pub use slack_files_sdk;

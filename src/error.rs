use thiserror::Error;

use crate::forms::FormErrors;
use crate::upload::UploadError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Settings error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Upload(#[from] UploadError),

    #[error("Invalid form: {0}")]
    Form(FormErrors),

    #[error("Unknown client: {0}")]
    UnknownClient(String),

    #[error("No record with id {0}")]
    NotFound(String),

    #[error("{0}")]
    Access(String),

    #[error("{0} cannot be imported")]
    NotImportable(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        AppError::Form(errors)
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

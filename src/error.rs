use thiserror::Error;

#[derive(Error, Debug)]
pub enum BillError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Store(String),

    #[error("Invalid file: {0}")]
    InvalidFile(String),

    #[error("Invalid form: {0}")]
    InvalidForm(String),

    #[error("Not logged in. Run `billed login --email <email>` first.")]
    NotLoggedIn,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, BillError>;

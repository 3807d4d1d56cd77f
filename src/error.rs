use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetPackerError {
    /// The sheet factory refused to allocate another sheet (budget reached).
    #[error("Sheet overflow: {0}")]
    SheetOverflow(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, SheetPackerError>;

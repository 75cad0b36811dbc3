#[derive(Debug, thiserror::Error)]
pub enum RxError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("malformed patient context: {0}")]
    MalformedContext(String),
    #[error("unhandled failure: {0}")]
    UnhandledFailure(String),

    #[error("failed to read knowledge base file: {0}")]
    FileRead(std::io::Error),
    #[error("knowledge base schema mismatch: {0}")]
    KnowledgeBaseSchema(String),
    #[error("invalid knowledge base: {0}")]
    InvalidKnowledgeBase(String),
}

impl RxError {
    /// Whether the error was caused by the caller's input rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, RxError::InvalidInput(_) | RxError::MalformedContext(_))
    }
}

pub type RxResult<T> = std::result::Result<T, RxError>;

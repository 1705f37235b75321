#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    InvalidDropPayload(String),
    AttachmentRejected(String),
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InvalidDropPayload(msg) => {
                write!(f, "Invalid drop payload: {}", msg)
            }
            DomainError::AttachmentRejected(reason) => {
                write!(f, "{}", reason)
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;

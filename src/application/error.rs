use thiserror::Error;

/// Category of a [`ServiceError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    NoData,
    Collaborator,
}

#[derive(Error, Debug)]
pub enum ServiceError {
    #[error("Invalid order: {0}")]
    Validation(String),

    #[error("No data: {0}")]
    NoData(String),

    /// Failure raised by the data-access facade or an exporter, passed
    /// through untouched.
    #[error(transparent)]
    Collaborator(#[from] anyhow::Error),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::Validation(_) => ErrorKind::Validation,
            ServiceError::NoData(_) => ErrorKind::NoData,
            ServiceError::Collaborator(_) => ErrorKind::Collaborator,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collaborator_error_keeps_message() {
        let err: ServiceError = anyhow::anyhow!("disk full").into();
        assert_eq!(err.kind(), ErrorKind::Collaborator);
        assert_eq!(err.to_string(), "disk full");
    }

    #[test]
    fn test_kinds() {
        assert_eq!(
            ServiceError::Validation("empty".into()).kind(),
            ErrorKind::Validation
        );
        assert_eq!(ServiceError::NoData("none".into()).kind(), ErrorKind::NoData);
    }
}

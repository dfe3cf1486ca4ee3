use thiserror::Error;

/// Error type for every fallible operation in this crate.
///
/// All failures are synchronous and raised at the call that violates a
/// precondition; nothing is retried internally.
#[derive(Debug, Error)]
pub enum CohortError {
    /// A caller-supplied value violates a precondition.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A required collaborator was missing or empty.
    #[error("empty input: {0}")]
    EmptyInput(&'static str),

    /// `transform` was called before `fit`.
    #[error("encoder has not been fitted; call fit() first")]
    NotFitted,

    /// Configuration could not be validated or resolved.
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("failed to parse configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CohortError>;

use thiserror::Error;

/// Errors returned by filter construction and key serialization.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A construction parameter is outside its valid domain.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// A key has no unambiguous canonical byte form.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn invalid_parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter { name, reason: reason.into() }
    }
}

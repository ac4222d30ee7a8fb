use thiserror::Error;

/// Failure reported by a platform capability.
///
/// Both variants are expected across the mobile browser matrix; callers log
/// them and carry on.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    #[error("platform capability `{0}` is not available")]
    Missing(String),
    #[error("platform rejected `{name}`: {reason}")]
    Rejected { name: String, reason: String },
}

impl PlatformError {
    pub fn missing(name: impl Into<String>) -> Self {
        Self::Missing(name.into())
    }

    pub fn rejected(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Rejected {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing(_))
    }
}

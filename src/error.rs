//! Error types for spec parsing and address handling.

/// Errors raised while turning spec tokens into address blocks.
///
/// Everything except [`NetmaskError::Invariant`] is reported per token and
/// the token contributes nothing to the result.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NetmaskError {
    #[error("parse error \"{0}\"")]
    Parse(String),

    #[error("range offset overflows address width \"{0}\"")]
    Overflow(String),

    #[error("name lookup returned no addresses for \"{0}\"")]
    Resolution(String),

    #[error("invariant violated: {0}")]
    Invariant(String),
}

impl NetmaskError {
    /// True for the class that has no recovery path.
    pub fn is_fatal(&self) -> bool {
        matches!(self, NetmaskError::Invariant(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            NetmaskError::Parse("10.0.0.0/33".to_string()).to_string(),
            "parse error \"10.0.0.0/33\""
        );
        assert!(NetmaskError::Invariant("x".to_string()).is_fatal());
        assert!(!NetmaskError::Overflow("x".to_string()).is_fatal());
    }
}

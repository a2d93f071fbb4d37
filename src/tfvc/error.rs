use super::strings::{MessageCatalog, MessageKey};

/// Classification of a failed `workfold` invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TfvcErrorCode {
    /// A required constructor argument was missing or blank.
    ArgumentRequired,
    /// The TF executable prints localized field labels that cannot be parsed.
    NotAnEnuTfCommandLine,
    /// The output does not describe a workspace with mappings.
    NotATfvcRepository,
    /// The process exited non-zero with an error we don't recognize.
    CommandFailed,
}

impl TfvcErrorCode {
    fn message_key(self) -> MessageKey {
        match self {
            TfvcErrorCode::ArgumentRequired => MessageKey::ArgumentRequired,
            TfvcErrorCode::NotAnEnuTfCommandLine => MessageKey::NotAnEnuTfCommandLine,
            TfvcErrorCode::NotATfvcRepository => MessageKey::NoWorkspaceMappings,
            TfvcErrorCode::CommandFailed => MessageKey::CommandFailed,
        }
    }
}

/// Error raised by the TFVC command layer.
///
/// The message always starts with the catalog text for the error code and is
/// optionally followed by the underlying detail (stderr, argument name).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct TfvcError {
    code: TfvcErrorCode,
    message: String,
}

impl TfvcError {
    pub fn new(code: TfvcErrorCode, catalog: &dyn MessageCatalog, detail: Option<&str>) -> Self {
        let prefix = catalog.message(code.message_key());
        let message = match detail.map(str::trim).filter(|d| !d.is_empty()) {
            Some(d) => format!("{} {}", prefix, d),
            None => prefix.into_owned(),
        };
        Self { code, message }
    }

    pub fn code(&self) -> TfvcErrorCode {
        self.code
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tfvc::strings::DefaultCatalog;

    #[test]
    fn message_starts_with_catalog_text() {
        let err = TfvcError::new(
            TfvcErrorCode::NotATfvcRepository,
            &DefaultCatalog,
            Some("Unable to determine the source control server."),
        );
        let prefix = DefaultCatalog.message(MessageKey::NoWorkspaceMappings);
        assert!(err.to_string().starts_with(prefix.as_ref()));
        assert!(err.to_string().ends_with("source control server."));
        assert_eq!(err.code(), TfvcErrorCode::NotATfvcRepository);
    }

    #[test]
    fn blank_detail_is_dropped() {
        let err = TfvcError::new(TfvcErrorCode::NotAnEnuTfCommandLine, &DefaultCatalog, Some("  "));
        assert_eq!(
            err.to_string(),
            DefaultCatalog.message(MessageKey::NotAnEnuTfCommandLine)
        );
    }
}

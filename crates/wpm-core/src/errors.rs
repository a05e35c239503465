use thiserror::Error;

/// Result type alias using WpmError
pub type Result<T> = std::result::Result<T, WpmError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and reporting back to the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Input
    InvalidLanguageCode,
    InvalidPolicy,

    // Host collaboration
    SlotRead,

    // Shared state
    /// The projection registration could not be put back; later reads would be wrong
    GuardRestoreFailed,

    // Integration/IO
    Config,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidLanguageCode => "ERR_INVALID_LANGUAGE_CODE",
            ExErrorKind::InvalidPolicy => "ERR_INVALID_POLICY",
            ExErrorKind::SlotRead => "ERR_SLOT_READ",
            ExErrorKind::GuardRestoreFailed => "ERR_GUARD_RESTORE_FAILED",
            ExErrorKind::Config => "ERR_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }

    /// Whether the host must treat this error as fatal for the request
    pub fn is_fatal(&self) -> bool {
        matches!(self, ExErrorKind::GuardRestoreFailed)
    }
}

/// Canonical structured error type
///
/// Classification fields for programmatic handling plus context for debugging.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    slot: Option<String>,
    lang: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            slot: None,
            lang: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add slot context
    pub fn with_slot(mut self, slot: impl Into<String>) -> Self {
        self.slot = Some(slot.into());
        self
    }

    /// Add language context
    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn is_fatal(&self) -> bool {
        self.kind.is_fatal()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn slot(&self) -> Option<&str> {
        self.slot.as_deref()
    }

    pub fn lang(&self) -> Option<&str> {
        self.lang.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(slot) = &self.slot {
            write!(f, " (slot: {})", slot)?;
        }
        if let Some(lang) = &self.lang {
            write!(f, " (lang: {})", lang)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        None
    }
}

// ========== End Error Facility ==========

/// Error taxonomy for engine operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WpmError {
    /// A string could not be used as a language code
    #[error("Invalid language code: {code:?}")]
    InvalidLanguageCode { code: String },

    /// A policy description could not be interpreted
    #[error("Invalid policy: {reason}")]
    InvalidPolicy { reason: String },

    /// The host failed to read the previous value of a slot
    #[error("Failed to read slot {slot}: {message}")]
    SlotRead { slot: String, message: String },

    /// The projection registration of a slot could not be restored
    #[error("Projection guard for slot {slot} could not restore registration: {reason}")]
    GuardRestoreFailed { slot: String, reason: String },

    /// Configuration could not be loaded
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Serialization error (JSON encoding/decoding)
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl WpmError {
    pub fn kind(&self) -> ExErrorKind {
        match self {
            WpmError::InvalidLanguageCode { .. } => ExErrorKind::InvalidLanguageCode,
            WpmError::InvalidPolicy { .. } => ExErrorKind::InvalidPolicy,
            WpmError::SlotRead { .. } => ExErrorKind::SlotRead,
            WpmError::GuardRestoreFailed { .. } => ExErrorKind::GuardRestoreFailed,
            WpmError::Config { .. } => ExErrorKind::Config,
            WpmError::Serialization { .. } => ExErrorKind::Serialization,
            WpmError::Internal { .. } => ExErrorKind::Internal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.kind().is_fatal()
    }
}

/// Conversion from WpmError to ExError
impl From<WpmError> for ExError {
    fn from(err: WpmError) -> Self {
        let kind = err.kind();
        match err {
            WpmError::InvalidLanguageCode { code } => ExError::new(kind)
                .with_lang(code)
                .with_message("Language code does not match the marker grammar"),

            WpmError::InvalidPolicy { reason } => ExError::new(kind).with_message(reason),

            WpmError::SlotRead { slot, message } => ExError::new(kind)
                .with_op("read_raw")
                .with_slot(slot)
                .with_message(message),

            WpmError::GuardRestoreFailed { slot, reason } => ExError::new(kind)
                .with_op("projection_restore")
                .with_slot(slot)
                .with_message(reason),

            WpmError::Config { message }
            | WpmError::Serialization { message }
            | WpmError::Internal { message } => ExError::new(kind).with_message(message),
        }
    }
}

impl From<wpm_core_types::InvalidLangCode> for WpmError {
    fn from(err: wpm_core_types::InvalidLangCode) -> Self {
        WpmError::InvalidLanguageCode { code: err.code }
    }
}

/// Conversion from serde_json::Error to WpmError
impl From<serde_json::Error> for WpmError {
    fn from(err: serde_json::Error) -> Self {
        WpmError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for WpmError {
    fn from(err: toml::de::Error) -> Self {
        WpmError::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes() {
        let cases = [
            (ExErrorKind::InvalidLanguageCode, "ERR_INVALID_LANGUAGE_CODE"),
            (ExErrorKind::InvalidPolicy, "ERR_INVALID_POLICY"),
            (ExErrorKind::SlotRead, "ERR_SLOT_READ"),
            (ExErrorKind::GuardRestoreFailed, "ERR_GUARD_RESTORE_FAILED"),
            (ExErrorKind::Config, "ERR_CONFIG"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_only_guard_restore_is_fatal() {
        assert!(ExErrorKind::GuardRestoreFailed.is_fatal());
        assert!(!ExErrorKind::SlotRead.is_fatal());
        assert!(!ExErrorKind::InvalidPolicy.is_fatal());
    }

    #[test]
    fn test_guard_error_converts_with_context() {
        let err = WpmError::GuardRestoreFailed {
            slot: "option:blogname".to_string(),
            reason: "stack depth mismatch".to_string(),
        };
        assert!(err.is_fatal());
        let ex: ExError = err.into();
        assert_eq!(ex.code(), "ERR_GUARD_RESTORE_FAILED");
        assert_eq!(ex.slot(), Some("option:blogname"));
        assert_eq!(ex.op(), Some("projection_restore"));
        assert!(ex.to_string().contains("stack depth mismatch"));
    }

    #[test]
    fn test_lang_code_error_conversion() {
        let err: WpmError = wpm_core_types::LangCode::new("EN!").unwrap_err().into();
        assert_eq!(
            err,
            WpmError::InvalidLanguageCode {
                code: "EN!".to_string()
            }
        );
        let ex: ExError = err.into();
        assert_eq!(ex.lang(), Some("EN!"));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: WpmError = json_err.into();
        assert_eq!(err.kind(), ExErrorKind::Serialization);
    }
}

//! Language identifiers
//!
//! A [`LangCode`] is the short identifier embedded in the multilingual marker
//! format. Codes are validated on construction so that anything the encoder
//! writes is guaranteed to be recognized again by the decoder.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Unanchored pattern for a language code (`en`, `uk`, `pt_BR`, `zh-hant`)
pub const LANG_CODE_PATTERN: &str = "[a-z]{2,3}(?:[-_][A-Za-z0-9]{2,8})*";

fn lang_code_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!("^{}$", LANG_CODE_PATTERN)).expect("language code pattern is valid")
    })
}

/// Error returned when a string is not a valid language code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidLangCode {
    pub code: String,
}

impl fmt::Display for InvalidLangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid language code: {:?}", self.code)
    }
}

impl std::error::Error for InvalidLangCode {}

/// Validated language code
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LangCode(String);

impl LangCode {
    /// Validate and wrap a language code
    pub fn new(code: impl Into<String>) -> Result<Self, InvalidLangCode> {
        let code = code.into();
        if lang_code_regex().is_match(&code) {
            Ok(Self(code))
        } else {
            Err(InvalidLangCode { code })
        }
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for LangCode {
    type Error = InvalidLangCode;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for LangCode {
    type Error = InvalidLangCode;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<LangCode> for String {
    fn from(code: LangCode) -> Self {
        code.0
    }
}

impl std::str::FromStr for LangCode {
    type Err = InvalidLangCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for LangCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LangCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The site's known languages, in configured order, with one default
///
/// The default language is always a member of the set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSet {
    default: LangCode,
    known: Vec<LangCode>,
}

impl LanguageSet {
    /// Build a set from a default language and the known languages
    ///
    /// Duplicates are dropped. If `default` is not listed it is prepended.
    pub fn new(default: LangCode, known: impl IntoIterator<Item = LangCode>) -> Self {
        let mut codes: Vec<LangCode> = Vec::new();
        for code in known {
            if !codes.contains(&code) {
                codes.push(code);
            }
        }
        if !codes.contains(&default) {
            codes.insert(0, default.clone());
        }
        Self {
            default,
            known: codes,
        }
    }

    /// A set containing only one language
    pub fn single(default: LangCode) -> Self {
        Self::new(default, Vec::new())
    }

    pub fn default_language(&self) -> &LangCode {
        &self.default
    }

    pub fn contains(&self, code: &LangCode) -> bool {
        self.known.contains(code)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LangCode> {
        self.known.iter()
    }

    pub fn len(&self) -> usize {
        self.known.len()
    }

    pub fn is_empty(&self) -> bool {
        self.known.is_empty()
    }
}

//! Marker string grammar
//!
//! ```text
//! ml-string := ( "[:" code "]" segment )+ "[:]"
//! segment   := text with every "[:" escaped as "[::"
//! ```

use crate::model::LanguageMap;
use regex::Regex;
use std::sync::OnceLock;
use wpm_core_types::{LangCode, LANG_CODE_PATTERN};

pub const TAG_OPEN: &str = "[:";
pub const TERMINATOR: &str = "[:]";
const ESCAPED_OPEN: &str = "[::";

/// Matches an opening tag (group 1 = code) or the terminator (no group 1)
fn tag_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(r"\[:({})?\]", LANG_CODE_PATTERN)).expect("tag pattern is valid")
    })
}

fn escape(text: &str) -> String {
    text.replace(TAG_OPEN, ESCAPED_OPEN)
}

fn unescape(text: &str) -> String {
    text.replace(ESCAPED_OPEN, TAG_OPEN)
}

/// Parse a marker string into its language entries
///
/// Returns `None` for anything that is not exactly a well-formed marker
/// string: text before the first tag, a missing or early terminator, a
/// repeated language, or no language at all.
pub fn parse_ml_string(s: &str) -> Option<LanguageMap> {
    if !s.starts_with(TAG_OPEN) || !s.ends_with(TERMINATOR) {
        return None;
    }

    let mut map = LanguageMap::new();
    let mut open: Option<(LangCode, usize)> = None;
    let mut closed = false;

    for caps in tag_regex().captures_iter(s) {
        let tag = caps.get(0)?;
        if closed {
            return None;
        }
        match caps.get(1) {
            Some(code) => {
                match open.take() {
                    Some((lang, start)) => push_segment(&mut map, lang, &s[start..tag.start()])?,
                    None if tag.start() != 0 => return None,
                    None => {}
                }
                let lang = LangCode::new(code.as_str()).ok()?;
                open = Some((lang, tag.end()));
            }
            None => {
                let (lang, start) = open.take()?;
                if tag.end() != s.len() {
                    return None;
                }
                push_segment(&mut map, lang, &s[start..tag.start()])?;
                closed = true;
            }
        }
    }

    (closed && !map.is_empty()).then_some(map)
}

fn push_segment(map: &mut LanguageMap, lang: LangCode, raw: &str) -> Option<()> {
    if map.contains(&lang) {
        return None;
    }
    map.set(lang, unescape(raw));
    Some(())
}

/// Write language entries as a marker string
///
/// An empty map has no marker form and yields the empty string.
pub fn format_ml_string(map: &LanguageMap) -> String {
    if map.is_empty() {
        return String::new();
    }
    let mut out = String::new();
    for (lang, text) in map.iter() {
        out.push_str(TAG_OPEN);
        out.push_str(lang.as_str());
        out.push(']');
        out.push_str(&escape(text));
    }
    out.push_str(TERMINATOR);
    out
}

//! Engine configuration
//!
//! ```toml
//! [languages]
//! default = "en"
//! known = ["en", "fr", "uk"]
//!
//! [options]
//! blogname = "leaf"
//! widget_text = { wpm_each = { title = "leaf", text = "leaf" } }
//!
//! [post_meta]
//! _seo_title = {}
//! ```
//!
//! Each policy table maps a field name to a policy in the config-file shape
//! (see [`crate::policy`]). Fields not listed are `Opaque`.

use crate::errors::{Result, WpmError};
use crate::policy::{Policy, PolicyRegistry};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use wpm_core_types::{LangCode, LanguageSet, SlotKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguagesConfig {
    pub default: LangCode,
    #[serde(default)]
    pub known: Vec<LangCode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    pub languages: LanguagesConfig,
    #[serde(default)]
    pub options: IndexMap<String, Policy>,
    #[serde(default)]
    pub post_fields: IndexMap<String, Policy>,
    #[serde(default)]
    pub post_meta: IndexMap<String, Policy>,
    #[serde(default)]
    pub term_fields: IndexMap<String, Policy>,
    #[serde(default)]
    pub term_meta: IndexMap<String, Policy>,
    #[serde(default)]
    pub fields: IndexMap<String, Policy>,
}

impl EngineConfig {
    /// A configuration with languages only and no translated fields
    pub fn new(languages: LanguagesConfig) -> Self {
        Self {
            languages,
            options: IndexMap::new(),
            post_fields: IndexMap::new(),
            post_meta: IndexMap::new(),
            term_fields: IndexMap::new(),
            term_meta: IndexMap::new(),
            fields: IndexMap::new(),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EngineConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(content).map_err(|e| WpmError::Config {
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.toml` or `.json` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| WpmError::Config {
            message: format!("Failed to read {}: {}", path.display(), e),
        })?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Self::from_toml_str(&content),
            Some("json") => Self::from_json_str(&content),
            _ => Err(WpmError::Config {
                message: format!(
                    "Unsupported config format for {}: expected .toml or .json",
                    path.display()
                ),
            }),
        }
    }

    fn validate(&self) -> Result<()> {
        for kind in SlotKind::ALL {
            if self.policies(kind).keys().any(|field| field.is_empty()) {
                return Err(WpmError::Config {
                    message: format!("Empty field name in [{}]", table_name(kind)),
                });
            }
        }
        Ok(())
    }

    /// Policy table for one slot kind
    pub fn policies(&self, kind: SlotKind) -> &IndexMap<String, Policy> {
        match kind {
            SlotKind::Option => &self.options,
            SlotKind::PostField => &self.post_fields,
            SlotKind::PostMeta => &self.post_meta,
            SlotKind::TermField => &self.term_fields,
            SlotKind::TermMeta => &self.term_meta,
            SlotKind::Field => &self.fields,
        }
    }

    /// Registry seeded with every configured policy as a base policy
    pub fn policy_registry(&self) -> PolicyRegistry {
        let mut registry = PolicyRegistry::new();
        for kind in SlotKind::ALL {
            for (field, policy) in self.policies(kind) {
                registry.set_base(kind, field.clone(), policy.clone());
            }
        }
        registry
    }

    pub fn language_set(&self) -> LanguageSet {
        LanguageSet::new(
            self.languages.default.clone(),
            self.languages.known.iter().cloned(),
        )
    }
}

fn table_name(kind: SlotKind) -> &'static str {
    match kind {
        SlotKind::Option => "options",
        SlotKind::PostField => "post_fields",
        SlotKind::PostMeta => "post_meta",
        SlotKind::TermField => "term_fields",
        SlotKind::TermMeta => "term_meta",
        SlotKind::Field => "fields",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[languages]
default = "en"
known = ["en", "fr"]

[options]
blogname = "leaf"
widget_text = { wpm_each = { title = "leaf" } }

[post_meta]
_seo_title = {}
_thumbnail_id = "opaque"
"#;

    fn code(s: &str) -> LangCode {
        LangCode::new(s).unwrap()
    }

    #[test]
    fn test_parse_toml() {
        let config = EngineConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.languages.default, code("en"));
        assert_eq!(config.options.get("blogname"), Some(&Policy::Leaf));
        assert_eq!(
            config.options.get("widget_text"),
            Some(&Policy::each(Policy::recurse([("title", Policy::Leaf)])))
        );
        assert_eq!(config.post_meta.get("_seo_title"), Some(&Policy::Leaf));
        assert_eq!(config.post_meta.get("_thumbnail_id"), Some(&Policy::Opaque));
    }

    #[test]
    fn test_registry_from_config() {
        let registry = EngineConfig::from_toml_str(SAMPLE).unwrap().policy_registry();
        assert_eq!(registry.resolve(SlotKind::Option, "blogname"), Policy::Leaf);
        assert_eq!(registry.resolve(SlotKind::PostMeta, "_seo_title"), Policy::Leaf);
        assert_eq!(registry.resolve(SlotKind::Option, "unlisted"), Policy::Opaque);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_parse_json_with_null_policy() {
        let config = EngineConfig::from_json_str(
            r#"{"languages": {"default": "uk"}, "fields": {"gallery": null, "caption": {}}}"#,
        )
        .unwrap();
        assert_eq!(config.fields.get("gallery"), Some(&Policy::Opaque));
        assert_eq!(config.fields.get("caption"), Some(&Policy::Leaf));
        let set = config.language_set();
        assert_eq!(set.default_language(), &code("uk"));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_invalid_language_code_rejected() {
        let err = EngineConfig::from_toml_str("[languages]\ndefault = \"English\"\n").unwrap_err();
        assert!(matches!(err, WpmError::Config { .. }));
    }

    #[test]
    fn test_invalid_policy_rejected() {
        let err = EngineConfig::from_json_str(
            r#"{"languages": {"default": "en"}, "options": {"blogname": 5}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("blogname") || err.to_string().contains("policy"));
    }

    #[test]
    fn test_unknown_table_rejected() {
        let err = EngineConfig::from_toml_str("[languages]\ndefault = \"en\"\n[posts]\n").unwrap_err();
        assert!(matches!(err, WpmError::Config { .. }));
    }

    #[test]
    fn test_empty_field_name_rejected() {
        let err = EngineConfig::from_json_str(
            r#"{"languages": {"default": "en"}, "options": {"": {}}}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("options"));
    }

    #[test]
    fn test_load_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let toml_path = dir.path().join("wpm.toml");
        fs::write(&toml_path, SAMPLE).unwrap();
        assert!(EngineConfig::load(&toml_path).is_ok());

        let yaml_path = dir.path().join("wpm.yaml");
        fs::write(&yaml_path, "languages: {}").unwrap();
        let err = EngineConfig::load(&yaml_path).unwrap_err();
        assert!(err.to_string().contains("Unsupported"));

        let missing = dir.path().join("missing.toml");
        assert!(matches!(EngineConfig::load(&missing), Err(WpmError::Config { .. })));
    }
}

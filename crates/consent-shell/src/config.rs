//! Page shell configuration: title, head scripts, body widgets, locale.
//!
//! A [`PageConfig`] is built once per fixture and handed by value to
//! [`crate::compose::render`]. The vendor-specific payloads (`attributes`,
//! `props`) stay loosely typed; only the shell's own shape is checked.

use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Attributes the composer derives from [`ScriptSource`] and [`LoadTiming`].
pub(crate) const RESERVED_ATTRIBUTES: &[&str] = &["src", "async", "defer", "data-strategy"];

/// Event handler attached to a body widget. The return value is never read.
pub type Callback = Arc<dyn Fn(&Value) + Send + Sync>;

/// When the client should fetch and execute a head script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LoadTiming {
    #[default]
    Blocking,
    Deferred,
    Async,
    BeforeInteractive,
}

impl LoadTiming {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Blocking => "blocking",
            Self::Deferred => "deferred",
            Self::Async => "async",
            Self::BeforeInteractive => "before-interactive",
        }
    }
}

impl fmt::Display for LoadTiming {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a script's code comes from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScriptSource {
    /// External script: an `http(s)` URL or a reference relative to the page.
    Url(String),
    /// Trusted inline code, embedded without escaping.
    Inline(String),
}

/// A script mounted in the document head.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptRef {
    pub source: ScriptSource,
    pub load_timing: LoadTiming,
    pub attributes: BTreeMap<String, String>,
}

impl ScriptRef {
    /// External script loaded from `src`.
    pub fn url(src: impl Into<String>) -> Self {
        Self {
            source: ScriptSource::Url(src.into()),
            load_timing: LoadTiming::Blocking,
            attributes: BTreeMap::new(),
        }
    }

    /// Inline script with the given payload.
    pub fn inline(code: impl Into<String>) -> Self {
        Self {
            source: ScriptSource::Inline(code.into()),
            load_timing: LoadTiming::Blocking,
            attributes: BTreeMap::new(),
        }
    }

    pub fn timing(mut self, timing: LoadTiming) -> Self {
        self.load_timing = timing;
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn src(&self) -> Option<&str> {
        match &self.source {
            ScriptSource::Url(url) => Some(url),
            ScriptSource::Inline(_) => None,
        }
    }

    pub fn inline_payload(&self) -> Option<&str> {
        match &self.source {
            ScriptSource::Inline(code) => Some(code),
            ScriptSource::Url(_) => None,
        }
    }

    fn validate(&self, index: usize) -> Result<()> {
        match &self.source {
            ScriptSource::Url(src) => validate_script_url(index, src)?,
            ScriptSource::Inline(code) => {
                if code.trim().is_empty() {
                    return Err(ConfigError::MissingScriptSource { index });
                }
            }
        }

        for name in self.attributes.keys() {
            if !is_valid_attribute_name(name) {
                return Err(ConfigError::InvalidAttributeName {
                    index,
                    name: name.clone(),
                });
            }
            if RESERVED_ATTRIBUTES
                .iter()
                .any(|reserved| name.eq_ignore_ascii_case(reserved))
            {
                return Err(ConfigError::ReservedAttribute {
                    index,
                    name: name.clone(),
                });
            }
        }

        Ok(())
    }
}

/// A vendor component mounted in the document body.
#[derive(Clone)]
pub struct WidgetRef {
    pub kind: String,
    pub props: Map<String, Value>,
    pub callbacks: BTreeMap<String, Callback>,
}

impl WidgetRef {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            props: Map::new(),
            callbacks: BTreeMap::new(),
        }
    }

    pub fn prop(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(name.into(), value.into());
        self
    }

    /// Register a handler for `event`. The composer never calls it.
    pub fn on<F>(mut self, event: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.callbacks.insert(event.into(), Arc::new(handler));
        self
    }

    fn validate(&self, index: usize) -> Result<()> {
        if self.kind.trim().is_empty() {
            return Err(ConfigError::EmptyWidgetKind { index });
        }
        if self.callbacks.keys().any(|event| event.trim().is_empty()) {
            return Err(ConfigError::EmptyEventName {
                index,
                kind: self.kind.clone(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for WidgetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WidgetRef")
            .field("kind", &self.kind)
            .field("props", &self.props)
            .field("callbacks", &self.callbacks.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Everything a page shell needs for one render.
#[derive(Debug, Clone)]
pub struct PageConfig {
    pub title: String,
    pub head_scripts: Vec<ScriptRef>,
    pub body_widgets: Vec<WidgetRef>,
    pub locale: Option<String>,
}

impl PageConfig {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            head_scripts: Vec::new(),
            body_widgets: Vec::new(),
            locale: None,
        }
    }

    pub fn script(mut self, script: ScriptRef) -> Self {
        self.head_scripts.push(script);
        self
    }

    pub fn widget(mut self, widget: WidgetRef) -> Self {
        self.body_widgets.push(widget);
        self
    }

    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Check every field the composer relies on.
    ///
    /// Stops at the first problem, in document order: title, locale, head
    /// scripts, body widgets.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::EmptyTitle);
        }
        if let Some(locale) = &self.locale {
            if !is_valid_locale(locale) {
                return Err(ConfigError::InvalidLocale(locale.clone()));
            }
        }
        for (index, script) in self.head_scripts.iter().enumerate() {
            script.validate(index)?;
        }
        for (index, widget) in self.body_widgets.iter().enumerate() {
            widget.validate(index)?;
        }
        Ok(())
    }
}

fn validate_script_url(index: usize, src: &str) -> Result<()> {
    let invalid = |reason: &str| ConfigError::InvalidScriptUrl {
        index,
        url: src.to_string(),
        reason: reason.to_string(),
    };

    if src.trim().is_empty() {
        return Err(ConfigError::MissingScriptSource { index });
    }
    if src.chars().any(char::is_whitespace) {
        return Err(invalid("contains whitespace"));
    }

    // Relative references resolve against the page, which is served over http(s).
    let parsed = match url::Url::parse(src) {
        Err(url::ParseError::RelativeUrlWithoutBase) => url::Url::parse("http://localhost/")
            .and_then(|base| base.join(src))
            .map_err(|e| invalid(&e.to_string()))?,
        other => other.map_err(|e| invalid(&e.to_string()))?,
    };
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(invalid(&format!("unsupported scheme '{other}'"))),
    }
}

fn is_valid_attribute_name(name: &str) -> bool {
    !name.is_empty()
        && !name.chars().any(|c| {
            c.is_whitespace() || c.is_control() || matches!(c, '"' | '\'' | '<' | '>' | '/' | '=')
        })
}

fn is_valid_locale(locale: &str) -> bool {
    !locale.is_empty()
        && !locale.starts_with('-')
        && !locale.ends_with('-')
        && locale.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_sequences_are_valid() {
        assert!(PageConfig::new("benchmark").validate().is_ok());
    }

    #[test]
    fn test_whitespace_title_rejected() {
        let err = PageConfig::new("   ").validate().unwrap_err();
        assert_eq!(err, ConfigError::EmptyTitle);
    }

    #[test]
    fn test_empty_url_is_missing_source() {
        let config = PageConfig::new("t").script(ScriptRef::url(""));
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::MissingScriptSource { index: 0 }
        );
    }

    #[test]
    fn test_blank_inline_is_missing_source() {
        let config = PageConfig::new("t")
            .script(ScriptRef::url("https://vendor.example/a.js"))
            .script(ScriptRef::inline("  \n"));
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::MissingScriptSource { index: 1 }
        );
    }

    #[test]
    fn test_script_urls() {
        let ok = [
            "https://cdn.example/a.js",
            "http://localhost:3000/x.js",
            "/static/cmp.js",
            "./consent.js",
            "scripts/cmp.js",
            "../vendor/cmp.js?v=2",
            "//cdn.example/a.js",
        ];
        for src in ok {
            assert!(validate_script_url(0, src).is_ok(), "{src}");
        }

        let bad = ["javascript:alert(1)", "data:text/javascript,x()", "https://", "not a url"];
        for src in bad {
            assert!(
                matches!(
                    validate_script_url(0, src),
                    Err(ConfigError::InvalidScriptUrl { .. })
                ),
                "{src}"
            );
        }
    }

    #[test]
    fn test_relative_script_renders() {
        let config = PageConfig::new("benchmark").script(ScriptRef::url("./consent.js"));
        let doc = crate::compose::render(config, crate::document::Fragment::empty()).unwrap();
        assert_eq!(doc.head_scripts()[0].src(), Some("./consent.js"));
    }

    #[test]
    fn test_reserved_attribute_rejected() {
        let config = PageConfig::new("t")
            .script(ScriptRef::url("https://vendor.example/a.js").attr("SRC", "x"));
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::ReservedAttribute {
                index: 0,
                name: "SRC".to_string()
            }
        );
    }

    #[test]
    fn test_attribute_names() {
        assert!(is_valid_attribute_name("data-domain-script"));
        assert!(is_valid_attribute_name("id"));
        assert!(!is_valid_attribute_name(""));
        assert!(!is_valid_attribute_name("data id"));
        assert!(!is_valid_attribute_name("x\"onload"));
        assert!(!is_valid_attribute_name("a=b"));
    }

    #[test]
    fn test_widget_kind_and_events() {
        let config = PageConfig::new("t").widget(WidgetRef::new(" "));
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::EmptyWidgetKind { index: 0 }
        );

        let config = PageConfig::new("t").widget(WidgetRef::new("didomi-sdk").on("", |_| {}));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyEventName { index: 0, .. })
        ));
    }

    #[test]
    fn test_locales() {
        assert!(is_valid_locale("en"));
        assert!(is_valid_locale("pt-BR"));
        assert!(!is_valid_locale(""));
        assert!(!is_valid_locale("en_US"));
        assert!(!is_valid_locale("-en"));

        let err = PageConfig::new("t").locale("de DE").validate().unwrap_err();
        assert_eq!(err, ConfigError::InvalidLocale("de DE".to_string()));
    }

    #[test]
    fn test_load_timing_serde() {
        let timing: LoadTiming = serde_json::from_str("\"before-interactive\"").unwrap();
        assert_eq!(timing, LoadTiming::BeforeInteractive);
        assert_eq!(serde_json::to_string(&LoadTiming::Async).unwrap(), "\"async\"");
    }

    #[test]
    fn test_widget_debug_lists_event_names() {
        let widget = WidgetRef::new("didomi-sdk").on("onReady", |_| {});
        let debug = format!("{widget:?}");
        assert!(debug.contains("onReady"));
    }
}

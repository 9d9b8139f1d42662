//! JSON page manifests.
//!
//! A manifest describes one fixture in the same shape as [`PageConfig`], for
//! pages that are not part of the built-in vendor catalog:
//!
//! ```json
//! {
//!   "title": "Klaro benchmark",
//!   "locale": "en",
//!   "head_scripts": [
//!     { "src": "https://cdn.kiprotect.com/klaro/v0.7/klaro.js", "timing": "deferred",
//!       "attributes": { "data-config": "klaroConfig" } }
//!   ],
//!   "body_widgets": [
//!     { "kind": "klaro-notice", "props": { "mustConsent": false }, "events": ["onAccept"] }
//!   ]
//! }
//! ```
//!
//! Widget events are bound to handlers that log the payload, since a manifest
//! cannot carry code. Listing the same event twice for one widget is an error.

use crate::config::{LoadTiming, PageConfig, ScriptRef, ScriptSource, WidgetRef};
use crate::error::{ConfigError, ManifestError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageManifest {
    pub title: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub head_scripts: Vec<ScriptSpec>,
    #[serde(default)]
    pub body_widgets: Vec<WidgetSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptSpec {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline: Option<String>,
    #[serde(default)]
    pub timing: LoadTiming,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WidgetSpec {
    pub kind: String,
    #[serde(default)]
    pub props: Map<String, Value>,
    #[serde(default)]
    pub events: Vec<String>,
}

impl PageManifest {
    /// Read and parse a manifest file.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let text = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&text)
    }

    pub fn from_json(text: &str) -> Result<Self, ManifestError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Convert into a validated [`PageConfig`].
    pub fn into_config(self) -> Result<PageConfig, ConfigError> {
        let mut config = PageConfig::new(self.title);
        config.locale = self.locale;

        for (index, spec) in self.head_scripts.into_iter().enumerate() {
            let source = match (spec.src, spec.inline) {
                (Some(_), Some(_)) => return Err(ConfigError::AmbiguousScriptSource { index }),
                (Some(src), None) => ScriptSource::Url(src),
                (None, Some(code)) => ScriptSource::Inline(code),
                (None, None) => return Err(ConfigError::MissingScriptSource { index }),
            };
            config.head_scripts.push(ScriptRef {
                source,
                load_timing: spec.timing,
                attributes: spec.attributes,
            });
        }

        for (index, spec) in self.body_widgets.into_iter().enumerate() {
            let mut widget = WidgetRef::new(spec.kind);
            widget.props = spec.props;
            for event in spec.events {
                if widget.callbacks.contains_key(&event) {
                    return Err(ConfigError::DuplicateEvent {
                        index,
                        kind: widget.kind,
                        event,
                    });
                }
                let kind = widget.kind.clone();
                let name = event.clone();
                widget = widget.on(event, move |payload: &Value| {
                    info!(widget = %kind, event = %name, %payload, "widget event");
                });
            }
            config.body_widgets.push(widget);
        }

        config.validate()?;
        Ok(config)
    }
}

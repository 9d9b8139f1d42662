//! Rendered page document and its HTML serialization.

use crate::config::{Callback, LoadTiming, ScriptRef, ScriptSource, WidgetRef};
use crate::escape::{escape_attr, escape_text};
use serde_json::{Map, Value};
use std::fmt::Write;

/// Opaque nested page content, written to the body as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment(String);

impl Fragment {
    /// Pre-rendered markup, passed through unmodified.
    pub fn raw(html: impl Into<String>) -> Self {
        Self(html.into())
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for Fragment {
    fn from(html: &str) -> Self {
        Self::raw(html)
    }
}

impl From<String> for Fragment {
    fn from(html: String) -> Self {
        Self::raw(html)
    }
}

/// A body widget after composition. Callbacks stay with the widget so the
/// host environment can invoke them later.
#[derive(Debug, Clone)]
pub struct MountedWidget {
    widget: WidgetRef,
}

impl MountedWidget {
    pub(crate) fn new(widget: WidgetRef) -> Self {
        Self { widget }
    }

    pub fn kind(&self) -> &str {
        &self.widget.kind
    }

    pub fn props(&self) -> &Map<String, Value> {
        &self.widget.props
    }

    /// Registered event names, sorted.
    pub fn events(&self) -> impl Iterator<Item = &str> {
        self.widget.callbacks.keys().map(String::as_str)
    }

    pub fn callback(&self, event: &str) -> Option<&Callback> {
        self.widget.callbacks.get(event)
    }

    /// Invoke the handler for `event`, if any. Returns whether one ran.
    pub fn fire(&self, event: &str, payload: &Value) -> bool {
        match self.callback(event) {
            Some(handler) => {
                handler(payload);
                true
            }
            None => false,
        }
    }

    fn write_html(&self, out: &mut String) {
        let props = Value::Object(self.widget.props.clone()).to_string();
        let _ = write!(
            out,
            "<div data-consent-widget=\"{}\" data-props=\"{}\"",
            escape_attr(&self.widget.kind),
            escape_attr(&props)
        );
        if !self.widget.callbacks.is_empty() {
            let events = self.events().collect::<Vec<_>>().join(" ");
            let _ = write!(out, " data-events=\"{}\"", escape_attr(&events));
        }
        out.push_str("></div>");
    }
}

impl PartialEq for MountedWidget {
    fn eq(&self, other: &Self) -> bool {
        self.widget.kind == other.widget.kind
            && self.widget.props == other.widget.props
            && self.events().eq(other.events())
    }
}

/// One entry of the document body, in render order.
#[derive(Debug, Clone, PartialEq)]
pub enum BodyNode {
    Widget(MountedWidget),
    Children(Fragment),
}

/// A composed page: head scripts, then body widgets, then children.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    title: String,
    locale: Option<String>,
    head: Vec<ScriptRef>,
    body: Vec<BodyNode>,
}

impl Document {
    pub(crate) fn new(
        title: String,
        locale: Option<String>,
        head: Vec<ScriptRef>,
        body: Vec<BodyNode>,
    ) -> Self {
        Self {
            title,
            locale,
            head,
            body,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn head_scripts(&self) -> &[ScriptRef] {
        &self.head
    }

    pub fn body(&self) -> &[BodyNode] {
        &self.body
    }

    pub fn widgets(&self) -> impl Iterator<Item = &MountedWidget> {
        self.body.iter().filter_map(|node| match node {
            BodyNode::Widget(widget) => Some(widget),
            BodyNode::Children(_) => None,
        })
    }

    pub fn widget(&self, kind: &str) -> Option<&MountedWidget> {
        self.widgets().find(|w| w.kind() == kind)
    }

    pub fn children(&self) -> Option<&Fragment> {
        self.body.iter().find_map(|node| match node {
            BodyNode::Children(children) => Some(children),
            BodyNode::Widget(_) => None,
        })
    }

    /// Serialize to a complete HTML5 document.
    pub fn to_html(&self) -> String {
        let mut out = String::with_capacity(256);
        out.push_str("<!DOCTYPE html>");
        match &self.locale {
            Some(lang) => {
                let _ = write!(out, "<html lang=\"{}\">", escape_attr(lang));
            }
            None => out.push_str("<html>"),
        }

        out.push_str("<head><meta charset=\"utf-8\">");
        let _ = write!(out, "<title>{}</title>", escape_text(&self.title));
        for script in &self.head {
            write_script(&mut out, script);
        }
        out.push_str("</head><body>");

        for node in &self.body {
            match node {
                BodyNode::Widget(widget) => widget.write_html(&mut out),
                BodyNode::Children(children) => out.push_str(children.as_str()),
            }
        }
        out.push_str("</body></html>");
        out
    }
}

/// Attributes of a `<script>` element in emission order: `src`, the timing
/// attribute, then pass-through attributes. `None` marks a boolean attribute.
pub fn script_attributes(script: &ScriptRef) -> Vec<(String, Option<String>)> {
    let mut attrs = Vec::with_capacity(script.attributes.len() + 2);
    if let ScriptSource::Url(src) = &script.source {
        attrs.push(("src".to_string(), Some(src.clone())));
    }
    match script.load_timing {
        LoadTiming::Blocking => {}
        LoadTiming::Async => attrs.push(("async".to_string(), None)),
        LoadTiming::Deferred => attrs.push(("defer".to_string(), None)),
        LoadTiming::BeforeInteractive => attrs.push((
            "data-strategy".to_string(),
            Some("beforeInteractive".to_string()),
        )),
    }
    for (name, value) in &script.attributes {
        attrs.push((name.clone(), Some(value.clone())));
    }
    attrs
}

fn write_script(out: &mut String, script: &ScriptRef) {
    out.push_str("<script");
    for (name, value) in script_attributes(script) {
        match value {
            Some(value) => {
                let _ = write!(out, " {name}=\"{}\"", escape_attr(&value));
            }
            None => {
                let _ = write!(out, " {name}");
            }
        }
    }
    out.push('>');
    if let ScriptSource::Inline(code) = &script.source {
        out.push_str(code);
    }
    out.push_str("</script>");
}

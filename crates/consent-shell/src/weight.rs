//! Page weight of a rendered shell, the figure the fixtures are compared on.

use crate::document::Document;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWeight {
    /// Size of the serialized HTML document.
    pub html_bytes: usize,
    pub external_scripts: usize,
    pub inline_scripts: usize,
    /// Total size of inline script payloads.
    pub inline_bytes: usize,
    pub widgets: usize,
    /// Hosts the page pulls scripts from, sorted and deduplicated.
    /// Page-relative scripts are first-party and not listed.
    pub script_hosts: Vec<String>,
}

impl PageWeight {
    pub fn measure(doc: &Document) -> Self {
        let mut weight = PageWeight {
            html_bytes: doc.to_html().len(),
            widgets: doc.widgets().count(),
            ..PageWeight::default()
        };

        let mut hosts = BTreeSet::new();
        for script in doc.head_scripts() {
            if let Some(src) = script.src() {
                weight.external_scripts += 1;
                if let Some(host) = script_host(src) {
                    hosts.insert(host);
                }
            } else if let Some(code) = script.inline_payload() {
                weight.inline_scripts += 1;
                weight.inline_bytes += code.len();
            }
        }
        weight.script_hosts = hosts.into_iter().collect();
        weight
    }
}

/// Host of an absolute or protocol-relative script URL.
fn script_host(src: &str) -> Option<String> {
    let parsed = match src.strip_prefix("//") {
        Some(rest) => url::Url::parse(&format!("https://{rest}")),
        None => url::Url::parse(src),
    };
    parsed.ok().and_then(|u| u.host_str().map(String::from))
}

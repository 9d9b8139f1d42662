// Copyright 2026 Consent Shell Contributors
// SPDX-License-Identifier: MIT

//! `consent-shell render <vendor>` and `consent-shell render-manifest <path>`.

use crate::cli::output::{self, Styled};
use anyhow::{Context, Result};
use consent_shell::{
    render, render_page, Document, Fragment, PageManifest, PageWeight, Vendor, VendorAccount,
    VendorPage,
};
use std::path::Path;
use tracing::debug;

/// Render one vendor fixture.
pub fn run(
    vendor: &str,
    account: VendorAccount,
    children: Option<&str>,
    out: Option<&Path>,
) -> Result<()> {
    let vendor: Vendor = vendor.parse()?;
    let page = VendorPage::new(vendor, account);
    let doc = render_page(&page, children_fragment(children))
        .with_context(|| format!("rendering {vendor} fixture"))?;
    emit(&doc, out)
}

/// Render a page described by a JSON manifest.
pub fn run_manifest(path: &Path, children: Option<&str>, out: Option<&Path>) -> Result<()> {
    let config = PageManifest::load(path)?
        .into_config()
        .with_context(|| format!("invalid manifest {}", path.display()))?;
    let doc = render(config, children_fragment(children))?;
    emit(&doc, out)
}

fn children_fragment(children: Option<&str>) -> Fragment {
    children.map(Fragment::raw).unwrap_or_default()
}

/// Write the document to `out`, or to stdout when no path is given.
pub fn emit(doc: &Document, out: Option<&Path>) -> Result<()> {
    let html = doc.to_html();
    let weight = PageWeight::measure(doc);
    debug!(title = doc.title(), bytes = weight.html_bytes, "rendered page");

    let Some(path) = out else {
        println!("{html}");
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::write(path, &html).with_context(|| format!("failed to write {}", path.display()))?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "title": doc.title(),
            "path": path.display().to_string(),
            "weight": weight,
        }));
    } else if !output::is_quiet() {
        let s = Styled::new();
        eprintln!(
            "  {} Wrote {} ({})",
            s.ok_sym(),
            path.display(),
            s.yellow(&output::format_size(weight.html_bytes as u64)),
        );
        if output::is_verbose() {
            eprintln!(
                "    {} external, {} inline scripts, {} widgets",
                weight.external_scripts, weight.inline_scripts, weight.widgets
            );
        }
    }
    Ok(())
}

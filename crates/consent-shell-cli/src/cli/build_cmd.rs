// Copyright 2026 Consent Shell Contributors
// SPDX-License-Identifier: MIT

//! `consent-shell build <dir>` — write every vendor fixture as `<slug>.html`.

use crate::cli::output::{self, Styled};
use anyhow::{Context, Result};
use consent_shell::{render_page, Fragment, Vendor, VendorAccount, VendorPage};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;

/// Render all fixtures into `dir`. Returns the written paths in vendor order.
pub fn write_all(dir: &Path, account: &VendorAccount, children: &str) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;

    let mut written = Vec::with_capacity(Vendor::ALL.len());
    for vendor in Vendor::ALL {
        let page = VendorPage::new(vendor, account.clone());
        let doc = render_page(&page, Fragment::raw(children))
            .with_context(|| format!("rendering {vendor} fixture"))?;
        let path = dir.join(format!("{}.html", vendor.slug()));
        std::fs::write(&path, doc.to_html())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(vendor = vendor.slug(), path = %path.display(), "wrote fixture");
        written.push(path);
    }
    Ok(written)
}

/// Run the build command.
pub fn run(dir: &Path, account: VendorAccount, children: Option<&str>) -> Result<()> {
    let start = Instant::now();
    let written = write_all(dir, &account, children.unwrap_or_default())?;
    let elapsed = start.elapsed();

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "dir": dir.display().to_string(),
            "files": written.iter().map(|p| p.display().to_string()).collect::<Vec<_>>(),
            "duration_ms": elapsed.as_millis() as u64,
        }));
    } else if !output::is_quiet() {
        let s = Styled::new();
        eprintln!(
            "  {} Wrote {} fixtures to {} in {}",
            s.ok_sym(),
            written.len(),
            dir.display(),
            s.yellow(&format!("{}ms", elapsed.as_millis())),
        );
    }
    Ok(())
}

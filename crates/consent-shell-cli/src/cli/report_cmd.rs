// Copyright 2026 Consent Shell Contributors
// SPDX-License-Identifier: MIT

//! `consent-shell report` — compare page weight across vendor fixtures.

use crate::cli::output::{self, Styled};
use anyhow::{Context, Result};
use chrono::Utc;
use consent_shell::{render_page, Fragment, PageWeight, Vendor, VendorAccount, VendorPage};
use serde::Serialize;

/// One line of the weight report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportRow {
    pub vendor: String,
    pub name: String,
    #[serde(flatten)]
    pub weight: PageWeight,
}

/// Render every fixture and measure it, heaviest page first.
pub fn collect(account: &VendorAccount) -> Result<Vec<ReportRow>> {
    let mut rows = Vendor::ALL
        .into_iter()
        .map(|vendor| -> Result<ReportRow> {
            let page = VendorPage::new(vendor, account.clone());
            let doc = render_page(&page, Fragment::empty())
                .with_context(|| format!("rendering {vendor} fixture"))?;
            Ok(ReportRow {
                vendor: vendor.slug().to_string(),
                name: vendor.display_name().to_string(),
                weight: PageWeight::measure(&doc),
            })
        })
        .collect::<Result<Vec<_>>>()?;

    rows.sort_by(|a, b| {
        b.weight
            .html_bytes
            .cmp(&a.weight.html_bytes)
            .then_with(|| a.vendor.cmp(&b.vendor))
    });
    Ok(rows)
}

/// Run the report command.
pub fn run(account: VendorAccount) -> Result<()> {
    let rows = collect(&account)?;

    if output::is_json() {
        output::print_json(&serde_json::json!({
            "generated_at": Utc::now().to_rfc3339(),
            "pages": rows,
        }));
        return Ok(());
    }

    let s = Styled::new();
    if !output::is_quiet() {
        output::print_header(&s);
    }
    println!(
        "  {:<20} {:>9} {:>8} {:>7} {:>8}  {}",
        "vendor", "html", "external", "inline", "widgets", "hosts"
    );
    for row in &rows {
        let w = &row.weight;
        println!(
            "  {:<20} {:>9} {:>8} {:>7} {:>8}  {}",
            row.name,
            output::format_size(w.html_bytes as u64),
            w.external_scripts,
            w.inline_scripts,
            w.widgets,
            s.dim(&w.script_hosts.join(", ")),
        );
    }
    Ok(())
}

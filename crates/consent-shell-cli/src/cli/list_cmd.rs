// Copyright 2026 Consent Shell Contributors
// SPDX-License-Identifier: MIT

//! `consent-shell list` — show the vendor fixtures.

use crate::cli::output::{self, Styled};
use anyhow::Result;
use consent_shell::Vendor;

/// Run the list command.
pub fn run() -> Result<()> {
    if output::is_json() {
        let vendors: Vec<_> = Vendor::ALL
            .iter()
            .map(|v| {
                serde_json::json!({
                    "slug": v.slug(),
                    "name": v.display_name(),
                })
            })
            .collect();
        output::print_json(&serde_json::json!({ "vendors": vendors }));
        return Ok(());
    }

    let s = Styled::new();
    if !output::is_quiet() {
        output::print_header(&s);
    }
    for vendor in Vendor::ALL {
        println!("  {} {}", s.cyan(&format!("{:<14}", vendor.slug())), vendor.display_name());
    }
    Ok(())
}

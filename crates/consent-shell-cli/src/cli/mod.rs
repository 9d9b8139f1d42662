// Copyright 2026 Consent Shell Contributors
// SPDX-License-Identifier: MIT

//! CLI subcommand implementations for the consent-shell binary.

pub mod build_cmd;
pub mod list_cmd;
pub mod output;
pub mod render_cmd;
pub mod report_cmd;

// Copyright 2026 Consent Shell Contributors
// SPDX-License-Identifier: MIT

//! Command-line front end for the consent-shell fixtures: render vendor
//! pages, write the whole fixture set, and compare page weights.

pub mod cli;

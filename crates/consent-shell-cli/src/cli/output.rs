// Copyright 2026 Consent Shell Contributors
// SPDX-License-Identifier: MIT

//! Shared CLI output formatting: colors, symbols, sizes, and the
//! quiet/verbose/json modes set from global flags.

use std::io::IsTerminal;

pub const QUIET_ENV: &str = "CONSENT_SHELL_QUIET";
pub const VERBOSE_ENV: &str = "CONSENT_SHELL_VERBOSE";
pub const JSON_ENV: &str = "CONSENT_SHELL_JSON";
pub const NO_COLOR_ENV: &str = "CONSENT_SHELL_NO_COLOR";

/// Check if color output is enabled.
pub fn color_enabled() -> bool {
    // https://no-color.org/
    if std::env::var_os("NO_COLOR").is_some() || std::env::var_os(NO_COLOR_ENV).is_some() {
        return false;
    }
    std::io::stderr().is_terminal()
}

const RED: &str = "\x1b[31m";
const YELLOW: &str = "\x1b[33m";
const CYAN: &str = "\x1b[36m";
const DIM: &str = "\x1b[2m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Colored string builder.
pub struct Styled {
    use_color: bool,
}

impl Default for Styled {
    fn default() -> Self {
        Self::new()
    }
}

impl Styled {
    pub fn new() -> Self {
        Self {
            use_color: color_enabled(),
        }
    }

    /// Green checkmark symbol.
    pub fn ok_sym(&self) -> &str {
        if self.use_color {
            "\x1b[32m\u{2713}\x1b[0m"
        } else {
            "OK"
        }
    }

    /// Red X symbol.
    pub fn fail_sym(&self) -> &str {
        if self.use_color {
            "\x1b[31m\u{2717}\x1b[0m"
        } else {
            "!!"
        }
    }

    fn paint(&self, code: &str, s: &str) -> String {
        if self.use_color {
            format!("{code}{s}{RESET}")
        } else {
            s.to_string()
        }
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(RED, s)
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint(YELLOW, s)
    }

    pub fn cyan(&self, s: &str) -> String {
        self.paint(CYAN, s)
    }

    pub fn dim(&self, s: &str) -> String {
        self.paint(DIM, s)
    }

    pub fn bold(&self, s: &str) -> String {
        self.paint(BOLD, s)
    }
}

/// Print a branded header for CLI output.
pub fn print_header(s: &Styled) {
    eprintln!(
        "  {} {}",
        s.bold("consent-shell"),
        s.dim(&format!("v{}", env!("CARGO_PKG_VERSION")))
    );
    eprintln!();
}

/// Format bytes into human-readable size (e.g., "28.7 KB").
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{bytes} B")
    }
}

pub fn is_quiet() -> bool {
    std::env::var_os(QUIET_ENV).is_some()
}

pub fn is_verbose() -> bool {
    std::env::var_os(VERBOSE_ENV).is_some()
}

pub fn is_json() -> bool {
    std::env::var_os(JSON_ENV).is_some()
}

/// Print JSON output to stdout.
pub fn print_json(value: &serde_json::Value) {
    if let Ok(s) = serde_json::to_string_pretty(value) {
        println!("{s}");
    }
}

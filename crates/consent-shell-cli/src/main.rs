// Copyright 2026 Consent Shell Contributors
// SPDX-License-Identifier: MIT

//! consent-shell — render cookie-consent vendor benchmark pages.

use clap::{Args, Parser, Subcommand};
use consent_shell::VendorAccount;
use consent_shell_cli::cli::{build_cmd, list_cmd, output, render_cmd, report_cmd};
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "consent-shell", version, about = "Consent vendor benchmark page shells")]
struct Cli {
    /// Machine-readable JSON output.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress progress output.
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Show extra detail.
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List vendor fixtures.
    List,
    /// Render one vendor fixture.
    Render {
        /// Vendor slug (see `list`).
        vendor: String,
        #[command(flatten)]
        account: AccountArgs,
        /// Markup placed in the body after the vendor widgets.
        #[arg(long)]
        children: Option<String>,
        /// Write to a file instead of stdout.
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Render a page from a JSON manifest.
    RenderManifest {
        path: PathBuf,
        #[arg(long)]
        children: Option<String>,
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Write every vendor fixture into a directory.
    Build {
        dir: PathBuf,
        #[command(flatten)]
        account: AccountArgs,
        #[arg(long)]
        children: Option<String>,
    },
    /// Compare page weight across vendor fixtures.
    Report {
        #[command(flatten)]
        account: AccountArgs,
    },
}

#[derive(Args)]
struct AccountArgs {
    /// Vendor site, domain-script, settings or API key.
    #[arg(long)]
    site_id: Option<String>,
    /// Cookie policy or notice identifier.
    #[arg(long)]
    policy_id: Option<String>,
    /// Banner language and page locale.
    #[arg(long)]
    locale: Option<String>,
}

impl AccountArgs {
    fn into_account(self) -> VendorAccount {
        let mut account = VendorAccount::default();
        if let Some(site_id) = self.site_id {
            account.site_id = site_id;
        }
        account.policy_id = self.policy_id;
        account.language = self.locale;
        account
    }
}

fn main() {
    let cli = Cli::parse();

    if cli.json {
        std::env::set_var(output::JSON_ENV, "1");
    }
    if cli.quiet {
        std::env::set_var(output::QUIET_ENV, "1");
    }
    if cli.verbose {
        std::env::set_var(output::VERBOSE_ENV, "1");
    }
    if cli.no_color {
        std::env::set_var(output::NO_COLOR_ENV, "1");
    }

    let default_level = if cli.verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(output::color_enabled())
        .init();

    info!("consent-shell v{}", env!("CARGO_PKG_VERSION"));

    let result = match cli.command {
        Command::List => list_cmd::run(),
        Command::Render {
            vendor,
            account,
            children,
            out,
        } => render_cmd::run(
            &vendor,
            account.into_account(),
            children.as_deref(),
            out.as_deref(),
        ),
        Command::RenderManifest {
            path,
            children,
            out,
        } => render_cmd::run_manifest(&path, children.as_deref(), out.as_deref()),
        Command::Build {
            dir,
            account,
            children,
        } => build_cmd::run(&dir, account.into_account(), children.as_deref()),
        Command::Report { account } => report_cmd::run(account.into_account()),
    };

    if let Err(e) = result {
        let s = output::Styled::new();
        if output::is_json() {
            output::print_json(&serde_json::json!({ "error": format!("{e:#}") }));
        } else {
            eprintln!("  {} {}", s.fail_sym(), s.red(&format!("{e:#}")));
        }
        std::process::exit(1);
    }
}

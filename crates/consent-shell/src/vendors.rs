//! Consent vendor fixtures.
//!
//! Each [`Vendor`] maps to one benchmark page: the same minimal shell with a
//! different consent-management integration mounted in it. Script URLs are
//! the vendors' public loader endpoints; account identifiers come from a
//! [`VendorAccount`] so fixtures can be pointed at real test accounts.

use crate::config::{LoadTiming, PageConfig, ScriptRef, WidgetRef};
use crate::page::{Metadata, Page};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fmt;
use std::str::FromStr;
use tracing::info;

/// Consent vendors with a benchmark fixture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Enzuzo,
    Iubenda,
    OneTrust,
    CookieYes,
    Didomi,
    Usercentrics,
    Dgp,
    DidomiSdk,
}

impl Vendor {
    pub const ALL: [Vendor; 8] = [
        Vendor::Enzuzo,
        Vendor::Iubenda,
        Vendor::OneTrust,
        Vendor::CookieYes,
        Vendor::Didomi,
        Vendor::Usercentrics,
        Vendor::Dgp,
        Vendor::DidomiSdk,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            Self::Enzuzo => "enzuzo",
            Self::Iubenda => "iubenda",
            Self::OneTrust => "onetrust",
            Self::CookieYes => "cookieyes",
            Self::Didomi => "didomi",
            Self::Usercentrics => "usercentrics",
            Self::Dgp => "dgp",
            Self::DidomiSdk => "didomi-sdk",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Enzuzo => "Enzuzo",
            Self::Iubenda => "Iubenda",
            Self::OneTrust => "OneTrust",
            Self::CookieYes => "CookieYes",
            Self::Didomi => "Didomi",
            Self::Usercentrics => "Usercentrics",
            Self::Dgp => "dgp cookie consent",
            Self::DidomiSdk => "Didomi SDK",
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Unknown vendor slug.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown vendor '{0}'")]
pub struct UnknownVendor(pub String);

impl FromStr for Vendor {
    type Err = UnknownVendor;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Vendor::ALL
            .into_iter()
            .find(|v| v.slug().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownVendor(s.to_string()))
    }
}

/// Vendor account identifiers a fixture is wired to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VendorAccount {
    /// Site, domain-script, settings or API key, depending on the vendor.
    pub site_id: String,
    /// Cookie policy or notice identifier, for vendors that have one.
    #[serde(default)]
    pub policy_id: Option<String>,
    /// Banner language; also becomes the page locale.
    #[serde(default)]
    pub language: Option<String>,
}

impl Default for VendorAccount {
    fn default() -> Self {
        Self {
            site_id: "00000000-0000-0000-0000-000000000000".to_string(),
            policy_id: None,
            language: None,
        }
    }
}

impl VendorAccount {
    pub fn new(site_id: impl Into<String>) -> Self {
        Self {
            site_id: site_id.into(),
            ..Self::default()
        }
    }

    fn policy_id(&self) -> &str {
        self.policy_id.as_deref().unwrap_or("00000000")
    }

    fn language(&self) -> &str {
        self.language.as_deref().unwrap_or("en")
    }
}

/// Build the benchmark page configuration for `vendor`.
pub fn fixture(vendor: Vendor, account: &VendorAccount) -> PageConfig {
    let mut config = PageConfig::new(format!("{} benchmark", vendor.display_name()));
    config = match vendor {
        Vendor::Enzuzo => config.script(ScriptRef::url(format!(
            "https://app.enzuzo.com/scripts/cookiebar/{}",
            account.site_id
        ))),
        Vendor::Iubenda => iubenda(config, account),
        Vendor::OneTrust => config
            .script(
                ScriptRef::url("https://cdn.cookielaw.org/scripttemplates/otSDKStub.js")
                    .attr("charset", "UTF-8")
                    .attr("data-domain-script", account.site_id.clone())
                    .attr("type", "text/javascript"),
            )
            .script(
                ScriptRef::inline("function OptanonWrapper() { }")
                    .attr("type", "text/javascript"),
            ),
        Vendor::CookieYes => config.script(
            ScriptRef::url(format!(
                "https://cdn-cookieyes.com/client_data/{}/script.js",
                account.site_id
            ))
            .attr("id", "cookieyes")
            .attr("type", "text/javascript"),
        ),
        Vendor::Didomi => didomi(config, account),
        Vendor::Usercentrics => {
            let mut loader = ScriptRef::url("https://web.cmp.usercentrics.eu/ui/loader.js")
                .timing(LoadTiming::BeforeInteractive)
                .attr("id", "usercentrics-cmp")
                .attr("data-settings-id", account.site_id.clone());
            if let Some(language) = &account.language {
                loader = loader.attr("data-language", language.clone());
            }
            config.script(loader)
        }
        Vendor::Dgp => config.widget(
            WidgetRef::new("dgp-cookie-consent")
                .prop("siteId", account.site_id.clone())
                .prop("position", "bottom")
                .prop("language", account.language())
                .prop(
                    "categories",
                    json!(["necessary", "preferences", "statistics", "marketing"]),
                ),
        ),
        Vendor::DidomiSdk => config.widget(
            WidgetRef::new("didomi-sdk")
                .prop("apiKey", account.site_id.clone())
                .prop("noticeId", account.policy_id())
                .prop("gdprAppliesGlobally", true)
                .prop("embedTCFStub", true)
                .on("onReady", |payload: &Value| {
                    info!(%payload, "didomi sdk ready");
                })
                .on("onConsentChanged", |payload: &Value| {
                    info!(%payload, "didomi consent changed");
                }),
        ),
    };

    if let Some(language) = &account.language {
        config = config.locale(language.clone());
    }
    config
}

fn iubenda(config: PageConfig, account: &VendorAccount) -> PageConfig {
    let cs_configuration = script_json(&json!({
        "siteId": account.site_id,
        "cookiePolicyId": account.policy_id(),
        "lang": account.language(),
        "banner": { "position": "float-bottom-center", "acceptButtonDisplay": true },
    }));
    config
        .script(ScriptRef::inline(format!(
            "var _iub = _iub || []; _iub.csConfiguration = {cs_configuration};"
        )))
        .script(ScriptRef::url(format!(
            "https://cs.iubenda.com/autoblocking/{}.js",
            account.site_id
        )))
        .script(
            ScriptRef::url("https://cdn.iubenda.com/cs/iubenda_cs.js")
                .timing(LoadTiming::Async)
                .attr("charset", "UTF-8")
                .attr("type", "text/javascript"),
        )
}

fn didomi(config: PageConfig, account: &VendorAccount) -> PageConfig {
    let bootstrap = format!(
        "window.didomiConfig = {{}}; window.gdprAppliesGlobally = true; \
         window.didomiNoticeId = {};",
        script_json(&Value::from(account.policy_id()))
    );
    config
        .script(ScriptRef::inline(bootstrap).attr("type", "text/javascript"))
        .script(
            ScriptRef::url(format!(
                "https://sdk.privacy-center.org/{}/loader.js?target_type=notice&target={}",
                account.site_id,
                account.policy_id()
            ))
            .timing(LoadTiming::Async)
            .attr("charset", "utf-8")
            .attr("type", "text/javascript"),
        )
}

/// Encode account data as a JS literal for an inline payload. `<` is
/// written as `\u003c` so no value can close the surrounding `<script>`.
fn script_json(value: &Value) -> String {
    value.to_string().replace('<', "\\u003c")
}

/// A catalog fixture as a host page.
#[derive(Debug, Clone)]
pub struct VendorPage {
    pub vendor: Vendor,
    pub account: VendorAccount,
}

impl VendorPage {
    pub fn new(vendor: Vendor, account: VendorAccount) -> Self {
        Self { vendor, account }
    }
}

impl Page for VendorPage {
    fn metadata(&self) -> Metadata {
        Metadata::new(format!("{} benchmark", self.vendor.display_name()))
    }

    fn shell(&self) -> PageConfig {
        fixture(self.vendor, &self.account)
    }
}

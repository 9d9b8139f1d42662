//! Page shells for cookie-consent vendor benchmarks.
//!
//! Every benchmark page is the same minimal document with one vendor's
//! consent integration mounted in it. [`compose::render`] builds that
//! document from a [`PageConfig`]: head scripts in order, then body widgets
//! in order, then the page's own content.
//!
//! ```
//! use consent_shell::{render, Fragment, LoadTiming, PageConfig, ScriptRef};
//!
//! let config = PageConfig::new("benchmark").script(
//!     ScriptRef::url("https://vendor.example/a.js")
//!         .timing(LoadTiming::Async)
//!         .attr("data-id", "X"),
//! );
//! let doc = render(config, Fragment::raw("<span>hi</span>")).unwrap();
//! assert!(doc.to_html().contains(r#"<script src="https://vendor.example/a.js" async data-id="X"></script>"#));
//! ```

pub mod compose;
pub mod config;
pub mod document;
pub mod error;
pub mod escape;
pub mod manifest;
pub mod page;
pub mod vendors;
pub mod weight;

pub use compose::render;
pub use config::{Callback, LoadTiming, PageConfig, ScriptRef, ScriptSource, WidgetRef};
pub use document::{BodyNode, Document, Fragment, MountedWidget};
pub use error::{ConfigError, ManifestError};
pub use manifest::PageManifest;
pub use page::{render_page, Metadata, Page};
pub use vendors::{fixture, Vendor, VendorAccount, VendorPage};
pub use weight::PageWeight;

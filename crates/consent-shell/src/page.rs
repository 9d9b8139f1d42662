//! Host-facing page contract: metadata registration plus the shell a page
//! renders into.

use crate::compose;
use crate::config::PageConfig;
use crate::document::{Document, Fragment};
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Per-page metadata registered with the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub title: String,
}

impl Metadata {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
        }
    }
}

/// A page the host can render. The host supplies the nested content.
pub trait Page {
    fn metadata(&self) -> Metadata;

    /// The shell's mounts. Its title is replaced by [`Page::metadata`].
    fn shell(&self) -> PageConfig;
}

/// Render `page` around `children`, using the registered metadata title.
pub fn render_page(page: &dyn Page, children: Fragment) -> Result<Document> {
    let mut config = page.shell();
    config.title = page.metadata().title;
    compose::render(config, children)
}

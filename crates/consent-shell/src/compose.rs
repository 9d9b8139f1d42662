//! The page shell composer.
//!
//! Turns a [`PageConfig`] and the page's nested content into a [`Document`]:
//! head scripts in input order, then body widgets in input order, then the
//! children. Validation happens up front so a failed render builds nothing.

use crate::config::PageConfig;
use crate::document::{BodyNode, Document, Fragment, MountedWidget};
use crate::error::Result;
use tracing::{debug, trace};

/// Compose a page shell.
///
/// `children` is opaque and ends up last in the body, unmodified. Widget
/// callbacks are carried into the document but never invoked here.
pub fn render(config: PageConfig, children: Fragment) -> Result<Document> {
    config.validate()?;

    let PageConfig {
        title,
        head_scripts,
        body_widgets,
        locale,
    } = config;

    debug!(
        title = %title,
        scripts = head_scripts.len(),
        widgets = body_widgets.len(),
        "composing page shell"
    );

    for (index, script) in head_scripts.iter().enumerate() {
        trace!(
            index,
            src = script.src().unwrap_or("<inline>"),
            timing = %script.load_timing,
            "mounting head script"
        );
    }

    let mut body = Vec::with_capacity(body_widgets.len() + 1);
    for (index, widget) in body_widgets.into_iter().enumerate() {
        trace!(index, kind = %widget.kind, "mounting body widget");
        body.push(BodyNode::Widget(MountedWidget::new(widget)));
    }
    body.push(BodyNode::Children(children));

    Ok(Document::new(title, locale, head_scripts, body))
}

//! Anchor rewriting: origin links become proxy-relative.
//!
//! Every anchor under `body` whose `href` contains the upstream origin is
//! rewritten so the browser stays on the proxy: the origin substring is
//! replaced with `/` and any doubled slashes are collapsed.

use kuchiki::NodeRef;

/// Rewrite origin anchors under `body` to proxy-relative hrefs.
///
/// Anchors without an href, or whose href does not contain the origin, are
/// untouched. Only attribute values change; tree structure never does.
pub fn rewrite_links(document: &NodeRef, origin: &str) {
    let selector = format!("body a[href*='{}']", origin);
    let Ok(anchors) = document.select(&selector) else {
        return;
    };

    for anchor in anchors {
        let mut attributes = anchor.attributes.borrow_mut();
        let Some(href) = attributes.get("href").map(str::to_owned) else {
            continue;
        };

        let rewritten = href.replace(origin, "/").replace("//", "/");
        tracing::trace!(from = %href, to = %rewritten, "Rewrote anchor");
        attributes.insert("href", rewritten);
    }
}

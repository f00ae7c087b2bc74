//! Head resource fixing: relative stylesheet links become absolute.
//!
//! The proxy does not serve arbitrary upstream paths itself, so `head link`
//! references that start with a path-absolute slash are pointed back at the
//! origin. Already-absolute hrefs are untouched.

use kuchiki::NodeRef;

/// Prefix the origin onto every `head link` href that starts with `/`.
pub fn absolutize_head_links(document: &NodeRef, origin: &str) {
    let Ok(links) = document.select("head link") else {
        return;
    };

    for link in links {
        let mut attributes = link.attributes.borrow_mut();
        let Some(href) = attributes.get("href").map(str::to_owned) else {
            continue;
        };
        if !href.starts_with('/') {
            continue;
        }

        attributes.insert("href", format!("{}{}", origin, href));
    }
}

//! Font asset localization.
//!
//! # Responsibilities
//! - Find the first `head style` element (none → no-op)
//! - Extract `@font-face` source URLs from its text
//! - Mirror each referenced font under the asset root
//!
//! # Design Decisions
//! - Distinct assets download concurrently; the stage joins all of them
//!   before the pipeline moves on
//! - A failed fetch is logged and isolated; it never aborts the request or
//!   the other assets
//! - The style text itself is not rewritten; the mirror is a side effect

use std::collections::HashSet;

use kuchiki::NodeRef;

use crate::assets::AssetStore;
use crate::error::ProxyError;
use crate::http::client::UpstreamClient;
use crate::rewrite::css;

/// Mirror every font referenced by the document's embedded style text.
pub async fn localize_fonts(document: &NodeRef, client: &UpstreamClient, store: &AssetStore) {
    let Ok(style) = document.select_first("head style") else {
        return;
    };

    let css_text = style.as_node().text_contents();
    let urls = css::extract_font_urls(&css_text);
    if urls.is_empty() {
        return;
    }

    // Canonicalize (drop the query string) and dedup before spawning, so
    // concurrent tasks within one request always write disjoint paths.
    let mut seen = HashSet::new();
    let mut tasks = Vec::new();
    for url in urls {
        let canonical = match url.split('?').next() {
            Some(path) if !path.is_empty() => path.to_string(),
            _ => continue,
        };
        if !seen.insert(canonical.clone()) {
            continue;
        }

        let client = client.clone();
        let store = store.clone();
        tasks.push(tokio::spawn(async move {
            if let Err(err) = localize_one(&client, &store, &canonical).await {
                tracing::warn!(
                    path = %canonical,
                    error = %err,
                    "Font asset localization failed"
                );
            }
        }));
    }

    // The task bodies log their own failures; a join error here means a
    // task panicked, which must not take the request down with it.
    for result in futures_util::future::join_all(tasks).await {
        if let Err(err) = result {
            tracing::error!(error = %err, "Font localization task panicked");
        }
    }
}

async fn localize_one(
    client: &UpstreamClient,
    store: &AssetStore,
    canonical: &str,
) -> Result<(), ProxyError> {
    let local = store.local_path(canonical)?;

    if store.contains(&local).await {
        tracing::debug!(path = %canonical, "Font already localized");
        return Ok(());
    }

    store.prepare(&local).await?;
    client.download_to_file(canonical, &local).await?;

    tracing::info!(path = %canonical, file = %local.display(), "Font localized");
    Ok(())
}

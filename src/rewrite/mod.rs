//! Document rewrite pipeline.
//!
//! # Data Flow
//! ```text
//! parsed document
//!     → links.rs      (origin anchors → proxy-relative hrefs)
//!     → resources.rs  (relative head links → absolute origin URLs)
//!     → fonts.rs      (mirror @font-face sources to the asset store)
//!     → annotate.rs   (trademark sign on qualifying words)
//!     → serialized back to the client
//! ```
//!
//! # Design Decisions
//! - Stages run strictly in order over one exclusively-owned document
//! - Annotation runs last so it never sees attribute values
//! - Font localization only touches the filesystem; style text is left
//!   pointing at the origin

pub mod annotate;
pub mod css;
pub mod fonts;
pub mod links;
pub mod resources;

use kuchiki::NodeRef;

use crate::assets::AssetStore;
use crate::http::client::UpstreamClient;

/// Run all four rewrite stages over a freshly parsed document.
pub async fn run_pipeline(document: &NodeRef, client: &UpstreamClient, store: &AssetStore) {
    links::rewrite_links(document, client.origin());
    resources::absolutize_head_links(document, client.origin());
    fonts::localize_fonts(document, client, store).await;
    annotate::annotate_document(document);
}

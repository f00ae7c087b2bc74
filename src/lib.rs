//! Content-rewriting proxy library.
//!
//! Fetches pages from a fixed upstream origin, rewrites the markup so the
//! site stays browsable through the proxy, mirrors referenced font assets
//! to local storage, and annotates visible text with a trademark sign.

pub mod assets;
pub mod config;
pub mod error;
pub mod http;
pub mod rewrite;

pub use config::ProxyConfig;
pub use error::ProxyError;
pub use http::HttpServer;

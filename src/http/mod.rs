//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request (any path)
//!     → server.rs (Axum catch-all handler)
//!     → client.rs (fetch origin page)
//!     → rewrite pipeline (links, resources, fonts, annotation)
//!     → serialized document back to client
//! ```

pub mod client;
pub mod server;

pub use client::UpstreamClient;
pub use server::HttpServer;

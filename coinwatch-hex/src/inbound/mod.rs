//! HTTP Inbound Adapter
//!
//! Axum-based HTTP server that drives the application layer.

pub(crate) mod handlers;
mod server;
mod timeparse;

pub use server::HttpServer;

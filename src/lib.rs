//! newsdesk library
//!
//! Exposes the loader, storage, client and rendering modules for the binary
//! and for integration tests.

pub mod app;
pub mod cache;
pub mod cli;
pub mod data;
pub mod loader;
pub mod logging;
pub mod opener;
pub mod ui;

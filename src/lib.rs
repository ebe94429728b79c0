//! repobrowse: Remote Repository Directory Browser
//!
//! Resolves root-relative locations to repository paths, fetches directory
//! listings from a contents API, and renders them as tables whose
//! last-modified dates are filled in concurrently and cached.

pub mod config;
pub mod enrich;
pub mod error;
pub mod fetcher;
pub mod logging;
pub mod navigation;
pub mod path;
pub mod router;
pub mod source;
pub mod store;
pub mod tooling;
pub mod types;
pub mod views;

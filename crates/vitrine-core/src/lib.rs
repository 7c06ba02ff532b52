//! Core types and trait definitions for the Vitrine portfolio backend.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod content;
pub mod entity;
pub mod error;
pub mod interaction;
pub mod session;
pub mod slug;
pub mod store;
pub mod upload;
pub mod user;

pub use error::{Error, Result};

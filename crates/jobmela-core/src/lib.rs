//! Core types and trait definitions for the JobMela registration portal.
//!
//! This crate is free of HTTP and database dependencies. The server and the
//! storage backend both depend on it; it depends on neither.

// Native `async fn` in traits; the store trait spells out `Send` futures
// explicitly where it matters.
#![allow(async_fn_in_trait)]

pub mod candidate;
pub mod data_url;
pub mod error;
pub mod registration;
pub mod store;

pub use error::{Error, Result};

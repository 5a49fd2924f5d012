//! Core types and the response-retrieval engine for chum.
//!
//! This crate is deliberately free of database and terminal dependencies.
//! Storage backends implement [`store::ChatStore`]; the engine in
//! [`select`] only ever reads through that trait.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod friend;
pub mod normalize;
pub mod select;
pub mod statement;
pub mod store;

pub use error::{Error, Result};
pub use normalize::{Keywords, normalize};
pub use select::{Reply, select_response};

//! Core types and trait definitions for Daybook.
//!
//! This crate is free of I/O. It defines the lesson domain, the cache table
//! layout, and the collaborator traits (event source, roster, lesson cache)
//! that the sync pipeline is generic over.

// Native `async fn` in traits; the returned futures carry explicit `Send`
// bounds where it matters.
#![allow(async_fn_in_trait)]

pub mod config;
pub mod day;
pub mod error;
pub mod event;
pub mod lesson;
pub mod store;
pub mod table;

pub use error::{Error, Result};

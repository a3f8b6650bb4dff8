//! Boutique Core - Shared domain types.
//!
//! This crate provides the records used across all Boutique components:
//! - `storefront` - Stores, storage backends and the JSON API
//! - `cli` - Command-line tools for migrations and order administration
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no storage
//! access, no HTTP. Everything here serializes to the camelCase JSON shape
//! the stores persist.
//!
//! # Modules
//!
//! - [`types`] - Ids, prices, ratings, order statuses and the entity records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;

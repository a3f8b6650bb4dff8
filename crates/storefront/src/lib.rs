//! Boutique storefront library.
//!
//! Storage backends, the catalog, cart, testimonial and order stores, and
//! the JSON API built on them. The server binary and the `boutique` CLI are
//! thin wrappers over this crate.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod storage;
pub mod stores;

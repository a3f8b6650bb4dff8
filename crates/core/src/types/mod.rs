//! Core types for Boutique.
//!
//! This module provides type-safe wrappers for ids, money and statuses, plus
//! the catalog, cart, testimonial and order records built from them.

pub mod cart;
pub mod id;
pub mod order;
pub mod price;
pub mod product;
pub mod status;
pub mod testimonial;

pub use cart::{CartItem, cart_count, cart_total};
pub use id::*;
pub use order::{CustomerInfo, Order};
pub use price::{CurrencyCode, Price};
pub use product::Product;
pub use status::*;
pub use testimonial::{NewTestimonial, Rating, RatingError, Testimonial};

//! Wishlist items
//!
//! Persistence mapping for the items placed inside a customer's wishlist, each
//! one linking a wishlist to a specific product variant.
#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![allow(elided_lifetimes_in_paths)]
#![warn(clippy::all, clippy::perf, clippy::dbg_macro)]

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod repositories;

pub use entities::commerce::wishlist_item::{NewWishlistItem, WishlistItemChanges};
pub use errors::ServiceError;
pub use repositories::wishlist_item_repository::WishlistItemRepository;

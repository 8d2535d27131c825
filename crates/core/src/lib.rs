//! Buy01 Core - Shared domain types.
//!
//! This crate provides the records and value types exchanged with the Buy01
//! REST backend. Used by:
//! - `storefront` - REST client, session state and form orchestration
//! - `cli` - Command-line storefront built on the client
//!
//! # Architecture
//!
//! The core crate contains only types and pure helpers - no I/O, no HTTP
//! clients, no storage. This keeps it lightweight and usable anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for ids, emails, roles and prices
//! - [`models`] - `User`, `Product` and `ProductImage` records
//! - [`util`] - List helpers used by product listings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod models;
pub mod types;
pub mod util;

pub use models::*;
pub use types::*;
pub use util::reverse_list;

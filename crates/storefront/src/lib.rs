//! Buy01 Storefront client library.
//!
//! A typed client for the Buy01 REST backend. It owns the session (token
//! and cached user), knows every endpoint, translates HTTP failures into
//! user-facing messages and orchestrates the multi-step forms of the
//! storefront.
//!
//! # Modules
//!
//! - [`client`] - [`StorefrontClient`], the session holder every call goes through
//! - [`services`] - auth, users, products and admin operations on the client
//! - [`forms`] - product, profile and auth forms with local validation
//! - [`guard`] - route guard
//! - [`catalog`] - search, filter and sort for product listings
//! - [`error`] - [`ApiError`] and the HTTP error message table

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod batch;
pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod forms;
pub mod guard;
pub mod retry;
pub mod services;
pub mod state;
pub mod storage;
pub mod token;
pub mod upload;

pub use batch::{BatchKind, BatchReport};
pub use catalog::{CatalogQuery, SortField, SortOrder};
pub use client::StorefrontClient;
pub use config::{ConfigError, StorefrontConfig};
pub use error::{ApiError, handle_http_error};
pub use forms::{AuthForm, FormError, ProductForm, ProfileForm, SubmitOutcome};
pub use guard::{GuardDecision, authorize};
pub use state::{Notifier, SessionState, StatusMessage};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use upload::Upload;

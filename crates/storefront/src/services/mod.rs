//! Backend operations, grouped by resource.
//!
//! Each module adds methods to [`StorefrontClient`](crate::StorefrontClient):
//!
//! - `auth` - sign in/up/out and token validation
//! - `users` - profile and avatar
//! - `products` - listings, seller CRUD and product images
//! - `admin` - user administration

pub mod admin;
pub mod auth;
pub mod products;
pub mod users;

pub use auth::{AUTH_CHECK_FAILED, Credentials, Registration};
pub use products::{NewProduct, ProductUpdate};
pub use users::UserUpdate;

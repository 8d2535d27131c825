//! Records exchanged with the backend.

pub mod product;
pub mod user;

pub use product::{Product, ProductImage};
pub use user::User;

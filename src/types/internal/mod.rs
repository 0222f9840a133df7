// Internal types shared between stores and services
pub mod account;
pub mod auth;

pub use account::{AccountKind, AuthAccount};
pub use auth::Claims;

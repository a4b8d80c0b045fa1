//! # Users Core
//!
//! Core business logic for the users service.
//!
//! This crate contains pure data operations:
//! - The user record model and the projection of loosely shaped request bodies into it
//! - The in-memory [`UserStore`] holding the user collection
//! - Startup configuration resolved once and passed into the server
//!
//! **No API concerns**: routing, status codes and JSON error bodies belong in `api-rest`.

pub mod config;
pub mod error;
pub mod store;
pub mod user;

pub use config::{port_from_env_value, CoreConfig, DEFAULT_PORT};
pub use error::{CoreError, CoreResult};
pub use store::UserStore;
pub use user::{is_truthy, User, UserFields, UserPayload};
pub use users_uuid::{UserId, UuidError};

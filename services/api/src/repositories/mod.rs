//! Repositories backing the credential service

pub mod user;

pub use user::{UserRepository, UserStoreError};

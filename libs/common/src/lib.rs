//! Shared infrastructure for the book catalog gateway
//!
//! This crate provides the pieces the gateway's services lean on:
//! PostgreSQL connection pooling for the credential store and the shared
//! database error types.

pub mod database;
pub mod error;

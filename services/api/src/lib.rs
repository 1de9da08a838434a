//! Book catalog gateway
//!
//! A thin HTTP backend with two stateless components: a credential service
//! that registers users and issues bearer tokens, and a catalog aggregator
//! that reshapes queries against an external book catalog. Both sit on one
//! axum router; no data flows between them.

pub mod catalog;
pub mod error;
pub mod jwt;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod validation;

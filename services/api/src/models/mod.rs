//! Request, response, and catalog payload models

pub mod catalog;
pub mod user;

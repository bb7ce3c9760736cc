//! # campfire-database
//!
//! PostgreSQL connection management (with embedded migrations) and the concrete
//! repositories for users and partners.

pub mod connection;
pub mod repositories;

pub use connection::DatabasePool;

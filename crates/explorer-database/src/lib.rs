//! # explorer-database
//!
//! PostgreSQL connection management, repository traits, and their
//! PostgreSQL and in-memory implementations.
//!
//! Every mutating repository call is a single atomic document operation:
//! one SQL statement, or one closure run under the entry's map lock.

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use connection::DatabasePool;
pub use store::Repositories;

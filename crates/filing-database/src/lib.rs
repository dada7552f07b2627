//! # filing-database
//!
//! PostgreSQL connection management for the filing system. The folder
//! hierarchy is memory-only; this crate only establishes and checks the
//! backend connection.

pub mod connection;

pub use connection::DatabasePool;

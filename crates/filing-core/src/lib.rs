//! # filing-core
//!
//! Core crate for the filing system. Contains configuration schemas,
//! typed identifiers and the unified error system.
//!
//! This crate has **no** internal dependencies on other filing crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::AppError;
pub use result::AppResult;

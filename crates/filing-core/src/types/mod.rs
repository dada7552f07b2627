//! Core type definitions used across the filing workspace.

pub mod id;

pub use id::*;

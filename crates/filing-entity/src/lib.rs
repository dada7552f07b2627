//! # filing-entity
//!
//! Domain entity models for the filing system. Entities derive `Debug`,
//! `Clone`, `Serialize` and `Deserialize` so that snapshots can be handed
//! to callers and rendered as JSON.

pub mod folder;

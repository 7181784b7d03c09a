//! Domain records persisted by the guild storage layer.
//!
//! These types are owned by the in-memory guild managers; the storage
//! crate only serializes them. Field names are serialized in camelCase.

pub mod arena;
pub mod challenge;

pub use arena::{Arena, ArenaLocation};
pub use challenge::GuildChallenge;

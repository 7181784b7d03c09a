//! Async provider trait definitions for the persistence layer.
//!
//! One trait per record type, implemented once per backend. Providers see
//! only string ids and already-serialized data; encoding belongs to the
//! adapters. Every method takes the table prefix, which non-relational
//! backends ignore.
//!
//! Methods return `impl Future + Send` rather than using `async fn` so that
//! the futures are guaranteed `Send` and can be driven from `tokio::spawn`.

use super::PersistenceError;
use std::future::Future;

/// Storage operations for arenas.
pub trait ArenaProvider: Send + Sync {
    /// Create the directory or table that holds arenas. Idempotent.
    fn create_container(
        &self,
        table_prefix: Option<&str>,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn arena_exists(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    fn get_all_arena_ids(
        &self,
        table_prefix: Option<&str>,
    ) -> impl Future<Output = Result<Vec<String>, PersistenceError>> + Send;
    /// Serialized data of every stored arena.
    fn get_all_arenas(
        &self,
        table_prefix: Option<&str>,
    ) -> impl Future<Output = Result<Vec<String>, PersistenceError>> + Send;
    fn get_arena(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> impl Future<Output = Result<Option<String>, PersistenceError>> + Send;
    fn create_arena(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn update_arena(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn delete_arena(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}

/// Storage operations for guild challenges.
pub trait ChallengeProvider: Send + Sync {
    /// Create the directory or table that holds challenges. Idempotent.
    fn create_container(
        &self,
        table_prefix: Option<&str>,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn challenge_exists(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> impl Future<Output = Result<bool, PersistenceError>> + Send;
    fn get_all_challenge_ids(
        &self,
        table_prefix: Option<&str>,
    ) -> impl Future<Output = Result<Vec<String>, PersistenceError>> + Send;
    /// Serialized data of every stored challenge.
    fn get_all_challenges(
        &self,
        table_prefix: Option<&str>,
    ) -> impl Future<Output = Result<Vec<String>, PersistenceError>> + Send;
    fn get_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> impl Future<Output = Result<Option<String>, PersistenceError>> + Send;
    fn create_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn update_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
        data: &str,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
    fn delete_challenge(
        &self,
        table_prefix: Option<&str>,
        id: &str,
    ) -> impl Future<Output = Result<(), PersistenceError>> + Send;
}

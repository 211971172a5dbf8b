//! crates/openhealth_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the
//! core to be independent of specific external implementations like the file
//! store or the remote backend.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::domain::{Account, Dataset, Idea, Message, Problem, Thread};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services.
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Service unavailable: {0}")]
    Unavailable(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Local Persistence Port
//=========================================================================================

/// An origin-scoped key-value store holding JSON strings under fixed keys.
///
/// The shape deliberately mirrors a browser local store: get/set/remove on
/// string values, no transactions, a set is a whole-value overwrite.
/// Implementations absorb their own I/O failures; callers never see an error
/// from this boundary.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

/// Loads and parses the value under `key`, degrading to `fallback()` when the
/// key is missing or holds unparsable JSON. Parse failures are fail-open by
/// contract: the caller gets seed/empty data, never an error.
pub fn load_or<T, F>(store: &dyn KeyValueStore, key: &str, fallback: F) -> T
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    match store.get(key) {
        Some(raw) => match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "stored value is unparsable, using fallback");
                fallback()
            }
        },
        None => fallback(),
    }
}

/// Serializes `value` and overwrites the whole entry under `key`.
/// A serialization failure is logged and dropped, matching the fail-open
/// behaviour of the rest of this boundary.
pub fn save<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(e) => warn!(key, error = %e, "failed to serialize value for store"),
    }
}

//=========================================================================================
// Remote Backend Port (the external actor interface)
//=========================================================================================

/// The abstract remote backend this application optionally calls.
///
/// Treated as an untrusted, possibly-absent collaborator: every operation may
/// fail or the whole service may be unconfigured, and every call site must
/// tolerate both. Local persistence, not this interface, carries the
/// user-visible contract.
#[async_trait]
pub trait BackendService: Send + Sync {
    async fn list_problems(&self) -> PortResult<Vec<Problem>>;
    async fn get_problem_by_id(&self, id: i64) -> PortResult<Problem>;
    async fn submit_problem(
        &self,
        title: &str,
        description: &str,
        submitted_by: &str,
    ) -> PortResult<i64>;

    async fn list_ideas_by_problem_id(&self, problem_id: u64) -> PortResult<Vec<Idea>>;
    async fn store_idea(&self, idea: &Idea) -> PortResult<u64>;

    async fn list_threads(&self) -> PortResult<Vec<Thread>>;
    async fn create_thread(&self, title: &str, problem_id: &str) -> PortResult<String>;
    async fn get_thread_messages(&self, thread_id: &str) -> PortResult<Vec<Message>>;
    async fn post_message(&self, thread_id: &str, content: &str, author: &str) -> PortResult<()>;

    async fn list_datasets(&self) -> PortResult<Vec<Dataset>>;
    async fn get_dataset_by_id(&self, id: u64) -> PortResult<Dataset>;
    async fn add_dataset(&self, dataset: &Dataset) -> PortResult<()>;

    async fn register_user(&self, account: &Account) -> PortResult<()>;
    async fn validate_login(&self, email: &str, fingerprint: &str) -> PortResult<bool>;
    async fn get_user_profile(&self, email: &str) -> PortResult<Account>;
}

//=========================================================================================
// "AI" Service Ports
//=========================================================================================

#[async_trait]
pub trait ProblemRefinementService: Send + Sync {
    /// Rewrites a raw problem draft into a structured problem statement.
    async fn refine(&self, title: &str, description: &str, category: &str) -> PortResult<String>;
}

#[async_trait]
pub trait IdeaGenerationService: Send + Sync {
    /// Produces exactly three solution ideas for the named problem.
    async fn generate(&self, problem_title: &str) -> PortResult<Vec<Idea>>;
}

pub trait ThreadSummaryService: Send + Sync {
    /// Produces a one-paragraph summary of a thread's discussion.
    fn summarize(&self, thread: &Thread) -> String;
}

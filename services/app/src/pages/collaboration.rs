//! services/app/src/pages/collaboration.rs
//!
//! The collaboration hub: threads of messages persisted under a single store
//! key, seeded with sample conversations on first run. Cross-process "sync"
//! is a poll of the store on an interval, published through a watch channel;
//! last write wins, no merging.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use openhealth_core::domain::{Message, ProblemRef, SessionUser, Thread};
use openhealth_core::ports::{
    load_or, save, BackendService, KeyValueStore, ThreadSummaryService,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use uuid::Uuid;

use crate::keys;

/// Sample threads used to populate an empty store.
fn seed_threads() -> Vec<Thread> {
    let now = Utc::now().timestamp_millis();
    vec![
        Thread {
            id: "1".into(),
            title: "AI Solutions for Drug Interaction Safety".into(),
            problem_id: "1".into(),
            messages: vec![
                Message {
                    id: "m1".into(),
                    content: "I think we should focus on natural language processing to \
                        extract drug mentions from clinical notes."
                        .into(),
                    author: "Dr. Emily Chen".into(),
                    timestamp: now - 3_600_000,
                    thread_id: "1".into(),
                },
                Message {
                    id: "m2".into(),
                    content: "Great idea! We could combine that with a graph database of \
                        known interactions."
                        .into(),
                    author: "James Rodriguez".into(),
                    timestamp: now - 1_800_000,
                    thread_id: "1".into(),
                },
            ],
        },
        Thread {
            id: "2".into(),
            title: "Reducing ICU Patient Deterioration".into(),
            problem_id: "2".into(),
            messages: vec![Message {
                id: "m3".into(),
                content: "Continuous monitoring combined with ML could give us 4-6 hours of \
                    advance warning."
                    .into(),
                author: "Dr. Sarah Kim".into(),
                timestamp: now - 7_200_000,
                thread_id: "2".into(),
            }],
        },
        Thread {
            id: "3".into(),
            title: "Mental Health Digital Therapeutics".into(),
            problem_id: "3".into(),
            messages: vec![],
        },
    ]
}

/// The problems a new thread can be attached to.
pub fn problem_choices() -> Vec<ProblemRef> {
    vec![
        ProblemRef {
            id: "1".into(),
            title: "Early Sepsis Detection".into(),
        },
        ProblemRef {
            id: "2".into(),
            title: "Medication Adherence".into(),
        },
        ProblemRef {
            id: "3".into(),
            title: "Emergency Wait Times".into(),
        },
    ]
}

/// Failures of thread/message actions; all recoverable, shown inline.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CollabError {
    #[error("Thread title is required")]
    EmptyTitle,
    #[error("Message content is required")]
    EmptyMessage,
    #[error("Unknown thread: {0}")]
    UnknownThread(String),
}

//=========================================================================================
// CollaborationHub
//=========================================================================================

#[derive(Clone)]
pub struct CollaborationHub {
    store: Arc<dyn KeyValueStore>,
    backend: Option<Arc<dyn BackendService>>,
    summarizer: Arc<dyn ThreadSummaryService>,
}

impl CollaborationHub {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        backend: Option<Arc<dyn BackendService>>,
        summarizer: Arc<dyn ThreadSummaryService>,
    ) -> Self {
        Self {
            store,
            backend,
            summarizer,
        }
    }

    /// All threads; an absent or corrupt store entry yields the seed data.
    pub fn threads(&self) -> Vec<Thread> {
        load_or(self.store.as_ref(), keys::THREADS, seed_threads)
    }

    pub fn thread(&self, id: &str) -> Option<Thread> {
        self.threads().into_iter().find(|t| t.id == id)
    }

    /// Creates a thread with a timestamp-derived id. An unspecified problem
    /// attaches to problem "1", matching the existing stored data.
    pub async fn create_thread(
        &self,
        title: &str,
        problem_id: Option<&str>,
    ) -> Result<Thread, CollabError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(CollabError::EmptyTitle);
        }

        let thread = Thread {
            id: Utc::now().timestamp_millis().to_string(),
            title: title.to_string(),
            problem_id: problem_id.filter(|p| !p.is_empty()).unwrap_or("1").to_string(),
            messages: vec![],
        };

        let mut threads = self.threads();
        threads.push(thread.clone());
        save(self.store.as_ref(), keys::THREADS, &threads);
        info!(id = %thread.id, "thread created");

        if let Some(backend) = &self.backend {
            if let Err(e) = backend.create_thread(&thread.title, &thread.problem_id).await {
                debug!(error = %e, "backend thread mirror failed");
            }
        }
        Ok(thread)
    }

    /// Appends a message to its thread and rewrites the full snapshot. Other
    /// threads are untouched. The mirror to the backend is best-effort.
    pub async fn post_message(
        &self,
        thread_id: &str,
        content: &str,
        user: Option<&SessionUser>,
    ) -> Result<Message, CollabError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(CollabError::EmptyMessage);
        }

        let mut threads = self.threads();
        let thread = threads
            .iter_mut()
            .find(|t| t.id == thread_id)
            .ok_or_else(|| CollabError::UnknownThread(thread_id.to_string()))?;

        let message = Message {
            id: Uuid::new_v4().to_string(),
            content: content.to_string(),
            author: user.map(|u| u.name.clone()).unwrap_or_else(|| "Anonymous".into()),
            timestamp: Utc::now().timestamp_millis(),
            thread_id: thread_id.to_string(),
        };
        thread.messages.push(message.clone());
        save(self.store.as_ref(), keys::THREADS, &threads);

        if let Some(backend) = &self.backend {
            if let Err(e) = backend
                .post_message(thread_id, &message.content, &message.author)
                .await
            {
                debug!(error = %e, "backend message mirror failed");
            }
        }
        Ok(message)
    }

    /// The canned "AI" summary for a thread.
    pub fn summary(&self, thread: &Thread) -> String {
        self.summarizer.summarize(thread)
    }

    /// Spawns the poll loop that re-reads the store on `interval` and
    /// publishes the thread list through a watch channel. This is how writes
    /// from other processes become visible: last write observed by the poll
    /// wins. The task runs until aborted or until every receiver is dropped.
    pub fn watch(&self, interval: Duration) -> (watch::Receiver<Vec<Thread>>, JoinHandle<()>) {
        let (tx, rx) = watch::channel(self.threads());
        let hub = self.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tx.send(hub.threads()).is_err() {
                    break;
                }
            }
        });
        (rx, handle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{JsonFileStore, TemplateSummaryAdapter};

    fn hub_at(dir: &std::path::Path) -> CollaborationHub {
        let store: Arc<dyn KeyValueStore> =
            Arc::new(JsonFileStore::new(dir.to_path_buf()).unwrap());
        CollaborationHub::new(store, None, Arc::new(TemplateSummaryAdapter))
    }

    fn user() -> SessionUser {
        SessionUser {
            name: "Dr. Jane Smith".into(),
            email: "jane@x.com".into(),
        }
    }

    #[test]
    fn empty_store_yields_seed_threads() {
        let dir = tempfile::tempdir().unwrap();
        let hub = hub_at(dir.path());
        let threads = hub.threads();
        assert_eq!(threads.len(), 3);
        assert_eq!(threads[0].messages.len(), 2);
        assert!(threads[2].messages.is_empty());
    }

    #[tokio::test]
    async fn posting_appends_only_to_the_target_thread() {
        let dir = tempfile::tempdir().unwrap();
        let hub = hub_at(dir.path());

        let msg = hub
            .post_message("2", "Sharing some telemetry results.", Some(&user()))
            .await
            .unwrap();
        assert_eq!(msg.author, "Dr. Jane Smith");
        assert_eq!(msg.thread_id, "2");

        let threads = hub.threads();
        assert_eq!(threads.iter().find(|t| t.id == "2").unwrap().messages.len(), 2);
        // Untouched siblings.
        assert_eq!(threads.iter().find(|t| t.id == "1").unwrap().messages.len(), 2);
        assert!(threads.iter().find(|t| t.id == "3").unwrap().messages.is_empty());

        // And it survives a simulated reload through a fresh handle.
        let reloaded = hub_at(dir.path());
        let again = reloaded.thread("2").unwrap();
        assert_eq!(again.messages.last().unwrap().content, "Sharing some telemetry results.");
    }

    #[tokio::test]
    async fn blank_messages_and_titles_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let hub = hub_at(dir.path());
        assert_eq!(
            hub.post_message("1", "   ", None).await,
            Err(CollabError::EmptyMessage)
        );
        assert_eq!(
            hub.create_thread("  ", None).await,
            Err(CollabError::EmptyTitle)
        );
        assert_eq!(
            hub.post_message("missing", "hello there", None).await,
            Err(CollabError::UnknownThread("missing".into()))
        );
    }

    #[tokio::test]
    async fn created_thread_defaults_to_problem_one() {
        let dir = tempfile::tempdir().unwrap();
        let hub = hub_at(dir.path());
        let thread = hub.create_thread("Remote Triage Ideas", None).await.unwrap();
        assert_eq!(thread.problem_id, "1");
        assert!(hub.thread(&thread.id).is_some());

        let attached = hub
            .create_thread("Wait Time Analysis", Some("3"))
            .await
            .unwrap();
        assert_eq!(attached.problem_id, "3");
    }

    #[tokio::test]
    async fn anonymous_author_when_signed_out() {
        let dir = tempfile::tempdir().unwrap();
        let hub = hub_at(dir.path());
        let msg = hub.post_message("3", "First!", None).await.unwrap();
        assert_eq!(msg.author, "Anonymous");
    }

    #[tokio::test]
    async fn watcher_picks_up_external_writes() {
        let dir = tempfile::tempdir().unwrap();
        let hub = hub_at(dir.path());
        let (mut rx, handle) = hub.watch(Duration::from_millis(20));
        assert_eq!(rx.borrow().len(), 3);

        // Another process appends a thread directly to the shared store.
        let other = hub_at(dir.path());
        other.create_thread("From another tab", None).await.unwrap();

        tokio::time::timeout(Duration::from_secs(5), async {
            loop {
                rx.changed().await.unwrap();
                if rx.borrow().len() == 4 {
                    break;
                }
            }
        })
        .await
        .expect("watcher never observed the external write");

        handle.abort();
    }
}

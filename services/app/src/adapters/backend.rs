//! services/app/src/adapters/backend.rs
//!
//! This module contains the adapter for the remote backend, the concrete
//! implementation of the `BackendService` port. It speaks JSON over HTTP via
//! `reqwest`. The backend is an optional collaborator: callers already treat
//! every operation here as best-effort, so this adapter only has to map
//! transport and status failures onto `PortError`.

use async_trait::async_trait;
use openhealth_core::domain::{Account, Dataset, Idea, Message, Problem, Thread};
use openhealth_core::ports::{BackendService, PortError, PortResult};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `BackendService` against an HTTP endpoint.
#[derive(Clone)]
pub struct HttpBackendAdapter {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackendAdapter {
    /// Creates a new `HttpBackendAdapter` rooted at `base_url`.
    pub fn new(client: reqwest::Client, base_url: String) -> Self {
        let base_url = base_url.trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> PortResult<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?;
        decode(path, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> PortResult<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| PortError::Unavailable(e.to_string()))?;
        decode(path, response).await
    }
}

async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> PortResult<T> {
    match response.status() {
        StatusCode::NOT_FOUND => Err(PortError::NotFound(path.to_string())),
        status if !status.is_success() => Err(PortError::Unexpected(format!(
            "{} returned {}",
            path, status
        ))),
        _ => response
            .json::<T>()
            .await
            .map_err(|e| PortError::Unexpected(e.to_string())),
    }
}

//=========================================================================================
// `BackendService` Trait Implementation
//=========================================================================================

#[async_trait]
impl BackendService for HttpBackendAdapter {
    async fn list_problems(&self) -> PortResult<Vec<Problem>> {
        self.get_json("/problems").await
    }

    async fn get_problem_by_id(&self, id: i64) -> PortResult<Problem> {
        self.get_json(&format!("/problems/{}", id)).await
    }

    async fn submit_problem(
        &self,
        title: &str,
        description: &str,
        submitted_by: &str,
    ) -> PortResult<i64> {
        self.post_json(
            "/problems",
            &json!({
                "title": title,
                "description": description,
                "submittedBy": submitted_by,
            }),
        )
        .await
    }

    async fn list_ideas_by_problem_id(&self, problem_id: u64) -> PortResult<Vec<Idea>> {
        self.get_json(&format!("/problems/{}/ideas", problem_id))
            .await
    }

    async fn store_idea(&self, idea: &Idea) -> PortResult<u64> {
        self.post_json("/ideas", idea).await
    }

    async fn list_threads(&self) -> PortResult<Vec<Thread>> {
        self.get_json("/threads").await
    }

    async fn create_thread(&self, title: &str, problem_id: &str) -> PortResult<String> {
        self.post_json(
            "/threads",
            &json!({ "title": title, "problemId": problem_id }),
        )
        .await
    }

    async fn get_thread_messages(&self, thread_id: &str) -> PortResult<Vec<Message>> {
        self.get_json(&format!("/threads/{}/messages", thread_id))
            .await
    }

    async fn post_message(&self, thread_id: &str, content: &str, author: &str) -> PortResult<()> {
        let _: serde_json::Value = self
            .post_json(
                &format!("/threads/{}/messages", thread_id),
                &json!({ "content": content, "author": author }),
            )
            .await?;
        Ok(())
    }

    async fn list_datasets(&self) -> PortResult<Vec<Dataset>> {
        self.get_json("/datasets").await
    }

    async fn get_dataset_by_id(&self, id: u64) -> PortResult<Dataset> {
        self.get_json(&format!("/datasets/{}", id)).await
    }

    async fn add_dataset(&self, dataset: &Dataset) -> PortResult<()> {
        let _: serde_json::Value = self.post_json("/datasets", dataset).await?;
        Ok(())
    }

    async fn register_user(&self, account: &Account) -> PortResult<()> {
        let _: serde_json::Value = self.post_json("/users", account).await?;
        Ok(())
    }

    async fn validate_login(&self, email: &str, fingerprint: &str) -> PortResult<bool> {
        self.post_json(
            "/login",
            &json!({ "email": email, "passwordHash": fingerprint }),
        )
        .await
    }

    async fn get_user_profile(&self, email: &str) -> PortResult<Account> {
        self.get_json(&format!("/users/{}", email)).await
    }
}

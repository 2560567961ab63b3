use std::time::Duration;

use reqwest::Client;
use serde_json::json;

use crate::error::{DelegatorError, Result};
use crate::models::{ClaimResponse, Task};

/// HTTP client for the Nervix task-source API
///
/// Every call is a single attempt bounded by the configured timeout; retry
/// and backoff are left to the invoking schedule.
#[derive(Debug, Clone)]
pub struct TaskSourceClient {
    client: Client,
    base_url: String,
}

impl TaskSourceClient {
    /// Creates a client for the given API base URL with a per-request timeout
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetches the list of currently available tasks
    ///
    /// Non-2xx responses are reported as `DelegatorError::Api`; transport
    /// failures surface as `DelegatorError::Http`.
    pub async fn fetch_available_tasks(&self) -> Result<Vec<Task>> {
        let url = format!("{}/tasks/available", self.base_url);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(DelegatorError::Api(format!(
                "Failed to fetch tasks: HTTP {}",
                response.status()
            )));
        }

        let tasks = response.json().await?;
        Ok(tasks)
    }

    /// Claims a task for an agent at the task source
    pub async fn claim_task(&self, task_id: &str, agent_id: &str) -> Result<ClaimResponse> {
        let url = format!("{}/tasks/{}/claim", self.base_url, task_id);
        let response = self
            .client
            .post(&url)
            .json(&json!({ "agent_id": agent_id }))
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(DelegatorError::Api(format!(
                "Failed to claim task {}: HTTP {}",
                task_id,
                response.status()
            )));
        }

        let result = response.json().await?;
        Ok(result)
    }
}

//! JSON file persistence for the assignment log and the fleet snapshot.
//!
//! Both stores are plain truncate-and-write JSON files with no locking;
//! the deployment assumption is at most one delegator instance writing at
//! a time, alongside the external health reporter that owns agent status.

use std::path::PathBuf;

use chrono::Local;
use log::error;
use tokio::fs;

use crate::error::Result;
use crate::models::{Agent, AssignmentLog, FleetSnapshot};

/// Persistent store for the append-only assignment log
#[derive(Debug, Clone)]
pub struct AssignmentStore {
    path: PathBuf,
}

impl AssignmentStore {
    /// Creates a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the assignment log, treating a missing or unreadable file as
    /// "no history yet"
    pub async fn load_or_default(&self) -> AssignmentLog {
        match fs::read_to_string(&self.path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                error!(
                    "Corrupt assignment log {}: {}; starting empty",
                    self.path.display(),
                    e
                );
                AssignmentLog::default()
            }),
            Err(_) => AssignmentLog::default(),
        }
    }

    /// Saves the log with a refreshed last-updated timestamp
    pub async fn save(&self, log: &mut AssignmentLog) -> Result<()> {
        log.last_updated = Some(Local::now().to_rfc3339());
        let content = serde_json::to_string_pretty(log)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

/// Persistent store for the shared fleet status snapshot
#[derive(Debug, Clone)]
pub struct FleetStore {
    path: PathBuf,
}

impl FleetStore {
    /// Creates a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Loads the agent list from the snapshot
    ///
    /// Any read or parse failure is logged and yields an empty fleet,
    /// which disables delegation for the cycle.
    pub async fn load_agents(&self) -> Vec<Agent> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to load fleet {}: {}", self.path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<FleetSnapshot>(&content) {
            Ok(snapshot) => snapshot.agents,
            Err(e) => {
                error!("Failed to parse fleet {}: {}", self.path.display(), e);
                Vec::new()
            }
        }
    }

    /// Saves the snapshot, recomputing the derived total/online counts
    pub async fn save_agents(&self, agents: &[Agent]) -> Result<()> {
        let snapshot = FleetSnapshot {
            last_updated: Some(Local::now().to_rfc3339()),
            total_agents: agents.len(),
            online_agents: agents.iter().filter(|a| a.is_online()).count(),
            agents: agents.to_vec(),
        };
        let content = serde_json::to_string_pretty(&snapshot)?;
        fs::write(&self.path, content).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Assignment;
    use serde_json::json;
    use tempfile::TempDir;

    fn agent(id: &str, status: &str) -> Agent {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Nano-{}", id),
            "status": status,
            "capabilities": [],
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_missing_assignment_log_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = AssignmentStore::new(dir.path().join("assignments.json"));
        let log = store.load_or_default().await;
        assert!(log.assignments.is_empty());
        assert!(log.last_updated.is_none());
    }

    #[tokio::test]
    async fn test_assignment_log_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = AssignmentStore::new(dir.path().join("assignments.json"));

        let mut log = AssignmentLog::default();
        log.assignments.push(Assignment {
            task_id: "t1".into(),
            agent_id: "a1".into(),
            agent_name: "Nano-a1".into(),
            task_type: "scan".into(),
            task_title: "Scan sector 7".into(),
            reward: 5.0,
            claimed_at: Local::now().to_rfc3339(),
            assignment_token: Some("tok-1".into()),
        });
        store.save(&mut log).await.unwrap();
        assert!(log.last_updated.is_some());

        let reloaded = store.load_or_default().await;
        assert_eq!(reloaded.assignments.len(), 1);
        assert_eq!(reloaded.assignments[0].task_id, "t1");
        assert!(reloaded.contains_task("t1"));
    }

    #[tokio::test]
    async fn test_missing_fleet_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = FleetStore::new(dir.path().join("fleet.json"));
        assert!(store.load_agents().await.is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_fleet_is_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fleet.json");
        fs::write(&path, "{not json").await.unwrap();
        let store = FleetStore::new(&path);
        assert!(store.load_agents().await.is_empty());
    }

    #[tokio::test]
    async fn test_fleet_save_recomputes_counts() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("fleet.json");
        let store = FleetStore::new(&path);

        let agents = vec![agent("a1", "online"), agent("a2", "offline")];
        store.save_agents(&agents).await.unwrap();

        let content = fs::read_to_string(&path).await.unwrap();
        let snapshot: FleetSnapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(snapshot.total_agents, 2);
        assert_eq!(snapshot.online_agents, 1);
        assert!(snapshot.last_updated.is_some());

        let reloaded = store.load_agents().await;
        assert_eq!(reloaded.len(), 2);
        assert_eq!(reloaded[0].id, "a1");
    }
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A nanobot in the fleet snapshot
///
/// Created and health-reported by an external process; this tool only
/// flips `available` and sets `current_task` after a successful claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Unique agent identifier
    pub id: String,
    /// Human-readable agent name
    pub name: String,
    /// Reported status; anything other than "online" is treated as offline
    pub status: String,
    /// Capability tags this agent provides
    #[serde(default)]
    pub capabilities: Vec<String>,
    /// Whether the agent is free to take a task
    #[serde(default = "default_true")]
    pub available: bool,
    /// Identifier of the task the agent is currently working, if any
    #[serde(default)]
    pub current_task: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Agent {
    /// Checks whether the agent is reported online
    pub fn is_online(&self) -> bool {
        self.status == "online"
    }
}

/// Capability requirements declared by a task
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskRequirements {
    /// Capability tags the task requires
    #[serde(default)]
    pub capabilities: Vec<String>,
}

/// A unit of work offered by the task-source API (read-only here)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Unique task identifier
    pub id: String,
    /// Task type tag
    #[serde(rename = "type")]
    pub task_type: String,
    /// Declared capability requirements
    #[serde(default)]
    pub requirements: TaskRequirements,
    /// Free-form parameters block; only `title` is extracted for display
    #[serde(default)]
    pub parameters: Value,
    /// Base reward offered for completing the task
    #[serde(default)]
    pub base_reward: f64,
}

impl Task {
    /// Returns the display title from the parameters block, or "Untitled"
    pub fn title(&self) -> String {
        self.parameters
            .get("title")
            .and_then(Value::as_str)
            .unwrap_or("Untitled")
            .to_string()
    }
}

/// A recorded task-to-agent assignment, created once per successful claim
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assignment {
    /// Identifier of the claimed task
    pub task_id: String,
    /// Identifier of the agent the task was claimed for
    pub agent_id: String,
    /// Display name of the agent at claim time
    pub agent_name: String,
    /// Type tag of the claimed task
    pub task_type: String,
    /// Display title of the claimed task
    pub task_title: String,
    /// Base reward of the claimed task
    pub reward: f64,
    /// ISO-8601 timestamp of the claim
    pub claimed_at: String,
    /// Opaque token returned by the claim endpoint
    pub assignment_token: Option<String>,
}

/// The durable, append-only record of all delegation activity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignmentLog {
    /// All assignments ever made, in claim order
    #[serde(default)]
    pub assignments: Vec<Assignment>,
    /// ISO-8601 timestamp of the last save, if any
    #[serde(default)]
    pub last_updated: Option<String>,
}

impl AssignmentLog {
    /// Checks whether a task identifier already has an assignment
    pub fn contains_task(&self, task_id: &str) -> bool {
        self.assignments.iter().any(|a| a.task_id == task_id)
    }
}

/// On-disk shape of the fleet status snapshot
///
/// The counts are derived and recomputed from `agents` on every save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetSnapshot {
    /// ISO-8601 timestamp of the last save
    #[serde(default)]
    pub last_updated: Option<String>,
    /// Total number of agents in the fleet
    #[serde(default)]
    pub total_agents: usize,
    /// Number of agents reported online
    #[serde(default)]
    pub online_agents: usize,
    /// The agent records themselves
    #[serde(default)]
    pub agents: Vec<Agent>,
}

/// Response body of the claim endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ClaimResponse {
    /// Whether the task source accepted the claim
    #[serde(default)]
    pub success: bool,
    /// Claim payload, present on success
    #[serde(default)]
    pub data: Option<ClaimData>,
}

/// Payload of a successful claim
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClaimData {
    /// Opaque token identifying the assignment at the task source
    #[serde(default)]
    pub assignment_token: Option<String>,
}

use chrono::Local;
use colored::*;
use log::{debug, error, info, warn};

use crate::api::TaskSourceClient;
use crate::config::DelegatorConfig;
use crate::error::Result;
use crate::matching::find_best_agent;
use crate::models::{Assignment, AssignmentLog};
use crate::store::{AssignmentStore, FleetStore};

/// Orchestrates one delegation cycle: load state, fetch tasks, match
/// agents, claim, and persist
///
/// Each invocation is a stateless-between-runs batch pass over the two
/// JSON stores; durability comes entirely from the end-of-cycle save.
pub struct Delegator {
    config: DelegatorConfig,
    client: TaskSourceClient,
    fleet_store: FleetStore,
    assignment_store: AssignmentStore,
    assignments: AssignmentLog,
}

impl Delegator {
    /// Creates a delegator from configuration, loading the persisted
    /// assignment history
    pub async fn new(config: DelegatorConfig) -> Result<Self> {
        config.validate()?;

        let client = TaskSourceClient::new(config.api_url.as_str(), config.request_timeout())?;
        let fleet_store = FleetStore::new(&config.fleet_file);
        let assignment_store = AssignmentStore::new(&config.assignments_file);
        let assignments = assignment_store.load_or_default().await;

        Ok(Self {
            config,
            client,
            fleet_store,
            assignment_store,
            assignments,
        })
    }

    /// Returns the assignments recorded so far, in claim order
    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments.assignments
    }

    /// Runs one delegation cycle over at most `max_tasks` tasks
    ///
    /// Remote failures degrade to an empty fetch or a skipped claim; only
    /// a failed end-of-cycle store write surfaces as an error. Returns the
    /// number of tasks successfully delegated.
    pub async fn delegate_tasks(&mut self, max_tasks: usize) -> Result<usize> {
        info!("Starting task delegation...");

        let mut fleet = self.fleet_store.load_agents().await;
        info!("Fleet status: {} agents", fleet.len());

        let tasks = match self.client.fetch_available_tasks().await {
            Ok(tasks) => {
                info!("Fetched {} available tasks", tasks.len());
                tasks
            }
            Err(e) => {
                error!("Failed to fetch tasks: {}", e);
                Vec::new()
            }
        };

        if tasks.is_empty() {
            info!("No available tasks to delegate");
            return Ok(0);
        }

        let candidates = &tasks[..tasks.len().min(max_tasks)];
        let mut delegated_count = 0;

        for task in candidates {
            if self.assignments.contains_task(&task.id) {
                debug!("Task {} already assigned", task.id);
                continue;
            }

            let agent_idx = match find_best_agent(task, &fleet, self.config.match_threshold) {
                Some(idx) => idx,
                None => {
                    warn!("No suitable agent for task {}", task.task_type);
                    continue;
                }
            };
            let agent_id = fleet[agent_idx].id.clone();

            let result = match self.client.claim_task(&task.id, &agent_id).await {
                Ok(result) => {
                    info!("Claimed task {} for agent {}", task.id, agent_id);
                    result
                }
                Err(e) => {
                    error!("Failed to claim task {}: {}", task.id, e);
                    continue;
                }
            };

            if !result.success {
                error!("Claim for task {} rejected by task source", task.id);
                continue;
            }

            let agent = &mut fleet[agent_idx];
            self.assignments.assignments.push(Assignment {
                task_id: task.id.clone(),
                agent_id: agent.id.clone(),
                agent_name: agent.name.clone(),
                task_type: task.task_type.clone(),
                task_title: task.title(),
                reward: task.base_reward,
                claimed_at: Local::now().to_rfc3339(),
                assignment_token: result.data.and_then(|d| d.assignment_token),
            });
            delegated_count += 1;

            info!(
                "Delegated: {} (${}) -> {}",
                task.task_type, task.base_reward, agent.name
            );

            agent.available = false;
            agent.current_task = Some(task.id.clone());
        }

        // Saving only after a successful claim keeps a failed or interrupted
        // cycle from touching either store.
        if delegated_count > 0 {
            self.assignment_store.save(&mut self.assignments).await?;
            self.fleet_store.save_agents(&fleet).await?;
        }

        info!(
            "Delegation complete: {}/{} tasks assigned",
            delegated_count,
            candidates.len()
        );
        Ok(delegated_count)
    }

    /// Prints a human-readable delegation status summary
    pub async fn print_status(&self) {
        let assignments = self.assignments();

        println!("\n{}", "=".repeat(60).bright_yellow());
        println!("{}", "TASK DELEGATION STATUS".bright_green().bold());
        println!("{}", "=".repeat(60).bright_yellow());
        println!("Total assignments: {}", assignments.len());
        println!(
            "Last updated: {}",
            self.assignments.last_updated.as_deref().unwrap_or("Never")
        );

        if !assignments.is_empty() {
            println!("\n{}", "Active Assignments:".bright_cyan());
            let recent = &assignments[assignments.len().saturating_sub(5)..];
            for (i, assignment) in recent.iter().enumerate() {
                println!(
                    "  {}. {} -> {}",
                    i + 1,
                    assignment.task_title.bright_white(),
                    assignment.agent_name.bright_blue()
                );
            }
        }

        let fleet = self.fleet_store.load_agents().await;
        let online = fleet.iter().filter(|a| a.is_online()).count();
        println!("\nFleet: {}/{} agents online", online, fleet.len());
        println!("{}\n", "=".repeat(60).bright_yellow());
    }
}

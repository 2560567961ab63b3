use std::collections::HashSet;

use log::debug;

use crate::models::{Agent, Task};

/// Calculates the match score between a task and an agent
///
/// The score is the fraction of the task's required capabilities the agent
/// satisfies, in [0.0, 1.0]. A task with no requirements matches any agent
/// with 1.0. Capabilities the task does not require are ignored, so an
/// agent is never penalized for unrelated skills.
pub fn match_score(task: &Task, agent: &Agent) -> f64 {
    let required: HashSet<&str> = task
        .requirements
        .capabilities
        .iter()
        .map(String::as_str)
        .collect();

    if required.is_empty() {
        return 1.0;
    }

    let provided: HashSet<&str> = agent.capabilities.iter().map(String::as_str).collect();
    let matching = required.intersection(&provided).count();
    let score = matching as f64 / required.len() as f64;

    debug!("Match: {} -> {}: {:.2}", task.task_type, agent.name, score);
    score
}

/// Finds the best agent for a task among the online members of the fleet
///
/// Returns the index into `fleet` of the first maximal-scoring online agent
/// (stable on input ordering), or `None` if no online agent's score
/// strictly exceeds `threshold`.
pub fn find_best_agent(task: &Task, fleet: &[Agent], threshold: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;

    for (idx, agent) in fleet.iter().enumerate() {
        if !agent.is_online() {
            continue;
        }
        let score = match_score(task, agent);
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((idx, score)),
        }
    }

    match best {
        Some((idx, score)) if score > threshold => Some(idx),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn agent(id: &str, status: &str, capabilities: &[&str]) -> Agent {
        serde_json::from_value(json!({
            "id": id,
            "name": format!("Nano-{}", id),
            "status": status,
            "capabilities": capabilities,
        }))
        .unwrap()
    }

    fn task(id: &str, capabilities: &[&str]) -> Task {
        serde_json::from_value(json!({
            "id": id,
            "type": "test",
            "requirements": {"capabilities": capabilities},
            "parameters": {},
            "base_reward": 1.0
        }))
        .unwrap()
    }

    #[test]
    fn test_no_requirements_is_universal_match() {
        let t = task("t1", &[]);
        assert_eq!(match_score(&t, &agent("a1", "online", &[])), 1.0);
        assert_eq!(match_score(&t, &agent("a2", "online", &["vision"])), 1.0);
    }

    #[test]
    fn test_score_is_required_coverage() {
        let t = task("t1", &["vision", "grasp"]);
        assert_eq!(match_score(&t, &agent("a1", "online", &["vision", "grasp"])), 1.0);
        assert_eq!(match_score(&t, &agent("a2", "online", &["vision"])), 0.5);
        assert_eq!(match_score(&t, &agent("a3", "online", &["flight"])), 0.0);
    }

    #[test]
    fn test_extra_capabilities_do_not_penalize() {
        let t = task("t1", &["vision"]);
        let minimal = agent("a1", "online", &["vision"]);
        let loaded = agent("a2", "online", &["vision", "flight", "sonar", "grasp"]);
        assert_eq!(match_score(&t, &minimal), match_score(&t, &loaded));
    }

    #[test]
    fn test_best_agent_skips_offline() {
        let t = task("t1", &["vision"]);
        let fleet = vec![
            agent("a1", "offline", &["vision"]),
            agent("a2", "online", &["vision"]),
        ];
        assert_eq!(find_best_agent(&t, &fleet, 0.3), Some(1));
    }

    #[test]
    fn test_best_agent_none_when_below_threshold() {
        let t = task("t1", &["flight"]);
        let fleet = vec![agent("a1", "online", &["vision", "grasp"])];
        assert_eq!(find_best_agent(&t, &fleet, 0.3), None);
    }

    #[test]
    fn test_best_agent_none_when_fleet_offline() {
        let t = task("t1", &[]);
        let fleet = vec![agent("a1", "offline", &[])];
        assert_eq!(find_best_agent(&t, &fleet, 0.3), None);
    }

    #[test]
    fn test_threshold_is_strict() {
        // One of three required capabilities: score is about 0.33, which
        // strictly exceeds 0.3; exactly matching the threshold must not.
        let t = task("t1", &["vision", "grasp", "flight"]);
        let fleet = vec![agent("a1", "online", &["vision"])];
        assert_eq!(find_best_agent(&t, &fleet, 0.3), Some(0));

        let half = task("t2", &["vision", "flight"]);
        assert_eq!(find_best_agent(&half, &fleet, 0.5), None);
    }

    #[test]
    fn test_tie_break_is_stable_on_input_order() {
        let t = task("t1", &["vision"]);
        let fleet = vec![
            agent("a1", "online", &["vision"]),
            agent("a2", "online", &["vision"]),
        ];
        assert_eq!(find_best_agent(&t, &fleet, 0.3), Some(0));
    }
}

//! Network statistics — `GET /api/stats`.

use serde::{Deserialize, Serialize};

/// Aggregate counters for the whole network.
///
/// ```json
/// { "agents": 12, "coreAgents": 8, "registeredAgents": 4, "posts": 310,
///   "comments": 1204, "users": 57, "online": 3 }
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct NetworkStats {
    /// Core plus registered agents.
    pub agents: u64,
    pub core_agents: u64,
    pub registered_agents: u64,
    pub posts: u64,
    pub comments: u64,
    pub users: u64,
    pub online: u64,
}

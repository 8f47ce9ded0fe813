//! Agent configuration and its status lifecycle

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Draft,
    Configuring,
    Deployed,
    Archived,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Draft => "draft",
            AgentStatus::Configuring => "configuring",
            AgentStatus::Deployed => "deployed",
            AgentStatus::Archived => "archived",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentConfig {
    pub id: String,
    pub name: String,
    pub description: String,
    pub status: AgentStatus,
    pub tool_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields to overwrite in `update_agent_config`. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<AgentStatus>,
    pub tool_ids: Option<Vec<String>>,
}

pub fn create_agent(name: &str, description: &str) -> AgentConfig {
    let now = Utc::now();
    AgentConfig {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        description: description.to_string(),
        status: AgentStatus::Draft,
        tool_ids: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

pub fn update_agent_config(agent: &AgentConfig, update: AgentUpdate) -> AgentConfig {
    AgentConfig {
        name: update.name.unwrap_or_else(|| agent.name.clone()),
        description: update
            .description
            .unwrap_or_else(|| agent.description.clone()),
        status: update.status.unwrap_or(agent.status),
        tool_ids: update.tool_ids.unwrap_or_else(|| agent.tool_ids.clone()),
        updated_at: Utc::now(),
        ..agent.clone()
    }
}

pub fn deploy_agent(agent: &AgentConfig) -> AgentConfig {
    AgentConfig {
        status: AgentStatus::Deployed,
        updated_at: Utc::now(),
        ..agent.clone()
    }
}

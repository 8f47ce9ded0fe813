pub mod agent;
pub mod config;
pub mod conversation;
pub mod error;
pub mod knowledge;
pub mod notify;
pub mod prompts;
pub mod runtime;
pub mod scheduler;
pub mod session;
pub mod stage;
pub mod state;
pub mod step;
pub mod tools;

// Re-export main types for convenience
pub use agent::{create_agent, deploy_agent, update_agent_config, AgentConfig, AgentStatus, AgentUpdate};
pub use config::Config;
pub use conversation::response_for;
pub use error::BuilderError;
pub use knowledge::{format_bytes, KnowledgeBase, KnowledgeFile};
pub use notify::{Notifications, Toast, ToastVariant};
pub use prompts::PromptKind;
pub use scheduler::{ImmediateScheduler, Scheduler, TokioScheduler};
pub use session::{Action, Effect, SessionTimings, WizardSession};
pub use stage::{panel_for, Panel};
pub use state::{ChatMessage, ChatRole, MessageStatus, MessageStore};
pub use step::{StepController, WizardStep};
pub use tools::{ToolDescriptor, ToolSelection, ToolSettings, ALL_CATEGORIES};

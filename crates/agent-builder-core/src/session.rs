//! The wizard store
//!
//! `WizardSession` owns every piece of state for one run of the wizard and
//! changes only through `apply`. Anything that has to happen later comes back
//! as an `Effect`; the caller waits it out and feeds the follow-up action in.

use std::time::{Duration, Instant};

use crate::agent::{create_agent, deploy_agent, update_agent_config, AgentConfig, AgentUpdate};
use crate::config::Config;
use crate::conversation::Conversation;
use crate::knowledge::{KnowledgeBase, KnowledgeFile};
use crate::notify::{Notifications, Toast};
use crate::stage::{panel_for, Panel};
use crate::state::MessageStore;
use crate::step::{StepController, WizardStep};
use crate::tools::{ToolSelection, ToolSettings};

pub const DEFAULT_AGENT_NAME: &str = "Untitled Agent";

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SendMessage(String),
    ReplyReady { step: WizardStep },
    AdvanceReady { from: WizardStep },
    ToggleTool(String),
    SaveToolSettings { tool_id: String, settings: ToolSettings },
    AddFiles(Vec<KnowledgeFile>),
    AddWebsite(String),
    AddText(String),
    RemoveFile(usize),
    RemoveWebsite(usize),
    RemoveText(usize),
    Deploy,
    DismissExpiredToasts(Instant),
}

/// Delayed work requested by a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    ScheduleReply { step: WizardStep, delay: Duration },
    ScheduleAdvance { from: WizardStep, delay: Duration },
}

impl Effect {
    pub fn delay(&self) -> Duration {
        match self {
            Effect::ScheduleReply { delay, .. } | Effect::ScheduleAdvance { delay, .. } => *delay,
        }
    }

    /// Action to apply once the delay has elapsed
    pub fn follow_up(&self) -> Action {
        match *self {
            Effect::ScheduleReply { step, .. } => Action::ReplyReady { step },
            Effect::ScheduleAdvance { from, .. } => Action::AdvanceReady { from },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimings {
    pub reply_delay: Duration,
    pub advance_delay: Duration,
    pub toast_ttl: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for SessionTimings {
    fn from(config: &Config) -> Self {
        Self {
            reply_delay: config.reply_delay(),
            advance_delay: config.advance_delay(),
            toast_ttl: config.toast_ttl(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WizardSession {
    steps: StepController,
    conversation: Conversation,
    tools: ToolSelection,
    knowledge: KnowledgeBase,
    agent: AgentConfig,
    notifications: Notifications,
    timings: SessionTimings,
    inline_error: Option<String>,
}

impl WizardSession {
    pub fn new(timings: SessionTimings) -> Self {
        Self {
            steps: StepController::new(),
            conversation: Conversation::new(),
            tools: ToolSelection::new(),
            knowledge: KnowledgeBase::new(),
            agent: create_agent(DEFAULT_AGENT_NAME, ""),
            notifications: Notifications::new(),
            timings,
            inline_error: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.steps.current()
    }

    pub fn panel(&self) -> Panel {
        panel_for(self.step())
    }

    pub fn messages(&self) -> &MessageStore {
        self.conversation.store()
    }

    pub fn is_awaiting_reply(&self) -> bool {
        self.conversation.is_awaiting_reply()
    }

    pub fn tools(&self) -> &ToolSelection {
        &self.tools
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn agent(&self) -> &AgentConfig {
        &self.agent
    }

    pub fn notifications(&self) -> &Notifications {
        &self.notifications
    }

    pub fn timings(&self) -> SessionTimings {
        self.timings
    }

    /// Validation message for the last rejected input, cleared by the next action
    pub fn inline_error(&self) -> Option<&str> {
        self.inline_error.as_deref()
    }

    /// Raise a toast for something the session itself did not check, such as
    /// a file the front end failed to read.
    pub fn report_error(&mut self, title: &str, description: &str) {
        self.inline_error = Some(description.to_string());
        self.notifications.push(Toast::error(title, description));
    }

    pub fn apply(&mut self, action: Action) -> Vec<Effect> {
        if !matches!(action, Action::DismissExpiredToasts(_)) {
            self.inline_error = None;
        }

        match action {
            Action::SendMessage(text) => self.send_message(&text),
            Action::ReplyReady { step } => self.reply_ready(step),
            Action::AdvanceReady { from } => {
                if self.steps.complete_exchange(from) {
                    tracing::info!(step = self.step().number(), name = self.step().display_name(), "step advanced");
                }
                Vec::new()
            }
            Action::ToggleTool(id) => {
                match self.tools.toggle(&id) {
                    Ok(tool_ids) => {
                        self.agent = update_agent_config(
                            &self.agent,
                            AgentUpdate {
                                tool_ids: Some(tool_ids),
                                ..Default::default()
                            },
                        );
                    }
                    Err(e) => tracing::warn!(error = %e, "toggle ignored"),
                }
                Vec::new()
            }
            Action::SaveToolSettings { tool_id, settings } => {
                if let Err(e) = self.tools.save_settings(&tool_id, settings) {
                    tracing::warn!(error = %e, "tool settings not saved");
                    self.inline_error = Some(e.to_string());
                }
                Vec::new()
            }
            Action::AddFiles(files) => {
                let added = self.knowledge.add_files(files);
                if added > 0 {
                    self.notifications.push(Toast::info(
                        "Files added",
                        format!("Added {} file(s) to knowledge base.", added),
                    ));
                }
                Vec::new()
            }
            Action::AddWebsite(input) => {
                match self.knowledge.add_website(&input) {
                    Ok(true) => self.notifications.push(Toast::info(
                        "Website added",
                        format!("{} added to knowledge sources.", input),
                    )),
                    Ok(false) => {}
                    Err(e) => {
                        tracing::debug!(error = %e, "website rejected");
                        self.report_error("Invalid URL", "Please enter a valid website URL.");
                    }
                }
                Vec::new()
            }
            Action::AddText(text) => {
                if self.knowledge.add_text(&text) {
                    self.notifications.push(Toast::info(
                        "Knowledge added",
                        "Text added to your agent's knowledge base.",
                    ));
                }
                Vec::new()
            }
            Action::RemoveFile(index) => {
                self.knowledge.remove_file(index);
                Vec::new()
            }
            Action::RemoveWebsite(index) => {
                self.knowledge.remove_website(index);
                Vec::new()
            }
            Action::RemoveText(index) => {
                self.knowledge.remove_text(index);
                Vec::new()
            }
            Action::Deploy => {
                self.deploy();
                Vec::new()
            }
            Action::DismissExpiredToasts(now) => {
                self.notifications
                    .dismiss_expired(now, self.timings.toast_ttl);
                Vec::new()
            }
        }
    }

    fn send_message(&mut self, text: &str) -> Vec<Effect> {
        let step = self.step();
        if self.conversation.send(text, step).is_none() {
            return Vec::new();
        }
        tracing::debug!(step = step.number(), "user message sent");

        let update = match step {
            WizardStep::DefineAgent => AgentUpdate {
                name: Some(agent_name_from(text)),
                ..Default::default()
            },
            WizardStep::SpecifyTasks => AgentUpdate {
                description: Some(text.trim().to_string()),
                ..Default::default()
            },
            _ => AgentUpdate::default(),
        };
        if update != AgentUpdate::default() {
            self.agent = update_agent_config(&self.agent, update);
        }

        vec![Effect::ScheduleReply {
            step,
            delay: self.timings.reply_delay,
        }]
    }

    fn reply_ready(&mut self, step: WizardStep) -> Vec<Effect> {
        if self.conversation.complete(step).is_none() {
            tracing::warn!(step = step.number(), "reply arrived with no pending exchange");
            return Vec::new();
        }

        vec![Effect::ScheduleAdvance {
            from: step,
            delay: self.timings.advance_delay,
        }]
    }

    fn deploy(&mut self) {
        if self.panel() != Panel::ReviewBundle {
            tracing::debug!(step = self.step().number(), "deploy ignored before review step");
            return;
        }

        self.agent = deploy_agent(&self.agent);
        tracing::info!(agent = %self.agent.id, tools = ?self.agent.tool_ids, "agent deployed");
        self.notifications.push(Toast::info(
            "Agent Deployed",
            "Your AI agent has been successfully deployed and is ready to use!",
        ));
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(SessionTimings::default())
    }
}

/// First line of the description, capped for display
fn agent_name_from(text: &str) -> String {
    const MAX_CHARS: usize = 48;
    let line = text.trim().lines().next().unwrap_or_default().trim();
    if line.chars().count() <= MAX_CHARS {
        line.to_string()
    } else {
        let cut: String = line.chars().take(MAX_CHARS).collect();
        format!("{}…", cut.trim_end())
    }
}

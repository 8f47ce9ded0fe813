use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use agent_builder_core::runtime::run_effect;
use agent_builder_core::{
    Action, Config, KnowledgeFile, Panel, PromptKind, Scheduler, SessionTimings, ToolDescriptor,
    ToolSettings, WizardSession, WizardStep,
};
use ratatui::widgets::ListState;
use tokio::sync::mpsc;

use crate::tui::AppEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusPane {
    Chat,
    Panel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum KnowledgeTab {
    #[default]
    Files,
    Websites,
    Text,
}

impl KnowledgeTab {
    pub fn all() -> [KnowledgeTab; 3] {
        [KnowledgeTab::Files, KnowledgeTab::Websites, KnowledgeTab::Text]
    }

    pub fn title(&self) -> &'static str {
        match self {
            KnowledgeTab::Files => "Files",
            KnowledgeTab::Websites => "Websites",
            KnowledgeTab::Text => "Direct Text",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            KnowledgeTab::Files => "Path to a PDF, DOCX, TXT or CSV file",
            KnowledgeTab::Websites => "https://example.com",
            KnowledgeTab::Text => "Enter text, instructions, or knowledge that your agent should learn...",
        }
    }

    pub fn next(self) -> Self {
        match self {
            KnowledgeTab::Files => KnowledgeTab::Websites,
            KnowledgeTab::Websites => KnowledgeTab::Text,
            KnowledgeTab::Text => KnowledgeTab::Files,
        }
    }
}

/// Single-line text field with a character cursor
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    pub value: String,
    pub cursor: usize,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl TextInput {
    pub fn with_value(value: &str) -> Self {
        Self {
            value: value.to_string(),
            cursor: value.chars().count(),
        }
    }

    pub fn insert(&mut self, c: char) {
        let byte_pos = char_to_byte_index(&self.value, self.cursor);
        self.value.insert(byte_pos, c);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.value.chars().count() {
            let byte_pos = char_to_byte_index(&self.value, self.cursor);
            self.value.remove(byte_pos);
        }
    }

    pub fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.value.chars().count());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.value.chars().count();
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Clear the field and return what it held
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.value)
    }
}

/// Popup for editing one tool's settings
#[derive(Debug, Clone)]
pub struct ToolDialog {
    pub tool_id: String,
    pub tool_name: String,
    pub fields: [TextInput; 3],
    pub field: usize,
    pub error: Option<String>,
}

impl ToolDialog {
    pub const LABELS: [&'static str; 3] = ["API Key", "Max Results", "Timeout (seconds)"];

    fn new(tool: &ToolDescriptor, settings: &ToolSettings) -> Self {
        Self {
            tool_id: tool.id.clone(),
            tool_name: tool.name.clone(),
            fields: [
                TextInput::with_value(&settings.api_key),
                TextInput::with_value(&settings.max_results.to_string()),
                TextInput::with_value(&settings.timeout_secs.to_string()),
            ],
            field: 0,
            error: None,
        }
    }

    pub fn active_field(&mut self) -> &mut TextInput {
        &mut self.fields[self.field]
    }

    pub fn next_field(&mut self) {
        self.field = (self.field + 1) % self.fields.len();
    }

    pub fn prev_field(&mut self) {
        self.field = (self.field + self.fields.len() - 1) % self.fields.len();
    }

    fn settings(&self) -> Result<ToolSettings, String> {
        let parse = |idx: usize| {
            self.fields[idx]
                .value
                .trim()
                .parse::<u32>()
                .map_err(|_| format!("{} must be a whole number", Self::LABELS[idx]))
        };
        Ok(ToolSettings {
            api_key: self.fields[0].value.trim().to_string(),
            max_results: parse(1)?,
            timeout_secs: parse(2)?,
        })
    }
}

pub struct App {
    // Core state
    pub should_quit: bool,
    pub focus: FocusPane,
    pub input_mode: InputMode,
    pub session: WizardSession,

    // Effect execution
    scheduler: Arc<dyn Scheduler>,
    events: mpsc::UnboundedSender<AppEvent>,
    in_flight: usize,

    // Chat state
    pub chat_input: TextInput,
    pub chat_scroll: u16,
    pub chat_height: u16, // Inner height of chat area for scroll calculations
    pub chat_width: u16,  // Inner width of chat area for wrap calculations
    pub animation_frame: u8, // 0-2 for ellipsis animation

    // Tool picker state
    pub tool_search: TextInput,
    pub category_idx: usize,
    pub tool_state: ListState,
    pub tool_dialog: Option<ToolDialog>,

    // Knowledge state
    pub knowledge_tab: KnowledgeTab,
    pub knowledge_input: TextInput,
    pub knowledge_state: ListState,

    // Review state
    pub prompt_kind: PromptKind,
    pub copied: HashMap<PromptKind, Instant>,
    copied_ttl: Duration,
}

impl App {
    pub fn new(
        config: &Config,
        scheduler: Arc<dyn Scheduler>,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let mut tool_state = ListState::default();
        tool_state.select(Some(0));

        Self {
            should_quit: false,
            focus: FocusPane::Chat,
            input_mode: InputMode::Editing,
            session: WizardSession::new(SessionTimings::from(config)),

            scheduler,
            events,
            in_flight: 0,

            chat_input: TextInput::default(),
            chat_scroll: 0,
            chat_height: 0,
            chat_width: 0,
            animation_frame: 0,

            tool_search: TextInput::default(),
            category_idx: 0,
            tool_state,
            tool_dialog: None,

            knowledge_tab: KnowledgeTab::default(),
            knowledge_input: TextInput::default(),
            knowledge_state: ListState::default(),

            prompt_kind: PromptKind::Planner,
            copied: HashMap::new(),
            copied_ttl: config.copied_ttl(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.session.step()
    }

    pub fn panel(&self) -> Panel {
        self.session.panel()
    }

    /// Apply an action and schedule its effects on background tasks
    pub fn dispatch(&mut self, action: Action) {
        let step_before = self.session.step();

        for effect in self.session.apply(action) {
            let scheduler = Arc::clone(&self.scheduler);
            let events = self.events.clone();
            self.in_flight += 1;
            tokio::spawn(async move {
                let follow_up = run_effect(scheduler.as_ref(), effect).await;
                if events.send(AppEvent::Wizard(follow_up)).is_err() {
                    tracing::debug!("event loop closed before effect completed");
                }
            });
        }

        if self.session.step() != step_before {
            self.on_step_changed();
        }
    }

    /// A scheduled effect finished and produced its follow-up action
    pub fn on_effect_done(&mut self, action: Action) {
        self.in_flight = self.in_flight.saturating_sub(1);
        self.dispatch(action);
        self.scroll_chat_to_bottom();
    }

    #[cfg(test)]
    pub fn has_pending_effects(&self) -> bool {
        self.in_flight > 0
    }

    fn on_step_changed(&mut self) {
        self.tool_dialog = None;
        self.knowledge_input = TextInput::default();
        self.knowledge_state = ListState::default();
        if self.panel() == Panel::None {
            self.focus = FocusPane::Chat;
        }
    }

    // Chat

    /// Send the chat input. Ignored while the assistant is still replying.
    pub fn send_chat(&mut self) {
        if self.session.is_awaiting_reply() || self.chat_input.value.trim().is_empty() {
            return;
        }

        let text = self.chat_input.take();
        self.dispatch(Action::SendMessage(text));
        self.scroll_chat_to_bottom();
    }

    pub fn scroll_chat_up(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_sub(1);
    }

    pub fn scroll_chat_down(&mut self) {
        self.chat_scroll = self.chat_scroll.saturating_add(1).min(self.max_chat_scroll());
    }

    fn chat_line_count(&self) -> u16 {
        // Use actual chat width for wrap calculation, default to 50 if not set
        let wrap_width = if self.chat_width > 0 {
            self.chat_width as usize
        } else {
            50
        };

        let mut total_lines: u16 = 0;
        for msg in self.session.messages().visible() {
            total_lines = total_lines.saturating_add(1); // Role line
            if msg.is_loading() {
                total_lines = total_lines.saturating_add(1); // "Thinking..."
            }
            for line in msg.content.lines() {
                let char_count = line.chars().count();
                total_lines = total_lines.saturating_add((char_count / wrap_width + 1) as u16);
            }
            total_lines = total_lines.saturating_add(1); // Blank line after message
        }
        total_lines
    }

    fn max_chat_scroll(&self) -> u16 {
        let visible_height = if self.chat_height > 0 { self.chat_height } else { 20 };
        self.chat_line_count().saturating_sub(visible_height)
    }

    /// Scroll chat to bottom so the newest turn is visible
    pub fn scroll_chat_to_bottom(&mut self) {
        self.chat_scroll = self.max_chat_scroll();
    }

    /// Called by Tick event
    pub fn tick(&mut self, now: Instant) {
        if self.session.is_awaiting_reply() {
            self.animation_frame = (self.animation_frame + 1) % 3;
        }
        self.session.apply(Action::DismissExpiredToasts(now));

        let ttl = self.copied_ttl;
        self.copied
            .retain(|_, copied_at| now.saturating_duration_since(*copied_at) < ttl);
    }

    // Tool picker

    pub fn categories(&self) -> Vec<String> {
        self.session.tools().categories()
    }

    pub fn current_category(&self) -> String {
        self.categories()
            .get(self.category_idx)
            .cloned()
            .unwrap_or_else(|| agent_builder_core::ALL_CATEGORIES.to_string())
    }

    pub fn visible_tools(&self) -> Vec<ToolDescriptor> {
        self.session
            .tools()
            .filter(&self.tool_search.value, &self.current_category())
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn selected_tool(&self) -> Option<ToolDescriptor> {
        let tools = self.visible_tools();
        self.tool_state.selected().and_then(|i| tools.get(i).cloned())
    }

    pub fn next_category(&mut self) {
        let len = self.categories().len();
        self.category_idx = (self.category_idx + 1) % len.max(1);
        self.reset_tool_selection();
    }

    pub fn prev_category(&mut self) {
        let len = self.categories().len().max(1);
        self.category_idx = (self.category_idx + len - 1) % len;
        self.reset_tool_selection();
    }

    pub fn reset_tool_selection(&mut self) {
        let has_tools = !self.visible_tools().is_empty();
        self.tool_state.select(has_tools.then_some(0));
    }

    pub fn tool_nav_down(&mut self) {
        let len = self.visible_tools().len();
        if len > 0 {
            let i = self.tool_state.selected().unwrap_or(0);
            self.tool_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn tool_nav_up(&mut self) {
        let i = self.tool_state.selected().unwrap_or(0);
        self.tool_state.select(Some(i.saturating_sub(1)));
    }

    pub fn toggle_selected_tool(&mut self) {
        if let Some(tool) = self.selected_tool() {
            self.dispatch(Action::ToggleTool(tool.id));
        }
    }

    /// Open the settings popup. Only selected tools can be configured.
    pub fn open_tool_dialog(&mut self) {
        let Some(tool) = self.selected_tool() else {
            return;
        };
        if let Ok(settings) = self.session.tools().configure(&tool.id) {
            self.tool_dialog = Some(ToolDialog::new(&tool, &settings));
        }
    }

    pub fn save_tool_dialog(&mut self) {
        let Some(dialog) = self.tool_dialog.as_mut() else {
            return;
        };
        match dialog.settings() {
            Ok(settings) => {
                let tool_id = dialog.tool_id.clone();
                self.tool_dialog = None;
                self.dispatch(Action::SaveToolSettings { tool_id, settings });
            }
            Err(e) => dialog.error = Some(e),
        }
    }

    // Knowledge

    pub fn knowledge_len(&self) -> usize {
        let kb = self.session.knowledge();
        match self.knowledge_tab {
            KnowledgeTab::Files => kb.files().len(),
            KnowledgeTab::Websites => kb.websites().len(),
            KnowledgeTab::Text => kb.texts().len(),
        }
    }

    pub fn next_knowledge_tab(&mut self) {
        self.knowledge_tab = self.knowledge_tab.next();
        self.knowledge_input = TextInput::default();
        self.knowledge_state.select(if self.knowledge_len() > 0 { Some(0) } else { None });
    }

    pub fn knowledge_nav_down(&mut self) {
        let len = self.knowledge_len();
        if len > 0 {
            let i = self.knowledge_state.selected().unwrap_or(0);
            self.knowledge_state.select(Some((i + 1).min(len - 1)));
        }
    }

    pub fn knowledge_nav_up(&mut self) {
        let i = self.knowledge_state.selected().unwrap_or(0);
        self.knowledge_state.select(Some(i.saturating_sub(1)));
    }

    /// Add whatever is in the knowledge input to the active tab's list
    pub fn submit_knowledge_input(&mut self) {
        if self.knowledge_input.is_empty() {
            return;
        }

        match self.knowledge_tab {
            KnowledgeTab::Files => {
                let path = expand_home(self.knowledge_input.value.trim());
                match KnowledgeFile::from_path(&path) {
                    Ok(file) => {
                        self.knowledge_input.take();
                        self.dispatch(Action::AddFiles(vec![file]));
                    }
                    Err(e) => {
                        tracing::debug!(path = %path.display(), error = %e, "file not added");
                        self.session.report_error("File not added", &e.to_string());
                    }
                }
            }
            KnowledgeTab::Websites => {
                let website = self.knowledge_input.value.clone();
                self.dispatch(Action::AddWebsite(website));
                // Rejected input stays in the field for correction
                if self.session.inline_error().is_none() {
                    self.knowledge_input.take();
                }
            }
            KnowledgeTab::Text => {
                let text = self.knowledge_input.take();
                self.dispatch(Action::AddText(text));
            }
        }

        if self.knowledge_state.selected().is_none() && self.knowledge_len() > 0 {
            self.knowledge_state.select(Some(0));
        }
    }

    pub fn remove_selected_knowledge(&mut self) {
        let Some(i) = self.knowledge_state.selected() else {
            return;
        };
        let action = match self.knowledge_tab {
            KnowledgeTab::Files => Action::RemoveFile(i),
            KnowledgeTab::Websites => Action::RemoveWebsite(i),
            KnowledgeTab::Text => Action::RemoveText(i),
        };
        self.dispatch(action);

        // Adjust selection
        let len = self.knowledge_len();
        if len == 0 {
            self.knowledge_state.select(None);
        } else if i >= len {
            self.knowledge_state.select(Some(len - 1));
        }
    }

    // Review

    pub fn mark_copied(&mut self, kind: PromptKind, now: Instant) {
        self.copied.insert(kind, now);
    }

    pub fn is_copied(&self, kind: PromptKind) -> bool {
        self.copied.contains_key(&kind)
    }

    pub fn deploy(&mut self) {
        self.dispatch(Action::Deploy);
    }
}

fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_builder_core::{AgentStatus, ImmediateScheduler};
    use std::io::Write;

    fn app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(&Config::default(), Arc::new(ImmediateScheduler), tx);
        (app, rx)
    }

    /// Feed scheduled follow-ups back until nothing is pending
    async fn drain(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppEvent>) {
        while app.has_pending_effects() {
            match rx.recv().await {
                Some(AppEvent::Wizard(action)) => app.on_effect_done(action),
                Some(_) => {}
                None => break,
            }
        }
    }

    async fn send(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppEvent>, text: &str) {
        app.chat_input = TextInput::with_value(text);
        app.send_chat();
        drain(app, rx).await;
    }

    #[test]
    fn test_text_input_utf8_editing() {
        let mut input = TextInput::default();
        for c in "héllo".chars() {
            input.insert(c);
        }
        input.left();
        input.left();
        input.backspace();
        assert_eq!(input.value, "hélo");
        input.home();
        input.delete();
        assert_eq!(input.value, "élo");
        assert_eq!(input.take(), "élo");
        assert!(input.is_empty());
        assert_eq!(input.cursor, 0);
    }

    #[tokio::test]
    async fn test_send_chat_advances_step() {
        let (mut app, mut rx) = app();
        send(&mut app, &mut rx, "Hello").await;

        assert_eq!(app.step(), WizardStep::SpecifyTasks);
        assert_eq!(app.session.messages().len(), 3);
        assert!(app.chat_input.is_empty());
    }

    #[tokio::test]
    async fn test_blank_chat_input_not_sent() {
        let (mut app, _rx) = app();
        app.chat_input = TextInput::with_value("   ");
        app.send_chat();
        assert_eq!(app.session.messages().len(), 1);
        assert_eq!(app.chat_input.value, "   ");
    }

    #[tokio::test]
    async fn test_input_kept_while_awaiting_reply() {
        let (mut app, _rx) = app();
        app.chat_input = TextInput::with_value("first");
        app.send_chat();
        app.chat_input = TextInput::with_value("second");
        app.send_chat();

        assert_eq!(app.session.messages().len(), 2);
        assert_eq!(app.chat_input.value, "second");
    }

    #[tokio::test]
    async fn test_tool_picker_flow() {
        let (mut app, mut rx) = app();
        for _ in 0..3 {
            send(&mut app, &mut rx, "next").await;
        }
        assert_eq!(app.panel(), Panel::ToolPicker);

        app.tool_search = TextInput::with_value("search");
        app.reset_tool_selection();
        assert_eq!(app.visible_tools().len(), 1);

        app.toggle_selected_tool();
        assert_eq!(app.session.agent().tool_ids, vec!["web-search"]);

        app.open_tool_dialog();
        let dialog = app.tool_dialog.as_mut().unwrap();
        dialog.field = 1;
        *dialog.active_field() = TextInput::with_value("abc");
        app.save_tool_dialog();
        assert!(app.tool_dialog.as_ref().unwrap().error.is_some());

        *app.tool_dialog.as_mut().unwrap().active_field() = TextInput::with_value("25");
        app.save_tool_dialog();
        assert!(app.tool_dialog.is_none());
        assert_eq!(
            app.session.tools().configure("web-search").unwrap().max_results,
            25
        );
    }

    #[tokio::test]
    async fn test_dialog_not_opened_for_unselected_tool() {
        let (mut app, _rx) = app();
        app.open_tool_dialog();
        assert!(app.tool_dialog.is_none());
    }

    #[test]
    fn test_category_cycling() {
        let (mut app, _rx) = app();
        assert_eq!(app.current_category(), "All");
        app.prev_category();
        assert_eq!(app.current_category(), "Integration");
        app.next_category();
        app.next_category();
        assert_eq!(app.current_category(), "Data Retrieval");
        assert_eq!(app.visible_tools().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_website_stays_in_input() {
        let (mut app, _rx) = app();
        app.knowledge_tab = KnowledgeTab::Websites;
        app.knowledge_input = TextInput::with_value("not-a-url");
        app.submit_knowledge_input();

        assert_eq!(app.knowledge_input.value, "not-a-url");
        assert!(app.session.knowledge().websites().is_empty());

        app.knowledge_input = TextInput::with_value("https://example.com");
        app.submit_knowledge_input();
        assert!(app.knowledge_input.is_empty());
        assert_eq!(app.session.knowledge().websites().len(), 1);
        assert_eq!(app.knowledge_state.selected(), Some(0));

        app.remove_selected_knowledge();
        assert!(app.session.knowledge().websites().is_empty());
        assert_eq!(app.knowledge_state.selected(), None);
    }

    #[tokio::test]
    async fn test_add_file_by_path() {
        let (mut app, _rx) = app();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&[0u8; 2048]).unwrap();

        app.knowledge_input = TextInput::with_value(&file.path().display().to_string());
        app.submit_knowledge_input();
        assert_eq!(app.session.knowledge().files().len(), 1);
        assert_eq!(app.session.knowledge().files()[0].display_size(), "2 KB");

        app.knowledge_input = TextInput::with_value("/definitely/not/here.pdf");
        app.submit_knowledge_input();
        assert_eq!(app.session.knowledge().files().len(), 1);
        assert!(app.session.inline_error().is_some());
    }

    #[tokio::test]
    async fn test_deploy_from_review() {
        let (mut app, mut rx) = app();
        for _ in 0..5 {
            send(&mut app, &mut rx, "next").await;
        }
        assert_eq!(app.panel(), Panel::ReviewBundle);

        app.deploy();
        assert_eq!(app.session.agent().status, AgentStatus::Deployed);
    }

    #[test]
    fn test_copied_marker_expires() {
        let (mut app, _rx) = app();
        let now = Instant::now();
        app.mark_copied(PromptKind::Planner, now);
        assert!(app.is_copied(PromptKind::Planner));

        app.tick(now + Duration::from_secs(3));
        assert!(!app.is_copied(PromptKind::Planner));
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/a.txt"), PathBuf::from("/tmp/a.txt"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/a.txt"), home.join("a.txt"));
        }
    }
}

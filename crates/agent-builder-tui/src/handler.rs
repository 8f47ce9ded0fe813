use std::time::Instant;

use agent_builder_core::Panel;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::app::{App, FocusPane, InputMode, TextInput};
use crate::tui::AppEvent;

pub fn handle_event(app: &mut App, event: AppEvent) {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize => app.scroll_chat_to_bottom(),
        AppEvent::Tick => app.tick(Instant::now()),
        AppEvent::Wizard(action) => app.on_effect_done(action),
    }
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Popup takes all input while open
    if app.tool_dialog.is_some() {
        handle_tool_dialog(app, key);
        return;
    }

    match app.input_mode {
        InputMode::Normal => handle_normal_mode(app, key),
        InputMode::Editing => handle_editing_mode(app, key),
    }
}

/// Shared cursor editing for every text field. Returns true if the key was used.
fn edit_text(input: &mut TextInput, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Backspace => input.backspace(),
        KeyCode::Delete => input.delete(),
        KeyCode::Left => input.left(),
        KeyCode::Right => input.right(),
        KeyCode::Home => input.home(),
        KeyCode::End => input.end(),
        KeyCode::Char(c) => input.insert(c),
        _ => return false,
    }
    true
}

fn toggle_focus(app: &mut App) {
    if app.panel() == Panel::None {
        app.focus = FocusPane::Chat;
        return;
    }
    app.focus = match app.focus {
        FocusPane::Chat => FocusPane::Panel,
        FocusPane::Panel => FocusPane::Chat,
    };
    app.input_mode = InputMode::Normal;
}

fn handle_normal_mode(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') => {
            app.should_quit = true;
            return;
        }
        KeyCode::Tab => {
            toggle_focus(app);
            return;
        }
        _ => {}
    }

    match app.focus {
        FocusPane::Chat => handle_chat_normal(app, key),
        FocusPane::Panel => match app.panel() {
            Panel::ToolPicker => handle_tools_normal(app, key),
            Panel::KnowledgeUploader => handle_knowledge_normal(app, key),
            Panel::ReviewBundle => handle_review_normal(app, key),
            Panel::None => app.focus = FocusPane::Chat,
        },
    }
}

fn handle_chat_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('i') | KeyCode::Enter => app.input_mode = InputMode::Editing,
        KeyCode::Char('j') | KeyCode::Down => app.scroll_chat_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_chat_up(),
        KeyCode::Char('g') => app.chat_scroll = 0,
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),
        _ => {}
    }
}

fn handle_tools_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.tool_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.tool_nav_up(),
        KeyCode::Char('l') | KeyCode::Right => app.next_category(),
        KeyCode::Char('h') | KeyCode::Left => app.prev_category(),
        KeyCode::Char(' ') | KeyCode::Enter => app.toggle_selected_tool(),
        KeyCode::Char('c') => app.open_tool_dialog(),
        KeyCode::Char('/') => app.input_mode = InputMode::Editing,
        KeyCode::Esc => {
            app.tool_search = TextInput::default();
            app.reset_tool_selection();
        }
        _ => {}
    }
}

fn handle_knowledge_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('j') | KeyCode::Down => app.knowledge_nav_down(),
        KeyCode::Char('k') | KeyCode::Up => app.knowledge_nav_up(),
        KeyCode::Char(']') | KeyCode::Char('l') | KeyCode::Right => app.next_knowledge_tab(),
        KeyCode::Char('a') | KeyCode::Char('i') => app.input_mode = InputMode::Editing,
        KeyCode::Char('d') | KeyCode::Delete => app.remove_selected_knowledge(),
        _ => {}
    }
}

fn handle_review_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('h') | KeyCode::Char('l') | KeyCode::Left | KeyCode::Right => {
            app.prompt_kind = app.prompt_kind.next();
        }
        KeyCode::Char('c') => {
            let kind = app.prompt_kind;
            match copy_to_clipboard(kind.template()) {
                Ok(()) => app.mark_copied(kind, Instant::now()),
                Err(e) => {
                    tracing::warn!(error = %e, "clipboard copy failed");
                    app.session.report_error("Copy failed", "Could not copy the prompt to the clipboard.");
                }
            }
        }
        KeyCode::Char('D') => app.deploy(),
        _ => {}
    }
}

fn handle_editing_mode(app: &mut App, key: KeyEvent) {
    match app.focus {
        FocusPane::Chat => handle_chat_editing(app, key),
        FocusPane::Panel => match app.panel() {
            Panel::ToolPicker => handle_search_editing(app, key),
            Panel::KnowledgeUploader => handle_knowledge_editing(app, key),
            Panel::ReviewBundle | Panel::None => app.input_mode = InputMode::Normal,
        },
    }
}

fn handle_chat_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => app.send_chat(),
        KeyCode::Tab => toggle_focus(app),
        KeyCode::PageUp => app.scroll_chat_up(),
        KeyCode::PageDown => app.scroll_chat_down(),
        _ => {
            edit_text(&mut app.chat_input, key);
        }
    }
}

fn handle_search_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Enter => app.input_mode = InputMode::Normal,
        _ => {
            if edit_text(&mut app.tool_search, key) {
                app.reset_tool_selection();
            }
        }
    }
}

fn handle_knowledge_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.input_mode = InputMode::Normal,
        KeyCode::Enter => app.submit_knowledge_input(),
        _ => {
            edit_text(&mut app.knowledge_input, key);
        }
    }
}

fn handle_tool_dialog(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => app.tool_dialog = None,
        KeyCode::Enter => app.save_tool_dialog(),
        _ => {
            if let Some(dialog) = app.tool_dialog.as_mut() {
                match key.code {
                    KeyCode::Tab | KeyCode::Down => dialog.next_field(),
                    KeyCode::BackTab | KeyCode::Up => dialog.prev_field(),
                    _ => {
                        edit_text(dialog.active_field(), key);
                    }
                }
            }
        }
    }
}

/// Clipboard commands tried in order, with their arguments
const CLIPBOARD_COMMANDS: [(&str, &[&str]); 4] = [
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("clip.exe", &[]),
];

fn copy_to_clipboard(text: &str) -> std::io::Result<()> {
    copy_with(&CLIPBOARD_COMMANDS, text)
}

/// Pipe text into each command until one exits successfully
fn copy_with(commands: &[(&str, &[&str])], text: &str) -> std::io::Result<()> {
    use std::io::{Error, ErrorKind, Write};
    use std::process::{Command, Stdio};

    let mut last_err = Error::new(ErrorKind::NotFound, "no clipboard command");
    for &(program, args) in commands {
        let mut child = match Command::new(program).args(args).stdin(Stdio::piped()).spawn() {
            Ok(child) => child,
            Err(e) => {
                last_err = e;
                continue;
            }
        };

        // stdin is dropped at the end of the arm so the command sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait();

        match (written, status) {
            (Ok(()), Ok(status)) if status.success() => return Ok(()),
            (Err(e), _) | (_, Err(e)) => last_err = e,
            (Ok(()), Ok(status)) => {
                last_err = Error::other(format!("{} exited with {}", program, status));
            }
        }
        tracing::debug!(program, error = %last_err, "clipboard command failed");
    }
    Err(last_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_builder_core::{Config, ImmediateScheduler, ToolSettings};
    use crossterm::event::{KeyEventKind, KeyEventState};
    use std::sync::Arc;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> AppEvent {
        AppEvent::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        })
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            handle_event(app, key(KeyCode::Char(c)));
        }
    }

    fn app() -> (App, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let app = App::new(&Config::default(), Arc::new(ImmediateScheduler), tx);
        (app, rx)
    }

    async fn exchange(app: &mut App, rx: &mut mpsc::UnboundedReceiver<AppEvent>, text: &str) {
        app.focus = FocusPane::Chat;
        app.input_mode = InputMode::Editing;
        type_text(app, text);
        handle_event(app, key(KeyCode::Enter));
        while app.has_pending_effects() {
            match rx.recv().await {
                Some(event) => handle_event(app, event),
                None => break,
            }
        }
    }

    #[cfg(unix)]
    fn fake_command(dir: &std::path::Path, name: &str, body: &str) -> String {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path.display().to_string()
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_fails_when_command_exits_nonzero() {
        let dir = tempfile::tempdir().unwrap();
        let failing = fake_command(dir.path(), "pbcopy", "cat > /dev/null\nexit 1");

        let result = copy_with(&[(failing.as_str(), &[])], "planner prompt");
        assert!(result.is_err());
    }

    #[cfg(unix)]
    #[test]
    fn test_copy_falls_through_to_next_command() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("clipboard.txt");
        let failing = fake_command(dir.path(), "wl-copy", "cat > /dev/null\nexit 1");
        let working = fake_command(dir.path(), "xclip", &format!("cat > '{}'", out.display()));

        copy_with(
            &[(failing.as_str(), &[]), (working.as_str(), &["-selection", "clipboard"])],
            "planner prompt",
        )
        .unwrap();
        assert_eq!(std::fs::read_to_string(&out).unwrap(), "planner prompt");
    }

    #[test]
    fn test_copy_without_any_command_fails() {
        let result = copy_with(&[("agent-builder-no-such-clipboard", &[])], "text");
        assert_eq!(result.unwrap_err().kind(), std::io::ErrorKind::NotFound);
    }

    #[test]
    fn test_resize_scrolls_chat_to_bottom() {
        let (mut app, _rx) = app();
        app.chat_height = 1;
        app.chat_scroll = 0;

        handle_event(&mut app, AppEvent::Resize);
        assert!(app.chat_scroll > 0);
    }

    #[tokio::test]
    async fn test_typing_and_enter_sends_message() {
        let (mut app, mut rx) = app();
        exchange(&mut app, &mut rx, "Hello").await;

        let messages = app.session.messages().messages();
        assert_eq!(messages[1].content, "Hello");
        assert_eq!(app.step().number(), 2);
    }

    #[test]
    fn test_ctrl_c_quits_from_editing() {
        let (mut app, _rx) = app();
        handle_event(
            &mut app,
            AppEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
        );
        assert!(app.should_quit);
    }

    #[test]
    fn test_q_types_while_editing() {
        let (mut app, _rx) = app();
        handle_event(&mut app, key(KeyCode::Char('q')));
        assert!(!app.should_quit);
        assert_eq!(app.chat_input.value, "q");
    }

    #[test]
    fn test_tab_ignored_without_panel() {
        let (mut app, _rx) = app();
        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, FocusPane::Chat);
    }

    #[tokio::test]
    async fn test_tool_keys() {
        let (mut app, mut rx) = app();
        for _ in 0..3 {
            exchange(&mut app, &mut rx, "next").await;
        }

        handle_event(&mut app, key(KeyCode::Tab));
        assert_eq!(app.focus, FocusPane::Panel);
        assert_eq!(app.input_mode, InputMode::Normal);

        handle_event(&mut app, key(KeyCode::Char('/')));
        type_text(&mut app, "function");
        handle_event(&mut app, key(KeyCode::Enter));
        handle_event(&mut app, key(KeyCode::Char(' ')));
        assert_eq!(app.session.agent().tool_ids, vec!["function-call"]);

        handle_event(&mut app, key(KeyCode::Char('c')));
        assert!(app.tool_dialog.is_some());
        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Backspace));
        type_text(&mut app, "8");
        handle_event(&mut app, key(KeyCode::Enter));
        assert!(app.tool_dialog.is_none());
        assert_eq!(
            app.session.tools().configure("function-call").unwrap(),
            ToolSettings {
                max_results: 8,
                ..ToolSettings::default()
            }
        );
    }

    #[tokio::test]
    async fn test_knowledge_keys() {
        let (mut app, mut rx) = app();
        for _ in 0..4 {
            exchange(&mut app, &mut rx, "next").await;
        }
        assert_eq!(app.panel(), Panel::KnowledgeUploader);

        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Char(']')));
        handle_event(&mut app, key(KeyCode::Char('a')));
        type_text(&mut app, "https://example.com");
        handle_event(&mut app, key(KeyCode::Enter));
        assert_eq!(app.session.knowledge().websites().len(), 1);

        handle_event(&mut app, key(KeyCode::Esc));
        handle_event(&mut app, key(KeyCode::Char('d')));
        assert!(app.session.knowledge().websites().is_empty());
    }

    #[tokio::test]
    async fn test_review_deploy_key() {
        let (mut app, mut rx) = app();
        for _ in 0..5 {
            exchange(&mut app, &mut rx, "next").await;
        }
        handle_event(&mut app, key(KeyCode::Tab));
        handle_event(&mut app, key(KeyCode::Char('D')));
        assert_eq!(
            app.session.notifications().latest().map(|t| t.title.as_str()),
            Some("Agent Deployed")
        );
    }
}

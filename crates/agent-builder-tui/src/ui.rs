use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use crate::app::{App, FocusPane, InputMode, KnowledgeTab, TextInput};
use agent_builder_core::stage::workflow;
use agent_builder_core::{AgentStatus, ChatRole, Panel, PromptKind, ToastVariant};

/// Ensure the selected item in a list is visible by adjusting the ListState offset.
fn ensure_selected_visible(state: &mut ListState, visible_height: usize) {
    let visible_height = visible_height.max(1);

    if let Some(selected) = state.selected() {
        // Valid offsets put the selection somewhere between the bottom and top row
        let min_offset = selected.saturating_sub(visible_height - 1);
        let max_offset = selected;

        let new_offset = state.offset().clamp(min_offset, max_offset);
        if new_offset != state.offset() {
            *state.offset_mut() = new_offset;
        }
    }
}

/// Parse a line of text and convert **bold** markdown to styled spans
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'*') {
            chars.next();

            if !current_text.is_empty() {
                spans.push(Span::raw(std::mem::take(&mut current_text)));
            }

            let mut bold_text = String::new();
            let mut found_close = false;
            while let Some(c) = chars.next() {
                if c == '*' && chars.peek() == Some(&'*') {
                    chars.next();
                    found_close = true;
                    break;
                }
                bold_text.push(c);
            }

            if found_close && !bold_text.is_empty() {
                spans.push(Span::styled(
                    bold_text,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                // No closing **, treat as literal
                current_text.push_str("**");
                current_text.push_str(&bold_text);
            }
        } else {
            current_text.push(c);
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::raw(current_text));
    }

    Line::from(spans)
}

/// First line of `text`, cut to `max` characters
fn preview(text: &str, max: usize) -> String {
    let first = text.lines().next().unwrap_or_default();
    if first.chars().count() > max || text.lines().nth(1).is_some() {
        let cut: String = first.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    } else {
        first.to_string()
    }
}

fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

fn border_color(focused: bool) -> Color {
    if focused { Color::Cyan } else { Color::DarkGray }
}

pub fn render(app: &mut App, frame: &mut Frame) {
    let area = frame.area();

    // Main layout: header, body, footer
    let [header_area, body_area, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(area);

    render_header(app, frame, header_area);

    // The step's panel sits beside the chat when there is one
    let panel = app.panel();
    if panel == Panel::None {
        render_chat_column(app, frame, body_area);
    } else {
        let [chat_area, panel_area] = Layout::horizontal([
            Constraint::Percentage(50),
            Constraint::Percentage(50),
        ])
        .areas(body_area);

        render_chat_column(app, frame, chat_area);
        match panel {
            Panel::ToolPicker => render_tool_picker(app, frame, panel_area),
            Panel::KnowledgeUploader => render_knowledge(app, frame, panel_area),
            Panel::ReviewBundle => render_review(app, frame, panel_area),
            Panel::None => {}
        }
    }

    render_footer(app, frame, footer_area);

    if app.tool_dialog.is_some() {
        render_tool_dialog(app, frame, area);
    }
    render_toasts(app, frame, body_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let agent = app.session.agent();
    let agent_label = if agent.name.is_empty() {
        String::new()
    } else {
        format!(" [{}]", agent.name)
    };

    let title = Line::from(vec![
        Span::styled(" AI Agent Builder ", Style::default().fg(Color::Cyan).bold()),
        Span::styled(agent_label, Style::default().fg(Color::White)),
        Span::raw(" "),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect) {
    let mode_style = match app.input_mode {
        InputMode::Normal => Style::default().bg(Color::Blue).fg(Color::White),
        InputMode::Editing => Style::default().bg(Color::Yellow).fg(Color::Black),
    };

    let mode_text = match app.input_mode {
        InputMode::Normal => " NORMAL ",
        InputMode::Editing => " INSERT ",
    };

    // Key style: dark background with bright text for visibility on both light/dark terminals
    let key_style = Style::default().bg(Color::DarkGray).fg(Color::White);
    let label_style = Style::default().bg(Color::Black).fg(Color::White);

    let pairs: Vec<(&str, &str)> = if app.tool_dialog.is_some() {
        vec![("Tab", "field"), ("Enter", "save"), ("Esc", "cancel")]
    } else {
        match (app.focus, app.input_mode, app.panel()) {
            (FocusPane::Chat, InputMode::Editing, _) => {
                vec![("Enter", "send"), ("Esc", "normal"), ("Tab", "panel")]
            }
            (FocusPane::Chat, InputMode::Normal, _) => {
                vec![("i", "type"), ("j/k", "scroll"), ("Tab", "panel"), ("q", "quit")]
            }
            (FocusPane::Panel, InputMode::Editing, Panel::KnowledgeUploader) => {
                vec![("Enter", "add"), ("Esc", "done")]
            }
            (FocusPane::Panel, InputMode::Editing, _) => vec![("Enter/Esc", "done")],
            (FocusPane::Panel, InputMode::Normal, Panel::ToolPicker) => vec![
                ("j/k", "nav"),
                ("Space", "select"),
                ("c", "configure"),
                ("h/l", "category"),
                ("/", "search"),
                ("Tab", "chat"),
            ],
            (FocusPane::Panel, InputMode::Normal, Panel::KnowledgeUploader) => vec![
                ("]", "tab"),
                ("a", "add"),
                ("d", "remove"),
                ("j/k", "nav"),
                ("Tab", "chat"),
            ],
            (FocusPane::Panel, InputMode::Normal, Panel::ReviewBundle) => vec![
                ("h/l", "prompt"),
                ("c", "copy"),
                ("D", "deploy"),
                ("Tab", "chat"),
            ],
            (FocusPane::Panel, InputMode::Normal, Panel::None) => vec![("Tab", "chat")],
        }
    };

    let hints = pairs.into_iter().flat_map(|(key, label)| {
        [
            Span::styled(format!(" {} ", key), key_style),
            Span::styled(format!(" {} ", label), label_style),
        ]
    });

    let footer_content = Line::from(
        vec![
            Span::styled(mode_text, mode_style),
            Span::styled(" ", label_style),
        ]
        .into_iter()
        .chain(hints)
        .collect::<Vec<_>>(),
    );

    let footer = Paragraph::new(footer_content).style(Style::default().bg(Color::Black));
    frame.render_widget(footer, area);
}

fn render_chat_column(app: &mut App, frame: &mut Frame, area: Rect) {
    let [chat_area, progress_area, input_area] = Layout::vertical([
        Constraint::Min(0),
        Constraint::Length(3),
        Constraint::Length(3),
    ])
    .areas(area);

    // Store chat area dimensions for scroll calculations (inner size minus borders)
    app.chat_height = chat_area.height.saturating_sub(2);
    app.chat_width = chat_area.width.saturating_sub(2);

    let chat_focused = app.focus == FocusPane::Chat;
    let chat_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(chat_focused)))
        .title(" Agent Builder Chat ");

    let mut lines: Vec<Line> = Vec::new();
    for msg in app.session.messages().visible() {
        match msg.role {
            ChatRole::User => {
                lines.push(Line::from(Span::styled(
                    "You:",
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                )));
                for line in msg.content.lines() {
                    lines.push(Line::from(line.to_string()));
                }
            }
            ChatRole::Assistant => {
                lines.push(Line::from(Span::styled(
                    "Assistant:",
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                )));
                if msg.is_loading() {
                    // Animated ellipsis: cycles through ".", "..", "..."
                    let dots = ".".repeat((app.animation_frame as usize) + 1);
                    lines.push(Line::from(Span::styled(
                        format!("Thinking{}", dots),
                        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                    )));
                }
                for line in msg.content.lines() {
                    lines.push(parse_markdown_line(line));
                }
            }
        }
        lines.push(Line::default());
    }

    let chat = Paragraph::new(Text::from(lines))
        .block(chat_block)
        .wrap(Wrap { trim: true })
        .scroll((app.chat_scroll, 0));
    frame.render_widget(chat, chat_area);

    // Step progress
    let step = app.step();
    let percent = step.progress_percent();
    let gauge = Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(format!(" Step {}: {} ", step.number(), step.display_name())),
        )
        .gauge_style(Style::default().fg(Color::Green).bg(Color::Black))
        .percent(u16::from(percent))
        .label(format!("{}% complete", percent));
    frame.render_widget(gauge, progress_area);

    // Input is disabled while the assistant is replying
    let awaiting = app.session.is_awaiting_reply();
    let editing = chat_focused && app.input_mode == InputMode::Editing;
    let (title, input_color) = if awaiting {
        (" Waiting for reply... ", Color::DarkGray)
    } else if editing {
        (" Message (Enter to send) ", Color::Yellow)
    } else {
        (" Message (i to type) ", Color::DarkGray)
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(input_color))
        .title(title);

    render_text_input(
        frame,
        input_area,
        input_block,
        &app.chat_input,
        "Type your message...",
        editing && !awaiting,
    );
}

/// Single-line input with horizontal scrolling and an optional cursor
fn render_text_input(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    input: &TextInput,
    placeholder: &str,
    show_cursor: bool,
) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = input.cursor;

    // Scroll so the cursor stays visible
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let paragraph = if input.is_empty() && !show_cursor {
        Paragraph::new(Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let visible_text: String = input
            .value
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible_text).style(Style::default().fg(Color::Cyan))
    };

    frame.render_widget(paragraph.block(block), area);

    if show_cursor {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_tool_picker(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)))
        .title(" Tool Marketplace ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [tabs_area, search_area, list_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(inner);

    let tabs = Tabs::new(app.categories())
        .select(app.category_idx)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);

    let searching = focused && app.input_mode == InputMode::Editing;
    let search_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if searching { Color::Yellow } else { Color::DarkGray }))
        .title(" Search (/) ");
    render_text_input(
        frame,
        search_area,
        search_block,
        &app.tool_search,
        "Search tools...",
        searching,
    );

    let tools = app.visible_tools();
    if tools.is_empty() {
        let empty = Paragraph::new("No tools match your search")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, list_area);
        return;
    }

    let items: Vec<ListItem> = tools
        .iter()
        .map(|tool| {
            let mark = if tool.selected { "[x]" } else { "[ ]" };
            let mut title = vec![
                Span::styled(
                    format!("{} ", mark),
                    Style::default().fg(if tool.selected { Color::Green } else { Color::DarkGray }),
                ),
                Span::styled(tool.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
            ];
            if tool.popular {
                title.push(Span::raw(" "));
                title.push(Span::styled(
                    " Popular ",
                    Style::default().bg(Color::Magenta).fg(Color::White),
                ));
            }
            title.push(Span::styled(
                format!("  {}", tool.category),
                Style::default().fg(Color::DarkGray),
            ));

            ListItem::new(vec![
                Line::from(title),
                Line::from(Span::styled(
                    format!("    {}", tool.description),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");

    // Each tool takes two rows
    ensure_selected_visible(&mut app.tool_state, list_area.height as usize / 2);
    frame.render_stateful_widget(list, list_area, &mut app.tool_state);
}

fn render_knowledge(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Panel;
    let kb = app.session.knowledge();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)))
        .title(" Knowledge Base ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let error_height = if app.session.inline_error().is_some() { 1 } else { 0 };
    let [tabs_area, input_area, error_area, list_area, summary_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(error_height),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let tab_idx = KnowledgeTab::all()
        .iter()
        .position(|t| *t == app.knowledge_tab)
        .unwrap_or(0);
    let tabs = Tabs::new(KnowledgeTab::all().iter().map(|t| t.title()).collect::<Vec<_>>())
        .select(tab_idx)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);

    let editing = focused && app.input_mode == InputMode::Editing;
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { Color::Yellow } else { Color::DarkGray }))
        .title(match app.knowledge_tab {
            KnowledgeTab::Files => " Add File (a) ",
            KnowledgeTab::Websites => " Add Website (a) ",
            KnowledgeTab::Text => " Add Text (a) ",
        });
    render_text_input(
        frame,
        input_area,
        input_block,
        &app.knowledge_input,
        app.knowledge_tab.placeholder(),
        editing,
    );

    if let Some(error) = app.session.inline_error() {
        let error_line = Paragraph::new(error.to_string()).style(Style::default().fg(Color::Red));
        frame.render_widget(error_line, error_area);
    }

    let (entries, empty_text): (Vec<Line>, &str) = match app.knowledge_tab {
        KnowledgeTab::Files => (
            kb.files()
                .iter()
                .map(|f| {
                    Line::from(vec![
                        Span::raw(f.name.clone()),
                        Span::styled(
                            format!("  {}", f.display_size()),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ])
                })
                .collect(),
            "No files added yet",
        ),
        KnowledgeTab::Websites => (
            kb.websites().iter().map(|w| Line::from(w.clone())).collect(),
            "No websites added yet",
        ),
        KnowledgeTab::Text => (
            kb.texts().iter().map(|t| Line::from(preview(t, 60))).collect(),
            "No text added yet",
        ),
    };
    let summary = format!("{} source(s) attached", kb.source_count());

    if entries.is_empty() {
        let empty = Paragraph::new(empty_text)
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center);
        frame.render_widget(empty, list_area);
    } else {
        let list = List::new(entries.into_iter().map(ListItem::new).collect::<Vec<_>>())
            .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
            .highlight_symbol("> ");
        ensure_selected_visible(&mut app.knowledge_state, list_area.height as usize);
        frame.render_stateful_widget(list, list_area, &mut app.knowledge_state);
    }

    let summary = Paragraph::new(summary).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(summary, summary_area);
}

fn render_review(app: &App, frame: &mut Frame, area: Rect) {
    let focused = app.focus == FocusPane::Panel;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color(focused)))
        .title(" Review & Deploy ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [summary_area, flow_area, prompt_area] = Layout::vertical([
        Constraint::Length(5),
        Constraint::Length(13),
        Constraint::Min(0),
    ])
    .areas(inner);

    // Agent summary
    let agent = app.session.agent();
    let label = Style::default().fg(Color::DarkGray);
    let tools = if agent.tool_ids.is_empty() {
        "none".to_string()
    } else {
        agent.tool_ids.join(", ")
    };
    let status_line = if agent.status == AgentStatus::Deployed {
        Line::from(Span::styled(
            "Deployed and ready to use",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(vec![
            Span::raw("Press "),
            Span::styled("D", Style::default().fg(Color::Yellow).bold()),
            Span::raw(" to deploy"),
        ])
    };
    let summary = Paragraph::new(vec![
        Line::from(vec![Span::styled("Agent: ", label), Span::raw(agent.name.clone())]),
        Line::from(vec![Span::styled("Status: ", label), Span::raw(agent.status.as_str())]),
        Line::from(vec![Span::styled("Tools: ", label), Span::raw(tools)]),
        Line::from(vec![
            Span::styled("Knowledge: ", label),
            Span::raw(format!("{} source(s)", app.session.knowledge().source_count())),
        ]),
        status_line,
    ]);
    frame.render_widget(summary, summary_area);

    // Workflow diagram, rows joined by arrows
    let box_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let detail_style = Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC);
    let mut flow_lines: Vec<Line> = Vec::new();
    for (i, row) in workflow().iter().enumerate() {
        if i > 0 {
            flow_lines.push(Line::from(Span::styled("↓", label)));
        }
        let mut boxes: Vec<Span> = Vec::new();
        for (j, stage) in row.iter().enumerate() {
            if j > 0 {
                boxes.push(Span::raw("  "));
            }
            boxes.push(Span::styled(format!("[ {} ]", stage.label), box_style));
        }
        flow_lines.push(Line::from(boxes));
        if let Some(detail) = row.first().and_then(|s| s.detail) {
            flow_lines.push(Line::from(Span::styled(detail, detail_style)));
        }
    }
    let flow = Paragraph::new(flow_lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(label)
                .title(" Agent Workflow "),
        );
    frame.render_widget(flow, flow_area);

    // Prompt templates
    let [tabs_area, help_area, text_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(prompt_area);

    let kinds = PromptKind::all();
    let selected = kinds.iter().position(|k| *k == app.prompt_kind).unwrap_or(0);
    let titles: Vec<Line> = kinds
        .iter()
        .map(|kind| {
            let mut spans = vec![Span::raw(kind.display_name())];
            if app.is_copied(*kind) {
                spans.push(Span::styled(" Copied", Style::default().fg(Color::Green)));
            }
            Line::from(spans)
        })
        .collect();
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, tabs_area);

    let help = Paragraph::new(app.prompt_kind.help()).style(label);
    frame.render_widget(help, help_area);

    let template = Paragraph::new(app.prompt_kind.template())
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::TOP).border_style(label));
    frame.render_widget(template, text_area);
}

fn render_tool_dialog(app: &App, frame: &mut Frame, area: Rect) {
    let Some(dialog) = app.tool_dialog.as_ref() else {
        return;
    };

    let popup_area = centered_rect(60, 12, area);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(format!(" Configure {} ", dialog.tool_name));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let instructions = Paragraph::new("Tab to switch fields. Enter to save, Esc to cancel.")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(instructions, Rect::new(inner.x, inner.y, inner.width, 1));

    for (i, (label, input)) in crate::app::ToolDialog::LABELS
        .iter()
        .zip(dialog.fields.iter())
        .enumerate()
    {
        let y = inner.y + 2 + (i as u16) * 2;
        if y + 1 >= inner.y + inner.height {
            break;
        }
        let active = i == dialog.field;

        // Mask the API key
        let value = if i == 0 {
            "*".repeat(input.value.chars().count())
        } else {
            input.value.clone()
        };
        let label_style = if active {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        frame.render_widget(
            Paragraph::new(format!("{}:", label)).style(label_style),
            Rect::new(inner.x, y, inner.width, 1),
        );
        frame.render_widget(
            Paragraph::new(value).style(Style::default().fg(Color::Cyan)),
            Rect::new(inner.x + 2, y + 1, inner.width.saturating_sub(2), 1),
        );

        if active {
            let cursor_x = (input.cursor as u16).min(inner.width.saturating_sub(3));
            frame.set_cursor_position((inner.x + 2 + cursor_x, y + 1));
        }
    }

    if let Some(error) = &dialog.error {
        let error_y = inner.y + inner.height.saturating_sub(1);
        frame.render_widget(
            Paragraph::new(error.as_str()).style(Style::default().fg(Color::Red)),
            Rect::new(inner.x, error_y, inner.width, 1),
        );
    }
}

/// Newest toasts stacked in the top-right corner
fn render_toasts(app: &App, frame: &mut Frame, area: Rect) {
    const TOAST_HEIGHT: u16 = 4;
    const MAX_TOASTS: usize = 3;

    let width = 44.min(area.width);
    let mut y = area.y;
    for toast in app.session.notifications().toasts().iter().rev().take(MAX_TOASTS) {
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let toast_area = Rect::new(area.x + area.width - width, y, width, TOAST_HEIGHT);
        let color = match toast.variant {
            ToastVariant::Default => Color::Green,
            ToastVariant::Destructive => Color::Red,
        };

        frame.render_widget(Clear, toast_area);
        let body = Paragraph::new(toast.description.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(Span::styled(
                        format!(" {} ", toast.title),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )),
            );
        frame.render_widget(body, toast_area);
        y += TOAST_HEIGHT;
    }
}

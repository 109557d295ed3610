use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    symbols,
    text::{Line, Span, Text},
    widgets::{
        Axis, Block, Borders, Cell, Chart, Dataset, GraphType, List, ListItem, Paragraph, Row,
        Table, Wrap,
    },
};
use cloudops_core::inventory::{
    IncidentStatus, PipelineStatus, ResourceStatus, Severity, StatCard, COMMON_GUIDES,
};
use cloudops_core::AdviceState;
use crate::app::{App, DashboardFocus, InputMode, MentorFocus, Tab};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Style Markdown advice line by line without dropping any characters.
/// Lines inside ``` fences are shown as-is.
fn markdown_lines(text: &str) -> Vec<Line<'static>> {
    let code_style = Style::default().fg(Color::Yellow);
    let mut in_fence = false;

    text.lines()
        .map(|line| {
            if line.trim_start().starts_with("```") {
                in_fence = !in_fence;
                Line::from(Span::styled(line.to_string(), code_style))
            } else if in_fence {
                Line::from(Span::styled(line.to_string(), code_style))
            } else if line.trim_start().starts_with('#') {
                Line::from(Span::styled(
                    line.to_string(),
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
                ))
            } else {
                parse_markdown_line(line)
            }
        })
        .collect()
}

/// Convert one line of Markdown into styled spans: `**bold**` runs are
/// styled, everything else is passed through.
fn parse_markdown_line(text: &str) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut chars = text.chars().peekable();
    let mut current_text = String::new();

    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'*') {
            // Consume the second *
            chars.next();

            // Find closing **
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
                if !current_text.is_empty() {
                    spans.push(Span::raw(std::mem::take(&mut current_text)));
                }
                spans.push(Span::styled(
                    bold_text,
                    Style::default().add_modifier(Modifier::BOLD),
                ));
            } else {
                // No closing **, treat as literal
                current_text.push_str("**");
                current_text.push_str(&bold_text);
                if found_close {
                    current_text.push_str("**");
                }
            }
        } else {
            current_text.push(c);
        }
    }

    if !current_text.is_empty() {
        spans.push(Span::raw(current_text));
    }

    if spans.is_empty() {
        Line::default()
    } else {
        Line::from(spans)
    }
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

    let [sidebar_area, content_area] = Layout::horizontal([
        Constraint::Length(26),
        Constraint::Min(0),
    ])
    .areas(body_area);

    render_sidebar(app, frame, sidebar_area);

    // Panel areas are refreshed on every frame for mouse hit-testing
    app.advice_area = None;

    match app.tab {
        Tab::Dashboard => render_dashboard(app, frame, content_area),
        Tab::Resources => render_resources(app, frame, content_area),
        Tab::Pipelines => render_pipelines(app, frame, content_area),
        Tab::Mentor => render_mentor(app, frame, content_area),
        Tab::Monitoring | Tab::Security | Tab::Docs => render_coming_soon(frame, content_area),
    }

    render_footer(app, frame, footer_area);
}

fn render_header(app: &App, frame: &mut Frame, area: Rect) {
    let date = chrono::Local::now().format("%A, %b %-d").to_string();
    let alert_dot = if app.inventory.open_incident_count() > 0 {
        Span::styled(" ● ", Style::default().fg(Color::Red))
    } else {
        Span::raw("   ")
    };

    let title = Line::from(vec![
        Span::styled(format!(" {} ", app.tab.display_name()), Style::default().fg(Color::Cyan).bold()),
        Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(Color::DarkGray),
        ),
        alert_dot,
        Span::styled(date, Style::default().fg(Color::Gray)),
    ]);

    let header = Paragraph::new(title).style(Style::default().bg(Color::Black));
    frame.render_widget(header, area);
}

fn render_sidebar(app: &mut App, frame: &mut Frame, area: Rect) {
    app.sidebar_area = Some(area);

    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // Tab rows begin four lines down, matching the click handler
    let [brand_area, menu_area, user_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .areas(inner);

    let brand = Paragraph::new(vec![
        Line::from(Span::styled(" CloudOps Kit", Style::default().fg(Color::LightBlue).bold())),
        Line::from(Span::styled(" ENTERPRISE OPERATIONS", Style::default().fg(Color::DarkGray))),
    ]);
    frame.render_widget(brand, brand_area);

    let items: Vec<ListItem> = Tab::all()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let style = if *tab == app.tab {
                Style::default().bg(Color::Blue).fg(Color::White).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            ListItem::new(format!(" {} {} ", i + 1, tab.display_name())).style(style)
        })
        .collect();
    frame.render_widget(List::new(items), menu_area);

    let user = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" JD ", Style::default().bg(Color::DarkGray).fg(Color::White).bold()),
            Span::styled(" Junior Dev", Style::default().fg(Color::White).bold()),
        ]),
        Line::from(Span::styled(
            "      DevOps Analyst",
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )),
    ]);
    frame.render_widget(user, user_area);
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

    let hint = |key: &'static str, label: &'static str| {
        [
            Span::styled(format!(" {} ", key), key_style),
            Span::styled(format!(" {} ", label), label_style),
        ]
    };

    let mut hints: Vec<Span> = Vec::new();
    match (app.tab, app.input_mode) {
        (_, InputMode::Editing) => {
            hints.extend(hint("Enter", "analyze"));
            hints.extend(hint("Esc", "stop typing"));
        }
        (Tab::Dashboard, InputMode::Normal) => {
            hints.extend(hint("j/k", "nav"));
            hints.extend(hint("h/l", "panel"));
            match app.dashboard_focus {
                DashboardFocus::Alerts => hints.extend(hint("t", "troubleshoot with AI")),
                DashboardFocus::Checklist => hints.extend(hint("Space", "toggle")),
            }
        }
        (Tab::Resources, InputMode::Normal) => {
            hints.extend(hint("j/k", "nav"));
        }
        (Tab::Mentor, InputMode::Normal) => {
            hints.extend(hint("i", "ask"));
            hints.extend(hint("h/l", "panel"));
            match app.mentor_focus {
                MentorFocus::Advice => hints.extend(hint("j/k", "scroll")),
                MentorFocus::Guides => {
                    hints.extend(hint("j/k", "nav"));
                    hints.extend(hint("Enter", "ask guide"));
                }
            }
        }
        _ => {}
    }
    if app.input_mode == InputMode::Normal {
        hints.extend(hint("1-7/Tab", "section"));
        hints.extend(hint("q", "quit"));
    }

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

fn panel(title: &str, focused: bool) -> Block<'static> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(format!(" {} ", title))
}

fn render_dashboard(app: &mut App, frame: &mut Frame, area: Rect) {
    let [cards_area, middle_area, checklist_area] = Layout::vertical([
        Constraint::Length(4),
        Constraint::Min(10),
        Constraint::Length(app.inventory.checklist.len() as u16 * 2 + 2),
    ])
    .areas(area);

    render_stat_cards(app, frame, cards_area);

    let [chart_area, alerts_area] = Layout::horizontal([
        Constraint::Percentage(50),
        Constraint::Percentage(50),
    ])
    .areas(middle_area);

    render_utilization_chart(app, frame, chart_area);
    render_alerts(app, frame, alerts_area);
    render_checklist(app, frame, checklist_area);
}

fn render_stat_cards(app: &App, frame: &mut Frame, area: Rect) {
    let cards = app.inventory.stat_cards();
    let accents = [Color::Blue, Color::Green, Color::LightRed, Color::Red];
    let areas = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(area);

    for ((card, accent), card_area) in cards.iter().zip(accents).zip(areas.iter()) {
        render_stat_card(card, accent, frame, *card_area);
    }
}

fn render_stat_card(card: &StatCard, accent: Color, frame: &mut Frame, area: Rect) {
    let change_color = if card.is_positive() { Color::Green } else { Color::Red };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(accent))
        .title(Span::styled(format!(" {} ", card.title), Style::default().fg(Color::Gray)));

    let text = Line::from(vec![
        Span::styled(card.value.clone(), Style::default().fg(Color::White).bold()),
        Span::raw("  "),
        Span::styled(card.change, Style::default().fg(change_color).bold()),
    ]);

    frame.render_widget(Paragraph::new(text).block(block), area);
}

fn render_utilization_chart(app: &App, frame: &mut Frame, area: Rect) {
    let samples = &app.inventory.utilization;
    let cpu: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| (i as f64, s.cpu as f64))
        .collect();
    let mem: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, s)| (i as f64, s.mem as f64))
        .collect();

    let datasets = vec![
        Dataset::default()
            .name("cpu")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Blue))
            .data(&cpu),
        Dataset::default()
            .name("mem")
            .marker(symbols::Marker::Braille)
            .graph_type(GraphType::Line)
            .style(Style::default().fg(Color::Green))
            .data(&mem),
    ];

    let x_labels: Vec<Span> = match (samples.first(), samples.last()) {
        (Some(first), Some(last)) => vec![Span::raw(first.time), Span::raw(last.time)],
        _ => Vec::new(),
    };

    let chart = Chart::new(datasets)
        .block(panel("CPU & Memory Utilization (24h)", false))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, samples.len().saturating_sub(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::DarkGray))
                .bounds([0.0, 100.0])
                .labels(vec![Span::raw("0"), Span::raw("50"), Span::raw("100")]),
        );

    frame.render_widget(chart, area);
}

fn render_alerts(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.dashboard_focus == DashboardFocus::Alerts;

    let items: Vec<ListItem> = app
        .inventory
        .critical_alerts()
        .iter()
        .map(|incident| {
            let dot_color = match incident.severity {
                Severity::Critical => Color::Red,
                _ => Color::LightRed,
            };
            let mut lines = vec![
                Line::from(vec![
                    Span::styled("● ", Style::default().fg(dot_color)),
                    Span::styled(incident.message.clone(), Style::default().bold()),
                ]),
                Line::from(vec![
                    Span::styled("  Status: ", Style::default().fg(Color::DarkGray)),
                    Span::raw(incident.status.as_str()),
                    Span::styled(
                        format!("  {}", incident.timestamp),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
            ];
            if incident.status == IncidentStatus::Open {
                lines.push(Line::from(Span::styled(
                    "  [t] Troubleshoot with AI",
                    Style::default().fg(Color::LightBlue),
                )));
            }
            ListItem::new(lines)
        })
        .collect();

    let list = List::new(items)
        .block(panel("Critical Alerts", focused))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.alerts_state);
}

fn render_checklist(app: &mut App, frame: &mut Frame, area: Rect) {
    let focused = app.dashboard_focus == DashboardFocus::Checklist;
    let title = format!(
        "Operations Checklist ({} / {} Completed)",
        app.inventory.completed_checklist_count(),
        app.inventory.checklist.len()
    );

    let items: Vec<ListItem> = app
        .inventory
        .checklist
        .iter()
        .map(|item| {
            let (mark, task_style) = if item.completed {
                ("[x]", Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT))
            } else {
                ("[ ]", Style::default().fg(Color::White))
            };
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{} ", mark), Style::default().fg(Color::Blue)),
                    Span::styled(item.task.clone(), task_style),
                ]),
                Line::from(Span::styled(
                    format!("    {}", item.category.as_str().to_uppercase()),
                    Style::default().fg(Color::DarkGray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(panel(&title, focused))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.checklist_state);
}

fn usage_bar(usage: u8, width: usize) -> String {
    let filled = (usage as usize * width).div_ceil(100).min(width);
    format!("{}{} {:>3}%", "█".repeat(filled), "░".repeat(width - filled), usage)
}

fn render_resources(app: &mut App, frame: &mut Frame, area: Rect) {
    let header = Row::new(["RESOURCE NAME", "TYPE", "STATUS", "USAGE", "PROVIDER"])
        .style(Style::default().fg(Color::DarkGray).bold())
        .bottom_margin(1);

    let rows: Vec<Row> = app
        .inventory
        .resources
        .iter()
        .map(|res| {
            let status_color = match res.status {
                ResourceStatus::Running => Color::Green,
                ResourceStatus::Failed => Color::Red,
                _ => Color::Gray,
            };
            let usage_color = if res.is_high_usage() { Color::Red } else { Color::Blue };

            Row::new(vec![
                Cell::from(Span::styled(res.name.clone(), Style::default().bold())),
                Cell::from(res.resource_type.display_name()),
                Cell::from(Span::styled(
                    res.status.as_str().to_uppercase(),
                    Style::default().fg(status_color).bold(),
                )),
                Cell::from(Span::styled(usage_bar(res.usage, 10), Style::default().fg(usage_color))),
                Cell::from(res.provider.as_str()),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(22),
            Constraint::Length(20),
            Constraint::Length(9),
            Constraint::Length(16),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(panel("Resources", true))
    .highlight_style(Style::default().bg(Color::DarkGray))
    .highlight_symbol("> ");

    frame.render_stateful_widget(table, area, &mut app.resources_state);
}

fn render_pipelines(app: &App, frame: &mut Frame, area: Rect) {
    let count = app.inventory.pipelines.len().max(1) as u32;
    let [cards_area, _] = Layout::vertical([Constraint::Length(8), Constraint::Min(0)]).areas(area);
    let areas = Layout::horizontal(vec![Constraint::Ratio(1, count); count as usize]).split(cards_area);

    for (job, card_area) in app.inventory.pipelines.iter().zip(areas.iter()) {
        let status_color = match job.status {
            PipelineStatus::Success => Color::Green,
            PipelineStatus::Failed => Color::Red,
            PipelineStatus::InProgress => Color::Blue,
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(status_color))
            .title(Span::styled(format!(" {} ", job.name), Style::default().bold()))
            .title(
                ratatui::widgets::block::Title::from(Span::styled(
                    format!(" {} ", job.status.as_str()),
                    Style::default().fg(status_color).bold(),
                ))
                .alignment(Alignment::Right),
            );

        let label = Style::default().fg(Color::DarkGray);
        let text = Text::from(vec![
            Line::from(vec![Span::styled("Duration  ", label), Span::raw(job.duration.clone())]),
            Line::from(vec![Span::styled("Run ID    ", label), Span::raw(format!("#{}", job.id))]),
            Line::from(vec![
                Span::styled("Trigger   ", label),
                Span::raw(job.triggered_by.to_uppercase()),
            ]),
            Line::default(),
            Line::from(Span::styled("View Full Logs", Style::default().fg(Color::Gray))),
        ]);

        frame.render_widget(Paragraph::new(text).block(block), *card_area);
    }
}

fn render_mentor(app: &mut App, frame: &mut Frame, area: Rect) {
    let [title_area, advice_area, input_area, guides_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(6),
        Constraint::Length(3),
        Constraint::Length(COMMON_GUIDES.len() as u16 + 2),
    ])
    .areas(area);

    let key_note = match app.key_source {
        Some("env") => "API key from environment",
        Some("config") => "API key from config",
        _ => "no API key configured",
    };
    let title = Paragraph::new(vec![
        Line::from(Span::styled(" DevOps Mentor AI", Style::default().fg(Color::White).bold())),
        Line::from(vec![
            Span::styled(" Powered by Gemini 3 Flash", Style::default().fg(Color::LightBlue)),
            Span::styled(format!("  ({})", key_note), Style::default().fg(Color::DarkGray)),
        ]),
    ]);
    frame.render_widget(title, title_area);

    render_advice(app, frame, advice_area);
    render_query_input(app, frame, input_area);

    let items: Vec<ListItem> = COMMON_GUIDES
        .iter()
        .map(|guide| {
            ListItem::new(Line::from(vec![
                Span::styled(guide.to_string(), Style::default().bold()),
                Span::styled("  Request mentor explanation →", Style::default().fg(Color::DarkGray)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(panel("Common Incident Guides", app.mentor_focus == MentorFocus::Guides))
        .highlight_style(Style::default().bg(Color::Blue).fg(Color::White))
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, guides_area, &mut app.guides_state);
}

fn advice_text(advice: &AdviceState, frame_idx: usize) -> Text<'static> {
    match advice {
        AdviceState::Idle => Text::from(Span::styled(
            "Select an incident from the dashboard or ask a question below.",
            Style::default().fg(Color::DarkGray),
        )),
        AdviceState::Pending => Text::from(Line::from(vec![
            Span::styled(
                format!("{} ", SPINNER[frame_idx % SPINNER.len()]),
                Style::default().fg(Color::Blue),
            ),
            Span::styled(
                "Analyzing logs and infrastructure state...",
                Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC),
            ),
        ])),
        AdviceState::Settled(text) => Text::from(markdown_lines(text)),
    }
}

fn render_advice(app: &mut App, frame: &mut Frame, area: Rect) {
    app.advice_area = Some(area);

    let block = panel("Analysis", app.mentor_focus == MentorFocus::Advice);
    let text = advice_text(&app.advice, app.animation_frame);

    app.advice_rows = wrapped_rows(&text, block.inner(area).width);
    app.advice_scroll = app.advice_scroll.min(app.advice_rows.saturating_sub(1));

    let paragraph = Paragraph::new(text)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.advice_scroll, 0));

    frame.render_widget(paragraph, area);
}

/// Rows `text` occupies when wrapped to `width` columns. Word wrapping can
/// only add rows to this count.
fn wrapped_rows(text: &Text, width: u16) -> u16 {
    let width = width.max(1) as usize;
    let rows: usize = text
        .lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    rows.min(u16::MAX as usize) as u16
}

fn render_query_input(app: &App, frame: &mut Frame, area: Rect) {
    let editing = app.input_mode == InputMode::Editing;
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editing { Color::Yellow } else { Color::DarkGray }))
        .title(" Ask ");

    // Calculate visible portion of input with horizontal scrolling
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_pos = app.query_cursor;
    let scroll_offset = if inner_width == 0 {
        0
    } else if cursor_pos >= inner_width {
        cursor_pos - inner_width + 1
    } else {
        0
    };

    let input = if app.query_input.is_empty() && !editing {
        Paragraph::new("Ask for help: e.g. 'How do I resolve a 403 Forbidden on S3?'")
            .style(Style::default().fg(Color::DarkGray))
    } else {
        let visible_text: String = app
            .query_input
            .chars()
            .skip(scroll_offset)
            .take(inner_width)
            .collect();
        Paragraph::new(visible_text).style(Style::default().fg(Color::Cyan))
    };

    frame.render_widget(input.block(input_block), area);

    // Show cursor when editing
    if editing {
        let cursor_x = (cursor_pos - scroll_offset) as u16;
        frame.set_cursor_position((area.x + cursor_x + 1, area.y + 1));
    }
}

fn render_coming_soon(frame: &mut Frame, area: Rect) {
    let paragraph = Paragraph::new("Component coming soon...")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)));
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use ratatui::{backend::TestBackend, Terminal};

    fn line_text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn page_down() -> crate::tui::AppEvent {
        crate::tui::AppEvent::Key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::PageDown,
            crossterm::event::KeyModifiers::NONE,
        ))
    }

    fn rendered(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 45)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer().clone();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_bold_spans() {
        let line = parse_markdown_line("Run **kubectl top** now");
        assert_eq!(line.spans.len(), 3);
        assert_eq!(line.spans[1].content, "kubectl top");
        assert!(line.spans[1].style.add_modifier.contains(Modifier::BOLD));
        assert_eq!(line_text(&line), "Run kubectl top now");
    }

    #[test]
    fn test_unclosed_bold_is_literal() {
        let line = parse_markdown_line("5 ** 2");
        assert_eq!(line_text(&line), "5 ** 2");
    }

    #[test]
    fn test_heading_keeps_hashes() {
        let lines = markdown_lines("### Root cause");
        assert_eq!(line_text(&lines[0]), "### Root cause");
        assert!(lines[0].spans[0].style.add_modifier.contains(Modifier::BOLD));
    }

    #[test]
    fn test_code_fence_is_verbatim() {
        let advice = "Run this:\n```bash\n#!/bin/bash\n# check disk usage\ndf -h **/\n```\n**Done**";
        let lines: Vec<String> = markdown_lines(advice).iter().map(line_text).collect();
        assert_eq!(
            lines,
            vec![
                "Run this:",
                "```bash",
                "#!/bin/bash",
                "# check disk usage",
                "df -h **/",
                "```",
                "Done",
            ]
        );
    }

    #[test]
    fn test_wrapped_rows() {
        let text = Text::from(vec![Line::from("abcdefghij"), Line::default(), Line::from("abc")]);
        assert_eq!(wrapped_rows(&text, 4), 3 + 1 + 1);
        assert_eq!(wrapped_rows(&text, 20), 3);
    }

    #[test]
    fn test_empty_line() {
        assert!(parse_markdown_line("").spans.is_empty());
    }

    #[test]
    fn test_usage_bar() {
        assert_eq!(usage_bar(0, 10), "░░░░░░░░░░   0%");
        assert_eq!(usage_bar(42, 10), "█████░░░░░  42%");
        assert_eq!(usage_bar(100, 10), "██████████ 100%");
    }

    #[test]
    fn test_advice_text_states() {
        let idle = advice_text(&AdviceState::Idle, 0);
        assert!(line_text(&idle.lines[0]).contains("Select an incident"));

        let pending = advice_text(&AdviceState::Pending, 3);
        assert!(line_text(&pending.lines[0]).contains("Analyzing logs and infrastructure state..."));

        let settled = advice_text(&AdviceState::Settled("1. Check\n2. Scale".to_string()), 0);
        assert_eq!(settled.lines.len(), 2);
        assert_eq!(line_text(&settled.lines[1]), "2. Scale");
    }

    #[test]
    fn test_dashboard_renders_cards_and_alerts() {
        let (mut app, _rx) = test_app();
        let screen = rendered(&mut app);
        assert!(screen.contains("CloudOps Kit"));
        assert!(screen.contains("Active Resources"));
        assert!(screen.contains("$1,240"));
        assert!(screen.contains("Troubleshoot with AI"));
        assert!(screen.contains("2 / 4 Completed"));
        assert!(app.sidebar_area.is_some());
    }

    #[test]
    fn test_mentor_renders_settled_advice() {
        let (mut app, _rx) = test_app();
        app.settle_advice("**Step 1** restart the agent".to_string());
        let screen = rendered(&mut app);
        assert!(screen.contains("DevOps Mentor AI"));
        assert!(screen.contains("Step 1 restart the agent"));
        assert!(screen.contains("IAM Access Denied"));
        assert!(app.advice_area.is_some());
    }

    #[test]
    fn test_scrolling_past_the_end_keeps_advice_visible() {
        let (mut app, _rx) = test_app();
        let advice: Vec<String> = (1..=5).map(|i| format!("step {}", i)).collect();
        app.settle_advice(advice.join("\n"));
        rendered(&mut app);
        assert_eq!(app.advice_rows, 5);

        for _ in 0..5 {
            crate::handler::handle_event(&mut app, page_down());
        }
        assert_eq!(app.advice_scroll, 4);
        assert!(rendered(&mut app).contains("step 5"));
    }

    #[test]
    fn test_placeholder_tabs() {
        let (mut app, _rx) = test_app();
        app.select_tab(Tab::Docs);
        assert!(rendered(&mut app).contains("Component coming soon..."));
    }
}

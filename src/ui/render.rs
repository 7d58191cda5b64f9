use crate::menu::CallStatus;
use crate::ui::app::{App, CallView, FocusPane};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

pub fn render(frame: &mut Frame, app: &App) {
    // Main layout: Tab bar + Body + Footer
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    render_tab_bar(frame, app, main_chunks[0]);

    // Menu on the left, call status on the right
    let body_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(main_chunks[1]);

    render_menu(frame, app, body_chunks[0]);
    render_call_status(frame, app, body_chunks[1]);
    render_footer(frame, app, main_chunks[2]);

    if app.show_help {
        render_help(frame, frame.area());
    }
}

fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let active = app.display.active_tab.as_deref();

    let titles: Vec<Line> = app
        .controller
        .tabs()
        .iter()
        .enumerate()
        .map(|(i, tab)| {
            let mut style = if Some(tab.id.as_str()) == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            if app.focus == FocusPane::Tabs && i == app.tab_cursor {
                style = style.add_modifier(Modifier::UNDERLINED);
            }
            Line::from(Span::styled(format!("{} {}", i + 1, tab.id), style))
        })
        .collect();

    let selected = active.and_then(|id| app.controller.tabs().iter().position(|t| t.id == id));

    let border_color = if app.focus == FocusPane::Tabs {
        Color::Cyan
    } else {
        Color::Gray
    };

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" tabmenu ")
                .border_style(Style::default().fg(border_color)),
        )
        .select(selected)
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs, area);
}

fn render_menu(frame: &mut Frame, app: &App, area: Rect) {
    let border_color = if app.focus == FocusPane::Menu {
        Color::Cyan
    } else {
        Color::Gray
    };
    let title = match app.display.active_tab.as_deref() {
        Some(id) => format!("📂 {}", id),
        None => "📂 Menu".to_string(),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border_color));

    if !app.display.menu_visible {
        let hint = Paragraph::new("Menu hidden - select the tab again to show it")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(hint, area);
        return;
    }

    if app.display.items.is_empty() {
        let empty = Paragraph::new("This tab has no menu items")
            .style(Style::default().fg(Color::Gray))
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .display
        .items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let under_cursor = app.focus == FocusPane::Menu && i == app.item_cursor;
            let style = if under_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if app.display.is_highlighted(i) {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let marker = if app.display.is_highlighted(i) { "●" } else { " " };
            ListItem::new(format!("{} {}", marker, item.label)).style(style)
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}

fn call_lines(call: &CallView) -> Vec<Line<'static>> {
    let endpoint = Line::from(vec![
        Span::styled("Endpoint: ", Style::default().fg(Color::Gray)),
        Span::styled(call.endpoint.clone(), Style::default().fg(Color::Cyan)),
    ]);

    match call.status {
        CallStatus::Pending => vec![
            Line::from(vec![
                Span::raw("Calling endpoint: "),
                Span::styled(call.endpoint.clone(), Style::default().fg(Color::Cyan)),
            ]),
            Line::from(Span::styled(
                "(loading...)",
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )),
        ],
        CallStatus::Success => vec![
            Line::from(vec![
                Span::raw("API called: "),
                Span::styled(
                    call.label.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            endpoint,
            Line::from(""),
            Line::from(Span::styled(
                format!("Status: Success! ({}ms simulated delay)", call.delay_ms),
                Style::default().fg(Color::Green),
            )),
        ],
        CallStatus::Failure => vec![
            Line::from(vec![
                Span::raw("API call failed: "),
                Span::styled(
                    call.label.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
            ]),
            endpoint,
            Line::from(""),
            Line::from(Span::styled(
                format!("Status: Error! ({}ms simulated delay)", call.delay_ms),
                Style::default().fg(Color::Red),
            )),
        ],
    }
}

fn render_call_status(frame: &mut Frame, app: &App, area: Rect) {
    let (text, border_color) = match &app.display.call {
        Some(call) => {
            let color = match call.status {
                CallStatus::Pending => Color::Yellow,
                CallStatus::Success => Color::Green,
                CallStatus::Failure => Color::Red,
            };
            (call_lines(call), color)
        }
        None => (
            vec![
                Line::from("No call made yet"),
                Line::from(""),
                Line::from("Select a menu item to call its endpoint"),
            ],
            Color::Gray,
        ),
    };

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("🌐 API Call")
                .border_style(Style::default().fg(border_color)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match app.focus {
        FocusPane::Tabs => {
            "[←→/hl] Move  [1-9] Jump  [Enter/Space] Select tab  [↓/Tab] Menu  [?] Help  [Q] Quit"
        }
        FocusPane::Menu => {
            "[↑↓/jk] Move  [Enter/Space] Call endpoint  [Tab] Tabs  [?] Help  [Q] Quit"
        }
    };

    let footer = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default());

    frame.render_widget(footer, area);
}

fn render_help(frame: &mut Frame, area: Rect) {
    let popup = centered_rect(60, 60, area);

    let key = |k: &'static str| Span::styled(k, Style::default().fg(Color::Cyan));
    let lines = vec![
        Line::from(vec![key("←/→  h/l    "), Span::raw("Move the tab cursor")]),
        Line::from(vec![key("1-9         "), Span::raw("Select tab by position")]),
        Line::from(vec![key("Enter/Space "), Span::raw("Select tab, or call menu item")]),
        Line::from(vec![key("↑/↓  k/j    "), Span::raw("Move the menu cursor")]),
        Line::from(vec![key("Tab         "), Span::raw("Switch between tabs and menu")]),
        Line::from(vec![key("?           "), Span::raw("Toggle this help")]),
        Line::from(vec![key("q/Esc       "), Span::raw("Quit")]),
        Line::from(""),
        Line::from(Span::styled(
            "Selecting the active tab again shows or hides its menu.",
            Style::default().fg(Color::Gray),
        )),
    ];

    let help = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("❔ Help")
                .border_style(Style::default().fg(Color::Magenta)),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(Clear, popup);
    frame.render_widget(help, popup);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

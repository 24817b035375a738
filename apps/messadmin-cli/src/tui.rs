//! Terminal User Interface for the interactive mess dashboard.
//!
//! Provides a ratatui-based dashboard with a sidebar, per-status mess lists,
//! a detail popup and a status bar. Requests run on spawned tokio tasks and
//! report back over a channel, so the event loop stays responsive and is
//! the only place that mutates [`App`].

use crate::app::{App, AppEvent, Command, Screen};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use messadmin_core::{
    AdminRuntime, ApiRegistry, DashboardOverview, MessCardView, MessRecord, VerificationStatus,
};
use messadmin_notify::NoticeLevel;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Tabs, Wrap},
};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedSender};

/// Run the interactive dashboard
pub async fn run_dashboard_tui(runtime: &AdminRuntime) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = App::new();

    // Run the event loop
    let result = run_app(&mut terminal, &mut app, runtime).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Run the main application loop
async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    runtime: &AdminRuntime,
) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();

    if let Some(command) = app.mount() {
        dispatch(command, &runtime.apis, &tx);
    }

    loop {
        // Apply finished requests before drawing
        while let Ok(event) = rx.try_recv() {
            app.apply_event(event, runtime);
        }

        terminal
            .draw(|f| ui(f, app, runtime))
            .map_err(|e| anyhow::anyhow!("Failed to draw UI: {}", e))?;

        // Poll for events with timeout
        if event::poll(std::time::Duration::from_millis(100)).context("Failed to poll events")?
            && let Event::Key(key) = event::read().context("Failed to read event")?
            && key.kind == KeyEventKind::Press
            && let Some(command) = app.handle_key(key.code, runtime)
        {
            dispatch(command, &runtime.apis, &tx);
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

/// Starts the request behind `command` on a background task.
fn dispatch(command: Command, apis: &ApiRegistry, tx: &UnboundedSender<AppEvent>) {
    let api = Arc::clone(&apis.mess);
    let tx = tx.clone();

    match command {
        Command::Fetch(ticket) => {
            tokio::spawn(async move {
                let result = api.fetch_all().await;
                // The receiver is gone once the dashboard has quit.
                let _ = tx.send(AppEvent::Fetched(ticket, result));
            });
        }
        Command::Update(pending) => {
            tokio::spawn(async move {
                let result = api.update_status(pending.id(), pending.request()).await;
                let _ = tx.send(AppEvent::Updated(pending, result));
            });
        }
    }
}

/// Render the UI
fn ui(frame: &mut Frame, app: &App, runtime: &AdminRuntime) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tabs
            Constraint::Min(10),   // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_tabs(frame, app, chunks[0]);

    let body = if app.sidebar_open {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(24), Constraint::Min(20)])
            .split(chunks[1]);
        render_sidebar(frame, app, columns[0]);
        columns[1]
    } else {
        chunks[1]
    };

    match app.screen {
        Screen::Dashboard => render_dashboard(frame, app, body),
        Screen::Messes(status) => render_mess_list(frame, app, status, body),
        Screen::Settings => render_settings(frame, runtime, body),
    }

    render_status_bar(frame, app, chunks[2]);

    if app.show_detail
        && let Some(record) = app.selected_record()
    {
        render_detail(frame, record, runtime);
    }
}

fn screen_label(app: &App, screen: Screen) -> String {
    match screen {
        Screen::Dashboard | Screen::Settings => screen.title().to_string(),
        Screen::Messes(status) => format!("{} ({})", screen.title(), app.state.counts().get(status)),
    }
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = Screen::ALL
        .iter()
        .map(|screen| Line::from(screen_label(app, *screen)))
        .collect();

    let title = if app.state.is_loading() {
        "LivMeal Admin - loading..."
    } else {
        "LivMeal Admin"
    };

    let tabs = Tabs::new(titles)
        .select(app.screen.index())
        .block(Block::default().borders(Borders::ALL).title(title))
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

fn render_sidebar(frame: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = Screen::ALL
        .iter()
        .enumerate()
        .map(|(i, screen)| ListItem::new(format!("{} {}", i + 1, screen_label(app, *screen))))
        .collect();

    let mut state = ListState::default().with_selected(Some(app.screen.index()));
    let sidebar = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Menu"))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    frame.render_stateful_widget(sidebar, area, &mut state);
}

fn render_dashboard(frame: &mut Frame, app: &App, area: Rect) {
    let overview = DashboardOverview::sample().with_counts(app.state.counts());
    let bold = Style::default().add_modifier(Modifier::BOLD);

    let mut lines = vec![Line::from(Span::styled("Overview", bold)), Line::from("")];
    for stat in &overview.stats {
        let color = match stat.trend {
            messadmin_core::dashboard::Trend::Up => Color::Green,
            messadmin_core::dashboard::Trend::Down => Color::Red,
        };
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<14} {:>8}  ", stat.title, stat.value)),
            Span::styled(
                format!("{} {}", stat.trend.arrow(), stat.change),
                Style::default().fg(color),
            ),
        ]));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Mess Verification", bold)));
    for (label, count) in overview.verification.rows() {
        lines.push(Line::from(format!("  {label:<14} {count:>8}")));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("Recent Activity", bold)));
    for activity in &overview.recent_activity {
        lines.push(Line::from(format!(
            "  {} {} ({})",
            activity.user, activity.action, activity.time
        )));
    }

    let dashboard = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Dashboard"))
        .wrap(Wrap { trim: false });
    frame.render_widget(dashboard, area);
}

fn render_settings(frame: &mut Frame, runtime: &AdminRuntime, area: Rect) {
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let hint = Style::default().fg(Color::DarkGray);
    let config = &runtime.config;
    let template_dir = config
        .template_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_else(|| "built-in".to_string());

    let lines = vec![
        Line::from(Span::styled("Admin Config", bold)),
        Line::from(format!("  API base URL       {}", config.api_base_url)),
        Line::from(format!(
            "  Request timeout    {}s",
            config.request_timeout.as_secs()
        )),
        Line::from(format!("  Templates          {template_dir}")),
        Line::from(format!(
            "  Rejection reason   {}",
            config.default_rejection_reason
        )),
        Line::from(""),
        Line::from(Span::styled("Password & Security", bold)),
        Line::from(Span::styled(
            "  messadmin change-password --help",
            hint,
        )),
        Line::from(""),
        Line::from(Span::styled("Platform Charges", bold)),
        Line::from(Span::styled(
            "  messadmin set-fees --gst <percent> --platform-fee <percent>",
            hint,
        )),
    ];

    let settings = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Settings"))
        .wrap(Wrap { trim: false });
    frame.render_widget(settings, area);
}

fn card_lines(card: &MessCardView, updating: bool) -> Vec<Line<'static>> {
    let status_color = match card.status {
        VerificationStatus::Verified => Color::Green,
        VerificationStatus::Pending => Color::Yellow,
        VerificationStatus::Rejected => Color::Red,
    };

    let mut header = vec![
        Span::styled(
            card.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            format!("[{}]", card.status_label),
            Style::default().fg(status_color),
        ),
    ];
    if updating {
        header.push(Span::styled(" updating...", Style::default().fg(Color::DarkGray)));
    }

    let mut lines = vec![Line::from(header), Line::from(format!("  {}", card.address))];

    let delivery = if card.delivery_available {
        " | Delivery Available"
    } else {
        ""
    };
    lines.push(Line::from(format!("  {}{}", card.meal_label, delivery)));

    if let Some(owner) = &card.owner_name {
        lines.push(Line::from(format!("  Owner: {owner}")));
    }
    if let Some(contact) = &card.contact {
        lines.push(Line::from(format!("  Contact: {contact}")));
    }
    if let Some(email) = &card.email {
        lines.push(Line::from(format!("  Email: {email}")));
    }
    for plan in &card.plans {
        let discount = plan
            .discount
            .as_ref()
            .map(|d| format!(" ({d})"))
            .unwrap_or_default();
        lines.push(Line::from(format!("  {} Plan: {}{discount}", plan.name, plan.price)));
    }
    if let Some(reason) = &card.rejection_reason {
        lines.push(Line::from(Span::styled(
            format!("  Reason: {reason}"),
            Style::default().fg(Color::Red),
        )));
    }
    if card.actions_enabled {
        lines.push(Line::from(Span::styled(
            "  [a] Accept  [x] Reject",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(Line::from(""));
    lines
}

fn render_mess_list(frame: &mut Frame, app: &App, status: VerificationStatus, area: Rect) {
    let records = app.visible();
    let title = format!("{} Messes", status.label());

    if records.is_empty() {
        let text = if app.state.is_fetching() {
            "Loading messes...".to_string()
        } else {
            format!("No {} messes.", status.as_str())
        };
        let empty = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = records
        .iter()
        .map(|record| {
            let updating = app.state.is_updating(&record.id);
            ListItem::new(card_lines(&MessCardView::from_record(record, updating), updating))
        })
        .collect();

    let mut state = ListState::default().with_selected(Some(app.selected));
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("> ");
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match &app.notice {
        Some(notice) => {
            let color = match notice.level {
                NoticeLevel::Success => Color::Green,
                NoticeLevel::Error => Color::Red,
                NoticeLevel::Info => Color::Cyan,
            };
            (notice.message.clone(), color)
        }
        None => (
            "tab/1-5 switch  ↑/↓ select  enter details  a accept  x reject  r refresh  s sidebar  q quit"
                .to_string(),
            Color::Gray,
        ),
    };

    let status = Paragraph::new(text)
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title("Status"));
    frame.render_widget(status, area);
}

fn render_detail(frame: &mut Frame, record: &MessRecord, runtime: &AdminRuntime) {
    let area = centered_rect(80, 80, frame.area());
    let text = runtime
        .render_detail(record)
        .unwrap_or_else(|e| format!("Failed to render details: {e}"));

    let detail = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("{} - esc to close", record.name)),
        )
        .wrap(Wrap { trim: false });
    frame.render_widget(Clear, area);
    frame.render_widget(detail, area);
}

/// Returns a rectangle of the given percentage size centered in `area`.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let scale = |len: u16, percent: u16| {
        // At most `len`, so the narrowing cannot truncate.
        (u32::from(len) * u32::from(percent.min(100)) / 100) as u16
    };
    let width = scale(area.width, percent_x);
    let height = scale(area.height, percent_y);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyCode;
    use messadmin_core::api::admin_mock::MockAdminApi;
    use messadmin_core::api::mess_mock::MockMessApi;
    use messadmin_core::{AdminConfig, MealType, MessBatch};
    use ratatui::backend::TestBackend;

    fn runtime() -> AdminRuntime {
        let config = AdminConfig::from_base_url("http://localhost:3500/api/v1").unwrap();
        let apis = ApiRegistry::new(Arc::new(MockMessApi::new()), Arc::new(MockAdminApi::new()));
        AdminRuntime::with_apis(config, apis).unwrap()
    }

    fn rendered(app: &App, rt: &AdminRuntime) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| ui(f, app, rt)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn loaded_app(rt: &AdminRuntime) -> App {
        let mut app = App::new();
        let Some(Command::Fetch(ticket)) = app.mount() else {
            panic!("first mount must fetch");
        };
        let mut owner = MessRecord::new("p1", "Spice Hub", "Gate 2", MealType::Both);
        owner.owner_name = Some("Ravi".to_string());
        let batch = MessBatch::from_records(vec![owner]);
        app.apply_event(AppEvent::Fetched(ticket, Ok(batch)), rt);
        app
    }

    #[test]
    fn test_renders_pending_list() {
        let rt = runtime();
        let app = loaded_app(&rt);
        let screen = rendered(&app, &rt);

        assert!(screen.contains("Pending (1)"));
        assert!(screen.contains("Spice Hub"));
        assert!(screen.contains("Owner: Ravi"));
        assert!(screen.contains("Loaded 1 mess."));
    }

    #[test]
    fn test_renders_dashboard_and_detail() {
        let rt = runtime();
        let mut app = loaded_app(&rt);

        app.handle_key(KeyCode::Char('1'), &rt);
        assert!(rendered(&app, &rt).contains("Total Users"));

        app.handle_key(KeyCode::Char('3'), &rt);
        app.handle_key(KeyCode::Enter, &rt);
        assert!(rendered(&app, &rt).contains("Spice Hub [Pending]"));
    }

    #[test]
    fn test_renders_settings() {
        let rt = runtime();
        let mut app = loaded_app(&rt);

        app.handle_key(KeyCode::Char('5'), &rt);
        let screen = rendered(&app, &rt);
        assert!(screen.contains("Admin Config"));
        assert!(screen.contains("http://localhost:3500/api/v1"));
        assert!(screen.contains("Password & Security"));
        assert!(screen.contains("messadmin change-password"));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 50);
        let popup = centered_rect(80, 80, area);
        assert_eq!(popup, Rect::new(10, 5, 80, 40));
    }

    #[test]
    fn test_centered_rect_on_wide_terminal() {
        let area = Rect::new(0, 0, 1000, 300);
        let popup = centered_rect(80, 80, area);
        assert_eq!(popup, Rect::new(100, 30, 800, 240));

        assert_eq!(centered_rect(150, 100, area), area);
    }
}

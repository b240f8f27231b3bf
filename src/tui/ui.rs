//! UI rendering for the TUI.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::core::datetime::format_duration;
use crate::features::focus::{Mode, TimerState};
use crate::tui::app::{App, FormField};

/// Render the application UI.
pub fn render(frame: &mut Frame<'_>, app: &App) {
    // Create layout: header, clock, progress, technique, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Clock
            Constraint::Length(1), // Progress
            Constraint::Length(4), // Technique
            Constraint::Min(0),    // Form or history
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_clock(frame, app, chunks[1]);
    render_progress(frame, app, chunks[2]);
    render_technique(frame, app, chunks[3]);
    if app.session().form_visible() {
        render_form(frame, app, chunks[4]);
    } else {
        render_history(frame, app, chunks[4]);
    }
    render_status_bar(frame, app, chunks[5]);
}

const fn accent(mode: Mode) -> Color {
    match mode {
        Mode::Focus => Color::Green,
        Mode::Rest => Color::Cyan,
    }
}

/// Render the header.
fn render_header(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = app.session().timer();
    let state = match timer.state() {
        TimerState::Idle if timer.is_fresh() => "ready",
        TimerState::Idle => "paused",
        TimerState::Running => "running",
        TimerState::Expired => "time's up",
    };
    let length = format_duration(timer.durations().for_mode(timer.mode()));
    let title = format!(" {} ({state}) | {length} ", timer.mode().description());

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(accent(timer.mode()))
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent(timer.mode()))),
        );

    frame.render_widget(header, area);
}

/// Render the remaining time.
fn render_clock(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = app.session().timer();
    let style = if timer.is_expired() {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let clock = Paragraph::new(timer.format_remaining())
        .style(style)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    frame.render_widget(clock, area);
}

fn render_progress(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let timer = app.session().timer();
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(accent(timer.mode())))
        .ratio(timer.progress().clamp(0.0, 1.0));

    frame.render_widget(gauge, area);
}

fn render_technique(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let technique = app.session().technique();
    let text = Paragraph::new(technique.prompt())
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", technique.display_name())),
        );

    frame.render_widget(text, area);
}

/// Render the log form.
fn render_form(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let form = &app.form;
    let label = |field: FormField, name: &'static str| {
        if form.field == field {
            Span::styled(
                format!("> {name}: "),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!("  {name}: "), Style::default().fg(Color::DarkGray))
        }
    };

    let meter: String = (1..=5)
        .map(|level| if level <= form.energy { '●' } else { '○' })
        .collect();

    let lines = vec![
        Line::from(vec![label(FormField::Subject, "Subject"), Span::raw(form.subject.as_str())]),
        Line::from(vec![
            label(FormField::Energy, "Energy"),
            Span::raw(format!("{meter} {}/5", form.energy)),
        ]),
        Line::from(vec![label(FormField::Notes, "Notes"), Span::raw(form.notes.as_str())]),
        Line::from(""),
        Line::from(Span::styled(
            "Tab:next field | 1-5:energy | Enter:save | Esc:close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Log session ")
            .border_style(Style::default().fg(Color::Yellow)),
    );

    frame.render_widget(widget, area);
}

/// Render the recent history.
fn render_history(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let log = app.session().log();
    let items: Vec<ListItem<'_>> = log
        .recent(app.recent_count)
        .iter()
        .map(|record| {
            let mut spans = vec![
                Span::styled(
                    format!("{}  ", record.formatted_timestamp()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::styled(
                    record.display_subject(),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ⚡ {}/5", record.energy),
                    Style::default().fg(Color::Yellow),
                ),
            ];
            if !record.notes.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", record.notes),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Recent history ({} total) ", log.len())),
    );

    frame.render_widget(list, area);
}

/// Render the status bar.
fn render_status_bar(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(
        "space:start/pause | m:mode | r:reset | t:technique | l:log | e:export | ?:help | q:quit",
    );

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands::AppContext;
    use crate::config::{Config, Paths};
    use crate::features::focus::{ModeDurations, TimerEngine};
    use crate::features::history::{MemoryStore, SessionLog, SessionStore};
    use crate::features::session::StudySession;
    use ratatui::{backend::TestBackend, Terminal};

    fn app() -> App {
        let paths = Paths::with_root(std::env::temp_dir().join("studylog-ui-tests"));
        let ctx = AppContext {
            config_path: paths.config_file.clone(),
            config: Config::default(),
            paths,
        };
        let store: Box<dyn SessionStore> = Box::new(MemoryStore::new());
        let log = SessionLog::open(store).unwrap();
        let timer = TimerEngine::new(ModeDurations::uniform(1200), Mode::Focus);
        App::with_session(StudySession::new(timer, log), &ctx)
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_renders_clock_and_technique() {
        let text = screen(&app());
        assert!(text.contains("20:00"));
        assert!(text.contains("Focus mode"));
        assert!(text.contains("20 minutes"));
        assert!(text.contains("Feynman Technique"));
        assert!(text.contains("Recent history (0 total)"));
    }

    #[test]
    fn test_renders_form_when_open() {
        let mut app = app();
        app.open_form();
        app.form.subject = "Math".to_string();

        let text = screen(&app);
        assert!(text.contains("Log session"));
        assert!(text.contains("Math"));
        assert!(!text.contains("Recent history"));
    }
}

// src/ui.rs

use crate::config::Config;
use crate::constants::{APP_TITLE, INPUT_PREFIX, SEND_BUTTON_LABEL};
use crate::controller::{SubmissionController, Trigger};
use crate::errors::{RulebotError, RulebotResult};
use crate::input::{InputField, InputSource};
use crate::message_view::visible_lines;
use crate::transcript::ChatLog;
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event as CEvent, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::{
    io,
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;

// Shared handles the draw loop and key handling work against.
struct App {
    input: Arc<Mutex<InputField>>,
    log: Arc<Mutex<ChatLog>>,
    controller: SubmissionController<InputField, ChatLog>,
    // Reply tasks not yet collected
    replies: Vec<JoinHandle<()>>,
    // Where the send button was last drawn, for mouse hit-testing
    send_button: Rect,
    show_timestamps: bool,
}

impl App {
    fn new(input: Arc<Mutex<InputField>>, log: Arc<Mutex<ChatLog>>, show_timestamps: bool) -> App {
        let controller = SubmissionController::new(input.clone(), log.clone());
        App {
            input,
            log,
            controller,
            replies: Vec::new(),
            send_button: Rect::default(),
            show_timestamps,
        }
    }

    /// Hands the trigger to the controller right away, so the input is read
    /// before any later key event can touch it.
    async fn fire(&mut self, trigger: Trigger) {
        if let Some(reply) = self.controller.handle(trigger).await {
            self.replies.push(reply);
        }
    }

    /// Collects finished reply tasks, logging any that failed. Returns how
    /// many failed.
    async fn reap_replies(&mut self) -> usize {
        let (finished, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.replies)
            .into_iter()
            .partition(|reply| reply.is_finished());
        self.replies = pending;

        let mut failed = 0;
        for reply in finished {
            if let Err(e) = reply.await {
                error!("Reply task failed: {}", e);
                failed += 1;
            }
        }
        failed
    }
}

/// Undoes raw mode, the alternate screen and mouse capture when dropped, so
/// every exit path out of [`run_ui`] leaves the terminal usable.
struct RestoreOnDrop<F: FnMut() -> io::Result<()>> {
    restore: Option<F>,
}

impl<F: FnMut() -> io::Result<()>> RestoreOnDrop<F> {
    fn new(restore: F) -> Self {
        Self {
            restore: Some(restore),
        }
    }
}

impl<F: FnMut() -> io::Result<()>> Drop for RestoreOnDrop<F> {
    fn drop(&mut self) {
        if let Some(mut restore) = self.restore.take() {
            if let Err(e) = restore() {
                error!("Failed to restore terminal: {}", e);
            }
        }
    }
}

// Every step runs even if an earlier one fails
fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    );
    raw.and(screen)
}

/// Runs the terminal UI until the user quits.
pub async fn run_ui(config: Config) -> RulebotResult<()> {
    // Setup terminal
    enable_raw_mode()?;
    let restore = RestoreOnDrop::new(restore_terminal);
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    let input = Arc::new(Mutex::new(InputField::new()));
    let log = Arc::new(Mutex::new(ChatLog::new()));
    let app = App::new(input, log, config.show_timestamps);
    let tick_rate = Duration::from_millis(config.tick_rate_ms);
    let res = run_app(&mut terminal, app, tick_rate).await;

    drop(restore);

    if let Err(err) = &res {
        error!("UI loop ended with error: {}", err);
    }
    res
}

/// Enum for different types of events.
enum Event {
    Input(CEvent),
    Tick,
    ReaderFailed(String),
}

fn spawn_event_reader(tx: mpsc::Sender<Event>, tick_rate: Duration) {
    tokio::task::spawn_blocking(move || {
        let mut last_tick = Instant::now();
        loop {
            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or(Duration::ZERO);
            match event::poll(timeout) {
                Ok(true) => {
                    let event = match event::read() {
                        Ok(event) => Event::Input(event),
                        Err(e) => Event::ReaderFailed(e.to_string()),
                    };
                    if tx.blocking_send(event).is_err() {
                        return;
                    }
                }
                Ok(false) => {}
                Err(e) => {
                    let _ = tx.blocking_send(Event::ReaderFailed(e.to_string()));
                    return;
                }
            }

            if last_tick.elapsed() >= tick_rate {
                if tx.blocking_send(Event::Tick).is_err() {
                    return;
                }
                last_tick = Instant::now();
            }
        }
    });
}

/// Main loop of the application.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    tick_rate: Duration,
) -> RulebotResult<()> {
    let (tx, mut rx) = mpsc::channel::<Event>(100);
    spawn_event_reader(tx, tick_rate);
    info!("UI started");

    loop {
        {
            let input = app.input.lock().await;
            let log = app.log.lock().await;
            let mut send_button = app.send_button;
            terminal.draw(|f| send_button = draw(f, &log, &input, app.show_timestamps))?;
            app.send_button = send_button;
        }

        match rx.recv().await {
            Some(Event::Input(event)) => {
                if handle_input(event, &mut app).await? {
                    break;
                }
            }
            // Redraw picks up replies rendered by pending tasks
            Some(Event::Tick) => {
                app.reap_replies().await;
            }
            Some(Event::ReaderFailed(e)) => return Err(RulebotError::terminal_error(e)),
            None => break,
        }
    }

    info!("UI stopped");
    Ok(())
}

/// Handles user input events. Returns `true` when the app should quit.
async fn handle_input(event: CEvent, app: &mut App) -> RulebotResult<bool> {
    match event {
        CEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Esc => return Ok(true),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Ok(true)
            }
            KeyCode::Enter => app.fire(Trigger::Key(KeyCode::Enter)).await,
            KeyCode::Backspace => app.input.lock().await.backspace(),
            KeyCode::PageUp => app.log.lock().await.scroll_up(),
            KeyCode::PageDown => app.log.lock().await.scroll_down(),
            KeyCode::Char(c) => app.input.lock().await.push(c),
            _ => {}
        },
        CEvent::Mouse(mouse) => {
            if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                if app.send_button.contains(Position::new(mouse.column, mouse.row)) {
                    app.fire(Trigger::Send).await;
                }
            }
        }
        _ => {}
    }

    Ok(false)
}

/// Renders the UI components. Returns the area of the send button.
fn draw(f: &mut Frame, log: &ChatLog, input: &InputField, show_timestamps: bool) -> Rect {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1), // Header
                Constraint::Min(3),    // Chat log
                Constraint::Length(3), // Input
                Constraint::Length(1), // Footer
            ]
            .as_ref(),
        )
        .split(f.area());

    draw_header(f, chunks[0]);
    draw_log(f, log, show_timestamps, chunks[1]);
    let send_button = draw_input(f, input, chunks[2]);
    draw_footer(f, chunks[3]);
    send_button
}

fn draw_header(f: &mut Frame, area: Rect) {
    let title = Paragraph::new(Line::from(Span::styled(
        APP_TITLE,
        Style::default()
            .fg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, area);
}

fn draw_log(f: &mut Frame, log: &ChatLog, show_timestamps: bool, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title("Chat");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let lines = visible_lines(
        log.entries(),
        log.scroll_anchor(),
        inner.width,
        inner.height,
        show_timestamps,
    );
    f.render_widget(Paragraph::new(lines), inner);
}

fn draw_input(f: &mut Frame, input: &InputField, area: Rect) -> Rect {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let button_width = SEND_BUTTON_LABEL.chars().count() as u16;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(1), Constraint::Length(button_width)].as_ref())
        .split(inner);
    let (text_area, button_area) = (chunks[0], chunks[1]);

    let prefix_width = INPUT_PREFIX.chars().count() as u16;
    let visible_width = text_area.width.saturating_sub(prefix_width);
    let text_width = input.display_width();
    let scroll_offset = text_width.saturating_sub(visible_width);

    let line = Line::from(vec![
        Span::styled(INPUT_PREFIX, Style::default().fg(Color::DarkGray)),
        Span::styled(input.value(), Style::default().fg(Color::White)),
    ]);
    f.render_widget(Paragraph::new(line).scroll((0, scroll_offset)), text_area);

    let button = Paragraph::new(Span::styled(
        SEND_BUTTON_LABEL,
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightGreen)
            .add_modifier(Modifier::BOLD),
    ));
    f.render_widget(button, button_area);

    let cursor_x = text_area.x + prefix_width + (text_width - scroll_offset);
    f.set_cursor_position((cursor_x, text_area.y));

    button_area
}

fn draw_footer(f: &mut Frame, area: Rect) {
    let footer = Paragraph::new("Enter or click [ Send ] to send · PgUp/PgDn scroll · Esc quits")
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center);
    f.render_widget(footer, area);
}

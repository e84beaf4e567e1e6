//! adbrowse - browse an Android device's files over adb

use std::fs::OpenOptions;
use std::io::{self, stdout};
use std::panic;
use std::time::Duration;

use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
};

mod adb;
mod config;
mod errors;
mod input;
mod preview;
mod state;
mod ui;

use config::Config;
use state::app::App;
use state::mode::Mode;
use ui::{
    ConsoleArea, FunctionKeyBar, HeaderBar, ListingWidget, NoticeDialog, PreviewWidget, PromptDialog, StatusBar,
    TextViewer,
};

/// Set up panic hook to restore terminal on panic
fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

/// Initialize the terminal for TUI mode
fn setup_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    // Dropped files arrive as a bracketed paste
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore terminal to normal mode
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    execute!(stdout(), DisableBracketedPaste, LeaveAlternateScreen)?;
    Ok(())
}

/// Send log output to adbrowse.log next to the config file.
/// Without a writable log file, logging stays off.
fn init_logging(config: &Config) {
    let Some(path) = config::log_file() else {
        return;
    };
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let env = env_logger::Env::default().default_filter_or(config.logging.level.as_str());
    env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
}

/// Draw the whole screen for the current mode
fn draw(frame: &mut Frame, app: &mut App) {
    let size = frame.area();
    app.ui.terminal_height = size.height;

    if let Mode::Viewing { path, lines, scroll } = &app.mode {
        app.ui.viewer_height = TextViewer::content_height(size);
        frame.render_widget(TextViewer::new(path, lines, *scroll, &app.theme), size);
        return;
    }

    let busy = app.busy_label();
    let console_height = app.ui.console_height.min(size.height.saturating_sub(8));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),              // Header
            Constraint::Min(5),                 // Listing and preview
            Constraint::Length(1),              // Status bar
            Constraint::Length(console_height), // Console
            Constraint::Length(1),              // Function keys
        ])
        .split(size);

    frame.render_widget(HeaderBar::new(&app.device_status, &app.theme), rows[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(app.ui.listing_percent),
            Constraint::Percentage(100 - app.ui.listing_percent),
        ])
        .split(rows[1]);

    let listing = ListingWidget::new(&app.path, &app.entries, matches!(app.mode, Mode::Normal), &app.theme)
        .with_pending(app.navigator.pending_path());
    frame.render_stateful_widget(listing, columns[0], &mut app.listing);
    frame.render_widget(PreviewWidget::new(&app.pane, &app.theme), columns[1]);

    frame.render_widget(
        StatusBar::new(app.entries.len(), &app.theme).with_activity(busy.as_deref(), app.spinner_frame),
        rows[2],
    );
    frame.render_widget(ConsoleArea::new(app.console.lines(), &app.theme), rows[3]);
    frame.render_widget(FunctionKeyBar::new(&app.theme), rows[4]);

    draw_overlay(frame, app, size);
}

/// Dialogs drawn over the main screen
fn draw_overlay(frame: &mut Frame, app: &App, size: Rect) {
    match &app.mode {
        Mode::Prompt { kind, fields, cursors, focus, .. } => {
            let dialog = PromptDialog::new(*kind, fields, cursors, *focus, app.ui.input_selected, &app.theme);
            let cursor = dialog.cursor_position(size);
            frame.render_widget(dialog, size);
            if let Some(position) = cursor {
                frame.set_cursor_position(position);
            }
        }
        Mode::Notice { title, lines } => {
            frame.render_widget(NoticeDialog::new(title, lines, &app.theme), size);
        }
        Mode::Normal | Mode::Viewing { .. } => {}
    }
}

/// Main event loop
fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Subprocess completions land here
        app.poll();

        let busy = app.is_busy();
        if busy {
            app.tick_spinner();
        }

        // Shorter poll timeout while busy (smoother spinner)
        let poll_timeout = if busy { Duration::from_millis(50) } else { Duration::from_millis(100) };

        if event::poll(poll_timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => input::handle_key(app, key),
                Event::Paste(text) => input::handle_paste(app, &text),
                _ => {}
            }
        }

        if app.should_quit {
            // Save state before exiting
            app.save_state();
            break;
        }
    }
    Ok(())
}

fn main() -> io::Result<()> {
    setup_panic_hook();

    let (config, warnings) = Config::load();
    init_logging(&config);
    for warning in &warnings {
        log::warn!("{}", warning);
    }
    log::info!("adbrowse starting, adb: {}", config.general.adb_path);

    let mut app = App::new(config);
    app.start();

    let mut terminal = setup_terminal()?;
    let result = run(&mut terminal, &mut app);

    app.teardown();
    restore_terminal()?;

    result
}

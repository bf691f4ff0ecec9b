use super::{App, AppEvent, Config};
use crate::ui;
use crate::watch::{self, DropWatcher};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, SyncSender, TrySendError};
use std::thread;
use std::time::{Duration, Instant};

const APP_EVENT_QUEUE_CAPACITY: usize = 1024;

pub async fn run_tui(config: Config, uploads: Vec<PathBuf>) -> Result<()> {
    let mut app = App::new(config);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Bounded event queue; input ticks are dropped when it is full.
    let (event_tx, event_rx) = mpsc::sync_channel::<AppEvent>(APP_EVENT_QUEUE_CAPACITY);
    app.set_event_channel(event_tx.clone());

    let _drop_watcher = start_drop_watcher(&mut app, event_tx.clone());

    // Spawn event polling thread.
    let event_tx_input = event_tx.clone();
    thread::spawn(move || {
        input_worker(event_tx_input);
    });
    drop(event_tx);

    if !uploads.is_empty() {
        app.start_upload(&uploads);
    }

    let res = run_app(&mut terminal, &mut app, event_rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(
        images = app.gallery.len(),
        uploaded = app.uploads.completed,
        "session ended"
    );

    res
}

fn start_drop_watcher(app: &mut App, tx: SyncSender<AppEvent>) -> Option<DropWatcher> {
    let dir = app.config.drop_dir()?;
    match watch::watch_drop_dir(&dir, app.config.upload.extensions.clone(), tx) {
        Ok(watcher) => {
            app.toasts
                .info(format!("Watching {} for new images", watcher.dir.display()));
            Some(watcher)
        }
        Err(e) => {
            tracing::warn!(error = %e, "drop folder unavailable");
            app.toasts.error(format!("Drop folder: {:#}", e));
            None
        }
    }
}

/// Background thread that polls for input events.
fn input_worker(tx: SyncSender<AppEvent>) {
    loop {
        if event::poll(Duration::from_millis(50)).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => {
                    if tx.send(AppEvent::Key(key)).is_err() {
                        break;
                    }
                }
                Ok(Event::Resize(_, _)) => {
                    if tx.send(AppEvent::Resize).is_err() {
                        break;
                    }
                }
                _ => {}
            }
        } else {
            match tx.try_send(AppEvent::Tick) {
                Ok(()) | Err(TrySendError::Full(_)) => {}
                Err(TrySendError::Disconnected(_)) => break,
            }
        }
    }
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_rx: Receiver<AppEvent>,
) -> Result<()> {
    let mut last_theme_check = Instant::now();
    let mut current_theme_is_light = crate::ui::theme::is_light_theme();
    let mut needs_redraw = true;
    app.sync_lightbox();

    loop {
        // Check for theme change every 500ms and force full redraw.
        if last_theme_check.elapsed() >= Duration::from_millis(500) {
            let new_is_light = crate::ui::theme::is_light_theme();
            if new_is_light != current_theme_is_light {
                current_theme_is_light = new_is_light;
                app.ui.theme = crate::ui::theme::gallery_theme();
                terminal.clear()?;
                needs_redraw = true;
            }
            last_theme_check = Instant::now();
        }

        if needs_redraw {
            terminal.draw(|f| ui::draw(f, app))?;
            needs_redraw = false;
        }

        let events: Vec<AppEvent> = match event_rx.recv_timeout(Duration::from_millis(100)) {
            Ok(event) => {
                let mut events = vec![event];
                while let Ok(e) = event_rx.try_recv() {
                    events.push(e);
                }
                events
            }
            Err(mpsc::RecvTimeoutError::Timeout) => continue,
            Err(mpsc::RecvTimeoutError::Disconnected) => return Ok(()),
        };

        for event in events {
            match event {
                AppEvent::Key(key) => {
                    handle_key(app, key);
                    needs_redraw = true;
                }
                AppEvent::Upload(outcome) => {
                    app.handle_upload(outcome);
                    needs_redraw = true;
                }
                AppEvent::Dropped(paths) => {
                    app.handle_dropped(paths);
                    needs_redraw = true;
                }
                AppEvent::Resize => {
                    terminal.clear()?;
                    needs_redraw = true;
                }
                AppEvent::Tick => {
                    if app.toasts.expire(Instant::now()) {
                        needs_redraw = true;
                    }
                }
            }
        }
        app.sync_lightbox();

        if app.ui.should_quit {
            return Ok(());
        }
    }
}

/// Route one key press. Popups take input first, then command mode, then
/// the lightbox, then the grid.
pub(crate) fn handle_key(app: &mut App, key: KeyEvent) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Help popup blocks other input.
    if app.ui.show_help {
        if matches!(
            key.code,
            KeyCode::Char('?') | KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')
        ) {
            app.ui.show_help = false;
        }
        return;
    }

    if app.ui.confirm_delete.is_some() {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => app.confirm_delete(),
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => app.cancel_delete(),
            _ => {}
        }
        return;
    }

    // Command mode (vim-style :).
    if app.ui.command_mode {
        match key.code {
            KeyCode::Esc => app.exit_command_mode(),
            KeyCode::Enter => app.execute_command(),
            KeyCode::Backspace => app.command_backspace(),
            KeyCode::Char(c) => app.command_input(c),
            _ => {}
        }
        return;
    }

    let kb = &app.config.keybindings;
    let code = key.code;

    if app.gallery.lightbox().is_open() {
        if kb.matches(code, &kb.close) || code == KeyCode::Esc {
            app.close_lightbox();
        } else if kb.matches(code, &kb.next) || code == KeyCode::Right {
            app.lightbox_next();
        } else if kb.matches(code, &kb.prev) || code == KeyCode::Left {
            app.lightbox_prev();
        } else if kb.matches(code, &kb.favorite) {
            app.toggle_favorite_focused();
        } else if kb.matches(code, &kb.delete) {
            app.request_delete();
        } else if kb.matches(code, &kb.quit) {
            app.ui.should_quit = true;
        } else {
            handle_common_key(app, code);
        }
        return;
    }

    if kb.matches(code, &kb.quit) || code == KeyCode::Esc {
        app.ui.should_quit = true;
    } else if kb.matches(code, &kb.next) || code == KeyCode::Right {
        app.cursor_next();
    } else if kb.matches(code, &kb.prev) || code == KeyCode::Left {
        app.cursor_prev();
    } else if kb.matches(code, &kb.open) {
        app.open_lightbox();
    } else if kb.matches(code, &kb.favorite) {
        app.toggle_favorite_focused();
    } else if kb.matches(code, &kb.delete) {
        app.request_delete();
    } else if kb.matches(code, &kb.filter_next) {
        app.next_filter();
    } else if kb.matches(code, &kb.filter_prev) {
        app.prev_filter();
    } else {
        match code {
            KeyCode::Char('j') | KeyCode::Down => app.cursor_down(),
            KeyCode::Char('k') | KeyCode::Up => app.cursor_up(),
            KeyCode::Home | KeyCode::Char('g') => app.cursor_first(),
            KeyCode::End | KeyCode::Char('G') => app.cursor_last(),
            KeyCode::Char('0') => app.clear_filter(),
            KeyCode::Char(c @ '1'..='9') => app.select_filter_button((c as u8 - b'0') as usize),
            _ => handle_common_key(app, code),
        }
    }
}

fn handle_common_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char(':') => app.enter_command_mode(),
        KeyCode::Char('?') => app.ui.show_help = true,
        KeyCode::Char('x') => app.toasts.clear(),
        _ => {}
    }
}

//! Application core — event loop, action dispatch, API task spawning.

use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use librero_api::BooksClient;
use librero_core::SubmitRequest;
use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::action::{Action, ConfirmAction};
use crate::books::BooksScreen;
use crate::event::{Event, EventReader};
use crate::theme;
use crate::tui::Tui;

/// Top-level application state and event loop.
pub struct App {
    client: Arc<BooksClient>,
    screen: BooksScreen,
    /// Whether the app should keep running.
    running: bool,
    /// Pending confirmation dialog, if any.
    pending_confirm: Option<ConfirmAction>,
    /// Action sender — spawned tasks report back through this.
    action_tx: mpsc::UnboundedSender<Action>,
    /// Action receiver — main loop drains this.
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    #[must_use]
    pub fn new(client: BooksClient) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            client: Arc::new(client),
            screen: BooksScreen::new(),
            running: true,
            pending_confirm: None,
            action_tx,
            action_rx,
        }
    }

    /// Run the main event loop. This is the heart of the TUI.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        // Kick off the initial load.
        self.action_tx.send(Action::Reload)?;

        info!("TUI event loop started");

        while self.running {
            // 1. Wait for the next event
            let Some(event) = events.next().await else {
                break;
            };

            // 2. Map event → action(s)
            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key) {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => {
                    self.action_tx.send(Action::Resize(w, h))?;
                }
                Event::Tick => {
                    self.action_tx.send(Action::Tick)?;
                }
                Event::Render => {
                    self.action_tx.send(Action::Render)?;
                }
            }

            // 3. Drain and process all queued actions
            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action);

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        events.stop();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Global keys are handled here;
    /// everything else is delegated to the books screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        // Confirm dialog takes priority over everything
        if self.pending_confirm.is_some() {
            return match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            };
        }

        // Ctrl+C always quits; `q` only while the form is not open
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Some(Action::Quit);
        }
        if !self.screen.is_capturing_input() && key.code == KeyCode::Char('q') {
            return Some(Action::Quit);
        }

        self.screen.handle_key_event(key)
    }

    fn process_action(&mut self, action: &Action) {
        match action {
            Action::Quit => self.running = false,
            Action::Tick | Action::Render | Action::Resize(..) => {}

            Action::Reload => self.spawn_load(),
            Action::Submit(req) => self.spawn_submit(req.clone()),

            Action::ShowConfirm(confirm) => {
                self.pending_confirm = Some(confirm.clone());
            }
            Action::ConfirmYes => {
                if let Some(confirm) = self.pending_confirm.take() {
                    match confirm {
                        ConfirmAction::DeleteBook { id, .. } => {
                            self.screen.begin_delete();
                            self.spawn_delete(id);
                        }
                    }
                }
            }
            Action::ConfirmNo => {
                self.pending_confirm = None;
            }

            result @ (Action::BooksLoaded(_)
            | Action::BookCreated(_)
            | Action::BookUpdated(_)
            | Action::BookDeleted(..)) => {
                self.screen.update(result);
            }
        }
    }

    // ── API task spawning ─────────────────────────────────────────

    fn spawn_load(&self) {
        let client = Arc::clone(&self.client);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = client.list().await.map_err(|e| {
                warn!(error = %e, "loading books failed");
                e.to_string()
            });
            let _ = tx.send(Action::BooksLoaded(result));
        });
    }

    fn spawn_submit(&self, req: SubmitRequest) {
        let client = Arc::clone(&self.client);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match req {
                SubmitRequest::Create { draft } => {
                    let result = client.create(&draft).await.map_err(|e| {
                        warn!(error = %e, "creating book failed");
                        e.to_string()
                    });
                    let _ = tx.send(Action::BookCreated(result));
                }
                SubmitRequest::Update { id, draft } => {
                    let result = client.update(id, &draft).await.map_err(|e| {
                        warn!(error = %e, id, "updating book failed");
                        e.to_string()
                    });
                    let _ = tx.send(Action::BookUpdated(result));
                }
            }
        });
    }

    fn spawn_delete(&self, id: i64) {
        let client = Arc::clone(&self.client);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = client.delete(id).await.map_err(|e| {
                warn!(error = %e, id, "deleting book failed");
                e.to_string()
            });
            let _ = tx.send(Action::BookDeleted(id, result));
        });
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        self.screen.render(frame, area);

        if let Some(ref confirm) = self.pending_confirm {
            render_confirm_dialog(frame, area, confirm);
        }
    }
}

fn render_confirm_dialog(frame: &mut Frame, area: Rect, confirm: &ConfirmAction) {
    let width = 56u16.min(area.width.saturating_sub(4));
    let height = 5u16;

    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;
    let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

    frame.render_widget(Clear, dialog_area);
    frame.render_widget(
        Block::default().style(Style::default().bg(theme::BG_DARK)),
        dialog_area,
    );

    let block = Block::default()
        .title(" Confirmar ")
        .title_style(theme::title_style())
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::WARNING_YELLOW));

    let inner = block.inner(dialog_area);
    frame.render_widget(block, dialog_area);

    let text = vec![
        Line::from(Span::styled(
            format!("  {confirm}"),
            Style::default().fg(theme::DIM_WHITE),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("  y ", theme::key_hint_key()),
            Span::styled("confirmar    ", theme::key_hint()),
            Span::styled("n ", theme::key_hint_key()),
            Span::styled("cancelar", theme::key_hint()),
        ]),
    ];
    frame.render_widget(Paragraph::new(text), inner);
}

#[cfg(test)]
mod tests {
    use librero_core::Book;
    use pretty_assertions::assert_eq;

    use super::*;

    fn book(id: i64, titulo: &str) -> Book {
        Book {
            id: Some(id),
            titulo: titulo.into(),
            autor: "Autora".into(),
            anio_publicacion: "2001".into(),
            genero: "Novela".into(),
        }
    }

    fn app_with_books() -> App {
        let url = "http://localhost:8080".parse().expect("valid URL");
        let client =
            BooksClient::new(url, Duration::from_secs(1)).expect("client construction");
        let mut app = App::new(client);
        app.process_action(&Action::BooksLoaded(Ok(vec![
            book(1, "Uno"),
            book(2, "Dos"),
        ])));
        app
    }

    #[test]
    fn show_confirm_opens_the_dialog() {
        let mut app = app_with_books();
        app.process_action(&Action::ShowConfirm(ConfirmAction::DeleteBook {
            id: 1,
            titulo: "Uno".into(),
        }));
        assert!(app.pending_confirm.is_some());
    }

    #[test]
    fn declining_delete_changes_nothing_and_issues_no_request() {
        let mut app = app_with_books();
        app.process_action(&Action::ShowConfirm(ConfirmAction::DeleteBook {
            id: 1,
            titulo: "Uno".into(),
        }));
        app.process_action(&Action::ConfirmNo);

        assert!(app.pending_confirm.is_none());
        let library = app.screen.library();
        assert_eq!(library.books().len(), 2);
        assert_eq!(library.success_message(), None);
        assert_eq!(library.error_message(), None);
        // No delete (or any other) action was queued
        assert!(app.action_rx.try_recv().is_err());
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut app = app_with_books();
        app.process_action(&Action::Quit);
        assert!(!app.running);
    }
}

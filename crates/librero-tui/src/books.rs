//! The books screen — list table plus edit/create form overlay.
//!
//! Owns the [`Library`] controller. Key events are translated into either
//! local state changes (selection, form editing) or [`Action`]s for the app
//! loop to execute; API results come back through [`BooksScreen::update`].

use crossterm::event::{KeyCode, KeyEvent};
use librero_core::{Book, Library};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
};

use crate::action::{Action, ConfirmAction};
use crate::theme;

const FIELD_COUNT: usize = 4;

fn field_label(idx: usize) -> &'static str {
    match idx {
        0 => "Título",
        1 => "Autor",
        2 => "Año",
        _ => "Género",
    }
}

fn field_of(book: &Book, idx: usize) -> &String {
    match idx {
        0 => &book.titulo,
        1 => &book.autor,
        2 => &book.anio_publicacion,
        _ => &book.genero,
    }
}

fn field_of_mut(book: &mut Book, idx: usize) -> &mut String {
    match idx {
        0 => &mut book.titulo,
        1 => &mut book.autor,
        2 => &mut book.anio_publicacion,
        _ => &mut book.genero,
    }
}

/// List + form state for the book manager screen.
pub struct BooksScreen {
    library: Library,
    table_state: TableState,
    form_open: bool,
    field_idx: usize,
}

impl Default for BooksScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl BooksScreen {
    #[must_use]
    pub fn new() -> Self {
        Self {
            library: Library::new(),
            table_state: TableState::default(),
            form_open: false,
            field_idx: 0,
        }
    }

    /// Whether the form overlay is consuming keystrokes.
    #[must_use]
    pub fn is_capturing_input(&self) -> bool {
        self.form_open
    }

    #[must_use]
    pub fn selected_book(&self) -> Option<&Book> {
        self.table_state
            .selected()
            .and_then(|i| self.library.books().get(i))
    }

    /// Clear status messages ahead of a confirmed delete.
    pub fn begin_delete(&mut self) {
        self.library.begin_delete();
    }

    #[cfg(test)]
    pub(crate) fn library(&self) -> &Library {
        &self.library
    }

    fn move_selection(&mut self, delta: i64) {
        let len = self.library.books().len();
        if len == 0 {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, len as i64 - 1);
        self.table_state.select(Some(next as usize));
    }

    fn clamp_selection(&mut self) {
        let len = self.library.books().len();
        if len == 0 {
            self.table_state.select(None);
        } else {
            let idx = self.table_state.selected().unwrap_or(0).min(len - 1);
            self.table_state.select(Some(idx));
        }
    }

    fn open_form_for_new(&mut self) {
        self.library.reset_form();
        self.form_open = true;
        self.field_idx = 0;
    }

    fn open_form_for_edit(&mut self) {
        if let Some(book) = self.selected_book().cloned() {
            self.library.select_for_edit(&book);
            self.form_open = true;
            self.field_idx = 0;
        }
    }

    fn close_form(&mut self) {
        self.library.reset_form();
        self.form_open = false;
        self.field_idx = 0;
    }

    // ── Key handling ─────────────────────────────────────────────────

    pub fn handle_key_event(&mut self, key: KeyEvent) -> Option<Action> {
        if self.form_open {
            return self.handle_form_key(key);
        }

        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') => {
                if !self.library.books().is_empty() {
                    self.table_state.select(Some(0));
                }
                None
            }
            KeyCode::Char('G') => {
                let len = self.library.books().len();
                if len > 0 {
                    self.table_state.select(Some(len - 1));
                }
                None
            }
            KeyCode::Char('r') => Some(Action::Reload),
            KeyCode::Char('n') => {
                self.open_form_for_new();
                None
            }
            KeyCode::Char('e') | KeyCode::Enter => {
                self.open_form_for_edit();
                None
            }
            KeyCode::Char('d') => {
                // Books without a server id cannot be deleted.
                let book = self.selected_book()?;
                let id = book.id?;
                Some(Action::ShowConfirm(ConfirmAction::DeleteBook {
                    id,
                    titulo: book.titulo.clone(),
                }))
            }
            _ => None,
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.close_form();
                None
            }
            KeyCode::Enter => Some(Action::Submit(self.library.begin_submit())),
            KeyCode::Tab | KeyCode::Down => {
                self.field_idx = (self.field_idx + 1) % FIELD_COUNT;
                None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.field_idx = if self.field_idx == 0 {
                    FIELD_COUNT - 1
                } else {
                    self.field_idx - 1
                };
                None
            }
            KeyCode::Char(ch) => {
                field_of_mut(self.library.form_mut(), self.field_idx).push(ch);
                None
            }
            KeyCode::Backspace => {
                field_of_mut(self.library.form_mut(), self.field_idx).pop();
                None
            }
            _ => None,
        }
    }

    // ── API result handling ──────────────────────────────────────────

    /// Apply the outcome of a spawned API call.
    pub fn update(&mut self, action: &Action) {
        match action {
            Action::BooksLoaded(Ok(books)) => {
                self.library.apply_list_success(books.clone());
                self.clamp_selection();
            }
            Action::BooksLoaded(Err(_)) => self.library.apply_list_failure(),

            Action::BookCreated(Ok(created)) => {
                self.library.apply_create_success(created.clone());
                self.form_open = false;
                self.field_idx = 0;
                self.clamp_selection();
            }
            // The form stays open so the user can retry.
            Action::BookCreated(Err(_)) => self.library.apply_create_failure(),

            Action::BookUpdated(Ok(updated)) => {
                self.library.apply_update_success(updated.clone());
                self.form_open = false;
                self.field_idx = 0;
            }
            Action::BookUpdated(Err(_)) => self.library.apply_update_failure(),

            Action::BookDeleted(id, Ok(())) => {
                self.library.apply_delete_success(*id);
                self.clamp_selection();
            }
            Action::BookDeleted(_, Err(_)) => self.library.apply_delete_failure(),

            _ => {}
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let [table_area, message_area, hint_area] = Layout::vertical([
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        self.render_table(frame, table_area);
        self.render_message(frame, message_area);
        self.render_hints(frame, hint_area);

        if self.form_open {
            self.render_form(frame, area);
        }
    }

    fn render_table(&mut self, frame: &mut Frame, area: Rect) {
        let count = self.library.books().len();
        let block = Block::default()
            .title(format!(" Libros ({count}) "))
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_default());

        let header = Row::new(["ID", "Título", "Autor", "Año", "Género"].map(Cell::from))
            .style(theme::table_header());

        let rows: Vec<Row> = self
            .library
            .books()
            .iter()
            .map(|b| {
                Row::new([
                    Cell::from(b.id.map(|id| id.to_string()).unwrap_or_default()),
                    Cell::from(b.titulo.clone()),
                    Cell::from(b.autor.clone()),
                    Cell::from(b.anio_publicacion.clone()),
                    Cell::from(b.genero.clone()),
                ])
                .style(theme::table_row())
            })
            .collect();

        let widths = [
            Constraint::Length(6),
            Constraint::Percentage(35),
            Constraint::Percentage(30),
            Constraint::Length(6),
            Constraint::Percentage(20),
        ];

        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(theme::table_selected());

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn render_message(&self, frame: &mut Frame, area: Rect) {
        let line = if let Some(msg) = self.library.error_message() {
            Line::from(Span::styled(format!(" {msg}"), theme::error_style()))
        } else if let Some(msg) = self.library.success_message() {
            Line::from(Span::styled(format!(" {msg}"), theme::success_style()))
        } else {
            Line::from("")
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_hints(&self, frame: &mut Frame, area: Rect) {
        let hints = Line::from(vec![
            Span::styled(" j/k", theme::key_hint_key()),
            Span::styled(" mover  ", theme::key_hint()),
            Span::styled("n", theme::key_hint_key()),
            Span::styled(" nuevo  ", theme::key_hint()),
            Span::styled("e", theme::key_hint_key()),
            Span::styled(" editar  ", theme::key_hint()),
            Span::styled("d", theme::key_hint_key()),
            Span::styled(" eliminar  ", theme::key_hint()),
            Span::styled("r", theme::key_hint_key()),
            Span::styled(" recargar  ", theme::key_hint()),
            Span::styled("q", theme::key_hint_key()),
            Span::styled(" salir", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), area);
    }

    fn render_form(&self, frame: &mut Frame, area: Rect) {
        let width = 60u16.min(area.width.saturating_sub(4));
        let height = (FIELD_COUNT as u16) + 4;

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let overlay_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, overlay_area);
        frame.render_widget(
            Block::default().style(Style::default().bg(theme::BG_DARK)),
            overlay_area,
        );

        let title = if self.library.is_editing() {
            " Editar libro "
        } else {
            " Nuevo libro "
        };
        let block = Block::default()
            .title(title)
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Double)
            .border_style(Style::default().fg(theme::ACCENT));

        let inner = block.inner(overlay_area);
        frame.render_widget(block, overlay_area);

        let label = Style::default().fg(theme::DIM_WHITE);
        let focused_label = Style::default().fg(theme::WARNING_YELLOW);
        let value_style = Style::default().fg(theme::HEADER_BLUE);

        let mut lines = Vec::new();
        for idx in 0..FIELD_COUNT {
            let is_focused = idx == self.field_idx;
            let lbl_style = if is_focused { focused_label } else { label };
            let marker = if is_focused { "▸ " } else { "  " };
            let cursor = if is_focused { "▎" } else { "" };

            lines.push(Line::from(vec![
                Span::styled(marker, lbl_style),
                Span::styled(format!("{:<10}", field_label(idx)), lbl_style),
                Span::styled(field_of(self.library.form(), idx).clone(), value_style),
                Span::styled(cursor, Style::default().fg(theme::WARNING_YELLOW)),
            ]));
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Tab", theme::key_hint_key()),
            Span::styled(" campo  ", theme::key_hint()),
            Span::styled("Enter", theme::key_hint_key()),
            Span::styled(" guardar  ", theme::key_hint()),
            Span::styled("Esc", theme::key_hint_key()),
            Span::styled(" cancelar", theme::key_hint()),
        ]));

        frame.render_widget(Paragraph::new(lines), inner);
    }
}

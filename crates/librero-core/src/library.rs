//! The list/form controller.
//!
//! `Library` holds the loaded books, the working draft, the current selection
//! and the status message slots. It performs no I/O: callers run the network
//! request described by a [`SubmitRequest`] (or a delete) and feed the
//! outcome back through the matching `apply_*` method. Success and failure
//! are therefore separate transitions, and each one is synchronous and
//! unit-testable.

use librero_api::Book;
use tracing::debug;

use crate::messages;

/// The network intent produced by [`Library::begin_submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitRequest {
    /// POST the draft as a new book.
    Create { draft: Book },
    /// PUT the draft over the existing book at `id`.
    Update { id: i64, draft: Book },
}

/// List/form state for the book manager.
///
/// The draft (`form`) is always a full value copy: editing it never touches
/// the entry in `books` until an update round-trips through the server.
#[derive(Debug, Default)]
pub struct Library {
    books: Vec<Book>,
    form: Book,
    selected: Option<Book>,
    editing: bool,
    success_message: Option<&'static str>,
    error_message: Option<&'static str>,
}

impl Library {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Accessors ────────────────────────────────────────────────────

    #[must_use]
    pub fn books(&self) -> &[Book] {
        &self.books
    }

    #[must_use]
    pub fn form(&self) -> &Book {
        &self.form
    }

    /// Mutable access to the draft, for form field editing.
    pub fn form_mut(&mut self) -> &mut Book {
        &mut self.form
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Book> {
        self.selected.as_ref()
    }

    /// Whether the draft edits an existing book (vs. creating a new one).
    #[must_use]
    pub fn is_editing(&self) -> bool {
        self.editing
    }

    #[must_use]
    pub fn success_message(&self) -> Option<&'static str> {
        self.success_message
    }

    #[must_use]
    pub fn error_message(&self) -> Option<&'static str> {
        self.error_message
    }

    // ── Load ─────────────────────────────────────────────────────────

    /// Replace the list with a fresh server snapshot.
    pub fn apply_list_success(&mut self, books: Vec<Book>) {
        debug!(count = books.len(), "book list loaded");
        self.books = books;
        self.error_message = None;
    }

    /// A load failed; keep whatever list we had.
    pub fn apply_list_failure(&mut self) {
        self.error_message = Some(messages::LOAD_ERROR);
    }

    // ── Select / reset ───────────────────────────────────────────────

    /// Copy `book` into the draft (id included) and mark it selected.
    /// Clears both status messages.
    pub fn select_for_edit(&mut self, book: &Book) {
        self.form = book.clone();
        self.selected = Some(book.clone());
        self.editing = true;
        self.success_message = None;
        self.error_message = None;
    }

    /// Empty the draft and drop the selection. Messages are left alone so
    /// the outcome of the operation that triggered the reset stays visible.
    pub fn reset_form(&mut self) {
        self.form = Book::default();
        self.selected = None;
        self.editing = false;
    }

    // ── Submit (create / update) ─────────────────────────────────────

    /// Start a form submission: clear both messages and describe the
    /// request the caller should perform.
    pub fn begin_submit(&mut self) -> SubmitRequest {
        self.success_message = None;
        self.error_message = None;
        match self.selected.as_ref().and_then(|b| b.id) {
            Some(id) => SubmitRequest::Update {
                id,
                draft: self.form.clone(),
            },
            None => SubmitRequest::Create {
                draft: self.form.clone(),
            },
        }
    }

    /// The server accepted a create; append its copy and reset the form.
    pub fn apply_create_success(&mut self, created: Book) {
        self.books.push(created);
        self.success_message = Some(messages::CREATE_SUCCESS);
        self.reset_form();
    }

    pub fn apply_create_failure(&mut self) {
        self.error_message = Some(messages::CREATE_ERROR);
    }

    /// The server accepted an update; replace the matching list entry (by
    /// id) and reset the form. A missing match leaves the list unchanged.
    pub fn apply_update_success(&mut self, updated: Book) {
        if let Some(slot) = self.books.iter_mut().find(|b| b.id == updated.id) {
            *slot = updated;
        }
        self.success_message = Some(messages::UPDATE_SUCCESS);
        self.reset_form();
    }

    pub fn apply_update_failure(&mut self) {
        self.error_message = Some(messages::UPDATE_ERROR);
    }

    // ── Delete ───────────────────────────────────────────────────────

    /// Start a confirmed delete: clear both messages. Call only after the
    /// user confirmed and only for a persisted book.
    pub fn begin_delete(&mut self) {
        self.success_message = None;
        self.error_message = None;
    }

    /// The server deleted `id`; drop it from the list, and reset the form
    /// if the deleted book was the one being edited.
    pub fn apply_delete_success(&mut self, id: i64) {
        self.books.retain(|b| b.id != Some(id));
        if self.selected.as_ref().and_then(|b| b.id) == Some(id) {
            self.reset_form();
        }
        self.success_message = Some(messages::DELETE_SUCCESS);
    }

    pub fn apply_delete_failure(&mut self) {
        self.error_message = Some(messages::DELETE_ERROR);
    }
}

#[cfg(test)]
mod tests {
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

    fn loaded() -> Library {
        let mut lib = Library::new();
        lib.apply_list_success(vec![book(1, "Uno"), book(2, "Dos")]);
        lib
    }

    // ── Load ─────────────────────────────────────────────────────────

    #[test]
    fn list_success_replaces_books_and_clears_error() {
        let mut lib = Library::new();
        lib.apply_list_failure();
        assert_eq!(lib.error_message(), Some("Error al cargar los libros."));

        lib.apply_list_success(vec![book(1, "Uno")]);
        assert_eq!(lib.books().len(), 1);
        assert_eq!(lib.error_message(), None);
    }

    #[test]
    fn list_failure_keeps_existing_books() {
        let mut lib = loaded();
        lib.apply_list_failure();
        assert_eq!(lib.books().len(), 2);
        assert_eq!(lib.error_message(), Some("Error al cargar los libros."));
    }

    // ── Select / reset ───────────────────────────────────────────────

    #[test]
    fn select_for_edit_copies_whole_book_including_id() {
        let mut lib = loaded();
        let target = lib.books()[1].clone();
        lib.select_for_edit(&target);

        assert_eq!(lib.form(), &target);
        assert_eq!(lib.form().id, Some(2));
        assert!(lib.is_editing());
        assert_eq!(lib.selected().map(|b| b.id), Some(Some(2)));
    }

    #[test]
    fn select_for_edit_clears_messages() {
        let mut lib = loaded();
        lib.apply_create_failure();
        let target = lib.books()[0].clone();
        lib.select_for_edit(&target);
        assert_eq!(lib.success_message(), None);
        assert_eq!(lib.error_message(), None);
    }

    #[test]
    fn editing_draft_does_not_mutate_list_entry() {
        let mut lib = loaded();
        let target = lib.books()[0].clone();
        lib.select_for_edit(&target);
        lib.form_mut().titulo = "Cambiado".into();
        assert_eq!(lib.books()[0].titulo, "Uno");
    }

    #[test]
    fn reset_form_leaves_messages_alone() {
        let mut lib = loaded();
        lib.apply_create_success(book(3, "Tres"));
        lib.reset_form();
        assert_eq!(lib.success_message(), Some("Libro creado correctamente."));
        assert_eq!(lib.form(), &Book::default());
        assert!(!lib.is_editing());
    }

    // ── Submit ───────────────────────────────────────────────────────

    #[test]
    fn submit_without_selection_is_create() {
        let mut lib = loaded();
        lib.form_mut().titulo = "Nuevo".into();
        let req = lib.begin_submit();
        match req {
            SubmitRequest::Create { draft } => {
                assert_eq!(draft.id, None);
                assert_eq!(draft.titulo, "Nuevo");
            }
            SubmitRequest::Update { .. } => panic!("expected Create, got {req:?}"),
        }
    }

    #[test]
    fn submit_with_selection_is_update() {
        let mut lib = loaded();
        let target = lib.books()[0].clone();
        lib.select_for_edit(&target);
        lib.form_mut().titulo = "Uno bis".into();
        let req = lib.begin_submit();
        assert_eq!(
            req,
            SubmitRequest::Update {
                id: 1,
                draft: Book {
                    titulo: "Uno bis".into(),
                    ..target
                },
            }
        );
    }

    #[test]
    fn begin_submit_clears_both_messages() {
        let mut lib = loaded();
        lib.apply_update_failure();
        let _ = lib.begin_submit();
        assert_eq!(lib.success_message(), None);
        assert_eq!(lib.error_message(), None);
    }

    #[test]
    fn create_success_appends_server_copy_and_resets() {
        let mut lib = loaded();
        lib.form_mut().titulo = "Nuevo".into();
        let _ = lib.begin_submit();
        lib.apply_create_success(book(3, "Nuevo"));

        assert_eq!(lib.books().len(), 3);
        assert_eq!(lib.books()[2].id, Some(3));
        assert_eq!(lib.success_message(), Some("Libro creado correctamente."));
        assert_eq!(lib.form(), &Book::default());
        assert!(!lib.is_editing());
    }

    #[test]
    fn create_failure_retains_draft() {
        let mut lib = Library::new();
        lib.form_mut().titulo = "Nuevo".into();
        let _ = lib.begin_submit();
        lib.apply_create_failure();

        assert_eq!(lib.error_message(), Some("Error al crear el libro."));
        assert_eq!(lib.form().titulo, "Nuevo");
    }

    #[test]
    fn update_success_replaces_matched_entry_only() {
        let mut lib = loaded();
        let target = lib.books()[0].clone();
        lib.select_for_edit(&target);
        lib.form_mut().titulo = "Uno bis".into();
        let _ = lib.begin_submit();
        lib.apply_update_success(book(1, "Uno bis"));

        assert_eq!(lib.books().len(), 2);
        assert_eq!(lib.books()[0].titulo, "Uno bis");
        assert_eq!(lib.books()[1].titulo, "Dos");
        assert_eq!(
            lib.success_message(),
            Some("Libro actualizado correctamente.")
        );
        assert_eq!(lib.selected(), None);
    }

    #[test]
    fn update_success_with_unknown_id_leaves_list_unchanged() {
        let mut lib = loaded();
        lib.apply_update_success(book(99, "Fantasma"));
        assert_eq!(lib.books().len(), 2);
        assert_eq!(lib.books()[0].titulo, "Uno");
    }

    #[test]
    fn update_failure_keeps_draft_for_retry() {
        let mut lib = loaded();
        let target = lib.books()[0].clone();
        lib.select_for_edit(&target);
        lib.form_mut().titulo = "Uno bis".into();
        let _ = lib.begin_submit();
        lib.apply_update_failure();

        assert_eq!(lib.error_message(), Some("Error al actualizar el libro."));
        assert_eq!(lib.form().titulo, "Uno bis");
        assert!(lib.is_editing());
    }

    // ── Delete ───────────────────────────────────────────────────────

    #[test]
    fn delete_success_removes_by_id_only() {
        let mut lib = loaded();
        lib.begin_delete();
        lib.apply_delete_success(1);

        assert_eq!(lib.books().len(), 1);
        assert_eq!(lib.books()[0].id, Some(2));
        assert_eq!(
            lib.success_message(),
            Some("Libro eliminado correctamente.")
        );
    }

    #[test]
    fn delete_of_selected_book_resets_form() {
        let mut lib = loaded();
        let target = lib.books()[0].clone();
        lib.select_for_edit(&target);
        lib.begin_delete();
        lib.apply_delete_success(1);

        assert_eq!(lib.form(), &Book::default());
        assert_eq!(lib.selected(), None);
        assert!(!lib.is_editing());
    }

    #[test]
    fn delete_of_other_book_keeps_selection() {
        let mut lib = loaded();
        let target = lib.books()[0].clone();
        lib.select_for_edit(&target);
        lib.begin_delete();
        lib.apply_delete_success(2);

        assert_eq!(lib.selected().map(|b| b.id), Some(Some(1)));
        assert!(lib.is_editing());
    }

    #[test]
    fn delete_failure_leaves_list_unchanged() {
        let mut lib = loaded();
        lib.begin_delete();
        lib.apply_delete_failure();

        assert_eq!(lib.books().len(), 2);
        assert_eq!(lib.error_message(), Some("Error al eliminar el libro."));
    }
}

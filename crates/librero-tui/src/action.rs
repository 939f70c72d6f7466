//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::fmt;

use librero_core::messages;
use librero_core::{Book, SubmitRequest};

/// Pending confirmation action.
#[derive(Debug, Clone)]
pub enum ConfirmAction {
    DeleteBook { id: i64, titulo: String },
}

impl fmt::Display for ConfirmAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DeleteBook { titulo, .. } => {
                write!(f, "{}", messages::confirm_delete_prompt(titulo))
            }
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Requests (spawn an API call) ──────────────────────────────
    Reload,
    Submit(SubmitRequest),

    // ── Confirm Dialog ────────────────────────────────────────────
    ShowConfirm(ConfirmAction),
    ConfirmYes,
    ConfirmNo,

    // ── API Results (fed back from spawned tasks) ─────────────────
    BooksLoaded(Result<Vec<Book>, String>),
    BookCreated(Result<Book, String>),
    BookUpdated(Result<Book, String>),
    BookDeleted(i64, Result<(), String>),
}

//! List/form state machine between `librero-api` and UI consumers (CLI / TUI).
//!
//! This crate owns the business logic for the book manager workspace:
//!
//! - **[`Library`]** — the list/form controller. Holds the loaded books, a
//!   working draft, the current selection, and the success/error message
//!   slots. Every user-visible state change is one named transition method,
//!   so frontends (TUI today, anything tomorrow) stay thin: they translate
//!   input into transitions and render the resulting state.
//!
//! - **[`SubmitRequest`]** — the network intent produced by
//!   [`Library::begin_submit`]: either a create from a draft or an update of
//!   an existing id. Callers perform the request and feed the result back
//!   through the matching `apply_*` transition.
//!
//! - **[`messages`]** — the fixed Spanish status strings shown after each
//!   operation, shared verbatim by all frontends.
//!
//! The controller is deliberately synchronous and side-effect free: it never
//! performs I/O itself, which keeps every transition unit-testable.

pub mod library;
pub mod messages;

pub use library::{Library, SubmitRequest};

// Re-export the domain type so frontends depend on one crate.
pub use librero_api::Book;

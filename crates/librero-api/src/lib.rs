//! Async client for the librero book server.
//!
//! Wraps a REST API exposing a single `books` resource at `/api/libros`
//! with five operations: list, get-by-id, create, update, and delete.
//! The client does no retries and no caching — each call produces exactly
//! one result, success or [`Error`].

pub mod book;
pub mod client;
pub mod error;

pub use book::Book;
pub use client::BooksClient;
pub use error::Error;

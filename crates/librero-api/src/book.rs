//! The `Book` entity as exchanged with the server.

use serde::{Deserialize, Serialize};

/// A book, persisted or draft.
///
/// The wire shape keeps the server's Spanish field names:
/// `{ id?, titulo, autor, anioPublicacion, genero }`. `id` is assigned by
/// the server and omitted from serialized drafts — an entity is persisted
/// iff `id` is present, and only persisted entities may be updated or
/// deleted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub titulo: String,
    pub autor: String,
    pub anio_publicacion: String,
    pub genero: String,
}

impl Book {
    /// Whether this book carries a server-assigned id.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

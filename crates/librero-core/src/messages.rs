//! Fixed user-facing status strings.
//!
//! Kept in one place so the CLI and TUI show identical wording.

/// Shown when the initial list load fails.
pub const LOAD_ERROR: &str = "Error al cargar los libros.";

/// Shown after a successful create.
pub const CREATE_SUCCESS: &str = "Libro creado correctamente.";
/// Shown when a create fails.
pub const CREATE_ERROR: &str = "Error al crear el libro.";

/// Shown after a successful update.
pub const UPDATE_SUCCESS: &str = "Libro actualizado correctamente.";
/// Shown when an update fails.
pub const UPDATE_ERROR: &str = "Error al actualizar el libro.";

/// Shown after a successful delete.
pub const DELETE_SUCCESS: &str = "Libro eliminado correctamente.";
/// Shown when a delete fails.
pub const DELETE_ERROR: &str = "Error al eliminar el libro.";

/// The confirmation prompt shown before deleting a book.
#[must_use]
pub fn confirm_delete_prompt(titulo: &str) -> String {
    format!("¿Seguro que deseas eliminar el libro \"{titulo}\"?")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_title() {
        assert_eq!(
            confirm_delete_prompt("Rayuela"),
            "¿Seguro que deseas eliminar el libro \"Rayuela\"?"
        );
    }
}

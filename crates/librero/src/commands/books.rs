//! Book command handlers.

use librero_api::{Book, BooksClient};
use librero_core::messages;
use tabled::Tabled;

use crate::cli::{BookFieldOverrides, BookFields, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct BookRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Título")]
    titulo: String,
    #[tabled(rename = "Autor")]
    autor: String,
    #[tabled(rename = "Año")]
    anio: String,
    #[tabled(rename = "Género")]
    genero: String,
}

impl From<&Book> for BookRow {
    fn from(b: &Book) -> Self {
        Self {
            id: b.id.map(|id| id.to_string()).unwrap_or_default(),
            titulo: b.titulo.clone(),
            autor: b.autor.clone(),
            anio: b.anio_publicacion.clone(),
            genero: b.genero.clone(),
        }
    }
}

fn book_id(b: &Book) -> String {
    b.id.map(|id| id.to_string()).unwrap_or_default()
}

fn book_detail(b: &Book) -> String {
    format!(
        "ID:      {}\n\
         Título:  {}\n\
         Autor:   {}\n\
         Año:     {}\n\
         Género:  {}",
        book_id(b),
        b.titulo,
        b.autor,
        b.anio_publicacion,
        b.genero
    )
}

// ── Handlers ────────────────────────────────────────────────────────

pub async fn list(client: &BooksClient, global: &GlobalOpts) -> Result<(), CliError> {
    let books = client
        .list()
        .await
        .map_err(|e| CliError::from_api(e, client.base_url()))?;
    let out = output::render_list(&global.output, &books, |b| BookRow::from(b), book_id);
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn show(client: &BooksClient, id: i64, global: &GlobalOpts) -> Result<(), CliError> {
    let book = client
        .get(id)
        .await
        .map_err(|e| CliError::from_api(e, client.base_url()))?;
    let out = output::render_single(&global.output, &book, book_detail, book_id);
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn add(
    client: &BooksClient,
    fields: BookFields,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let draft = Book {
        id: None,
        titulo: fields.titulo,
        autor: fields.autor,
        anio_publicacion: fields.anio_publicacion,
        genero: fields.genero,
    };
    let created = client
        .create(&draft)
        .await
        .map_err(|e| CliError::from_api(e, client.base_url()))?;
    if !global.quiet {
        eprintln!("{} (id {})", messages::CREATE_SUCCESS, book_id(&created));
    }
    Ok(())
}

pub async fn edit(
    client: &BooksClient,
    id: i64,
    fields: BookFieldOverrides,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    // Fetch the current entity, then overlay the provided flags.
    let mut book = client
        .get(id)
        .await
        .map_err(|e| CliError::from_api(e, client.base_url()))?;

    if let Some(titulo) = fields.titulo {
        book.titulo = titulo;
    }
    if let Some(autor) = fields.autor {
        book.autor = autor;
    }
    if let Some(anio) = fields.anio_publicacion {
        book.anio_publicacion = anio;
    }
    if let Some(genero) = fields.genero {
        book.genero = genero;
    }

    client
        .update(id, &book)
        .await
        .map_err(|e| CliError::from_api(e, client.base_url()))?;
    if !global.quiet {
        eprintln!("{}", messages::UPDATE_SUCCESS);
    }
    Ok(())
}

pub async fn rm(client: &BooksClient, id: i64, global: &GlobalOpts) -> Result<(), CliError> {
    // Fetch first so the confirmation prompt can name the book.
    let book = client
        .get(id)
        .await
        .map_err(|e| CliError::from_api(e, client.base_url()))?;

    if !util::confirm(&messages::confirm_delete_prompt(&book.titulo), global.yes)? {
        return Ok(());
    }

    client
        .delete(id)
        .await
        .map_err(|e| CliError::from_api(e, client.base_url()))?;
    if !global.quiet {
        eprintln!("{}", messages::DELETE_SUCCESS);
    }
    Ok(())
}

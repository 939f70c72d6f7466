//! Command dispatch.

pub mod books;
pub mod util;

use librero_api::BooksClient;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

/// Route a parsed command to its handler.
pub async fn dispatch(
    command: Command,
    client: &BooksClient,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match command {
        Command::List => books::list(client, global).await,
        Command::Show { id } => books::show(client, id, global).await,
        Command::Add { fields } => books::add(client, fields, global).await,
        Command::Edit { id, fields } => books::edit(client, id, fields, global).await,
        Command::Rm { id } => books::rm(client, id, global).await,
    }
}

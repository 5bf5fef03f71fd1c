use std::io;

use thiserror::Error;
use tick_core::auth::AuthError;
use tick_core::rest::DataError;
use tick_core::session::SessionError;
use tick_core::todos::TodoError;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Todo(#[from] TodoError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid due date '{0}'. Use YYYY-MM-DD.")]
    InvalidDate(String),
    #[error("No changes given. Pass --title, --description, or --due.")]
    NothingToEdit,
    #[error("Not signed in. Run `tick auth login` first.")]
    NotSignedIn,
}

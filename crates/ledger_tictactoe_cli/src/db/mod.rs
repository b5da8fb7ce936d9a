//! SQLite persistence for the game registry.

mod error;
mod models;
mod repository;
mod schema;

pub use error::{DbError, DbErrorKind};
pub use models::GameRow;
pub use repository::GameRepository;

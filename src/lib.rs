pub mod birthdays;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod store;

pub use config::Config;
pub use error::BookError;
pub use store::Phonebook;

pub mod config;
pub mod db;
pub mod errors;
pub mod handlers;
pub mod routes;

pub use config::Settings;
pub use db::{connect, connect_with, init_database, Connection};
pub use errors::BootstrapError;

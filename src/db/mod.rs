mod database;

pub use database::{connect, connect_with, init_database, resolve_database_name, Connection, DEFAULT_DATABASE};

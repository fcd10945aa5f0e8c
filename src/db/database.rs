use log::{debug, info};
use mongodb::{bson::doc, options::ClientOptions, Client, Database};

use crate::config::Settings;
use crate::errors::BootstrapError;

// Selected when neither the URI nor MONGO_DB_NAME names a database.
pub const DEFAULT_DATABASE: &str = "test";

/// Live handle to the database, owned by whoever called `connect`.
/// Clones share the driver's underlying pool.
#[derive(Debug, Clone)]
pub struct Connection {
    client: Client,
    database: Database,
}

impl Connection {
    /// Wraps an existing client without contacting the server.
    pub fn from_client(client: Client, database_name: &str) -> Self {
        let database = client.database(database_name);
        Connection { client, database }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn database_name(&self) -> &str {
        self.database.name()
    }

    /// Single round trip to the server. No retry.
    pub async fn ping(&self) -> Result<(), mongodb::error::Error> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}

/// Reads `MONGO_URI` (and friends) from the environment and connects.
///
/// Entry point for embedding the connector in another service. The bundled
/// binary also needs `BIND_ADDR`, so it builds `Settings` itself and calls
/// `init_database`.
pub async fn connect() -> Result<Connection, BootstrapError> {
    connect_with(|key| std::env::var(key).ok()).await
}

/// `connect` with an explicit variable lookup instead of the process environment.
pub async fn connect_with<F>(lookup: F) -> Result<Connection, BootstrapError>
where
    F: Fn(&str) -> Option<String>,
{
    let settings = Settings::from_lookup(lookup)?;
    init_database(&settings).await
}

/// One connection attempt against `settings.uri()`.
///
/// The driver only opens sockets lazily, so a `ping` is issued to make the
/// attempt resolve to either a reachable server or an error. Server selection
/// waits for the driver default (30s) unless the URI sets
/// `serverSelectionTimeoutMS`.
pub async fn init_database(settings: &Settings) -> Result<Connection, BootstrapError> {
    let mut client_options = ClientOptions::parse(settings.uri()).await?;
    if client_options.app_name.is_none() {
        client_options.app_name = Some(settings.app_name().to_string());
    }

    let database_name = resolve_database_name(
        client_options.default_database.as_deref(),
        settings.database_name(),
    );
    debug!("connecting to MongoDB database {}", database_name);

    let client = Client::with_options(client_options)?;
    let connection = Connection::from_client(client, &database_name);
    connection.ping().await?;

    info!("database connected ({})", connection.database_name());
    Ok(connection)
}

pub fn resolve_database_name(from_uri: Option<&str>, configured: Option<&str>) -> String {
    from_uri
        .filter(|name| !name.is_empty())
        .or(configured)
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn uri_database_wins_over_configured_name() {
        assert_eq!(resolve_database_name(Some("testdb"), Some("other")), "testdb");
    }

    #[test]
    fn configured_name_is_used_when_uri_has_none() {
        assert_eq!(resolve_database_name(None, Some("inventory")), "inventory");
        assert_eq!(resolve_database_name(Some(""), Some("inventory")), "inventory");
    }

    #[test]
    fn falls_back_to_default_database() {
        assert_eq!(resolve_database_name(None, None), DEFAULT_DATABASE);
    }

    #[actix_web::test]
    async fn empty_uri_is_rejected_by_the_driver() {
        let err = init_database(&Settings::new("")).await.unwrap_err();
        assert!(matches!(err, BootstrapError::Connection(_)));
        assert!(err.to_string().starts_with("MongoDB connection failed:"));
    }

    #[actix_web::test]
    async fn malformed_uri_is_rejected_by_the_driver() {
        let err = init_database(&Settings::new("postgres://localhost:5432/app"))
            .await
            .unwrap_err();
        assert!(matches!(err, BootstrapError::Connection(_)));
    }

    #[actix_web::test]
    async fn unreachable_endpoint_fails_within_selection_timeout() {
        let settings = Settings::new("mongodb://127.0.0.1:1/testdb?serverSelectionTimeoutMS=200");

        let started = Instant::now();
        let err = init_database(&settings).await.unwrap_err();

        assert!(matches!(err, BootstrapError::Connection(_)));
        // one attempt, one selection window
        assert!(started.elapsed() < Duration::from_secs(5));
    }

    #[actix_web::test]
    async fn from_client_selects_database_without_contacting_server() {
        let client = Client::with_uri_str("mongodb://127.0.0.1:1").await.unwrap();
        let connection = Connection::from_client(client, "inventory");

        assert_eq!(connection.database_name(), "inventory");
        assert_eq!(connection.database().name(), "inventory");
        assert_eq!(connection.client().database("inventory").name(), "inventory");
    }

    #[actix_web::test]
    async fn connect_with_reads_uri_from_lookup() {
        let err = connect_with(|key| {
            (key == crate::config::MONGO_URI)
                .then(|| "mongodb://127.0.0.1:1/envdb?serverSelectionTimeoutMS=200".to_string())
        })
        .await
        .unwrap_err();
        assert!(matches!(err, BootstrapError::Connection(_)));
    }

    #[actix_web::test]
    async fn connect_with_reports_missing_uri() {
        let err = connect_with(|_| None).await.unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::MissingVar { name: crate::config::MONGO_URI }
        ));
    }

    #[actix_web::test]
    #[ignore = "requires mongodb"]
    async fn connects_to_local_server() {
        let settings = Settings::new("mongodb://localhost:27017/testdb");
        let connection = init_database(&settings).await.unwrap();
        assert_eq!(connection.database_name(), "testdb");
        connection.ping().await.unwrap();
    }
}

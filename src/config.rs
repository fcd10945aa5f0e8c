use std::env;

use crate::errors::BootstrapError;

pub const MONGO_URI: &str = "MONGO_URI";
pub const MONGO_DB_NAME: &str = "MONGO_DB_NAME";
pub const MONGO_APP_NAME: &str = "MONGO_APP_NAME";
pub const BIND_ADDR: &str = "BIND_ADDR";

pub const DEFAULT_APP_NAME: &str = "mongo-bootstrap";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Startup settings, read once from the process environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    uri: String,
    database_name: Option<String>,
    app_name: String,
    bind_addr: String,
}

impl Settings {
    pub fn new(uri: impl Into<String>) -> Self {
        Settings {
            uri: uri.into(),
            database_name: None,
            app_name: DEFAULT_APP_NAME.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
        }
    }

    /// Reads settings from the environment. Call `dotenv::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Result<Self, BootstrapError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, BootstrapError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An empty URI is still handed to the driver, which rejects it.
        let uri = lookup(MONGO_URI).ok_or(BootstrapError::MissingVar { name: MONGO_URI })?;
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let mut settings = Settings::new(uri);
        if let Some(name) = non_empty(MONGO_DB_NAME) {
            settings = settings.with_database_name(name);
        }
        if let Some(app_name) = non_empty(MONGO_APP_NAME) {
            settings = settings.with_app_name(app_name);
        }
        if let Some(addr) = non_empty(BIND_ADDR) {
            settings = settings.with_bind_addr(addr);
        }
        Ok(settings)
    }

    pub fn with_database_name(mut self, name: impl Into<String>) -> Self {
        self.database_name = Some(name.into());
        self
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = app_name.into();
        self
    }

    pub fn with_bind_addr(mut self, addr: impl Into<String>) -> Self {
        self.bind_addr = addr.into();
        self
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn database_name(&self) -> Option<&str> {
        self.database_name.as_deref()
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn bind_addr(&self) -> &str {
        &self.bind_addr
    }
}

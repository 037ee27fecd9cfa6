use std::{fmt, net::SocketAddr, path::Path};

use anyhow::Context;

pub const ENV_FILE: &str = ".env";

/// Address the MySQL driver dials when `ADDR` is left empty.
const DEFAULT_DB_ADDR: &str = "127.0.0.1:3306";

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub db_user: String,
    pub db_pass: String,
    pub db_addr: String,
    pub db_name: String,
    /// Takes precedence over the DSN assembled from the `DB*` keys.
    pub database_url_override: Option<String>,
}

impl Config {
    /// Loads `path` into the process environment, then reads the config from
    /// it. A missing or unreadable file is an error.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        dotenvy::from_path(path).with_context(|| format!("loading {}", path.display()))?;
        Self::from_env()
    }

    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).unwrap_or_default();

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port: u16 = lookup("PORT").unwrap_or_else(|| "8000".to_string()).parse().context("PORT")?;

        let db_addr = match var("ADDR") {
            addr if addr.is_empty() => DEFAULT_DB_ADDR.to_string(),
            addr => addr,
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            db_user: var("DBUSER"),
            db_pass: var("DBPASS"),
            db_addr,
            db_name: var("DATABASE"),
            database_url_override: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
        })
    }

    pub fn database_url(&self) -> String {
        if let Some(url) = &self.database_url_override {
            return url.clone();
        }
        format!(
            "mysql://{}:{}@{}/{}",
            urlencoding::encode(&self.db_user),
            urlencoding::encode(&self.db_pass),
            self.db_addr,
            self.db_name,
        )
    }

    /// `database_url` with the password blanked, for logs.
    pub fn redacted_database_url(&self) -> String {
        if self.database_url_override.is_some() {
            return "<DATABASE_URL>".to_string();
        }
        format!(
            "mysql://{}:***@{}/{}",
            urlencoding::encode(&self.db_user),
            self.db_addr,
            self.db_name,
        )
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("db_user", &self.db_user)
            .field("db_pass", &"***")
            .field("db_addr", &self.db_addr)
            .field("db_name", &self.db_name)
            .field("database_url_override", &self.database_url_override.as_ref().map(|_| "***"))
            .finish()
    }
}

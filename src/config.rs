use config::{Config, ConfigError, Environment};
use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub db_path: String,
    pub host: String,
    pub port: u16,
    /// Fixed seed for quiz draws; entropy when unset.
    pub quiz_seed: Option<u64>,
}

impl Settings {
    /// Defaults, overridden by `TRIVIA_*` variables (a `.env` file is read first).
    /// `DB_PATH` is still honored as the default database path.
    pub fn load() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_env(Environment::with_prefix("TRIVIA").try_parsing(true))
    }

    fn from_env(env: Environment) -> Result<Self, ConfigError> {
        let db_path = dotenv::var("DB_PATH").unwrap_or_else(|_| "trivia.db".to_string());
        Config::builder()
            .set_default("db_path", db_path)?
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .add_source(env)
            .build()?
            .try_deserialize()
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

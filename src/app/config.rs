/// Centralized environment configuration.
/// All env vars and defaults are defined here.
#[derive(Debug, Clone)]
pub struct Config {
    /// Database connection URL. Required.
    pub database_url: String,

    /// How long a new or resent invitation stays open, in days.
    /// Default: 7
    pub invite_expiry_days: i64,
}

impl Config {
    /// Build config from environment variables.
    /// Returns an error if required vars are missing.
    pub fn from_env() -> Result<Self, String> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set in .env")?;

        let invite_expiry_days = std::env::var("INVITE_EXPIRY_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse::<i64>()
            .map_err(|_| "INVITE_EXPIRY_DAYS must be a number of days")?;

        Ok(Self {
            database_url,
            invite_expiry_days,
        })
    }

    /// Config for tests. Uses in-memory database URL.
    pub fn for_tests() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            invite_expiry_days: 7,
        }
    }
}

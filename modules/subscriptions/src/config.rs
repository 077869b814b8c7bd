use std::env;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoType {
    Postgres,
    InMemory,
}

impl RepoType {
    pub fn from_env() -> Self {
        match env::var("REPO_TYPE")
            .unwrap_or_else(|_| "inmemory".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" => RepoType::Postgres,
            "inmemory" => RepoType::InMemory,
            _ => {
                tracing::warn!("Unknown REPO_TYPE, defaulting to inmemory");
                RepoType::InMemory
            }
        }
    }
}

/// Application configuration parsed from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub repo_type: RepoType,
    pub database_url: Option<String>,
    pub host: String,
    pub port: u16,
    pub grace_period_days: i64,
    pub maintenance_config_url: Option<String>,
    pub maintenance_refresh_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        let repo_type = RepoType::from_env();

        let database_url = match repo_type {
            RepoType::Postgres => Some(
                env::var("DATABASE_URL")
                    .map_err(|_| "DATABASE_URL must be set when REPO_TYPE=postgres".to_string())?,
            ),
            RepoType::InMemory => None,
        };

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8087".to_string())
            .parse()
            .map_err(|_| "PORT must be a valid u16".to_string())?;

        let grace_period_days: i64 = env::var("GRACE_PERIOD_DAYS")
            .unwrap_or_else(|_| "7".to_string())
            .parse()
            .map_err(|_| "GRACE_PERIOD_DAYS must be an integer".to_string())?;

        if grace_period_days < 0 {
            return Err("GRACE_PERIOD_DAYS must be non-negative".to_string());
        }

        let maintenance_config_url = env::var("MAINTENANCE_CONFIG_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let maintenance_refresh_secs: u64 = env::var("MAINTENANCE_REFRESH_SECS")
            .unwrap_or_else(|_| "30".to_string())
            .parse()
            .map_err(|_| "MAINTENANCE_REFRESH_SECS must be a valid u64".to_string())?;

        if maintenance_refresh_secs == 0 {
            return Err("MAINTENANCE_REFRESH_SECS must be greater than zero".to_string());
        }

        Ok(Config {
            repo_type,
            database_url,
            host,
            port,
            grace_period_days,
            maintenance_config_url,
            maintenance_refresh_secs,
        })
    }
}

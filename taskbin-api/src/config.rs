/// Typed environment configuration
///
/// Everything the server needs comes from the environment (a `.env` file is
/// honored in development). Each section loads itself; `Config::from_env`
/// just stitches them together.
///
/// | Variable | Default | Meaning |
/// |---|---|---|
/// | `DATABASE_URL` | required | PostgreSQL connection string |
/// | `DATABASE_MAX_CONNECTIONS` | 10 | pool size |
/// | `API_HOST` | 0.0.0.0 | bind host |
/// | `API_PORT` | 8080 | bind port |
/// | `JWT_SECRET` | required, >= 32 chars | session-token signing key |
/// | `CORS_ORIGINS` | `*` | comma-separated allowed origins |

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};
use std::env;

/// Reads an environment variable, falling back to a default
fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Complete server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
}

/// Listener and CORS settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,

    /// Allowed CORS origins; a literal `*` switches to permissive mode
    pub cors_origins: Vec<String>,
}

/// Database settings; the rest of the pool tuning keeps its defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Session-token signing settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// HS256 key. Generate with `openssl rand -hex 32`; shorter keys are
    /// rejected at startup.
    pub secret: String,
}

impl ApiConfig {
    fn load() -> anyhow::Result<Self> {
        let port = env_or("API_PORT", "8080")
            .parse::<u16>()
            .context("API_PORT is not a valid port number")?;

        let cors_origins = env_or("CORS_ORIGINS", "*")
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            host: env_or("API_HOST", "0.0.0.0"),
            port,
            cors_origins,
        })
    }
}

impl DatabaseConfig {
    fn load() -> anyhow::Result<Self> {
        let url = env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

        let max_connections = env_or("DATABASE_MAX_CONNECTIONS", "10")
            .parse::<u32>()
            .context("DATABASE_MAX_CONNECTIONS is not a valid count")?;

        Ok(Self {
            url,
            max_connections,
        })
    }
}

impl JwtConfig {
    fn load() -> anyhow::Result<Self> {
        let secret = env::var("JWT_SECRET").context("JWT_SECRET must be set")?;

        if secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 characters");
        }

        Ok(Self { secret })
    }
}

impl Config {
    /// Assembles the configuration from the process environment
    pub fn from_env() -> anyhow::Result<Self> {
        // A .env file is a development convenience, never required
        dotenvy::dotenv().ok();

        Ok(Self {
            api: ApiConfig::load()?,
            database: DatabaseConfig::load()?,
            jwt: JwtConfig::load()?,
        })
    }

    /// `host:port` string for the TCP listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                max_connections: 10,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
        }
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        assert_eq!(test_config().bind_address(), "127.0.0.1:8080");
    }

    #[test]
    fn wildcard_origin_means_permissive_cors() {
        assert!(test_config().api.cors_origins.contains(&"*".to_string()));
    }

    #[test]
    fn env_or_prefers_default_when_unset() {
        assert_eq!(env_or("TASKBIN_TEST_UNSET_VAR", "fallback"), "fallback");
    }
}

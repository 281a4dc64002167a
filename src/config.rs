use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Process configuration loaded from environment variables.
///
/// | Env Var          | Default    |
/// |------------------|------------|
/// | `DATABASE_URL`   | required   |
/// | `JWT_SECRET`     | required   |
/// | `HOST`           | `0.0.0.0`  |
/// | `PORT`           | `8080`     |
/// | `SEED_DEMO_DATA` | `true`     |
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub jwt_secret: String,
    pub host: String,
    pub port: u16,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any name -> value source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let host = get("HOST").unwrap_or_else(|| "0.0.0.0".into());

        let port = match get("PORT") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
                name: "PORT",
                value: raw,
            })?,
            None => 8080,
        };

        let seed_demo_data = match get("SEED_DEMO_DATA").map(|v| v.to_ascii_lowercase()) {
            None => true,
            Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => true,
            Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => false,
            Some(value) => {
                return Err(ConfigError::Invalid {
                    name: "SEED_DEMO_DATA",
                    value,
                });
            }
        };

        Ok(Self {
            database_url,
            jwt_secret,
            host,
            port,
            seed_demo_data,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_apply() {
        let cfg = config(&[("DATABASE_URL", "postgres://x"), ("JWT_SECRET", "s")]).unwrap();
        assert_eq!(cfg.bind_addr(), "0.0.0.0:8080");
        assert!(cfg.seed_demo_data);
    }

    #[test]
    fn required_values_are_reported() {
        let err = config(&[("JWT_SECRET", "s")]).unwrap_err();
        assert_eq!(err.to_string(), "DATABASE_URL must be set");
        let err = config(&[("DATABASE_URL", "postgres://x"), ("JWT_SECRET", " ")]).unwrap_err();
        assert_eq!(err.to_string(), "JWT_SECRET must be set");
    }

    #[test]
    fn invalid_values_are_rejected() {
        let base = [("DATABASE_URL", "postgres://x"), ("JWT_SECRET", "s")];
        let mut vars = base.to_vec();
        vars.push(("PORT", "eighty"));
        assert!(matches!(
            config(&vars),
            Err(ConfigError::Invalid { name: "PORT", .. })
        ));

        let mut vars = base.to_vec();
        vars.push(("SEED_DEMO_DATA", "off"));
        assert!(!config(&vars).unwrap().seed_demo_data);
    }
}

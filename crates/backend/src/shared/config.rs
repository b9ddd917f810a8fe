use serde::Deserialize;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    /// Symmetric signing secret. Never defaulted.
    #[serde(default)]
    pub key: String,
    pub issuer: String,
    pub audience: String,
    /// Clock skew tolerated when checking `exp`
    #[serde(default)]
    pub leeway_seconds: u64,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &if self.key.is_empty() { "<unset>" } else { "<redacted>" })
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_seconds", &self.leeway_seconds)
            .finish()
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    /// Answer failed logins with 404 instead of 401 (existing clients expect 404)
    #[serde(default = "default_true")]
    pub legacy_not_found_status: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            legacy_not_found_status: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("required configuration value `{0}` is missing or empty")]
    Missing(&'static str),
}

/// Default configuration embedded in the binary.
/// There is no signing key here on purpose: it has to come from config.toml or JWT_KEY.
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000

[jwt]
key = ""
issuer = "jwt-auth-service"
audience = "jwt-auth-service-clients"
leeway_seconds = 0

[auth]
legacy_not_found_status = true
"#;

impl Config {
    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| anyhow::anyhow!("Invalid bind address {}: {}", addr, e))
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Current directory (for development)
/// 3. Falls back to embedded default config
///
/// Environment overrides (`JWT_KEY`, `JWT_ISSUER`, `JWT_AUDIENCE`, `SERVER_PORT`)
/// are applied on top of whichever source was used.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = match find_config_file() {
        Some(config_path) => {
            tracing::info!("Loading config from: {}", config_path.display());
            let contents = std::fs::read_to_string(&config_path)?;
            parse_config(&contents)?
        }
        None => {
            tracing::info!("Using default embedded configuration");
            parse_config(DEFAULT_CONFIG)?
        }
    };

    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;
    Ok(config)
}

pub fn parse_config(contents: &str) -> anyhow::Result<Config> {
    let config: Config = toml::from_str(contents)?;
    Ok(config)
}

fn find_config_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.push(exe_dir.join("config.toml"));
        }
    }
    candidates.push(PathBuf::from("config.toml"));

    for path in candidates {
        if path.exists() {
            return Some(path);
        }
        tracing::debug!("config.toml not found at: {}", path.display());
    }
    None
}

/// Apply environment overrides. `lookup` is injected so tests don't touch the process env.
pub fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> anyhow::Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(key) = lookup("JWT_KEY") {
        config.jwt.key = key;
    }
    if let Some(issuer) = lookup("JWT_ISSUER") {
        config.jwt.issuer = issuer;
    }
    if let Some(audience) = lookup("JWT_AUDIENCE") {
        config.jwt.audience = audience;
    }
    if let Some(port) = lookup("SERVER_PORT") {
        config.server.port = port
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid SERVER_PORT {:?}: {}", port, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.jwt.issuer, "jwt-auth-service");
        assert!(config.jwt.key.is_empty());
        assert_eq!(config.jwt.leeway_seconds, 0);
        assert!(config.auth.legacy_not_found_status);
    }

    #[test]
    fn test_auth_section_is_optional() {
        let config = parse_config(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [jwt]
            key = "k"
            issuer = "i"
            audience = "a"
            "#,
        )
        .unwrap();
        assert!(config.auth.legacy_not_found_status);
        assert_eq!(config.bind_addr().unwrap().port(), 8080);
    }

    #[test]
    fn test_env_overrides() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        let env: HashMap<&str, &str> = [
            ("JWT_KEY", "super-secret"),
            ("JWT_AUDIENCE", "mobile"),
            ("SERVER_PORT", "4000"),
        ]
        .into_iter()
        .collect();

        apply_env_overrides(&mut config, |name| env.get(name).map(|v| v.to_string())).unwrap();

        assert_eq!(config.jwt.key, "super-secret");
        assert_eq!(config.jwt.audience, "mobile");
        assert_eq!(config.jwt.issuer, "jwt-auth-service");
        assert_eq!(config.server.port, 4000);
    }

    #[test]
    fn test_invalid_port_override_fails() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        let result = apply_env_overrides(&mut config, |name| {
            (name == "SERVER_PORT").then(|| "not-a-port".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        config.jwt.key = "super-secret".into();
        let printed = format!("{:?}", config);
        assert!(!printed.contains("super-secret"));
    }
}

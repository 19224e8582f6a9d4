/*
 * Responsibility
 * - 環境変数や設定の読み込み (署名鍵、公開ルート、検証ポリシー、待ち受けポート)
 * - 設定値のバリデーション (不足・不正なら起動失敗。リクエスト処理中には読まない)
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::services::auth::{PublicRoutes, SigningKey, VerifierPolicy};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

#[derive(Debug, Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,

    pub jwt_signing_key: SigningKey,
    pub verifier_policy: VerifierPolicy,
    pub public_routes: PublicRoutes,

    pub request_timeout: Duration,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_public_routes(raw: Option<String>) -> Result<PublicRoutes, ConfigError> {
    let Some(raw) = raw else {
        return Ok(PublicRoutes::default());
    };

    let prefixes = raw
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>();

    // "" or "/" would make every route public.
    if prefixes.iter().any(|p| !p.starts_with('/') || p == "/") {
        return Err(ConfigError::Invalid("PUBLIC_ROUTE_PREFIXES"));
    }

    Ok(PublicRoutes::new(prefixes))
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port: u16 = match lookup("PORT") {
            Some(s) => s.parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 8080,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(lookup("APP_ENV"));

        let secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        let jwt_signing_key = SigningKey::from_secret(&secret).map_err(|e| {
            tracing::error!(error = %e, "JWT_SECRET rejected");
            ConfigError::Invalid("JWT_SECRET")
        })?;

        let leeway_seconds = match lookup("JWT_LEEWAY_SECONDS") {
            Some(s) => s
                .parse::<u64>()
                .map_err(|_| ConfigError::Invalid("JWT_LEEWAY_SECONDS"))?,
            None => 0,
        };

        let verifier_policy = VerifierPolicy {
            issuer: non_empty(lookup("JWT_ISSUER")),
            audience: non_empty(lookup("JWT_AUDIENCE")),
            leeway_seconds,
        };

        let public_routes = parse_public_routes(lookup("PUBLIC_ROUTE_PREFIXES"))?;

        let request_timeout = lookup("REQUEST_TIMEOUT_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Ok(Self {
            addr,
            app_env,
            jwt_signing_key,
            verifier_policy,
            public_routes,
            request_timeout,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    fn load(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = load(&[("JWT_SECRET", SECRET)]).unwrap();
        assert_eq!(config.addr.port(), 8080);
        assert_eq!(config.app_env, AppEnv::Development);
        assert_eq!(config.public_routes, PublicRoutes::default());
        assert_eq!(config.verifier_policy, VerifierPolicy::default());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
    }

    #[test]
    fn secret_is_required_and_must_be_strong() {
        assert_eq!(load(&[]).unwrap_err(), ConfigError::Missing("JWT_SECRET"));
        assert_eq!(
            load(&[("JWT_SECRET", "too-short")]).unwrap_err(),
            ConfigError::Invalid("JWT_SECRET")
        );
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let config = load(&[("JWT_SECRET", SECRET)]).unwrap();
        assert!(!format!("{config:?}").contains(SECRET));
    }

    #[test]
    fn public_prefixes_override() {
        let config = load(&[
            ("JWT_SECRET", SECRET),
            ("PUBLIC_ROUTE_PREFIXES", " /health , /docs ,"),
        ])
        .unwrap();
        assert_eq!(config.public_routes.prefixes(), &["/health", "/docs"]);
    }

    #[test]
    fn public_prefixes_cannot_open_everything() {
        for raw in ["/", "health", "/ok,api"] {
            assert_eq!(
                load(&[("JWT_SECRET", SECRET), ("PUBLIC_ROUTE_PREFIXES", raw)]).unwrap_err(),
                ConfigError::Invalid("PUBLIC_ROUTE_PREFIXES"),
                "{raw}"
            );
        }
    }

    #[test]
    fn verifier_policy_from_env() {
        let config = load(&[
            ("JWT_SECRET", SECRET),
            ("JWT_ISSUER", "university-erp"),
            ("JWT_AUDIENCE", " "),
            ("JWT_LEEWAY_SECONDS", "5"),
            ("APP_ENV", "PROD"),
        ])
        .unwrap();
        assert_eq!(
            config.verifier_policy,
            VerifierPolicy {
                issuer: Some("university-erp".into()),
                audience: None,
                leeway_seconds: 5,
            }
        );
        assert!(config.app_env.is_production());
    }

    #[test]
    fn invalid_numbers_are_rejected() {
        assert_eq!(
            load(&[("JWT_SECRET", SECRET), ("PORT", "http")]).unwrap_err(),
            ConfigError::Invalid("PORT")
        );
        assert_eq!(
            load(&[("JWT_SECRET", SECRET), ("JWT_LEEWAY_SECONDS", "-1")]).unwrap_err(),
            ConfigError::Invalid("JWT_LEEWAY_SECONDS")
        );
    }
}

/*
 * Responsibility
 * - 認証不要ルートの判定 (prefix の固定リスト、起動時に確定)
 * - 正規表現は使わない (設定ミスで公開範囲が広がるのを避ける)
 */

/// Prefixes that bypass authentication unless overridden by configuration.
pub const DEFAULT_PUBLIC_PREFIXES: &[&str] = &[
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/refresh",
    "/api/auth/forgot-password",
    "/actuator",
    "/swagger-ui",
    "/v3/api-docs",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    Public,
    Protected,
}

/// Ordered, immutable allowlist of public path prefixes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicRoutes {
    prefixes: Vec<String>,
}

impl PublicRoutes {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            prefixes: prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }

    /// Case-sensitive prefix match against the raw request path.
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.prefixes.iter().any(|p| path.starts_with(p.as_str())) {
            RouteClass::Public
        } else {
            RouteClass::Protected
        }
    }
}

impl Default for PublicRoutes {
    fn default() -> Self {
        Self::new(DEFAULT_PUBLIC_PREFIXES.iter().copied())
    }
}

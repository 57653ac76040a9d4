use anyhow::{bail, Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string, including credentials.
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Upper bound on pooled connections behind the reading store.
    pub db_max_connections: u32,
    /// Upper bound on HTTP requests being served at the same time.
    pub max_concurrent_requests: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a `Config` from an arbitrary key lookup.
    ///
    /// `from_env` delegates here; tests pass a map instead of touching the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(lookup);

        Ok(Self {
            database_url: vars.required("DATABASE_URL")?,
            server_host: vars.optional("SERVER_HOST", "0.0.0.0"),
            server_port: vars
                .optional("SERVER_PORT", "8080")
                .parse()
                .context("SERVER_PORT must be a valid port number")?,
            db_max_connections: positive(
                "DATABASE_MAX_CONNECTIONS",
                &vars.optional("DATABASE_MAX_CONNECTIONS", "10"),
            )?,
            max_concurrent_requests: positive(
                "MAX_CONCURRENT_REQUESTS",
                &vars.optional("MAX_CONCURRENT_REQUESTS", "64"),
            )?,
        })
    }
}

struct Vars<F>(F);

impl<F> Vars<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn required(&self, key: &str) -> Result<String> {
        (self.0)(key).with_context(|| format!("missing required env var: {key}"))
    }

    fn optional(&self, key: &str, default: &str) -> String {
        (self.0)(key).unwrap_or_else(|| default.to_owned())
    }
}

/// Parse a strictly positive integer setting.
fn positive<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
{
    let value: T = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("{key} must be a positive integer, got: {raw:?}"))?;
    if value == T::default() {
        bail!("{key} must be greater than zero");
    }
    Ok(value)
}

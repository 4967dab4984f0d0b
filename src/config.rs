use std::str::FromStr;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_JSON_LIMIT_BYTES: usize = 256 * 1024;

/// Runtime settings of the HTTP service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub bind_addr: String,
    pub log_filter: String,
    /// Largest accepted JSON body. Requests carry whole planting snapshots.
    pub json_limit_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.into(),
            log_filter: DEFAULT_LOG_FILTER.into(),
            json_limit_bytes: DEFAULT_JSON_LIMIT_BYTES,
        }
    }
}

impl AppConfig {
    /// Reads `.env` (if present) then the process environment.
    pub fn from_env() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            log::debug!("loaded environment from {}", path.display());
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: lookup("GARDEN_BIND_ADDR").unwrap_or(defaults.bind_addr),
            log_filter: lookup("GARDEN_LOG").unwrap_or(defaults.log_filter),
            json_limit_bytes: parse_or("GARDEN_JSON_LIMIT", &lookup, defaults.json_limit_bytes),
        }
    }
}

fn parse_or<T: FromStr + Copy>(key: &str, lookup: &impl Fn(&str) -> Option<String>, default: T) -> T {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("ignoring unparsable {key}={raw:?}");
            default
        }),
    }
}
